use std::path::Path;

use burn::{
    config::Config as _,
    module::AutodiffModule,
    tensor::backend::{AutodiffBackend, Backend},
};

use crate::{
    models::bilstm,
    utils::checkpoint::{self, CheckpointError},
};

/// File name of the model configuration inside an artifact directory
pub static CONFIG_FILE: &str = "config.json";

/// File stem of the checkpoint inside an artifact directory
pub static MODEL_FILE: &str = "model";

/// Save the model configuration and trained weights to an artifact directory
pub fn save<B: Backend>(
    model: bilstm::Model<B>,
    config: &bilstm::Config,
    artifact_dir: &str,
) -> anyhow::Result<()> {
    let dir = Path::new(artifact_dir);

    std::fs::create_dir_all(dir)?;

    config
        .save(dir.join(CONFIG_FILE))
        .map_err(|e| anyhow!("Unable to save config file: {}", e))?;

    checkpoint::save(model, &dir.join(MODEL_FILE))
        .map_err(|e| anyhow!("Unable to save trained model weights: {}", e))?;

    log::info!("Saved model artifacts to {}", artifact_dir);

    Ok(())
}

/// Restore a trained model in evaluation mode.
///
/// The model is constructed, switched to evaluation mode, and only then given its trained
/// weights. Evaluation mode is the inner backend: no gradient tracking, dropout is the identity.
pub fn load<B: AutodiffBackend>(
    artifact_dir: &str,
    device: &B::Device,
) -> anyhow::Result<(bilstm::Model<B::InnerBackend>, bilstm::Config)> {
    let dir = Path::new(artifact_dir);

    // Load model configuration
    let config = bilstm::Config::load(dir.join(CONFIG_FILE))
        .map_err(|e| anyhow!("Unable to load config file: {}", e))?;

    log::info!("Creating model...");

    let model = config.init::<B>(device).valid();

    log::info!("Loading weights...");

    let model = restore_weights(model, &dir.join(MODEL_FILE), device)
        .map_err(|e| anyhow!("Unable to load trained model weights: {}", e))?;

    log::debug!("{}", model);

    Ok((model, config))
}

/// Apply a checkpoint to a freshly constructed model.
///
/// The layer stack is the only part of the model whose length is not fixed by its shapes, so
/// the stored layer count is checked before any weights are applied.
fn restore_weights<B: Backend>(
    model: bilstm::Model<B>,
    path: &Path,
    device: &B::Device,
) -> Result<bilstm::Model<B>, CheckpointError> {
    let record = checkpoint::read_record::<B, bilstm::Model<B>>(path, device)?;

    let expected = model.encoder.layers.len();
    let found = record.encoder.layers.len();
    if expected != found {
        return Err(CheckpointError::LayerCount { expected, found });
    }

    checkpoint::restore(model, record)
}
