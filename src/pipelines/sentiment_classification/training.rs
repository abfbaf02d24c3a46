use burn::{
    data::{dataloader::DataLoaderBuilder, dataset::Dataset as _},
    optim::AdamConfig,
    record::CompactRecorder,
    tensor::backend::AutodiffBackend,
    train::{
        metric::{AccuracyMetric, CudaMetric, LearningRateMetric, LossMetric},
        LearnerBuilder,
    },
};

use crate::{datasets::imdb, utils::renderer};

use super::{artifacts, config::artifact_dir, Batcher};

/// Training Config
pub type Config = super::config::Training;

/// Define train function
pub fn train<B: AutodiffBackend>(
    devices: Vec<B::Device>,      // Device on which to perform computation (e.g., CPU or CUDA device)
    dataset_train: imdb::Dataset, // Training dataset
    dataset_test: imdb::Dataset,  // Testing dataset
    config: Config,               // Experiment configuration
    use_tui: bool,                // Render metrics in the terminal UI instead of the log
) -> anyhow::Result<()> {
    ensure!(config.batch_size > 0, "The batch size must be at least 1");

    let device = &devices[0];
    let artifact_dir = artifact_dir(&config.data_dir);

    let model = config.model.init::<B>(device);

    log::info!(
        "Training on {} reviews, validating on {}",
        dataset_train.len(),
        dataset_test.len()
    );

    // Initialize batchers for training and testing data
    let batcher_train = Batcher::<B>::new(device.clone());
    let batcher_test = Batcher::<B::InnerBackend>::new(device.clone());

    // Initialize data loaders for training and testing data
    let dataloader_train = DataLoaderBuilder::new(batcher_train)
        .batch_size(config.batch_size)
        .shuffle(config.seed)
        .build(dataset_train);

    let dataloader_test = DataLoaderBuilder::new(batcher_test)
        .batch_size(config.batch_size)
        .build(dataset_test);

    // Initialize optimizer
    let optimizer = AdamConfig::new().init();

    // Initialize learner
    let mut builder = LearnerBuilder::new(&artifact_dir)
        .metric_train(CudaMetric::new())
        .metric_valid(CudaMetric::new())
        .metric_train_numeric(AccuracyMetric::new())
        .metric_valid_numeric(AccuracyMetric::new())
        .metric_train_numeric(LossMetric::new())
        .metric_valid_numeric(LossMetric::new())
        .metric_train_numeric(LearningRateMetric::new())
        .with_file_checkpointer(CompactRecorder::new())
        .devices(devices)
        .num_epochs(config.num_epochs)
        .summary();

    if !use_tui {
        builder = builder.renderer(renderer::Simple::new());
    }

    let learner = builder.build(model, optimizer, config.learning_rate);

    // Train the model
    let model_trained = learner.fit(dataloader_train, dataloader_test);

    // Save the configuration and the trained model
    artifacts::save(model_trained, &config.model, &artifact_dir)?;

    Ok(())
}
