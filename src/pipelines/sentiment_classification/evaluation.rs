use std::{fmt::Display, sync::Arc};

use burn::{
    data::{
        dataloader::{DataLoader, DataLoaderBuilder},
        dataset::Dataset as _,
    },
    nn::loss::CrossEntropyLossConfig,
    tensor::{
        backend::{AutodiffBackend, Backend},
        ElementConversion,
    },
};

use crate::{datasets::imdb, models::bilstm::Model, utils::classes::argmax_rows};

use super::{
    artifacts,
    batcher::Train,
    config::{artifact_dir, Testing},
    Batcher,
};

/// Aggregate loss and accuracy over an evaluated dataset
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Evaluation {
    /// Cross-entropy loss summed over every example
    pub loss_sum: f64,

    /// Number of examples whose predicted class matched the label
    pub correct: usize,

    /// Number of examples evaluated
    pub total: usize,
}

impl Evaluation {
    /// Fold one batch into the totals
    pub fn record(&mut self, loss_sum: f64, predictions: &[usize], targets: &[usize]) {
        debug_assert_eq!(predictions.len(), targets.len());

        self.loss_sum += loss_sum;
        self.correct += predictions
            .iter()
            .zip(targets)
            .filter(|(prediction, target)| prediction == target)
            .count();
        self.total += targets.len();
    }

    /// Summed loss divided by the number of examples
    pub fn mean_loss(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }

        self.loss_sum / self.total as f64
    }

    /// Fraction of examples classified correctly, in `[0, 1]`
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }

        self.correct as f64 / self.total as f64
    }
}

impl Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Test set: Average loss: {:.4}, Accuracy: {}/{} ({:.0}%)",
            self.mean_loss(),
            self.correct,
            self.total,
            100.0 * self.accuracy()
        )
    }
}

/// Number of batches needed to cover `len` items
pub fn batch_count(len: usize, batch_size: usize) -> usize {
    len.div_ceil(batch_size)
}

/// Run the model forward over every batch, accumulating summed loss and correct predictions
pub fn evaluate_model<B: Backend>(
    model: &Model<B>,
    dataloader: Arc<dyn DataLoader<Train<B>>>,
) -> Evaluation {
    let mut evaluation = Evaluation::default();

    for batch in dataloader.iter() {
        let [batch_size] = batch.targets.dims();

        let logits = model.infer(batch.input);

        // The loss is averaged over the batch, scale it back up to a sum
        let loss = CrossEntropyLossConfig::new()
            .init(&logits.device())
            .forward(logits.clone(), batch.targets.clone());
        let loss_sum = loss.into_scalar().elem::<f64>() * batch_size as f64;

        let predictions = argmax_rows(
            &logits.into_data().convert::<f32>().value,
            model.n_classes,
        );

        let targets: Vec<usize> = batch
            .targets
            .into_data()
            .convert::<i64>()
            .value
            .into_iter()
            .map(|target| target as usize)
            .collect();

        evaluation.record(loss_sum, &predictions, &targets);

        log::debug!("Evaluated {} reviews", evaluation.total);
    }

    evaluation
}

/// Define evaluation function
pub fn evaluate<B: AutodiffBackend>(
    device: B::Device,           // Device on which to perform computation (e.g., CPU or CUDA device)
    dataset_test: imdb::Dataset, // Testing dataset
    config: Testing,             // Evaluation configuration
) -> anyhow::Result<Evaluation> {
    ensure!(config.batch_size > 0, "The batch size must be at least 1");

    let (model, _) = artifacts::load::<B>(&artifact_dir(&config.data_dir), &device)?;

    let total = dataset_test.len();

    // Sequential, single-threaded loading over the test split
    let dataloader = DataLoaderBuilder::new(Batcher::<B::InnerBackend>::new(device))
        .batch_size(config.batch_size)
        .build(dataset_test);

    log::info!(
        "Evaluating {} reviews in {} batches...",
        total,
        batch_count(total, config.batch_size)
    );

    Ok(evaluate_model(&model, dataloader))
}
