use burn::{
    data::dataloader::batcher::Batcher as _,
    tensor::{
        activation::softmax,
        backend::{AutodiffBackend, Backend},
    },
};

use crate::{
    models::bilstm::Model,
    utils::classes::{argmax_rows, sentiment_label},
};

use super::{artifacts, batcher::Infer, Batcher};

/// The predicted sentiment of a single review
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Index of the most probable class
    pub class_id: usize,

    /// Softmax probability of every class
    pub probabilities: Vec<f32>,
}

impl Prediction {
    /// The predicted class name
    pub fn label(&self) -> &'static str {
        sentiment_label(self.class_id)
    }

    /// Probability of the predicted class
    pub fn confidence(&self) -> f32 {
        self.probabilities[self.class_id]
    }
}

/// Classify preprocessed token sequences with an already loaded model
pub fn predict<B: Backend>(
    model: &Model<B>,
    device: &B::Device,
    samples: Vec<Vec<usize>>,
) -> Vec<Prediction> {
    if samples.is_empty() {
        return Vec::new();
    }

    let batcher = Batcher::<B>::new(device.clone());
    let item: Infer<B> = batcher.batch(samples); // Batch samples using the batcher

    let probabilities = softmax(model.infer(item), 1)
        .into_data()
        .convert::<f32>()
        .value;

    let class_ids = argmax_rows(&probabilities, model.n_classes);

    probabilities
        .chunks(model.n_classes)
        .zip(class_ids)
        .map(|(row, class_id)| Prediction {
            class_id,
            probabilities: row.to_vec(),
        })
        .collect()
}

/// Define inference function
pub fn infer<B: AutodiffBackend>(
    device: B::Device,        // Device on which to perform computation (e.g., CPU or CUDA device)
    artifact_dir: &str,       // Directory containing model and config files
    samples: Vec<Vec<usize>>, // Preprocessed token sequences for inference
) -> anyhow::Result<Vec<Prediction>> {
    let (model, _) = artifacts::load::<B>(artifact_dir, &device)?;

    // Run inference on the given samples
    log::info!("Running inference on {} reviews...", samples.len());

    Ok(predict(&model, &device, samples))
}

#[cfg(test)]
mod tests {
    use burn::backend::NdArray;
    use pretty_assertions::assert_eq;

    use crate::{datasets::imdb::Item, models::bilstm};

    use super::*;

    type TestBackend = NdArray;

    #[test]
    fn returns_a_distribution_per_review() {
        let device = Default::default();
        let model = bilstm::Config::new()
            .with_max_words(32)
            .with_emb_size(4)
            .with_hid_size(4)
            .init::<TestBackend>(&device);

        let samples = vec![
            Item::from_raw(vec![1, 4, 9], 0).tokens,
            Item::from_raw(vec![1, 30, 2, 2, 7], 0).tokens,
        ];

        let predictions = predict(&model, &device, samples);

        assert_eq!(predictions.len(), 2);

        for prediction in predictions {
            let total: f32 = prediction.probabilities.iter().sum();

            assert_eq!(prediction.probabilities.len(), 2);
            assert!((total - 1.0).abs() < 1e-5);
            assert!(prediction.confidence() >= 0.5);
            assert!(["negative", "positive"].contains(&prediction.label()));
        }
    }

    #[test]
    fn handles_empty_input() {
        let device = Default::default();
        let model = bilstm::Config::new()
            .with_max_words(8)
            .with_emb_size(2)
            .with_hid_size(2)
            .init::<TestBackend>(&device);

        assert_eq!(predict(&model, &device, Vec::new()), Vec::new());
    }
}
