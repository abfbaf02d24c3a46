use burn::{
    module::Module,
    nn::{loss::CrossEntropyLossConfig, Dropout, Embedding, Linear},
    tensor::{
        activation::relu,
        backend::{AutodiffBackend, Backend},
        Int, Tensor,
    },
    train::{ClassificationOutput, TrainOutput, TrainStep, ValidStep},
};

use crate::pipelines::sentiment_classification::batcher::{Infer, Train};

use super::BiLstm;

/// Bidirectional LSTM for sentiment classification
#[derive(Module, Debug)]
pub struct Model<B: Backend> {
    /// Token embedding table
    pub embedding: Embedding<B>,

    /// Stacked bidirectional LSTM encoder
    pub encoder: BiLstm<B>,

    /// Dropout after the embedding and after the encoder, identity outside of training
    pub dropout: Dropout,

    /// Projection of both directions' hidden states down to the hidden size
    pub fc1: Linear<B>,

    /// Linear layer for sequence classification
    pub fc2: Linear<B>,

    /// Total number of classes
    pub n_classes: usize,
}

/// Define model behavior
impl<B: Backend> Model<B> {
    /// Raw class scores: `[batch_size, seq_length]` -> `[batch_size, n_classes]`
    pub fn logits(&self, tokens: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let [batch_size, _seq_length] = tokens.dims();

        let x = self.embedding.forward(tokens); // [bs, seq, emb]
        let x = self.dropout.forward(x);
        let x = self.encoder.forward(x); // [bs, seq, 2 * hid]
        let x = self.dropout.forward(x);
        let x = relu(self.fc1.forward(x)); // [bs, seq, hid]

        let [_, _, d_hidden] = x.dims();

        // Average pool over time
        let x = x.mean_dim(1).reshape([batch_size, d_hidden]);

        self.fc2.forward(x)
    }

    /// Defines forward pass for training
    pub fn forward(&self, item: Train<B>) -> ClassificationOutput<B> {
        let output = self.logits(item.input.tokens);
        let targets = item.targets.to_device(&output.device());

        let loss = CrossEntropyLossConfig::new()
            .init(&output.device())
            .forward(output.clone(), targets.clone());

        ClassificationOutput {
            loss,
            output,
            targets,
        }
    }

    /// Defines forward pass for inference
    pub fn infer(&self, input: Infer<B>) -> Tensor<B, 2> {
        self.logits(input.tokens)
    }
}

impl<B: AutodiffBackend> TrainStep<Train<B>, ClassificationOutput<B>> for Model<B> {
    fn step(&self, item: Train<B>) -> TrainOutput<ClassificationOutput<B>> {
        let item = self.forward(item);
        let grads = item.loss.backward();

        TrainOutput::new(self, grads, item)
    }
}

impl<B: Backend> ValidStep<Train<B>, ClassificationOutput<B>> for Model<B> {
    fn step(&self, item: Train<B>) -> ClassificationOutput<B> {
        self.forward(item)
    }
}

#[cfg(test)]
mod tests {
    use burn::{
        backend::{Autodiff, NdArray},
        data::dataloader::batcher::Batcher as _,
        module::AutodiffModule,
    };
    use pretty_assertions::assert_eq;

    use crate::{
        datasets::imdb::{Item, MAX_LEN},
        models::bilstm::Config,
        pipelines::sentiment_classification::Batcher,
    };

    use super::*;

    type TestBackend = NdArray;

    fn small_config() -> Config {
        Config::new()
            .with_max_words(64)
            .with_emb_size(8)
            .with_hid_size(4)
    }

    fn items(count: usize) -> Vec<Item> {
        (0..count)
            .map(|i| Item::from_raw((1..=(i * 7 % 40 + 3)).collect(), i % 2))
            .collect()
    }

    #[test]
    fn produces_two_scores_per_review() {
        let device = Default::default();
        let model = small_config().init::<TestBackend>(&device);
        let batcher = Batcher::<TestBackend>::new(device);

        let tokens: Vec<Vec<usize>> = items(3).into_iter().map(|item| item.tokens).collect();
        let batch: Infer<TestBackend> = batcher.batch(tokens);
        assert_eq!(batch.tokens.dims(), [3, MAX_LEN]);

        assert_eq!(model.infer(batch).dims(), [3, 2]);
    }

    #[test]
    fn keeps_the_batch_dimension_for_single_reviews() {
        let device = Default::default();
        let model = small_config().init::<TestBackend>(&device);
        let batcher = Batcher::<TestBackend>::new(device);

        let batch: Train<TestBackend> = batcher.batch(items(1));

        let output = model.forward(batch);

        assert_eq!(output.output.dims(), [1, 2]);
        assert_eq!(output.targets.dims(), [1]);
    }

    #[test]
    fn computes_a_non_negative_loss() {
        let device = Default::default();
        let model = small_config().init::<TestBackend>(&device);
        let batcher = Batcher::<TestBackend>::new(device);

        let batch: Train<TestBackend> = batcher.batch(items(4));

        let loss: f32 = model.forward(batch).loss.into_scalar();

        assert!(loss >= 0.0);
    }

    #[test]
    fn evaluation_mode_is_deterministic() {
        let device = Default::default();
        let model = small_config()
            .with_dropout(0.5)
            .init::<Autodiff<TestBackend>>(&device)
            .valid();
        let batcher = Batcher::<TestBackend>::new(device);

        let tokens: Vec<Vec<usize>> = items(2).into_iter().map(|item| item.tokens).collect();
        let first: Infer<TestBackend> = batcher.batch(tokens.clone());
        let second: Infer<TestBackend> = batcher.batch(tokens);

        let first = model.infer(first).into_data().convert::<f32>().value;
        let second = model.infer(second).into_data().convert::<f32>().value;

        assert_eq!(first, second);
    }
}
