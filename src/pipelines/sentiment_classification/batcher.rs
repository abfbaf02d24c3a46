use burn::{
    data::dataloader,
    tensor::{backend::Backend, Data, ElementConversion, Int, Shape, Tensor},
};
use derive_new::new;

use crate::{
    datasets::imdb::{self, Item},
    utils::tensors::stack_sequences,
};

/// An inference batch for sentiment classification
#[derive(Debug, Clone, new)]
pub struct Infer<B: Backend> {
    /// Token indices as 2D tensor: [batch_size, max_seq_length]
    pub tokens: Tensor<B, 2, Int>,
}

/// A training batch for sentiment classification
#[derive(Clone, Debug, new)]
pub struct Train<B: Backend> {
    /// Model input
    pub input: Infer<B>,

    /// Class ids for the batch: [batch_size]
    pub targets: Tensor<B, 1, Int>,
}

/// Struct for batching preprocessed reviews
#[derive(Clone, new)]
pub struct Batcher<B: Backend> {
    /// Device on which to perform computation (e.g., CPU or CUDA device)
    device: B::Device,
}

/// Implement Batcher trait for Batcher struct for inference
impl<B: Backend> dataloader::batcher::Batcher<Vec<usize>, Infer<B>> for Batcher<B> {
    /// Collects preprocessed token sequences into an inference batch
    fn batch(&self, items: Vec<Vec<usize>>) -> Infer<B> {
        Infer {
            tokens: stack_sequences(&items, imdb::MAX_LEN, &self.device),
        }
    }
}

/// Implement Batcher trait for Batcher struct for training
impl<B: Backend> dataloader::batcher::Batcher<Item, Train<B>> for Batcher<B> {
    /// Collects preprocessed reviews into a training batch
    fn batch(&self, items: Vec<Item>) -> Train<B> {
        let batch_size = items.len();

        let labels: Vec<B::IntElem> = items
            .iter()
            .map(|item| (item.label as i64).elem())
            .collect();

        let tokens: Vec<Vec<usize>> = items.into_iter().map(|item| item.tokens).collect();
        let input: Infer<B> = self.batch(tokens);

        let targets = Tensor::from_data(Data::new(labels, Shape::new([batch_size])), &self.device);

        // Create and return training batch
        Train { input, targets }
    }
}

#[cfg(test)]
mod tests {
    use burn::{backend::NdArray, data::dataloader::batcher::Batcher as _};
    use pretty_assertions::assert_eq;

    use super::*;

    type TestBackend = NdArray;

    #[test]
    fn batches_reviews_and_labels() {
        let batcher = Batcher::<TestBackend>::new(Default::default());
        let items = vec![
            Item::from_raw(vec![1, 5, 9], 1),
            Item::from_raw((1..=250).collect(), 0),
        ];

        let batch: Train<TestBackend> = batcher.batch(items);

        assert_eq!(batch.input.tokens.dims(), [2, imdb::MAX_LEN]);
        assert_eq!(batch.targets.dims(), [2]);
        assert_eq!(batch.targets.into_data().convert::<i64>().value, vec![1, 0]);

        let tokens = batch.input.tokens.into_data().convert::<i64>().value;
        assert_eq!(&tokens[..4], &[1, 5, 9, 0]);
        assert_eq!(tokens[imdb::MAX_LEN], 1);
        assert_eq!(tokens[2 * imdb::MAX_LEN - 1], 200);
    }
}
