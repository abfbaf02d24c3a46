use burn::{
    module::Module,
    nn::lstm::Lstm,
    tensor::{backend::Backend, Tensor},
};
use derive_new::new;

use crate::utils::tensors::reversed_indices;

/// One bidirectional LSTM layer: an LSTM reading the sequence front to back and another
/// reading it back to front
#[derive(Module, Debug, new)]
pub struct BiLstmLayer<B: Backend> {
    /// LSTM over the sequence in its original order
    pub forward_lstm: Lstm<B>,

    /// LSTM over the time-reversed sequence
    pub backward_lstm: Lstm<B>,
}

impl<B: Backend> BiLstmLayer<B> {
    /// `[batch_size, seq_length, d_input]` -> `[batch_size, seq_length, 2 * d_hidden]`
    pub fn forward(&self, input: Tensor<B, 3>) -> Tensor<B, 3> {
        let [_batch_size, seq_length, _d_input] = input.dims();
        let reverse = reversed_indices::<B>(seq_length, &input.device());

        let (_, forward) = self.forward_lstm.forward(input.clone(), None);

        let (_, backward) = self
            .backward_lstm
            .forward(input.select(1, reverse.clone()), None);

        // Line the backward hidden states up with the time step they belong to
        let backward = backward.select(1, reverse);

        Tensor::cat(vec![forward, backward], 2)
    }
}

/// Stacked bidirectional LSTM layers, without dropout between layers
#[derive(Module, Debug, new)]
pub struct BiLstm<B: Backend> {
    /// Layers in application order
    pub layers: Vec<BiLstmLayer<B>>,
}

impl<B: Backend> BiLstm<B> {
    /// `[batch_size, seq_length, d_input]` -> `[batch_size, seq_length, 2 * d_hidden]`
    pub fn forward(&self, input: Tensor<B, 3>) -> Tensor<B, 3> {
        self.layers
            .iter()
            .fold(input, |hidden, layer| layer.forward(hidden))
    }
}
