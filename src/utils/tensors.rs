use burn::tensor::{backend::Backend, Data, ElementConversion, Int, Shape, Tensor};

/// Stack equal-length token sequences into a `[batch_size, seq_length]` tensor
pub fn stack_sequences<B: Backend>(
    sequences: &[Vec<usize>],
    seq_length: usize,
    device: &B::Device,
) -> Tensor<B, 2, Int> {
    let batch_size = sequences.len();

    let values: Vec<B::IntElem> = sequences
        .iter()
        .flat_map(|tokens| {
            debug_assert_eq!(tokens.len(), seq_length);
            tokens.iter()
        })
        .map(|token| (*token as i64).elem())
        .collect();

    Tensor::from_data(
        Data::new(values, Shape::new([batch_size, seq_length])),
        device,
    )
}

/// A 1D index tensor counting down from `length - 1` to `0`, for reversing a dimension
/// with `Tensor::select`
pub fn reversed_indices<B: Backend>(length: usize, device: &B::Device) -> Tensor<B, 1, Int> {
    let values: Vec<B::IntElem> = (0..length).rev().map(|i| (i as i64).elem()).collect();

    Tensor::from_data(Data::new(values, Shape::new([length])), device)
}
