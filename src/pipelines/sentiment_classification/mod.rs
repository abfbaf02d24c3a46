/// Batcher
pub mod batcher;

/// Training and evaluation configuration
pub mod config;

/// Training
pub mod training;

/// Evaluation over the test split
pub mod evaluation;

/// Inference on raw reviews
pub mod inference;

/// Saving and loading model artifacts
pub mod artifacts;

pub use batcher::Batcher;
pub use evaluation::{evaluate, Evaluation};
pub use inference::infer;
pub use training::train;
