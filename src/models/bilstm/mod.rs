/// Model configuration
pub mod config;

/// Bidirectional LSTM encoder
pub mod encoder;

/// Classifier model and train/valid steps
pub mod model;

pub use config::Config;
pub use encoder::{BiLstm, BiLstmLayer};
pub use model::{Model, ModelRecord};
