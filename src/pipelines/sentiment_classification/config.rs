use burn::LearningRate;

use crate::{datasets::imdb, models::bilstm};

/// Define configuration struct for the experiment
#[derive(burn::config::Config)]
pub struct Training {
    /// The model to train
    pub model: bilstm::Config,

    /// Batch size
    #[config(default = 256)]
    pub batch_size: usize,

    /// Number of epochs
    #[config(default = 10)]
    pub num_epochs: usize,

    /// Constant learning rate for Adam
    #[config(default = 1e-3)]
    pub learning_rate: LearningRate,

    /// Seed for shuffling the training split
    #[config(default = 42)]
    pub seed: u64,

    /// The location of the top-level data directory
    #[config(default = "\"data\".to_string()")]
    pub data_dir: String,
}

/// Define configuration struct for scoring a trained model on the test split
#[derive(burn::config::Config)]
pub struct Testing {
    /// Batch size
    #[config(default = 256)]
    pub batch_size: usize,

    /// The location of the top-level data directory
    #[config(default = "\"data\".to_string()")]
    pub data_dir: String,
}

/// The directory holding `config.json` and the model checkpoint
pub fn artifact_dir(data_dir: &str) -> String {
    format!("{}/{}/model", data_dir, imdb::DATASET)
}
