use burn::{
    nn::{lstm::LstmConfig, DropoutConfig, EmbeddingConfig, LinearConfig},
    tensor::backend::Backend,
};

use crate::datasets::imdb;

use super::{encoder::BiLstmLayer, BiLstm, Model};

/// The Model Configuration
#[derive(burn::config::Config, Debug)]
pub struct Config {
    /// Size of the vocabulary
    #[config(default = "imdb::MAX_WORDS")]
    pub max_words: usize,

    /// Size of each token embedding
    #[config(default = 128)]
    pub emb_size: usize,

    /// Size of the LSTM hidden state in each direction
    #[config(default = 128)]
    pub hid_size: usize,

    /// Number of stacked bidirectional LSTM layers
    #[config(default = 2)]
    pub num_layers: usize,

    /// Dropout applied after the embedding and after the encoder
    #[config(default = 0.2)]
    pub dropout: f64,

    /// Number of output classes
    #[config(default = 2)]
    pub n_classes: usize,
}

impl Config {
    /// Initializes the classifier with fresh weights
    pub fn init<B: Backend>(&self, device: &B::Device) -> Model<B> {
        let layers = (0..self.num_layers)
            .map(|layer| {
                let d_input = if layer == 0 {
                    self.emb_size
                } else {
                    self.hid_size * 2
                };

                BiLstmLayer::new(
                    LstmConfig::new(d_input, self.hid_size, true).init(device),
                    LstmConfig::new(d_input, self.hid_size, true).init(device),
                )
            })
            .collect();

        Model {
            embedding: EmbeddingConfig::new(self.max_words, self.emb_size).init(device),
            encoder: BiLstm::new(layers),
            dropout: DropoutConfig::new(self.dropout).init(),
            fc1: LinearConfig::new(self.hid_size * 2, self.hid_size).init(device),
            fc2: LinearConfig::new(self.hid_size, self.n_classes).init(device),
            n_classes: self.n_classes,
        }
    }
}

#[cfg(test)]
mod tests {
    use burn::{backend::NdArray, config::Config as _};
    use pretty_assertions::assert_eq;

    use crate::utils::checkpoint::parameter_shapes;

    use super::*;

    #[test]
    fn defaults_match_the_imdb_classifier() {
        let config = Config::new();

        assert_eq!(config.max_words, 10_000);
        assert_eq!(config.emb_size, 128);
        assert_eq!(config.hid_size, 128);
        assert_eq!(config.num_layers, 2);
        assert_eq!(config.dropout, 0.2);
        assert_eq!(config.n_classes, 2);
    }

    #[test]
    fn survives_a_json_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        let path =
            std::env::temp_dir().join(format!("bilstm-config-{}.json", std::process::id()));
        let config = Config::new().with_hid_size(64).with_dropout(0.5);

        config.save(&path)?;
        let loaded = Config::load(&path).map_err(|e| e.to_string());
        std::fs::remove_file(&path)?;
        let loaded = loaded?;

        assert_eq!(loaded.hid_size, 64);
        assert_eq!(loaded.dropout, 0.5);
        assert_eq!(loaded.max_words, 10_000);

        Ok(())
    }

    #[test]
    fn sizes_the_embedding_table_and_dense_layers() {
        let device = Default::default();
        let config = Config::new()
            .with_max_words(50)
            .with_emb_size(8)
            .with_hid_size(4);

        let model = config.init::<NdArray>(&device);
        let shapes = parameter_shapes(&model);

        assert_eq!(shapes.first(), Some(&vec![50, 8]));
        assert_eq!(
            shapes[shapes.len() - 4..].to_vec(),
            vec![vec![8, 4], vec![4], vec![4, 2], vec![2]]
        );
    }
}
