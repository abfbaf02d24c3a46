use std::path::Path;

use burn::data::dataset::{self, Dataset as _, InMemDataset};
use derive_new::new;
use rand::{seq::index, Rng};
use serde::{Deserialize, Serialize};

use crate::utils::{
    files::read_text,
    sequences::{cap_vocabulary, pad_sequence},
};

use super::DatasetError;

/// Word index for encoding raw text and decoding token sequences
pub mod word_index;

pub use word_index::WordIndex;

/// The name of the IMDB dataset
pub static DATASET: &str = "imdb";

/// Vocabulary size; rarer words are replaced with [`OOV_TOKEN`]
pub const MAX_WORDS: usize = 10_000;

/// Length of every preprocessed sequence
pub const MAX_LEN: usize = 200;

/// Index used to pad short sequences
pub const PAD_TOKEN: usize = 0;

/// Index marking the start of a review
pub const START_TOKEN: usize = 1;

/// Index for out-of-vocabulary words
pub const OOV_TOKEN: usize = 2;

/// Offset between a word's frequency rank and its token index
pub const INDEX_FROM: usize = 3;

/// A raw CSV row: space separated token indices and a 0/1 label
#[derive(Clone, Debug, Serialize, Deserialize, new)]
pub struct Row {
    /// Space separated token indices
    pub tokens: String,

    /// 0 for a negative review, 1 for a positive one
    pub label: i64,
}

/// A preprocessed review
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Item {
    /// Token indices, always exactly [`MAX_LEN`] long
    pub tokens: Vec<usize>,

    /// 0 for a negative review, 1 for a positive one
    pub label: usize,
}

impl Item {
    /// Preprocess raw token indices: cap the vocabulary, then pad or truncate at the end
    pub fn from_raw(mut tokens: Vec<usize>, label: usize) -> Self {
        cap_vocabulary(&mut tokens, MAX_WORDS, OOV_TOKEN);

        Self {
            tokens: pad_sequence(&tokens, MAX_LEN, PAD_TOKEN),
            label,
        }
    }

    /// Parse and preprocess a CSV row
    pub fn try_from_row(row: Row, index: usize) -> Result<Self, DatasetError> {
        let tokens = row
            .tokens
            .split_whitespace()
            .map(|token| {
                token.parse::<usize>().map_err(|_| DatasetError::Token {
                    row: index,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let label = match row.label {
            0 | 1 => row.label as usize,
            label => return Err(DatasetError::Label { row: index, label }),
        };

        Ok(Self::from_raw(tokens, label))
    }
}

/// Struct for the IMDB dataset
pub struct Dataset {
    /// Underlying In-Memory dataset
    dataset: InMemDataset<Item>,
}

/// Implement the Dataset trait for the IMDB dataset
impl dataset::Dataset<Item> for Dataset {
    /// Returns a specific item from the dataset
    fn get(&self, index: usize) -> Option<Item> {
        self.dataset.get(index)
    }

    /// Returns the length of the dataset
    fn len(&self) -> usize {
        self.dataset.len()
    }
}

// Implement methods for constructing the IMDB dataset
impl Dataset {
    /// Constructs the dataset for a mode (either "train" or "test")
    pub async fn load(data_dir: &str, mode: &str) -> Result<Self, DatasetError> {
        let path = format!("{}/datasets/{}/{}.csv", data_dir, DATASET, mode);

        let dataset = Self::from_csv(&path).await?;

        log::info!("Loaded {} {} reviews from {}", dataset.len(), mode, path);

        Ok(dataset)
    }

    /// Read and preprocess every row of a CSV file with `tokens,label` columns
    pub async fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let display = path.as_ref().display().to_string();

        let text = read_text(&path).await.map_err(|source| DatasetError::Io {
            path: display.clone(),
            source,
        })?;

        let mut reader = csv::ReaderBuilder::new().from_reader(text.as_bytes());

        let items = reader
            .deserialize::<Row>()
            .enumerate()
            .map(|(index, row)| {
                let row = row.map_err(|source| DatasetError::Csv {
                    path: display.clone(),
                    source,
                })?;

                Item::try_from_row(row, index)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_items(items))
    }

    /// Wrap already preprocessed items
    pub fn from_items(items: Vec<Item>) -> Self {
        Self {
            dataset: InMemDataset::new(items),
        }
    }

    /// The `(examples, sequence length)` shape of the preprocessed dataset
    pub fn shape(&self) -> (usize, usize) {
        (self.len(), MAX_LEN)
    }

    /// Returns `count` distinct random items from the dataset
    pub fn get_samples<R: Rng>(&self, rng: &mut R, count: usize) -> Vec<Item> {
        let count = count.min(self.len());

        index::sample(rng, self.len(), count)
            .into_iter()
            .filter_map(|i| self.get(i))
            .collect()
    }
}
