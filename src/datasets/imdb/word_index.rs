use std::{collections::HashMap, path::Path};

use crate::{
    datasets::DatasetError,
    utils::{classes::invert_map, files::read_text},
};

use super::{Item, DATASET, INDEX_FROM, MAX_WORDS, OOV_TOKEN, PAD_TOKEN, START_TOKEN};

/// Characters stripped from raw text before splitting into words
const FILTERS: &str = "!\"#$%&()*+,-./:;<=>?@[\\]^_`{|}~";

/// Maps words to token indices and back, following the frequency ranks of the IMDB word index
#[derive(Clone, Debug)]
pub struct WordIndex {
    /// Word to frequency rank (1 is the most frequent word)
    ranks: HashMap<String, usize>,

    /// Frequency rank to word
    words: HashMap<usize, String>,
}

impl WordIndex {
    /// Build a word index from word to frequency rank pairs
    pub fn new(ranks: HashMap<String, usize>) -> Self {
        let words = invert_map(ranks.clone());

        Self { ranks, words }
    }

    /// Load `word_index.json` for the dataset from the data directory
    pub async fn load(data_dir: &str) -> Result<Self, DatasetError> {
        let path = format!("{}/datasets/{}/word_index.json", data_dir, DATASET);

        let index = Self::from_file(&path).await?;

        log::info!("Loaded {} words from {}", index.len(), path);

        Ok(index)
    }

    /// Read a JSON object of word to frequency rank pairs
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let display = path.as_ref().display().to_string();

        let json = read_text(&path).await.map_err(|source| DatasetError::Io {
            path: display.clone(),
            source,
        })?;

        let ranks = serde_json::from_str(&json).map_err(|source| DatasetError::WordIndex {
            path: display,
            source,
        })?;

        Ok(Self::new(ranks))
    }

    /// Number of known words
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Whether the index knows no words at all
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Token index for a single lowercase word
    pub fn token(&self, word: &str) -> usize {
        match self.ranks.get(word) {
            Some(rank) if rank + INDEX_FROM < MAX_WORDS => rank + INDEX_FROM,
            _ => OOV_TOKEN,
        }
    }

    /// Encode raw review text into raw token indices, starting with the start marker
    pub fn encode(&self, text: &str) -> Vec<usize> {
        let cleaned: String = text
            .to_lowercase()
            .chars()
            .map(|c| if FILTERS.contains(c) { ' ' } else { c })
            .collect();

        std::iter::once(START_TOKEN)
            .chain(cleaned.split_whitespace().map(|word| self.token(word)))
            .collect()
    }

    /// Encode raw review text into a preprocessed item
    pub fn encode_item(&self, text: &str, label: usize) -> Item {
        Item::from_raw(self.encode(text), label)
    }

    /// Decode token indices back into text, dropping padding
    pub fn decode(&self, tokens: &[usize]) -> String {
        tokens
            .iter()
            .filter(|token| **token != PAD_TOKEN)
            .map(|token| match *token {
                START_TOKEN => "<start>",
                OOV_TOKEN => "<unk>",
                token => self
                    .words
                    .get(&(token.saturating_sub(INDEX_FROM)))
                    .map(String::as_str)
                    .unwrap_or("<unk>"),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::datasets::imdb::MAX_LEN;

    use super::*;

    fn word_index() -> WordIndex {
        WordIndex::new(HashMap::from([
            ("the".to_string(), 1),
            ("movie".to_string(), 17),
            ("great".to_string(), 84),
            ("don't".to_string(), 89),
            ("obscure".to_string(), 9_997),
        ]))
    }

    #[test]
    fn encodes_text_with_a_start_marker() {
        let tokens = word_index().encode("The movie, the GREAT movie!");

        assert_eq!(tokens, vec![START_TOKEN, 4, 20, 4, 87, 20]);
    }

    #[test]
    fn keeps_apostrophes() {
        assert_eq!(word_index().encode("don't"), vec![START_TOKEN, 92]);
    }

    #[test]
    fn maps_unknown_and_rare_words_to_oov() {
        let tokens = word_index().encode("the unheardof obscure");

        assert_eq!(tokens, vec![START_TOKEN, 4, OOV_TOKEN, OOV_TOKEN]);
    }

    #[test]
    fn encodes_items_to_fixed_length() {
        let item = word_index().encode_item("great movie", 1);

        assert_eq!(item.tokens.len(), MAX_LEN);
        assert_eq!(&item.tokens[..4], &[START_TOKEN, 87, 20, PAD_TOKEN]);
    }

    #[test]
    fn decodes_tokens_without_padding() {
        let text = word_index().decode(&[START_TOKEN, 4, 87, OOV_TOKEN, 20, 0, 0]);

        assert_eq!(text, "<start> the great <unk> movie");
    }

    #[tokio::test]
    async fn reads_json_word_indexes() -> Result<(), Box<dyn std::error::Error>> {
        let path =
            std::env::temp_dir().join(format!("word-index-{}.json", std::process::id()));
        tokio::fs::write(&path, r#"{"the": 1, "and": 2}"#).await?;

        let index = WordIndex::from_file(&path).await;
        tokio::fs::remove_file(&path).await?;
        let index = index?;

        assert_eq!(index.len(), 2);
        assert_eq!(index.token("and"), 5);

        Ok(())
    }
}
