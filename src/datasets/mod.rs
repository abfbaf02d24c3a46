/// The IMDB movie reviews dataset
pub mod imdb;

/// Dataset Error
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    /// The dataset file could not be read
    #[error("unable to read {path}: {source}")]
    Io {
        /// The file being read
        path: String,
        /// The underlying error
        source: std::io::Error,
    },

    /// A CSV row could not be parsed
    #[error("malformed row in {path}: {source}")]
    Csv {
        /// The file being read
        path: String,
        /// The underlying error
        source: csv::Error,
    },

    /// A token index could not be parsed
    #[error("invalid token {token:?} on row {row}")]
    Token {
        /// The zero-based data row
        row: usize,
        /// The offending token
        token: String,
    },

    /// A label other than 0 or 1
    #[error("invalid label {label} on row {row}")]
    Label {
        /// The zero-based data row
        row: usize,
        /// The offending label
        label: i64,
    },

    /// The word index could not be parsed
    #[error("malformed word index {path}: {source}")]
    WordIndex {
        /// The file being read
        path: String,
        /// The underlying error
        source: serde_json::Error,
    },
}
