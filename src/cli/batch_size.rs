/// Batch Size Error
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum BatchSizeError {
    /// Not a whole number
    #[error("invalid batch size '{0}'")]
    Invalid(String),

    /// Batches must hold at least one review
    #[error("the batch size must be at least 1")]
    Zero,
}

/// Parse a `--batch-size` value, rejecting zero
pub fn parse_batch_size(value: &str) -> Result<usize, BatchSizeError> {
    match value.parse::<usize>() {
        Ok(0) => Err(BatchSizeError::Zero),
        Ok(batch_size) => Ok(batch_size),
        Err(_) => Err(BatchSizeError::Invalid(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_positive_batch_sizes() {
        assert_eq!(parse_batch_size("256"), Ok(256));
        assert_eq!(parse_batch_size("1"), Ok(1));
    }

    #[test]
    fn rejects_zero() {
        assert_eq!(parse_batch_size("0"), Err(BatchSizeError::Zero));
    }

    #[test]
    fn rejects_non_numbers() {
        assert_eq!(
            parse_batch_size("-3"),
            Err(BatchSizeError::Invalid("-3".to_string()))
        );
    }
}
