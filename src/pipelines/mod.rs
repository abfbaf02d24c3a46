/// Sentiment Classification
pub mod sentiment_classification;
