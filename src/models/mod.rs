/// Bidirectional LSTM classifier
pub mod bilstm;
