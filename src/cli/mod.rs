/// Batch size parsing
pub mod batch_size;

/// Device selection
pub mod devices;

pub use batch_size::parse_batch_size;
pub use devices::Device;
