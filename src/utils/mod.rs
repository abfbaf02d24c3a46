/// File utilities
pub mod files;

/// Sequence padding and vocabulary capping
pub mod sequences;

/// Tensor Utilities
pub mod tensors;

/// Checkpoint saving and validated restoring
pub mod checkpoint;

/// Renderer Utilities
pub mod renderer;

/// Utilities for classification tasks
pub mod classes;
