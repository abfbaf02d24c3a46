use std::path::{Path, PathBuf};

use burn::{
    module::{Module, ModuleVisitor, ParamId},
    record::{CompactRecorder, Recorder, RecorderError},
    tensor::{backend::Backend, Bool, Int, Tensor},
};

/// The file extension the compact recorder appends to checkpoint paths
pub static CHECKPOINT_EXTENSION: &str = "mpk.gz";

/// Checkpoint Error
#[derive(thiserror::Error, Debug)]
pub enum CheckpointError {
    /// The checkpoint file does not exist
    #[error("no checkpoint found at {}", .0.display())]
    Missing(PathBuf),

    /// The recorder could not read the checkpoint
    #[error("unable to read checkpoint: {0}")]
    Recorder(#[from] RecorderError),

    /// The checkpoint holds a different number of parameters than the model
    #[error("checkpoint holds {found} parameters, the model expects {expected}")]
    ParameterCount {
        /// Parameters in the freshly constructed model
        expected: usize,
        /// Parameters restored from the checkpoint
        found: usize,
    },

    /// The checkpoint holds a different number of recurrent layers than the model
    #[error("checkpoint holds {found} recurrent layers, the model expects {expected}")]
    LayerCount {
        /// Layers in the freshly constructed model
        expected: usize,
        /// Layers stored in the checkpoint
        found: usize,
    },

    /// A restored parameter has a different shape than the model's
    #[error("parameter {index} has shape {found:?}, the model expects {expected:?}")]
    ShapeMismatch {
        /// Position of the parameter in module traversal order
        index: usize,
        /// Shape in the freshly constructed model
        expected: Vec<usize>,
        /// Shape restored from the checkpoint
        found: Vec<usize>,
    },
}

/// Collects the shape of every parameter of a module, in traversal order
#[derive(Default)]
struct ShapeCollector {
    shapes: Vec<Vec<usize>>,
}

impl<B: Backend> ModuleVisitor<B> for ShapeCollector {
    fn visit_float<const D: usize>(&mut self, _id: &ParamId, tensor: &Tensor<B, D>) {
        self.shapes.push(tensor.dims().to_vec());
    }

    fn visit_int<const D: usize>(&mut self, _id: &ParamId, tensor: &Tensor<B, D, Int>) {
        self.shapes.push(tensor.dims().to_vec());
    }

    fn visit_bool<const D: usize>(&mut self, _id: &ParamId, tensor: &Tensor<B, D, Bool>) {
        self.shapes.push(tensor.dims().to_vec());
    }
}

/// The shape of every parameter of a module, in traversal order
pub fn parameter_shapes<B: Backend, M: Module<B>>(module: &M) -> Vec<Vec<usize>> {
    let mut collector = ShapeCollector::default();
    module.visit(&mut collector);

    collector.shapes
}

/// Read a checkpoint written by the compact recorder. `path` is given without extension.
pub fn read_record<B: Backend, M: Module<B>>(
    path: &Path,
    device: &B::Device,
) -> Result<M::Record, CheckpointError> {
    let file = path.with_extension(CHECKPOINT_EXTENSION);
    if !file.is_file() {
        return Err(CheckpointError::Missing(file));
    }

    let record =
        <CompactRecorder as Recorder<B>>::load(&CompactRecorder::new(), path.into(), device)?;

    Ok(record)
}

/// Apply a record to a freshly constructed module.
///
/// The restored parameters must match the fresh module's parameters one for one, shape for
/// shape, or nothing is returned.
pub fn restore<B: Backend, M: Module<B>>(
    module: M,
    record: M::Record,
) -> Result<M, CheckpointError> {
    let expected = parameter_shapes(&module);

    let module = module.load_record(record);
    let found = parameter_shapes(&module);

    if expected.len() != found.len() {
        return Err(CheckpointError::ParameterCount {
            expected: expected.len(),
            found: found.len(),
        });
    }

    for (index, (expected, found)) in expected.into_iter().zip(found).enumerate() {
        if expected != found {
            return Err(CheckpointError::ShapeMismatch {
                index,
                expected,
                found,
            });
        }
    }

    Ok(module)
}

/// Restore a checkpoint written by the compact recorder into a freshly constructed module.
/// `path` is given without the recorder's extension.
pub fn load_validated<B: Backend, M: Module<B>>(
    module: M,
    path: &Path,
    device: &B::Device,
) -> Result<M, CheckpointError> {
    let record = read_record::<B, M>(path, device)?;

    restore(module, record)
}

/// Write a module's parameters with the compact recorder. `path` is given without extension.
pub fn save<B: Backend, M: Module<B>>(module: M, path: &Path) -> Result<(), CheckpointError> {
    let recorder = CompactRecorder::new();

    <CompactRecorder as Recorder<B>>::record(&recorder, module.into_record(), path.into())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use burn::{backend::NdArray, nn::LinearConfig};
    use pretty_assertions::assert_eq;

    use super::*;

    type TestBackend = NdArray;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("{}-{}", name, std::process::id()))
    }

    #[test]
    fn collects_parameter_shapes() {
        let device = Default::default();
        let linear = LinearConfig::new(4, 3).init::<TestBackend>(&device);

        assert_eq!(parameter_shapes(&linear), vec![vec![4, 3], vec![3]]);
    }

    #[test]
    fn restores_matching_checkpoints() -> Result<(), CheckpointError> {
        let device = Default::default();
        let path = temp_path("linear-match");

        save(LinearConfig::new(4, 3).init::<TestBackend>(&device), &path)?;

        let fresh = LinearConfig::new(4, 3).init::<TestBackend>(&device);
        let restored = load_validated(fresh, &path, &device)?;

        std::fs::remove_file(path.with_extension(CHECKPOINT_EXTENSION)).ok();

        assert_eq!(parameter_shapes(&restored), vec![vec![4, 3], vec![3]]);

        Ok(())
    }

    #[test]
    fn rejects_missing_checkpoints() {
        let device = Default::default();
        let fresh = LinearConfig::new(4, 3).init::<TestBackend>(&device);

        let result = load_validated(fresh, &temp_path("linear-missing"), &device);

        assert!(matches!(result, Err(CheckpointError::Missing(_))));
    }

    #[test]
    fn rejects_mismatched_shapes() -> Result<(), CheckpointError> {
        let device = Default::default();
        let path = temp_path("linear-mismatch");

        save(LinearConfig::new(8, 3).init::<TestBackend>(&device), &path)?;

        let fresh = LinearConfig::new(4, 3).init::<TestBackend>(&device);
        let result = load_validated(fresh, &path, &device);

        std::fs::remove_file(path.with_extension(CHECKPOINT_EXTENSION)).ok();

        match result {
            Err(CheckpointError::ShapeMismatch {
                index,
                expected,
                found,
            }) => {
                assert_eq!(index, 0);
                assert_eq!(expected, vec![4, 3]);
                assert_eq!(found, vec![8, 3]);
            }
            other => panic!("expected a shape mismatch, got {:?}", other.map(|_| ())),
        }

        Ok(())
    }
}
