use std::fmt::Display;

use burn::backend::libtorch::LibTorchDevice;

/// Devices selectable from the command line
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Device {
    /// The first CUDA device if one is available, the CPU otherwise
    #[default]
    Auto,

    /// The CPU
    Cpu,

    /// The CUDA device with the given index
    Cuda(usize),
}

impl Device {
    /// Resolve to a LibTorch device, probing for CUDA when automatic
    pub fn resolve(&self) -> LibTorchDevice {
        match self {
            Device::Auto if tch::Cuda::is_available() => LibTorchDevice::Cuda(0),
            Device::Auto | Device::Cpu => LibTorchDevice::Cpu,
            Device::Cuda(index) => LibTorchDevice::Cuda(*index),
        }
    }
}

impl TryFrom<&str> for Device {
    type Error = DeviceError;

    /// Try to convert a string like "auto", "cpu", "cuda" or "cuda:1" to a Device
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "auto" => Ok(Device::Auto),
            "cpu" => Ok(Device::Cpu),
            "cuda" => Ok(Device::Cuda(0)),
            other => other
                .strip_prefix("cuda:")
                .and_then(|index| index.parse().ok())
                .map(Device::Cuda)
                .ok_or_else(|| DeviceError::Unknown(value.to_string())),
        }
    }
}

impl Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Device::Auto => write!(f, "auto"),
            Device::Cpu => write!(f, "cpu"),
            Device::Cuda(index) => write!(f, "cuda:{}", index),
        }
    }
}

/// Device Error
#[derive(thiserror::Error, Debug)]
pub enum DeviceError {
    /// No device found for the given string
    #[error("no device found for {0}")]
    Unknown(String),
}
