use crate::Device;
use std::fmt;

#[derive(Debug)]
pub enum InferError {
    ModelLoad(String),
    Descriptor(String),
    BackendError(String),
    UnsupportedDevice(Device),
    InvalidDevice(String),
    UnsupportedDtype(String),
    InvalidInput {
        name: String,
        expected_names: Vec<String>,
    },
    MissingOutput(String),
    Io(String),
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            InferError::Descriptor(msg) => write!(f, "descriptor error: {msg}"),
            InferError::BackendError(msg) => write!(f, "backend error: {msg}"),
            InferError::UnsupportedDevice(device) => write!(f, "unsupported device: {device}"),
            InferError::InvalidDevice(spec) => write!(f, "invalid device '{spec}' (expected cpu or cuda[:N])"),
            InferError::UnsupportedDtype(msg) => write!(f, "unsupported dtype: {msg}"),
            InferError::InvalidInput {
                name,
                expected_names,
            } => write!(f, "unknown input '{name}', model expects {expected_names:?}"),
            InferError::MissingOutput(name) => write!(f, "model produced no output '{name}'"),
            InferError::Io(msg) => write!(f, "io error: {msg}"),
        }
    }
}

impl std::error::Error for InferError {}

impl From<std::io::Error> for InferError {
    fn from(err: std::io::Error) -> Self {
        InferError::Io(err.to_string())
    }
}

impl From<restyle_base::TensorError> for InferError {
    fn from(err: restyle_base::TensorError) -> Self {
        InferError::BackendError(err.to_string())
    }
}
