use crate::{InferError, ModelSource};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// File name of the descriptor inside a model directory.
pub const DESCRIPTOR_FILE: &str = "descriptor.json";

/// Contents of `descriptor.json` in a packaged model directory.
///
/// ```json
/// { "model": "model.onnx", "backends": ["onnx"] }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelDescriptor {
    /// Model file, relative to the descriptor's directory.
    pub model: String,
    /// Backends to try, in order. Empty means every registered backend.
    #[serde(default)]
    pub backends: Vec<String>,
}

impl ModelDescriptor {
    pub fn parse(json: &str) -> Result<Self, InferError> {
        let descriptor: Self =
            serde_json::from_str(json).map_err(|e| InferError::Descriptor(e.to_string()))?;
        if descriptor.model.trim().is_empty() {
            return Err(InferError::Descriptor("\"model\" is empty".to_string()));
        }
        Ok(descriptor)
    }
}

/// Resolve a load path into a model source and the preferred backend order.
///
/// A directory must contain [`DESCRIPTOR_FILE`]; any other path is taken as
/// the model file itself, with no backend preference.
pub fn resolve_model(path: &Path) -> Result<(ModelSource, Vec<String>), InferError> {
    if path.is_dir() {
        let descriptor_path = path.join(DESCRIPTOR_FILE);
        let json = fs::read_to_string(&descriptor_path).map_err(|e| {
            InferError::Descriptor(format!("cannot read {}: {}", descriptor_path.display(), e))
        })?;
        let descriptor = ModelDescriptor::parse(&json)?;
        Ok((
            ModelSource::File(path.join(&descriptor.model)),
            descriptor.backends,
        ))
    } else if path.is_file() {
        Ok((ModelSource::File(path.to_path_buf()), Vec::new()))
    } else {
        Err(InferError::ModelLoad(format!(
            "no model at {}",
            path.display()
        )))
    }
}
