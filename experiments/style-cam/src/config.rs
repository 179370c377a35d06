use restyle_infer::{Device, InferError};
use std::path::PathBuf;

pub const MODEL_PATH_VAR: &str = "RESTYLE_MODEL_PATH";
pub const CAMERA_DEVICE_VAR: &str = "RESTYLE_CAMERA_DEVICE";
pub const DEVICE_VAR: &str = "RESTYLE_DEVICE";
pub const LOG_DIR_VAR: &str = "RESTYLE_LOG_DIR";

/// Settings read from the environment at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub camera_device: String,
    pub device: Device,
    /// Log into date-named files here instead of stdout.
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("./output"),
            camera_device: "/dev/video0".to_string(),
            device: Device::Cpu,
            log_dir: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, InferError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from a variable lookup; unset or empty variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, InferError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let device = match get(DEVICE_VAR) {
            Some(spec) => spec.parse()?,
            None => defaults.device,
        };

        Ok(Self {
            model_path: get(MODEL_PATH_VAR).map(PathBuf::from).unwrap_or(defaults.model_path),
            camera_device: get(CAMERA_DEVICE_VAR).unwrap_or(defaults.camera_device),
            device,
            log_dir: get(LOG_DIR_VAR).map(PathBuf::from),
        })
    }
}
