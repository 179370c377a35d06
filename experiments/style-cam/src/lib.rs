//! Webcam style transfer: V4L2 camera in, ONNX style model, minifb window out.

pub mod config;
pub mod environment;
pub mod surface;

pub use config::AppConfig;
pub use environment::DeviceEnvironment;
pub use surface::{WindowBackend, WindowSurface};
