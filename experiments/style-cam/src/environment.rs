use crate::AppConfig;
use restyle_infer::{BackendRegistry, Runner, create_registry, load_runner};
use restyle_loop::{CameraSource, Environment, LoopError};
use restyle_video::{CameraConfig, V4l2Camera};
use std::path::Path;

/// Real hardware: ONNX backends on the configured device and a V4L2 camera.
pub struct DeviceEnvironment {
    registry: BackendRegistry,
    camera: CameraConfig,
}

impl DeviceEnvironment {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            registry: create_registry(config.device.clone()),
            camera: CameraConfig::default().with_device(config.camera_device.clone()),
        }
    }
}

impl Environment for DeviceEnvironment {
    type Source = CameraSource<V4l2Camera>;

    async fn load_runner(&mut self, path: &Path) -> Result<Runner, LoopError> {
        Ok(load_runner(path, &self.registry)?)
    }

    async fn open_camera(&mut self) -> Result<Self::Source, LoopError> {
        let camera = V4l2Camera::new(self.camera.clone())?;
        Ok(CameraSource::new(camera))
    }
}
