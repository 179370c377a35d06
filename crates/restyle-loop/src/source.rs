use crate::{FrameSource, LoopError};
use restyle_image::{ImageArrayOptions, get_image_array};
use restyle_video::Camera;

/// Frame source backed by a live camera.
pub struct CameraSource<C: Camera> {
    camera: C,
}

impl<C: Camera> CameraSource<C> {
    pub fn new(camera: C) -> Self {
        Self { camera }
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }
}

impl<C: Camera> FrameSource for CameraSource<C> {
    async fn image_array(&mut self, options: &ImageArrayOptions) -> Result<Vec<f32>, LoopError> {
        let frame = self.camera.recv().await?;
        Ok(get_image_array(&frame, options)?)
    }
}
