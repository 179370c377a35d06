use crate::{LoopError, UiEvent};
use restyle_image::ImageArrayOptions;
use restyle_infer::Runner;
use std::path::Path;

/// Where frames come from.
#[allow(async_fn_in_trait)]
pub trait FrameSource {
    /// Capture the current frame and convert it into an image array.
    async fn image_array(&mut self, options: &ImageArrayOptions) -> Result<Vec<f32>, LoopError>;
}

/// Where frames go: the output canvas, the status label and the refresh clock.
pub trait Surface {
    /// Convert a `height × width` image array back to pixels and draw it.
    fn draw_image_array(
        &mut self,
        data: &[f32],
        height: usize,
        width: usize,
        options: &ImageArrayOptions,
    ) -> Result<(), LoopError>;

    fn set_status(&mut self, status: &str);

    /// Wait for the next refresh, returning the user events received since the last one.
    fn next_frame(&mut self) -> Vec<UiEvent>;

    fn is_open(&self) -> bool;
}

/// Acquires the runner and the camera during initialization.
#[allow(async_fn_in_trait)]
pub trait Environment {
    type Source: FrameSource;

    async fn load_runner(&mut self, path: &Path) -> Result<Runner, LoopError>;

    async fn open_camera(&mut self) -> Result<Self::Source, LoopError>;
}
