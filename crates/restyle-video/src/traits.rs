use crate::CameraError;
use restyle_base::Tensor;

/// Async camera trait for frame capture.
#[allow(async_fn_in_trait)]
pub trait Camera {
    /// Receive the next frame newer than the last one returned.
    ///
    /// Frames are RGB, `[height, width, 3]`.
    async fn recv(&mut self) -> Result<Tensor<u8>, CameraError>;
}
