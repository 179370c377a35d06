use restyle_image::ImageError;
use restyle_infer::InferError;
use restyle_video::CameraError;
use std::fmt;

#[derive(Debug)]
pub enum LoopError {
    Infer(InferError),
    Camera(CameraError),
    Image(ImageError),
    Tensor(restyle_base::TensorError),
    /// The model does not expose a tensor the loop needs.
    MissingTensor(String),
    /// A tick ran before `initialize` bound a runner and a frame source.
    NotInitialized,
    Surface(String),
}

impl fmt::Display for LoopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoopError::Infer(err) => write!(f, "{err}"),
            LoopError::Camera(err) => write!(f, "{err}"),
            LoopError::Image(err) => write!(f, "{err}"),
            LoopError::Tensor(err) => write!(f, "{err}"),
            LoopError::MissingTensor(msg) => write!(f, "missing tensor: {msg}"),
            LoopError::NotInitialized => write!(f, "runner or camera not initialized"),
            LoopError::Surface(msg) => write!(f, "surface error: {msg}"),
        }
    }
}

impl std::error::Error for LoopError {}

impl From<InferError> for LoopError {
    fn from(err: InferError) -> Self {
        LoopError::Infer(err)
    }
}

impl From<CameraError> for LoopError {
    fn from(err: CameraError) -> Self {
        LoopError::Camera(err)
    }
}

impl From<ImageError> for LoopError {
    fn from(err: ImageError) -> Self {
        LoopError::Image(err)
    }
}

impl From<restyle_base::TensorError> for LoopError {
    fn from(err: restyle_base::TensorError) -> Self {
        LoopError::Tensor(err)
    }
}
