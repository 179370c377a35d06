//! Capture-infer-render loop controller.
//!
//! [`Controller`] owns the whole session state: the paused/running flag, the
//! loaded runner with its resolved input and output names, the frame source
//! and the output surface. [`Controller::run`] drives it one refresh at a
//! time, with at most one inference in flight.

pub mod config;
pub mod controller;
pub mod error;
pub mod source;
pub mod state;
pub mod surface;
pub mod traits;

pub use config::{LoopConfig, STYLE_BIAS, STYLE_SCALE, STYLE_SIZE, style_transfer_options};
pub use controller::Controller;
pub use error::LoopError;
pub use source::CameraSource;
pub use state::{LoopState, TickOutcome, UiEvent};
pub use surface::to_framebuffer;
pub use traits::{Environment, FrameSource, Surface};
