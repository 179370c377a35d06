//! Camera capture for the restyle pipeline.
//!
//! A `Camera` hands out RGB frames as `Tensor<u8>` with shape
//! `[height, width, 3]`. Backends capture on their own thread and keep only
//! the most recent frame, so a consumer that falls behind always reads the
//! current picture instead of a queue of stale ones.

pub mod config;
pub mod convert;
pub mod error;
pub mod latest;
pub mod traits;

#[cfg(feature = "v4l2")]
pub mod v4l2;

pub use config::CameraConfig;
pub use error::CameraError;
pub use latest::{FramePublisher, FrameSubscriber, latest_frame_channel};
pub use traits::Camera;

#[cfg(feature = "v4l2")]
pub use v4l2::V4l2Camera;
