//! Frame conversion for the restyle pipeline.
//!
//! Frames are RGB `Tensor<u8>` in HWC layout (`[height, width, 3]`). This
//! crate decodes camera payloads into that form, converts frames into the
//! flat `f32` image arrays a model consumes, and converts model output back
//! into displayable pixels.

pub mod array;
pub mod error;
pub mod pack;

pub use array::{Color, ImageArrayOptions, Order, get_image_array, set_image_array};
pub use error::ImageError;
pub use pack::rgb_to_argb;

use restyle_base::Tensor;

/// Decodes an encoded image (MJPEG frame, PNG, BMP) into an RGB tensor.
///
/// Grey, alpha and high bit-depth inputs are converted to 8-bit RGB.
pub fn decode_image(data: &[u8]) -> Result<Tensor<u8>, ImageError> {
    let rgb = crates_image::load_from_memory(data)?.into_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(Tensor::new(
        vec![height as usize, width as usize, 3],
        rgb.into_raw(),
    )?)
}
