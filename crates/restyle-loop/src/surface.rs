use crate::LoopError;
use restyle_image::{ImageArrayOptions, rgb_to_argb, set_image_array};

/// Convert an output image array into packed `0x00RRGGBB` pixels.
///
/// Returns the pixels with their width and height, which follow the
/// destination size in `options`.
pub fn to_framebuffer(
    data: &[f32],
    height: usize,
    width: usize,
    options: &ImageArrayOptions,
) -> Result<(Vec<u32>, usize, usize), LoopError> {
    let rgb = set_image_array(data, height, width, options)?;
    let (out_h, out_w) = (rgb.shape[0], rgb.shape[1]);
    Ok((rgb_to_argb(&rgb.data, out_w, out_h), out_w, out_h))
}
