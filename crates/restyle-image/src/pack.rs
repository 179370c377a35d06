/// Convert HWC RGB buffer to packed `0x00RRGGBB` words for a framebuffer window.
pub fn rgb_to_argb(buf: &[u8], width: usize, height: usize) -> Vec<u32> {
    debug_assert!(
        buf.len() >= width * height * 3,
        "RGB buffer too small: expected {} bytes, got {}",
        width * height * 3,
        buf.len()
    );
    buf.chunks_exact(3)
        .take(width * height)
        .map(|px| ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32)
        .collect()
}
