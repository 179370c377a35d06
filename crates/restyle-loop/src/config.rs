use restyle_image::{Color, ImageArrayOptions, Order};
use std::path::{Path, PathBuf};

/// Side of the square frame the style-transfer model works on.
pub const STYLE_SIZE: usize = 256;

pub const STYLE_SCALE: [f32; 3] = [255.0, 255.0, 255.0];

/// Per-channel means in BGR order, subtracted before inference.
pub const STYLE_BIAS: [f32; 3] = [103.939, 116.779, 123.68];

/// Conversion used both ways around a style-transfer model: BGR, HWC,
/// `(p - bias) / 255` on the way in and its inverse on the way out.
pub fn style_transfer_options(height: usize, width: usize) -> ImageArrayOptions {
    ImageArrayOptions::default()
        .with_dst_size(width, height)
        .with_scale(STYLE_SCALE)
        .with_bias(STYLE_BIAS)
        .with_order(Order::Hwc)
        .with_color(Color::Bgr)
}

/// Configuration for the capture-infer-render loop.
#[derive(Clone, Debug, PartialEq)]
pub struct LoopConfig {
    model_path: PathBuf,
    height: usize,
    width: usize,
    input_options: ImageArrayOptions,
    output_options: ImageArrayOptions,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("./output"),
            height: STYLE_SIZE,
            width: STYLE_SIZE,
            input_options: style_transfer_options(STYLE_SIZE, STYLE_SIZE),
            output_options: style_transfer_options(STYLE_SIZE, STYLE_SIZE),
        }
    }
}

impl LoopConfig {
    /// Model file or descriptor directory.
    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = path.into();
        self
    }

    /// Model frame size; also becomes the destination size of both conversions.
    pub fn with_frame_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self.input_options = self.input_options.with_dst_size(width, height);
        self.output_options = self.output_options.with_dst_size(width, height);
        self
    }

    pub fn with_input_options(mut self, options: ImageArrayOptions) -> Self {
        self.input_options = options;
        self
    }

    pub fn with_output_options(mut self, options: ImageArrayOptions) -> Self {
        self.output_options = options;
        self
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn input_options(&self) -> &ImageArrayOptions {
        &self.input_options
    }

    pub fn output_options(&self) -> &ImageArrayOptions {
        &self.output_options
    }

    /// Model input shape with its batch axis, following the input layout.
    pub fn input_shape(&self) -> Vec<usize> {
        let channels = self.input_options.color.channels();
        match self.input_options.order {
            Order::Hwc => vec![1, self.height, self.width, channels],
            Order::Chw => vec![1, channels, self.height, self.width],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_style_transfer() {
        let config = LoopConfig::default();
        assert_eq!(config.model_path(), Path::new("./output"));
        assert_eq!(config.input_options(), config.output_options());
        assert_eq!(config.input_options().dst_w, Some(256));
        assert_eq!(config.input_options().color, Color::Bgr);
        assert_eq!(config.input_shape(), vec![1, 256, 256, 3]);
    }

    #[test]
    fn test_frame_size_updates_both_conversions() {
        let config = LoopConfig::default().with_frame_size(320, 240);
        assert_eq!(config.input_options().dst_w, Some(320));
        assert_eq!(config.output_options().dst_h, Some(240));
        assert_eq!(config.input_shape(), vec![1, 240, 320, 3]);
    }

    #[test]
    fn test_chw_input_shape() {
        let options = style_transfer_options(8, 4).with_order(Order::Chw);
        let config = LoopConfig::default()
            .with_frame_size(4, 8)
            .with_input_options(options);
        assert_eq!(config.input_shape(), vec![1, 3, 8, 4]);
    }
}
