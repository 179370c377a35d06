use crate::ImageError;
use crates_image::{ImageBuffer, Rgb, RgbImage, imageops};
use restyle_base::Tensor;

/// Memory layout of an image array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    /// `[height, width, channel]`, channels interleaved per pixel.
    #[default]
    Hwc,
    /// `[channel, height, width]`, one plane per channel.
    Chw,
}

/// Channel arrangement of an image array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Rgb,
    Bgr,
    /// Single luma channel, `0.2126 R + 0.7152 G + 0.0722 B`.
    Grey,
}

impl Color {
    pub fn channels(self) -> usize {
        match self {
            Color::Rgb | Color::Bgr => 3,
            Color::Grey => 1,
        }
    }
}

/// How a frame maps onto an image array, and back.
///
/// Reading a frame computes `(pixel - bias[c]) / scale[c]` per output
/// channel `c`; writing computes the inverse `value * scale[c] + bias[c]`.
/// For `Color::Grey` only index 0 of `scale` and `bias` is used.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageArrayOptions {
    pub src_x: usize,
    pub src_y: usize,
    /// Crop width, `None` for the rest of the source.
    pub src_w: Option<usize>,
    /// Crop height, `None` for the rest of the source.
    pub src_h: Option<usize>,
    /// Resized width, `None` to keep the crop width.
    pub dst_w: Option<usize>,
    /// Resized height, `None` to keep the crop height.
    pub dst_h: Option<usize>,
    pub scale: [f32; 3],
    pub bias: [f32; 3],
    pub order: Order,
    pub color: Color,
}

impl Default for ImageArrayOptions {
    fn default() -> Self {
        Self {
            src_x: 0,
            src_y: 0,
            src_w: None,
            src_h: None,
            dst_w: None,
            dst_h: None,
            scale: [1.0; 3],
            bias: [0.0; 3],
            order: Order::Hwc,
            color: Color::Rgb,
        }
    }
}

impl ImageArrayOptions {
    pub fn with_src_rect(mut self, x: usize, y: usize, width: usize, height: usize) -> Self {
        self.src_x = x;
        self.src_y = y;
        self.src_w = Some(width);
        self.src_h = Some(height);
        self
    }

    pub fn with_dst_size(mut self, width: usize, height: usize) -> Self {
        self.dst_w = Some(width);
        self.dst_h = Some(height);
        self
    }

    pub fn with_scale(mut self, scale: [f32; 3]) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_bias(mut self, bias: [f32; 3]) -> Self {
        self.bias = bias;
        self
    }

    pub fn with_order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    fn validate_scale(&self) -> Result<(), ImageError> {
        let used = &self.scale[..self.color.channels()];
        if used.iter().any(|s| *s == 0.0 || !s.is_finite()) {
            return Err(ImageError::Options(format!(
                "scale must be finite and non-zero, got {:?}",
                self.scale
            )));
        }
        Ok(())
    }

    /// Resolve the crop rectangle `(x, y, w, h)` against a `width × height` source.
    fn crop(&self, width: usize, height: usize) -> Result<(usize, usize, usize, usize), ImageError> {
        let w = self.src_w.unwrap_or(width.saturating_sub(self.src_x));
        let h = self.src_h.unwrap_or(height.saturating_sub(self.src_y));
        if w == 0 || h == 0 {
            return Err(ImageError::Options("empty source rectangle".to_string()));
        }
        let right = self.src_x.checked_add(w);
        let bottom = self.src_y.checked_add(h);
        if right.is_none_or(|r| r > width) || bottom.is_none_or(|b| b > height) {
            return Err(ImageError::Options(format!(
                "source rectangle {}x{}+{}+{} exceeds {}x{} image",
                w, h, self.src_x, self.src_y, width, height
            )));
        }
        Ok((self.src_x, self.src_y, w, h))
    }

    fn dst_size(&self, crop_w: usize, crop_h: usize) -> Result<(usize, usize), ImageError> {
        let size = (self.dst_w.unwrap_or(crop_w), self.dst_h.unwrap_or(crop_h));
        if size.0 == 0 || size.1 == 0 {
            return Err(ImageError::Options("empty destination size".to_string()));
        }
        Ok(size)
    }
}

fn array_index(order: Order, channels: usize, width: usize, height: usize, x: usize, y: usize, c: usize) -> usize {
    match order {
        Order::Hwc => (y * width + x) * channels + c,
        Order::Chw => (c * height + y) * width + x,
    }
}

/// Crop and resize `image` to `dst_w × dst_h` with bilinear filtering.
fn crop_resize(
    image: &RgbImage,
    (x, y, w, h): (usize, usize, usize, usize),
    (dst_w, dst_h): (usize, usize),
) -> RgbImage {
    let full = (w, h) == (image.width() as usize, image.height() as usize);
    let cropped = if full {
        image.clone()
    } else {
        imageops::crop_imm(image, x as u32, y as u32, w as u32, h as u32).to_image()
    };
    if (dst_w, dst_h) == (w, h) {
        cropped
    } else {
        imageops::resize(
            &cropped,
            dst_w as u32,
            dst_h as u32,
            imageops::FilterType::Triangle,
        )
    }
}

/// Convert an RGB frame (`[height, width, 3]`) into a flat image array.
///
/// The result has `dst_h * dst_w * channels` elements laid out per `options.order`.
pub fn get_image_array(frame: &Tensor<u8>, options: &ImageArrayOptions) -> Result<Vec<f32>, ImageError> {
    if frame.shape.len() != 3 || frame.shape[2] != 3 {
        return Err(ImageError::Shape(format!(
            "expected [H, W, 3] frame, got {:?}",
            frame.shape
        )));
    }
    options.validate_scale()?;

    let (height, width) = (frame.shape[0], frame.shape[1]);
    let crop = options.crop(width, height)?;
    let (dst_w, dst_h) = options.dst_size(crop.2, crop.3)?;

    let source: RgbImage = ImageBuffer::from_raw(width as u32, height as u32, frame.data.clone())
        .ok_or_else(|| ImageError::Shape("frame buffer smaller than its shape".to_string()))?;
    let resized = crop_resize(&source, crop, (dst_w, dst_h));

    let channels = options.color.channels();
    let mut array = vec![0.0f32; dst_w * dst_h * channels];
    for (x, y, Rgb([r, g, b])) in resized.enumerate_pixels() {
        let (r, g, b) = (*r as f32, *g as f32, *b as f32);
        let values = match options.color {
            Color::Rgb => [r, g, b],
            Color::Bgr => [b, g, r],
            Color::Grey => [0.2126 * r + 0.7152 * g + 0.0722 * b, 0.0, 0.0],
        };
        for (c, value) in values.iter().take(channels).enumerate() {
            let index = array_index(options.order, channels, dst_w, dst_h, x as usize, y as usize, c);
            array[index] = (value - options.bias[c]) / options.scale[c];
        }
    }

    Ok(array)
}

/// Convert a `height × width` image array back into an RGB frame.
///
/// Applies `value * scale + bias`, rounds and clamps to `[0, 255]`, then
/// crops and resizes per the source rectangle and destination size in
/// `options`, which here refer to the array's own geometry.
pub fn set_image_array(
    array: &[f32],
    height: usize,
    width: usize,
    options: &ImageArrayOptions,
) -> Result<Tensor<u8>, ImageError> {
    options.validate_scale()?;

    let channels = options.color.channels();
    let expected = height * width * channels;
    if array.len() != expected || expected == 0 {
        return Err(ImageError::Shape(format!(
            "expected {expected} elements for {height}x{width}x{channels}, got {}",
            array.len()
        )));
    }

    let to_pixel = |value: f32, c: usize| (value * options.scale[c] + options.bias[c]).round().clamp(0.0, 255.0) as u8;

    let image = RgbImage::from_fn(width as u32, height as u32, |x, y| {
        let at = |c| {
            let index = array_index(options.order, channels, width, height, x as usize, y as usize, c);
            to_pixel(array[index], c)
        };
        match options.color {
            Color::Rgb => Rgb([at(0), at(1), at(2)]),
            Color::Bgr => Rgb([at(2), at(1), at(0)]),
            Color::Grey => {
                let l = at(0);
                Rgb([l, l, l])
            }
        }
    });

    let crop = options.crop(width, height)?;
    let (dst_w, dst_h) = options.dst_size(crop.2, crop.3)?;
    let output = crop_resize(&image, crop, (dst_w, dst_h));

    Ok(Tensor::new(vec![dst_h, dst_w, 3], output.into_raw())?)
}
