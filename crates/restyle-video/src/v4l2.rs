use crate::convert::yuyv_to_rgb;
use crate::{Camera, CameraConfig, CameraError, FramePublisher, FrameSubscriber, latest_frame_channel};
use restyle_base::Tensor;
use std::thread::{self, JoinHandle};
use v4l::buffer::Type;
use v4l::io::mmap::Stream as MmapStream;
use v4l::io::traits::CaptureStream;
use v4l::video::Capture;
use v4l::{Device, Format, FourCC};

/// Pixel format negotiated with the driver.
#[derive(Debug, Clone, Copy, PartialEq)]
enum CaptureFormat {
    Mjpeg,
    Yuyv { width: u32, height: u32 },
}

/// V4L2 camera implementation.
///
/// Capture starts on the first `recv()`. The capture thread keeps only the
/// latest decoded frame and exits once the camera is dropped.
pub struct V4l2Camera {
    config: CameraConfig,
    format: CaptureFormat,
    device: Option<Device>,
    subscriber: Option<FrameSubscriber>,
    thread_handle: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for V4l2Camera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("V4l2Camera")
            .field("config", &self.config)
            .field("format", &self.format)
            .field("started", &self.subscriber.is_some())
            .finish()
    }
}

impl Camera for V4l2Camera {
    async fn recv(&mut self) -> Result<Tensor<u8>, CameraError> {
        self.ensure_started()?;

        let subscriber = self
            .subscriber
            .as_mut()
            .ok_or_else(|| CameraError::Channel("Subscriber not initialized".to_string()))?;

        subscriber.next().await
    }
}

impl Drop for V4l2Camera {
    fn drop(&mut self) {
        // the capture thread stops on its next publish
        drop(self.subscriber.take());

        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl V4l2Camera {
    /// Open the device at `config.device()` and negotiate a format.
    ///
    /// MJPEG is preferred; if the driver refuses it, YUYV is used at whatever
    /// resolution the driver grants.
    ///
    /// # Errors
    ///
    /// Returns `CameraError::Device` if the device cannot be opened, supports
    /// neither format, or rejects the frame rate.
    pub fn new(config: CameraConfig) -> Result<Self, CameraError> {
        let device = Device::with_path(config.device())?;

        let requested = Format::new(config.width(), config.height(), FourCC::new(b"MJPG"));
        let granted = Capture::set_format(&device, &requested)?;

        let format = if granted.fourcc == FourCC::new(b"MJPG") {
            CaptureFormat::Mjpeg
        } else {
            let requested = Format::new(config.width(), config.height(), FourCC::new(b"YUYV"));
            let granted = Capture::set_format(&device, &requested)?;
            if granted.fourcc != FourCC::new(b"YUYV") {
                return Err(CameraError::Device(format!(
                    "no supported pixel format (tried MJPG and YUYV, driver offers {})",
                    granted.fourcc
                )));
            }
            CaptureFormat::Yuyv {
                width: granted.width,
                height: granted.height,
            }
        };

        let params = v4l::video::capture::Parameters::with_fps(config.fps());
        Capture::set_params(&device, &params)?;

        log::info!(
            "camera {} opened: {:?} at {} fps",
            config.device(),
            format,
            config.fps()
        );

        Ok(Self {
            config,
            format,
            device: Some(device),
            subscriber: None,
            thread_handle: None,
        })
    }

    /// Start the capture thread if not already running.
    fn ensure_started(&mut self) -> Result<(), CameraError> {
        if self.subscriber.is_some() {
            return Ok(());
        }

        let device = self
            .device
            .take()
            .ok_or_else(|| CameraError::Device("Device already consumed".to_string()))?;

        let (publisher, subscriber) = latest_frame_channel();
        let format = self.format;
        let buffer_count = self.config.buffer_count();

        let handle = thread::spawn(move || {
            if let Err(e) = Self::capture_loop(device, format, &publisher, buffer_count) {
                log::error!("capture thread error: {}", e);
                publisher.publish(Err(e));
            }
        });

        self.subscriber = Some(subscriber);
        self.thread_handle = Some(handle);

        Ok(())
    }

    fn capture_loop(
        device: Device,
        format: CaptureFormat,
        publisher: &FramePublisher,
        buffer_count: u32,
    ) -> Result<(), CameraError> {
        let mut stream = MmapStream::with_buffers(&device, Type::VideoCapture, buffer_count)?;

        loop {
            // the mmap buffer is only valid until the next call
            let (frame_data, _metadata) = CaptureStream::next(&mut stream)?;

            let frame = match format {
                CaptureFormat::Mjpeg => restyle_image::decode_image(frame_data)?,
                CaptureFormat::Yuyv { width, height } => {
                    let rgb = yuyv_to_rgb(frame_data, width, height).ok_or_else(|| {
                        CameraError::Stream(format!(
                            "short YUYV frame: {} bytes for {}x{}",
                            frame_data.len(),
                            width,
                            height
                        ))
                    })?;
                    Tensor::new(vec![height as usize, width as usize, 3], rgb)?
                }
            };

            if !publisher.publish(Ok(frame)) {
                log::debug!("camera dropped, stopping capture");
                return Ok(());
            }
        }
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }
}
