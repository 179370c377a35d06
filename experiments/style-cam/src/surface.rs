use minifb::{Key, KeyRepeat, Scale, Window, WindowOptions};
use restyle_image::ImageArrayOptions;
use restyle_loop::{LoopError, Surface, UiEvent, to_framebuffer};

/// The window operations the surface needs.
pub trait WindowBackend {
    /// Show `pixels` and process pending window events.
    fn present(&mut self, pixels: &[u32], width: usize, height: usize) -> Result<(), String>;

    /// Process pending window events, keeping the current picture.
    fn poll(&mut self);

    fn set_title(&mut self, title: &str);

    /// User input seen by the last `present` or `poll`.
    fn events(&self) -> Vec<UiEvent>;

    fn is_open(&self) -> bool;
}

impl WindowBackend for Window {
    fn present(&mut self, pixels: &[u32], width: usize, height: usize) -> Result<(), String> {
        self.update_with_buffer(pixels, width, height)
            .map_err(|e| e.to_string())
    }

    fn poll(&mut self) {
        self.update();
    }

    fn set_title(&mut self, title: &str) {
        Window::set_title(self, title);
    }

    fn events(&self) -> Vec<UiEvent> {
        let mut events = Vec::new();
        if self.is_key_pressed(Key::Space, KeyRepeat::No)
            || self.is_key_pressed(Key::Enter, KeyRepeat::No)
        {
            events.push(UiEvent::TogglePause);
        }
        if self.is_key_down(Key::Escape) {
            events.push(UiEvent::Quit);
        }
        events
    }

    fn is_open(&self) -> bool {
        Window::is_open(self)
    }
}

/// Output window. The title doubles as the status label.
///
/// Frames are shown as soon as they are drawn. Every refresh either presents
/// a frame or polls, never both, so key presses are read exactly once.
pub struct WindowSurface<W: WindowBackend = Window> {
    window: W,
    presented: bool,
}

impl WindowSurface<Window> {
    pub fn new(width: usize, height: usize) -> Result<Self, minifb::Error> {
        let mut window = Window::new(
            "Paused",
            width,
            height,
            WindowOptions {
                scale: Scale::X2,
                ..WindowOptions::default()
            },
        )?;
        window.set_target_fps(60);
        Ok(Self::with_window(window))
    }
}

impl<W: WindowBackend> WindowSurface<W> {
    pub fn with_window(window: W) -> Self {
        Self {
            window,
            presented: false,
        }
    }

    pub fn window(&self) -> &W {
        &self.window
    }
}

impl<W: WindowBackend> Surface for WindowSurface<W> {
    fn draw_image_array(
        &mut self,
        data: &[f32],
        height: usize,
        width: usize,
        options: &ImageArrayOptions,
    ) -> Result<(), LoopError> {
        let (pixels, width, height) = to_framebuffer(data, height, width, options)?;
        self.window
            .present(&pixels, width, height)
            .map_err(LoopError::Surface)?;
        self.presented = true;
        Ok(())
    }

    fn set_status(&mut self, status: &str) {
        self.window.set_title(status);
    }

    fn next_frame(&mut self) -> Vec<UiEvent> {
        // a draw since the last call already refreshed the window
        if !std::mem::take(&mut self.presented) {
            self.window.poll();
        }
        self.window.events()
    }

    fn is_open(&self) -> bool {
        self.window.is_open()
    }
}
