//! Windowed presentation backend on top of `minifb`.
//!
//! Available behind the `window` feature. The window shares the packed
//! `0xAARRGGBB` pixel layout, so frames go to the surface without conversion;
//! closing the window or pressing Escape ends playback via
//! [`SinkFlow::Stop`].

use anyhow::anyhow;
use minifb::{Key, Window, WindowOptions};

use crate::error::{FadeloopError, FadeloopResult};
use crate::screen::Screen;
use crate::sink::{PresentSink, SinkConfig, SinkFlow};

pub struct WindowSink {
    title: String,
    window: Option<Window>,
}

impl WindowSink {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            window: None,
        }
    }
}

impl PresentSink for WindowSink {
    fn begin(&mut self, cfg: SinkConfig) -> FadeloopResult<()> {
        let mut window = Window::new(
            &self.title,
            cfg.width as usize,
            cfg.height as usize,
            WindowOptions::default(),
        )
        .map_err(|e| anyhow!("open {}x{} window: {e}", cfg.width, cfg.height))?;
        // The playback loop paces frames; leave minifb's own limiter off.
        window.set_target_fps(0);
        self.window = Some(window);
        Ok(())
    }

    fn present(&mut self, _idx: u64, screen: &Screen) -> FadeloopResult<SinkFlow> {
        let Some(window) = self.window.as_mut() else {
            return Err(FadeloopError::validation("window sink not started"));
        };
        if !window.is_open() || window.is_key_down(Key::Escape) {
            return Ok(SinkFlow::Stop);
        }
        window
            .update_with_buffer(
                screen.pixels(),
                screen.width() as usize,
                screen.height() as usize,
            )
            .map_err(|e| anyhow!("present frame to window: {e}"))?;
        Ok(SinkFlow::Continue)
    }

    fn end(&mut self) -> FadeloopResult<()> {
        self.window = None;
        Ok(())
    }
}
