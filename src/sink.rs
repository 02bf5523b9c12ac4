//! Presentation boundary for blended frames.
//!
//! The playback loop does not know where frames go. It talks to a
//! [`PresentSink`]: a window, a PNG dump directory, or an in-memory buffer
//! for tests. Interactive sinks end playback by returning
//! [`SinkFlow::Stop`] from [`PresentSink::present`].

use std::path::PathBuf;

use anyhow::Context;

use crate::core::{unpack_argb, TickRate};
use crate::error::FadeloopResult;
use crate::screen::Screen;

/// Configuration handed to a [`PresentSink`] when playback begins.
#[derive(Debug, Clone, Copy)]
pub struct SinkConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Logical update rate driving the frames.
    pub tick_rate: TickRate,
}

/// Whether the playback loop should keep running after a present call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkFlow {
    Continue,
    /// The sink is done taking frames, e.g. its window was closed.
    Stop,
}

/// Sink contract for consuming presented frames in playback order.
///
/// `present` is called with a strictly increasing frame index; `begin` runs
/// once before the first frame and `end` once after the last. A sink is not
/// required to be `Send`: window backends are tied to the thread that runs
/// the loop, so only [`Player`] adds that bound.
///
/// [`Player`]: crate::driver::Player
pub trait PresentSink {
    /// Called once before any frames are presented.
    fn begin(&mut self, cfg: SinkConfig) -> FadeloopResult<()>;
    /// Present one frame; return [`SinkFlow::Stop`] to end playback.
    fn present(&mut self, idx: u64, screen: &Screen) -> FadeloopResult<SinkFlow>;
    /// Called once after the last frame, including after a stop request.
    fn end(&mut self) -> FadeloopResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct MemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(u64, Vec<u32>)>,
    ended: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(u64, Vec<u32>)] {
        &self.frames
    }

    pub fn ended(&self) -> bool {
        self.ended
    }
}

impl PresentSink for MemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> FadeloopResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn present(&mut self, idx: u64, screen: &Screen) -> FadeloopResult<SinkFlow> {
        self.frames.push((idx, screen.pixels().to_vec()));
        Ok(SinkFlow::Continue)
    }

    fn end(&mut self) -> FadeloopResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Writes every presented frame as `frame_NNNNNN.png` under one directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl PresentSink for PngSequenceSink {
    fn begin(&mut self, _cfg: SinkConfig) -> FadeloopResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))?;
        Ok(())
    }

    fn present(&mut self, idx: u64, screen: &Screen) -> FadeloopResult<SinkFlow> {
        let path = self.dir.join(format!("frame_{idx:06}.png"));
        let mut rgba = Vec::with_capacity(screen.pixels().len() * 4);
        for &px in screen.pixels() {
            let [a, r, g, b] = unpack_argb(px);
            rgba.extend_from_slice(&[r, g, b, a]);
        }
        image::save_buffer_with_format(
            &path,
            &rgba,
            screen.width(),
            screen.height(),
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(SinkFlow::Continue)
    }

    fn end(&mut self) -> FadeloopResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Canvas;

    #[test]
    fn memory_sink_captures_in_order() {
        let mut sink = MemorySink::new();
        let cfg = SinkConfig {
            width: 2,
            height: 1,
            tick_rate: TickRate::DEFAULT,
        };
        sink.begin(cfg).unwrap();
        assert_eq!(sink.config().map(|c| (c.width, c.height)), Some((2, 1)));

        let mut screen = Screen::new(Canvas {
            width: 2,
            height: 1,
        });
        screen.copy_from(&[10, 20]).unwrap();
        assert_eq!(sink.present(0, &screen).unwrap(), SinkFlow::Continue);
        screen.copy_from(&[30, 40]).unwrap();
        assert_eq!(sink.present(1, &screen).unwrap(), SinkFlow::Continue);
        sink.end().unwrap();

        assert!(sink.ended());
        assert_eq!(sink.frames(), &[(0, vec![10, 20]), (1, vec![30, 40])]);
    }

    #[test]
    fn begin_resets_captured_state() {
        let mut sink = MemorySink::new();
        let cfg = SinkConfig {
            width: 1,
            height: 1,
            tick_rate: TickRate::DEFAULT,
        };
        sink.begin(cfg).unwrap();
        let screen = Screen::new(Canvas {
            width: 1,
            height: 1,
        });
        sink.present(0, &screen).unwrap();
        sink.end().unwrap();

        sink.begin(cfg).unwrap();
        assert!(sink.frames().is_empty());
        assert!(!sink.ended());
    }
}
