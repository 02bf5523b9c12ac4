use crate::core::{Canvas, OPAQUE_BLACK};
use crate::error::{FadeloopError, FadeloopResult};

/// The presentable framebuffer the render pass fills and hands to a sink.
///
/// Row-major packed `0xAARRGGBB` pixels, sized once from the gallery canvas
/// and reused for every frame.
pub struct Screen {
    canvas: Canvas,
    pixels: Vec<u32>,
}

impl Screen {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            pixels: vec![OPAQUE_BLACK; canvas.pixel_count()],
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    pub fn clear(&mut self) {
        self.pixels.fill(OPAQUE_BLACK);
    }

    /// Copies a blended frame in. The frame must match the canvas size
    /// exactly; under correct wiring this cannot fail.
    pub fn copy_from(&mut self, frame: &[u32]) -> FadeloopResult<()> {
        if frame.len() != self.pixels.len() {
            return Err(FadeloopError::validation(format!(
                "frame length {} does not match screen {}x{}",
                frame.len(),
                self.canvas.width,
                self.canvas.height
            )));
        }
        self.pixels.copy_from_slice(frame);
        Ok(())
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }
}
