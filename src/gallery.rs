//! Normalizes a set of decoded images onto one shared canvas.
//!
//! The canvas spans the per-axis maxima of the set, so no source is ever
//! scaled. Smaller images are centered over opaque black padding, which keeps
//! every frame the same length and lets the blend stage walk pixel pairs
//! without bounds churn.

use crate::core::{Canvas, OPAQUE_BLACK};
use crate::error::{FadeloopError, FadeloopResult};

/// A decoded image in packed `0xAARRGGBB` pixels, row-major.
#[derive(Clone, Debug)]
pub struct SourceImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u32>,
}

impl SourceImage {
    pub fn new(width: u32, height: u32, pixels: Vec<u32>) -> FadeloopResult<Self> {
        if width == 0 || height == 0 {
            return Err(FadeloopError::validation(format!(
                "source image dimensions must be positive, got {width}x{height}"
            )));
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(FadeloopError::validation(format!(
                "source image pixel count {} does not match {width}x{height} ({expected})",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }
}

/// The normalized image sequence: every frame shares one canvas size.
#[derive(Clone, Debug)]
pub struct Gallery {
    canvas: Canvas,
    frames: Vec<Vec<u32>>,
}

impl Gallery {
    /// Builds the gallery from decoded sources, preserving their order.
    pub fn from_sources(sources: Vec<SourceImage>) -> FadeloopResult<Self> {
        if sources.is_empty() {
            return Err(FadeloopError::empty_gallery(
                "no images to play; the gallery needs at least one",
            ));
        }
        let canvas = Canvas {
            width: sources.iter().map(|s| s.width).max().unwrap_or(0),
            height: sources.iter().map(|s| s.height).max().unwrap_or(0),
        };
        let frames = sources
            .iter()
            .map(|src| center_onto(canvas, src))
            .collect();
        Ok(Self { canvas, frames })
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

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame(&self, index: usize) -> &[u32] {
        &self.frames[index]
    }
}

fn center_onto(canvas: Canvas, src: &SourceImage) -> Vec<u32> {
    let mut out = vec![OPAQUE_BLACK; canvas.pixel_count()];
    let x0 = ((canvas.width - src.width) / 2) as usize;
    let y0 = ((canvas.height - src.height) / 2) as usize;
    let src_w = src.width as usize;
    let dst_w = canvas.width as usize;
    for row in 0..src.height as usize {
        let dst_start = (y0 + row) * dst_w + x0;
        let src_start = row * src_w;
        out[dst_start..dst_start + src_w]
            .copy_from_slice(&src.pixels[src_start..src_start + src_w]);
    }
    out
}
