//! The crossfade engine.
//!
//! [`Blender`] owns the normalized gallery plus the playback cursor and
//! recomputes the visible frame once per logical tick. A transition from
//! image `i` to `i + 1` takes `transition_ticks` ticks: the first
//! `transition_ticks - 1` produce interpolated frames, the final one commits
//! the switch and copies the destination image in exactly. Indices wrap
//! modulo the gallery length, so the last image fades back into the first
//! and playback forms a closed cycle.

use crate::core::{pack_argb, unpack_argb, Canvas};
use crate::error::{FadeloopError, FadeloopResult};
use crate::gallery::Gallery;

pub struct Blender {
    gallery: Gallery,
    current_index: usize,
    counter: u32,
    transition_ticks: u32,
    frame: Vec<u32>,
}

impl Blender {
    /// Starts playback at the first image with a freshly copied frame.
    pub fn new(gallery: Gallery, transition_ticks: u32) -> FadeloopResult<Self> {
        validate_transition_ticks(transition_ticks)?;
        let frame = gallery.frame(0).to_vec();
        Ok(Self {
            gallery,
            current_index: 0,
            counter: 0,
            transition_ticks,
            frame,
        })
    }

    /// Updates the transition length for subsequent ticks. A value below 1 is
    /// rejected and the previous setting stays in force.
    pub fn set_transition_ticks(&mut self, ticks: u32) -> FadeloopResult<()> {
        validate_transition_ticks(ticks)?;
        self.transition_ticks = ticks;
        Ok(())
    }

    /// One logical tick of playback.
    ///
    /// Increments the counter, then either commits the switch (counter reached
    /// the transition length: cursor moves to the next image and the frame
    /// becomes an exact copy of it) or rewrites the frame as a per-pixel
    /// blend of the current and next image at `counter / transition_ticks`.
    pub fn advance(&mut self) {
        self.counter += 1;
        let next = (self.current_index + 1) % self.gallery.len();
        if self.counter >= self.transition_ticks {
            self.current_index = next;
            self.counter = 0;
            self.frame.copy_from_slice(self.gallery.frame(next));
            return;
        }
        let progress = self.counter as f32 / self.transition_ticks as f32;
        let cur_px = self.gallery.frame(self.current_index);
        let next_px = self.gallery.frame(next);
        for (out, (&cur, &next)) in self.frame.iter_mut().zip(cur_px.iter().zip(next_px)) {
            *out = crossfade_argb(cur, next, progress);
        }
    }

    /// The most recently computed frame, valid until the next [`advance`].
    ///
    /// [`advance`]: Blender::advance
    pub fn current_frame(&self) -> &[u32] {
        &self.frame
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn transition_counter(&self) -> u32 {
        self.counter
    }

    pub fn transition_ticks(&self) -> u32 {
        self.transition_ticks
    }

    pub fn canvas(&self) -> Canvas {
        self.gallery.canvas()
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }
}

fn validate_transition_ticks(ticks: u32) -> FadeloopResult<()> {
    if ticks < 1 {
        return Err(FadeloopError::configuration(
            "transition duration must be at least 1 tick",
        ));
    }
    Ok(())
}

/// Blends two packed pixels channel by channel at `progress`, clamped to
/// `[0, 1]`.
///
/// Each channel moves linearly from `cur` toward `next`, rounded to the
/// nearest integer and clamped to the 8-bit range.
pub fn crossfade_argb(cur: u32, next: u32, progress: f32) -> u32 {
    let progress = progress.clamp(0.0, 1.0);
    let [ca, cr, cg, cb] = unpack_argb(cur);
    let [na, nr, ng, nb] = unpack_argb(next);
    pack_argb(
        lerp_channel(ca, na, progress),
        lerp_channel(cr, nr, progress),
        lerp_channel(cg, ng, progress),
        lerp_channel(cb, nb, progress),
    )
}

fn lerp_channel(cur: u8, next: u8, t: f32) -> u8 {
    let out = f32::from(cur) + (f32::from(next) - f32::from(cur)) * t;
    out.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::SourceImage;

    fn solid_gallery(pixels: &[u32]) -> Gallery {
        let sources = pixels
            .iter()
            .map(|&px| SourceImage::new(2, 2, vec![px; 4]).unwrap())
            .collect();
        Gallery::from_sources(sources).unwrap()
    }

    const RED: u32 = 0xFFFF_0000;
    const BLUE: u32 = 0xFF00_00FF;

    #[test]
    fn construction_copies_first_image() {
        let blender = Blender::new(solid_gallery(&[RED, BLUE]), 4).unwrap();
        assert_eq!(blender.current_index(), 0);
        assert_eq!(blender.transition_counter(), 0);
        assert_eq!(blender.current_frame(), solid_gallery(&[RED, BLUE]).frame(0));
    }

    #[test]
    fn zero_transition_ticks_is_rejected() {
        assert!(Blender::new(solid_gallery(&[RED]), 0).is_err());
        let mut blender = Blender::new(solid_gallery(&[RED]), 4).unwrap();
        assert!(blender.set_transition_ticks(0).is_err());
        assert_eq!(blender.transition_ticks(), 4);
        blender.set_transition_ticks(7).unwrap();
        assert_eq!(blender.transition_ticks(), 7);
    }

    #[test]
    fn red_to_blue_over_four_ticks() {
        let mut blender = Blender::new(solid_gallery(&[RED, BLUE]), 4).unwrap();

        blender.advance();
        assert_eq!(blender.current_frame()[0], pack_argb(255, 191, 0, 64));
        blender.advance();
        assert_eq!(blender.current_frame()[0], pack_argb(255, 128, 0, 128));
        blender.advance();
        assert_eq!(blender.current_frame()[0], pack_argb(255, 64, 0, 191));

        // Fourth tick commits the switch exactly.
        blender.advance();
        assert_eq!(blender.current_index(), 1);
        assert_eq!(blender.transition_counter(), 0);
        assert!(blender.current_frame().iter().all(|&px| px == BLUE));
    }

    #[test]
    fn interpolation_never_overshoots() {
        let cur = pack_argb(10, 250, 3, 200);
        let next = pack_argb(240, 5, 180, 200);
        let gallery = solid_gallery(&[cur, next]);
        let mut blender = Blender::new(gallery, 16).unwrap();
        for _ in 0..15 {
            blender.advance();
            let out = unpack_argb(blender.current_frame()[0]);
            for (chan, (&c, &n)) in out
                .iter()
                .zip(unpack_argb(cur).iter().zip(unpack_argb(next).iter()))
            {
                assert!(*chan >= c.min(n) && *chan <= c.max(n));
            }
        }
    }

    #[test]
    fn full_cycle_returns_to_start() {
        let pixels = [RED, 0xFF00_FF00, BLUE];
        let ticks = 5u32;
        let mut blender = Blender::new(solid_gallery(&pixels), ticks).unwrap();
        for _ in 0..(pixels.len() as u32 * ticks) {
            blender.advance();
        }
        assert_eq!(blender.current_index(), 0);
        assert_eq!(blender.transition_counter(), 0);
        assert!(blender.current_frame().iter().all(|&px| px == RED));
    }

    #[test]
    fn single_image_stays_static() {
        let mut blender = Blender::new(solid_gallery(&[RED]), 3).unwrap();
        for _ in 0..10 {
            blender.advance();
            assert_eq!(blender.current_index(), 0);
            assert!(blender.current_frame().iter().all(|&px| px == RED));
        }
    }

    #[test]
    fn duration_one_hard_cuts() {
        let mut blender = Blender::new(solid_gallery(&[RED, BLUE]), 1).unwrap();
        blender.advance();
        assert_eq!(blender.current_index(), 1);
        assert!(blender.current_frame().iter().all(|&px| px == BLUE));
        blender.advance();
        assert_eq!(blender.current_index(), 0);
        assert!(blender.current_frame().iter().all(|&px| px == RED));
    }

    #[test]
    fn shortening_mid_transition_takes_effect_immediately() {
        let mut blender = Blender::new(solid_gallery(&[RED, BLUE]), 100).unwrap();
        blender.advance();
        blender.advance();
        assert_eq!(blender.current_index(), 0);
        blender.set_transition_ticks(3).unwrap();
        // Counter is already 2, so the next tick reaches the new duration.
        blender.advance();
        assert_eq!(blender.current_index(), 1);
        assert_eq!(blender.transition_counter(), 0);
    }

    #[test]
    fn crossfade_rounds_to_nearest() {
        assert_eq!(crossfade_argb(0xFF00_0000, 0xFF00_00FF, 0.25), pack_argb(255, 0, 0, 64));
        assert_eq!(crossfade_argb(0, 0, 0.5), 0);
        assert_eq!(crossfade_argb(0xFFFF_FFFF, 0xFFFF_FFFF, 0.9), 0xFFFF_FFFF);
        assert_eq!(crossfade_argb(0xFFFF_FFFF, 0, 1.0), 0);
    }

    #[test]
    fn out_of_range_progress_clamps_to_endpoints() {
        let cur = pack_argb(10, 250, 3, 200);
        let next = pack_argb(240, 5, 180, 120);
        assert_eq!(crossfade_argb(cur, next, -0.5), cur);
        assert_eq!(crossfade_argb(cur, next, 1.5), next);
    }
}
