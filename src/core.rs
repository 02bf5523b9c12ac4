use crate::error::{FadeloopError, FadeloopResult};

/// Packed pixel layout is `0xAARRGGBB`: alpha in bits 24..32, then red, green,
/// blue. All frame buffers in this crate are row-major `u32` slices in this
/// layout.
pub const OPAQUE_BLACK: u32 = 0xFF00_0000;

pub fn pack_argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    (u32::from(a) << 24) | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

/// Channels in `[a, r, g, b]` order.
pub fn unpack_argb(px: u32) -> [u8; 4] {
    [
        ((px >> 24) & 0xFF) as u8,
        ((px >> 16) & 0xFF) as u8,
        ((px >> 8) & 0xFF) as u8,
        (px & 0xFF) as u8,
    ]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Logical update rate in ticks per second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TickRate(pub u32);

impl TickRate {
    pub const DEFAULT: TickRate = TickRate(60);

    pub fn new(ticks_per_sec: u32) -> FadeloopResult<Self> {
        if ticks_per_sec == 0 {
            return Err(FadeloopError::validation("tick rate must be > 0"));
        }
        Ok(Self(ticks_per_sec))
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }

    pub fn tick_duration_secs(self) -> f64 {
        1.0 / self.as_f64()
    }

    /// Convert a user-facing duration in whole seconds into ticks.
    pub fn ticks_for_secs(self, secs: u32) -> u32 {
        secs.saturating_mul(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_places_channels_by_shift() {
        assert_eq!(pack_argb(0x12, 0x34, 0x56, 0x78), 0x1234_5678);
        assert_eq!(pack_argb(0xFF, 0, 0, 0), OPAQUE_BLACK);
    }

    #[test]
    fn unpack_pack_roundtrip() {
        for px in [0u32, 0xFFFF_FFFF, 0x1234_5678, 0x80FF_0001, OPAQUE_BLACK] {
            let [a, r, g, b] = unpack_argb(px);
            assert_eq!(pack_argb(a, r, g, b), px);
        }
    }

    #[test]
    fn tick_rate_rejects_zero() {
        assert!(TickRate::new(0).is_err());
        assert_eq!(TickRate::new(60).unwrap(), TickRate::DEFAULT);
    }

    #[test]
    fn ticks_for_secs_multiplies_by_rate() {
        let rate = TickRate::DEFAULT;
        assert_eq!(rate.ticks_for_secs(1), 60);
        assert_eq!(rate.ticks_for_secs(3), 180);
        assert_eq!(TickRate(1000).ticks_for_secs(u32::MAX), u32::MAX);
    }

    #[test]
    fn tick_duration_matches_rate() {
        assert_eq!(TickRate(60).tick_duration_secs(), 1.0 / 60.0);
        assert_eq!(TickRate(1).tick_duration_secs(), 1.0);
    }

    #[test]
    fn canvas_json_roundtrip() {
        let canvas = Canvas {
            width: 1920,
            height: 1080,
        };
        let s = serde_json::to_string(&canvas).unwrap();
        let de: Canvas = serde_json::from_str(&s).unwrap();
        assert_eq!(de, canvas);

        let rate: TickRate = serde_json::from_str("60").unwrap();
        assert_eq!(rate, TickRate::DEFAULT);
    }
}
