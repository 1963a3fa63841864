//! HSV to RGB conversion in the 0-254 attribute domain.
//!
//! Hue, saturation and value all use the 0..=254 range exposed by the
//! lighting clusters. Hue 254 is a full turn (360 degrees).

use super::{MAX_LEVEL, Rgb};

/// HSV triple in the 0..=254 domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hsv {
    pub hue: u8,
    pub saturation: u8,
    pub value: u8,
}

impl Hsv {
    pub const fn new(hue: u8, saturation: u8, value: u8) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }

    /// Convert to RGB, see [`hsv_to_rgb`]
    pub const fn to_rgb(self) -> Rgb {
        hsv_to_rgb(self.hue, self.saturation, self.value)
    }
}

/// Convert an HSV triple to RGB using integer math only.
///
/// Every intermediate is truncated in the same order as the strip firmware
/// does it, so the output is bit-exact with existing devices. Changing the
/// evaluation order of `p`, `q` or `t` changes rounding.
#[allow(clippy::cast_possible_truncation)]
pub const fn hsv_to_rgb(hue: u8, saturation: u8, value: u8) -> Rgb {
    if saturation == 0 {
        return Rgb {
            r: value,
            g: value,
            b: value,
        };
    }

    let s = saturation as u32;
    let v = value as u32;

    let degrees = hue as u32 * 360 / MAX_LEVEL as u32;
    let region = degrees / 60;
    let remainder = (degrees - region * 60) * 255 / 60;

    let p = (v * (255 - s) / 255) as u8;
    let q = (v * (255 - (s * remainder) / 255) / 255) as u8;
    let t = (v * (255 - (s * (255 - remainder)) / 255) / 255) as u8;

    let (r, g, b) = match region {
        0 => (value, t, p),
        1 => (q, value, p),
        2 => (p, value, t),
        3 => (p, q, value),
        4 => (t, p, value),
        // 360 degrees (hue 254) lands here as region 6
        _ => (value, p, q),
    };

    Rgb { r, g, b }
}
