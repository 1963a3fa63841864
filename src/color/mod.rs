mod hsv;

use smart_leds::RGB8;

pub use hsv::{Hsv, hsv_to_rgb};

pub type Rgb = RGB8;

/// Upper bound of the hue, saturation and level attribute domain.
pub const MAX_LEVEL: u8 = 254;

/// Color written to pixel 0 on the lit steps of an identify sequence
pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
