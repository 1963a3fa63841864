use crate::{
    color::{Hsv, MAX_LEVEL, Rgb},
    config::LightConfig,
};

/// Logical light state
///
/// Hue, saturation and brightness are kept within `0..=MAX_LEVEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightState {
    pub(crate) power: bool,
    pub(crate) hue: u8,
    pub(crate) saturation: u8,
    pub(crate) brightness: u8,
}

impl LightState {
    pub const fn from_config(config: &LightConfig) -> Self {
        Self {
            power: config.power,
            hue: clamp_level(config.hue),
            saturation: clamp_level(config.saturation),
            brightness: clamp_level(config.brightness),
        }
    }

    pub const fn power(&self) -> bool {
        self.power
    }

    pub const fn hue(&self) -> u8 {
        self.hue
    }

    pub const fn saturation(&self) -> u8 {
        self.saturation
    }

    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    /// HSV triple with brightness as value
    pub const fn hsv(&self) -> Hsv {
        Hsv::new(self.hue, self.saturation, self.brightness)
    }

    /// Color every pixel shows, `None` while powered off (strip cleared)
    pub const fn output_color(&self) -> Option<Rgb> {
        if self.power {
            Some(self.hsv().to_rgb())
        } else {
            None
        }
    }

    pub(crate) fn set_brightness(&mut self, level: u8) {
        self.brightness = clamp_level(level);
    }

    pub(crate) fn set_color(&mut self, hue: u8, saturation: u8) {
        self.hue = clamp_level(hue);
        self.saturation = clamp_level(saturation);
    }
}

const fn clamp_level(level: u8) -> u8 {
    if level > MAX_LEVEL { MAX_LEVEL } else { level }
}
