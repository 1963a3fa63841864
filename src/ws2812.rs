//! WS2812B bit encoding for pulse-train peripherals (ESP32 RMT and similar).
//!
//! Every pixel is sent as 24 bits in GRB order, most significant bit first.
//! Each bit is a high pulse followed by a low pulse; the pulse widths tell a
//! zero from a one.
//!
//! For outputs that drive the RMT peripheral directly: keep a
//! [`frame_len`] sized pulse buffer, run [`Ws2812Timing::encode_frame`] on
//! the frame in [`PixelOutput::refresh`] and hand the pulses, packed with
//! [`Pulse::to_rmt_word`], to the channel. [`SmartLedsOutput`] covers
//! drivers that do their own encoding.
//!
//! [`PixelOutput::refresh`]: crate::output::PixelOutput::refresh
//! [`SmartLedsOutput`]: crate::output::SmartLedsOutput

use crate::{color::Rgb, output::OutputError};

/// Bits per pixel on the wire
pub const BITS_PER_PIXEL: usize = 24;

const T0H_NS: u32 = 400;
const T0L_NS: u32 = 850;
const T1H_NS: u32 = 800;
const T1L_NS: u32 = 450;

/// One bit on the wire: `high` ticks at high level, then `low` ticks low
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pulse {
    pub high: u16,
    pub low: u16,
}

impl Pulse {
    /// Terminates a transmission
    pub const END: Self = Self { high: 0, low: 0 };

    /// Pack into an ESP32 RMT item: duration0/level0 in the low half,
    /// duration1/level1 in the high half. The end marker packs to zero.
    pub const fn to_rmt_word(self) -> u32 {
        if self.high == 0 && self.low == 0 {
            return 0;
        }
        let high = self.high as u32 & 0x7FFF;
        let low = self.low as u32 & 0x7FFF;
        high | (1 << 15) | (low << 16)
    }
}

/// Pulse widths in peripheral ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ws2812Timing {
    pub zero: Pulse,
    pub one: Pulse,
}

impl Ws2812Timing {
    /// RMT clocked at 80 MHz, one tick is 12.5 ns
    pub const RMT_80MHZ: Self = Self::from_resolution_hz(80_000_000);

    /// Timing for a peripheral ticking at `hz`.
    /// Widths are truncated to whole ticks.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_resolution_hz(hz: u32) -> Self {
        const fn ticks(ns: u32, hz: u32) -> u16 {
            (ns as u64 * hz as u64 / 1_000_000_000) as u16
        }
        Self {
            zero: Pulse {
                high: ticks(T0H_NS, hz),
                low: ticks(T0L_NS, hz),
            },
            one: Pulse {
                high: ticks(T1H_NS, hz),
                low: ticks(T1L_NS, hz),
            },
        }
    }

    const fn bit(&self, set: bool) -> Pulse {
        if set { self.one } else { self.zero }
    }

    /// Encode one pixel into `pulses`
    pub fn encode_pixel(&self, color: Rgb, pulses: &mut [Pulse; BITS_PER_PIXEL]) {
        let grb = (u32::from(color.g) << 16) | (u32::from(color.r) << 8) | u32::from(color.b);
        for (i, pulse) in pulses.iter_mut().enumerate() {
            *pulse = self.bit((grb >> (BITS_PER_PIXEL - 1 - i)) & 1 == 1);
        }
    }

    /// Encode a whole frame followed by [`Pulse::END`].
    ///
    /// Returns the filled part of `out`. `out` needs room for
    /// [`frame_len`] pulses.
    pub fn encode_frame<'p>(
        &self,
        colors: &[Rgb],
        out: &'p mut [Pulse],
    ) -> Result<&'p [Pulse], OutputError> {
        let len = frame_len(colors.len());
        if out.len() < len {
            return Err(OutputError::OutOfRange {
                index: len - 1,
                len: out.len(),
            });
        }

        let (pixels, _) = out.as_chunks_mut::<BITS_PER_PIXEL>();
        for (color, pulses) in colors.iter().zip(pixels) {
            self.encode_pixel(*color, pulses);
        }
        out[len - 1] = Pulse::END;
        Ok(&out[..len])
    }
}

/// Pulses needed for `pixels` pixels plus the end marker
pub const fn frame_len(pixels: usize) -> usize {
    pixels * BITS_PER_PIXEL + 1
}
