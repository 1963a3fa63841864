//! Pixel output capability.
//!
//! The controller only talks to the strip through [`PixelOutput`]: a fixed
//! size in-memory pixel buffer plus a flush to the physical strip.

use core::fmt;

use smart_leds::SmartLedsWrite;

use crate::color::{BLACK, Rgb};

/// Errors reported by a pixel output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputError {
    /// Pixel index past the end of the strip
    OutOfRange { index: usize, len: usize },
    /// Flushing the buffer to the strip failed
    Transmit,
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "pixel {index} out of range for strip of {len}")
            }
            Self::Transmit => f.write_str("strip transmit failed"),
        }
    }
}

impl core::error::Error for OutputError {}

/// Abstract addressable LED strip
///
/// Implement this trait to support different hardware platforms.
/// Writes go to a buffer; nothing reaches the strip until [`refresh`].
///
/// [`refresh`]: PixelOutput::refresh
pub trait PixelOutput {
    /// Number of pixels on the strip
    fn pixel_count(&self) -> usize;

    /// Set one pixel in the buffer
    fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<(), OutputError>;

    /// Set every pixel in the buffer to black
    fn clear(&mut self);

    /// Flush the buffer to the strip
    fn refresh(&mut self) -> Result<(), OutputError>;

    /// Set every pixel in the buffer to one color
    fn fill(&mut self, color: Rgb) -> Result<(), OutputError> {
        for index in 0..self.pixel_count() {
            self.set_pixel(index, color)?;
        }
        Ok(())
    }
}

/// [`PixelOutput`] over any `smart-leds` writer
///
/// Keeps an `N` pixel frame buffer and writes it in one go on refresh.
/// Works with `esp-hal-smartled`'s RMT adapter or any other
/// [`SmartLedsWrite`] driver.
pub struct SmartLedsOutput<W, const N: usize> {
    writer: W,
    frame: [Rgb; N],
}

impl<W, const N: usize> SmartLedsOutput<W, N> {
    /// Wrap a writer. The frame buffer starts black.
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            frame: [BLACK; N],
        }
    }

    /// Current frame buffer contents
    pub const fn frame(&self) -> &[Rgb; N] {
        &self.frame
    }

    /// Give the writer back
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W, const N: usize> PixelOutput for SmartLedsOutput<W, N>
where
    W: SmartLedsWrite,
    Rgb: Into<W::Color>,
{
    fn pixel_count(&self) -> usize {
        N
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<(), OutputError> {
        let pixel = self
            .frame
            .get_mut(index)
            .ok_or(OutputError::OutOfRange { index, len: N })?;
        *pixel = color;
        Ok(())
    }

    fn clear(&mut self) {
        self.frame = [BLACK; N];
    }

    fn refresh(&mut self) -> Result<(), OutputError> {
        self.writer
            .write(self.frame.iter().copied())
            .map_err(|_| OutputError::Transmit)
    }
}
