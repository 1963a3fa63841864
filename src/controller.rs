//! LED state controller
//!
//! Owns the logical [`LightState`] and the pixel output behind one async
//! mutex. Every setter updates the state and then refreshes the strip while
//! still holding the lock, so a reader never sees state and output from two
//! different updates.

use core::fmt;

use embassy_sync::{blocking_mutex::raw::RawMutex, mutex::Mutex};

use crate::{
    color::WHITE,
    config::LightConfig,
    logging::{debug, info, warning},
    output::{OutputError, PixelOutput},
    state::LightState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightError {
    /// No pixel output attached yet
    InvalidState,
    /// The pixel output rejected a write or flush
    Output(OutputError),
}

impl From<OutputError> for LightError {
    fn from(err: OutputError) -> Self {
        Self::Output(err)
    }
}

impl fmt::Display for LightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidState => f.write_str("pixel output is not initialized"),
            Self::Output(err) => write!(f, "pixel output: {err}"),
        }
    }
}

impl core::error::Error for LightError {}

struct Inner<O> {
    state: LightState,
    output: Option<O>,
}

impl<O: PixelOutput> Inner<O> {
    fn output(&mut self) -> Result<&mut O, LightError> {
        self.output.as_mut().ok_or(LightError::InvalidState)
    }

    /// Push `state` to the strip
    fn render(&mut self, state: LightState) -> Result<(), LightError> {
        let output = self.output()?;
        match state.output_color() {
            Some(color) => {
                debug!(
                    "light: h={} s={} v={} -> r={} g={} b={}",
                    state.hue, state.saturation, state.brightness, color.r, color.g, color.b
                );
                output.fill(color)?;
            }
            None => output.clear(),
        }
        output.refresh()?;
        Ok(())
    }

    fn refresh(&mut self) -> Result<(), LightError> {
        let state = self.state;
        self.render(state).inspect_err(|err| {
            warning!("light: refresh failed: {}", err);
        })
    }
}

/// Single logical light spanning the whole strip
///
/// `M` picks the mutex flavour: `CriticalSectionRawMutex` when the
/// controller is shared between tasks or interrupt priorities,
/// `NoopRawMutex` when everything runs on one executor.
pub struct LightController<M: RawMutex, O> {
    inner: Mutex<M, Inner<O>>,
}

impl<M: RawMutex, O: PixelOutput> LightController<M, O> {
    /// Create a controller without an output.
    ///
    /// Until [`attach_output`](Self::attach_output) succeeds every operation
    /// records its state change and fails with [`LightError::InvalidState`].
    pub const fn new(config: &LightConfig) -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: LightState::from_config(config),
                output: None,
            }),
        }
    }

    /// Install the pixel output, clear the strip and flush it.
    ///
    /// Meant to run once at startup; an error here should abort startup.
    /// On failure the output is dropped and the controller stays detached.
    pub async fn attach_output(&self, mut output: O) -> Result<(), LightError> {
        output.clear();
        output.refresh()?;

        info!("light: output attached, {} pixels", output.pixel_count());
        self.inner.lock().await.output = Some(output);
        Ok(())
    }

    /// Copy of the current logical state
    pub async fn state(&self) -> LightState {
        self.inner.lock().await.state
    }

    pub async fn set_power(&self, on: bool) -> Result<(), LightError> {
        info!("light: power {}", if on { "on" } else { "off" });
        self.update(|state| state.power = on).await
    }

    pub async fn set_brightness(&self, level: u8) -> Result<(), LightError> {
        info!("light: brightness {}", level);
        self.update(|state| state.set_brightness(level)).await
    }

    /// Set hue and saturation as one update
    pub async fn set_color(&self, hue: u8, saturation: u8) -> Result<(), LightError> {
        info!("light: color hue={} sat={}", hue, saturation);
        self.update(|state| state.set_color(hue, saturation)).await
    }

    /// Set hue, saturation and brightness as one update
    pub async fn set_hsv(&self, hue: u8, saturation: u8, value: u8) -> Result<(), LightError> {
        info!("light: hsv {} {} {}", hue, saturation, value);
        self.update(|state| {
            state.set_color(hue, saturation);
            state.set_brightness(value);
        })
        .await
    }

    /// Set the hue, keeping the cached saturation.
    ///
    /// The saturation is read inside the same critical section as the write,
    /// so a concurrent saturation change can not be lost.
    pub async fn set_hue(&self, hue: u8) -> Result<(), LightError> {
        info!("light: hue {}", hue);
        self.update(|state| state.set_color(hue, state.saturation)).await
    }

    /// Set the saturation, keeping the cached hue
    pub async fn set_saturation(&self, saturation: u8) -> Result<(), LightError> {
        info!("light: saturation {}", saturation);
        self.update(|state| state.set_color(state.hue, saturation)).await
    }

    /// Re-render the current state
    pub async fn refresh(&self) -> Result<(), LightError> {
        self.inner.lock().await.refresh()
    }

    /// Apply `change` and refresh.
    ///
    /// The state change sticks even when the refresh fails; the next
    /// successful refresh brings the strip in line.
    async fn update(&self, change: impl FnOnce(&mut LightState)) -> Result<(), LightError> {
        let mut inner = self.inner.lock().await;
        change(&mut inner.state);
        inner.refresh()
    }

    /// One identify step: pixel 0 white, or the whole strip cleared.
    pub(crate) async fn blink(&self, lit: bool) -> Result<(), LightError> {
        let mut inner = self.inner.lock().await;
        let output = inner.output()?;
        if lit {
            output.set_pixel(0, WHITE)?;
        } else {
            output.clear();
        }
        output.refresh()?;
        Ok(())
    }

    /// Render `state` without making it the logical state
    pub(crate) async fn show(&self, state: LightState) -> Result<(), LightError> {
        self.inner.lock().await.render(state)
    }
}
