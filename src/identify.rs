//! Identify sequence
//!
//! Blinks pixel 0 white at a fixed half period so the device can be found,
//! then hands the strip back to the controller's normal output. Pauses are
//! raced against a stop signal, so the sequence can be cut short.

use embassy_futures::select::{Either, select};
use embassy_sync::{blocking_mutex::raw::RawMutex, signal::Signal};
use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;

use crate::{
    config::{LightConfig, RestorePolicy},
    controller::{LightController, LightError},
    logging::{info, warning},
    output::PixelOutput,
};

/// How an identify sequence ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifyOutcome {
    /// Every step ran
    Completed,
    /// Stopped early after `steps` steps
    Cancelled { steps: u32 },
}

/// Start and stop requests for an [`Identifier`]
///
/// Shared by reference between the identifier task and whoever requests
/// identification, usually the dispatcher.
pub struct IdentifySignals<M: RawMutex> {
    start: Signal<M, u16>,
    stop: Signal<M, ()>,
}

impl<M: RawMutex> IdentifySignals<M> {
    pub const fn new() -> Self {
        Self {
            start: Signal::new(),
            stop: Signal::new(),
        }
    }

    /// Ask the identifier task to run a sequence of `secs` seconds.
    /// A request that was not picked up yet is replaced.
    pub fn request(&self, secs: u16) {
        self.start.signal(secs);
    }

    /// Stop the running sequence, if any, and drop a request that was not
    /// picked up yet
    pub fn cancel(&self) {
        self.start.reset();
        self.stop.signal(());
    }
}

impl<M: RawMutex> Default for IdentifySignals<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs identify sequences on top of a [`LightController`]
///
/// `D` provides the pauses; `embassy_time::Delay` on target.
pub struct Identifier<'a, M: RawMutex, O, D> {
    controller: &'a LightController<M, O>,
    signals: &'a IdentifySignals<M>,
    delay: D,
    half_period: Duration,
    restore: RestorePolicy,
}

impl<'a, M, O, D> Identifier<'a, M, O, D>
where
    M: RawMutex,
    O: PixelOutput,
    D: DelayNs,
{
    pub fn new(
        controller: &'a LightController<M, O>,
        signals: &'a IdentifySignals<M>,
        delay: D,
        config: &LightConfig,
    ) -> Self {
        Self {
            controller,
            signals,
            delay,
            half_period: config.identify_half_period,
            restore: config.restore,
        }
    }

    /// Blink for `secs` seconds, then restore normal output.
    ///
    /// Runs `2 * secs` steps with a half period pause after each one. The
    /// controller is locked for each step only, so attribute changes keep
    /// flowing in between. A failed step is logged and skipped; the restore
    /// result is returned.
    pub async fn identify(&mut self, secs: u16) -> Result<IdentifyOutcome, LightError> {
        info!("identify: start, {} s", secs);

        // A stop from before this sequence must not end it
        self.signals.stop.reset();
        let snapshot = self.controller.state().await;

        let steps = u32::from(secs) * 2;
        let mut outcome = IdentifyOutcome::Completed;
        for step in 0..steps {
            if let Err(err) = self.controller.blink(step % 2 == 0).await {
                warning!("identify: step {} failed: {}", step, err);
            }
            if self.pause().await {
                outcome = IdentifyOutcome::Cancelled { steps: step + 1 };
                break;
            }
        }

        info!("identify: done, {:?}", outcome);
        match self.restore {
            RestorePolicy::Latest => self.controller.refresh().await?,
            RestorePolicy::Snapshot => self.controller.show(snapshot).await?,
        }
        Ok(outcome)
    }

    /// Serve start requests forever
    pub async fn run(&mut self) -> ! {
        loop {
            let secs = self.signals.start.wait().await;
            if let Err(err) = self.identify(secs).await {
                warning!("identify: restore failed: {}", err);
            }
        }
    }

    /// Wait one half period. Returns `true` when cancelled.
    async fn pause(&mut self) -> bool {
        let ms = u32::try_from(self.half_period.as_millis()).unwrap_or(u32::MAX);
        match select(self.delay.delay_ms(ms), self.signals.stop.wait()).await {
            Either::First(()) => false,
            Either::Second(()) => true,
        }
    }
}
