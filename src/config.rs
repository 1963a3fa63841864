use embassy_time::Duration;

use crate::dispatch::EndpointId;

pub const DEFAULT_BRIGHTNESS: u8 = 128;
pub const DEFAULT_HUE: u8 = 0;

/// Saturation for a light that starts white
pub const SATURATION_WHITE: u8 = 0;
/// Saturation for a light that starts fully colored
pub const SATURATION_FULL: u8 = 254;

/// Identify duration used for every identify start notification
pub const DEFAULT_IDENTIFY_SECS: u16 = 5;
pub const IDENTIFY_HALF_PERIOD: Duration = Duration::from_millis(500);

/// First endpoint after the root node
pub const DEFAULT_LIGHT_ENDPOINT: EndpointId = EndpointId(1);

/// What the identify sequence shows once it is over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestorePolicy {
    /// Render the state as it is when the sequence ends
    #[default]
    Latest,
    /// Render the state captured when the sequence started.
    /// The logical state is left untouched, so output and state may differ
    /// until the next setter call.
    Snapshot,
}

/// Configuration for the light controller and its collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightConfig {
    pub power: bool,
    pub brightness: u8,
    pub hue: u8,
    pub saturation: u8,
    /// Endpoint the dispatcher accepts changes for
    pub light_endpoint: EndpointId,
    pub identify_secs: u16,
    pub identify_half_period: Duration,
    pub restore: RestorePolicy,
    /// Cancel a running identify sequence when the light is switched off
    pub abort_identify_on_power_off: bool,
}

impl LightConfig {
    /// Defaults with an explicit start saturation.
    ///
    /// Firmware in the field ships with both [`SATURATION_WHITE`] and
    /// [`SATURATION_FULL`], so there is no implied default.
    pub const fn new(saturation: u8) -> Self {
        Self {
            power: false,
            brightness: DEFAULT_BRIGHTNESS,
            hue: DEFAULT_HUE,
            saturation,
            light_endpoint: DEFAULT_LIGHT_ENDPOINT,
            identify_secs: DEFAULT_IDENTIFY_SECS,
            identify_half_period: IDENTIFY_HALF_PERIOD,
            restore: RestorePolicy::Latest,
            abort_identify_on_power_off: false,
        }
    }

    #[must_use]
    pub const fn with_light_endpoint(mut self, endpoint: EndpointId) -> Self {
        self.light_endpoint = endpoint;
        self
    }

    #[must_use]
    pub const fn with_identify_secs(mut self, secs: u16) -> Self {
        self.identify_secs = secs;
        self
    }

    #[must_use]
    pub const fn with_identify_half_period(mut self, half_period: Duration) -> Self {
        self.identify_half_period = half_period;
        self
    }

    #[must_use]
    pub const fn with_restore(mut self, restore: RestorePolicy) -> Self {
        self.restore = restore;
        self
    }

    #[must_use]
    pub const fn with_abort_identify_on_power_off(mut self, abort: bool) -> Self {
        self.abort_identify_on_power_off = abort;
        self
    }
}
