//! Attribute dispatch
//!
//! Turns attribute change and identify notifications from the protocol
//! stack into controller calls. Only pre-update changes addressed to the
//! light endpoint do anything; everything else is dropped silently.

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::{
    config::LightConfig,
    controller::{LightController, LightError},
    identify::IdentifySignals,
    logging::{debug, info, warning},
    output::PixelOutput,
    queue::{EventQueue, LightEvent},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EndpointId(pub u16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClusterId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttributeId(pub u32);

impl ClusterId {
    pub const ON_OFF: Self = Self(0x0006);
    pub const LEVEL_CONTROL: Self = Self(0x0008);
    pub const COLOR_CONTROL: Self = Self(0x0300);
}

impl AttributeId {
    /// On/Off cluster
    pub const ON_OFF: Self = Self(0x0000);
    /// Level Control cluster
    pub const CURRENT_LEVEL: Self = Self(0x0000);
    /// Color Control cluster
    pub const CURRENT_HUE: Self = Self(0x0000);
    /// Color Control cluster
    pub const CURRENT_SATURATION: Self = Self(0x0001);
}

/// When the notification fires relative to the attribute store write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePhase {
    PreUpdate,
    PostUpdate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeValue {
    Bool(bool),
    U8(u8),
    /// Nullable attribute set to null
    Null,
}

impl AttributeValue {
    const fn as_bool(self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(value),
            _ => None,
        }
    }

    const fn as_u8(self) -> Option<u8> {
        match self {
            Self::U8(value) => Some(value),
            _ => None,
        }
    }
}

/// Attribute change notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeChange {
    pub phase: UpdatePhase,
    pub endpoint: EndpointId,
    pub cluster: ClusterId,
    pub attribute: AttributeId,
    pub value: AttributeValue,
}

/// Identify cluster notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifyEvent {
    /// Effect parameters are reported but not used; the sequence is always
    /// a plain blink of the configured length.
    Start { effect_id: u8, effect_variant: u8 },
    Stop,
}

/// Controller call an attribute change maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightCommand {
    SetPower(bool),
    SetBrightness(u8),
    /// New hue, paired with the cached saturation
    SetHue(u8),
    /// New saturation, paired with the cached hue
    SetSaturation(u8),
}

impl LightCommand {
    /// Map a change to a command, `None` if it is not for this light
    pub fn resolve(change: &AttributeChange, light_endpoint: EndpointId) -> Option<Self> {
        if change.phase != UpdatePhase::PreUpdate || change.endpoint != light_endpoint {
            return None;
        }

        match (change.cluster, change.attribute) {
            (ClusterId::ON_OFF, AttributeId::ON_OFF) => change.value.as_bool().map(Self::SetPower),
            (ClusterId::LEVEL_CONTROL, AttributeId::CURRENT_LEVEL) => {
                change.value.as_u8().map(Self::SetBrightness)
            }
            (ClusterId::COLOR_CONTROL, AttributeId::CURRENT_HUE) => {
                change.value.as_u8().map(Self::SetHue)
            }
            (ClusterId::COLOR_CONTROL, AttributeId::CURRENT_SATURATION) => {
                change.value.as_u8().map(Self::SetSaturation)
            }
            _ => None,
        }
    }

    pub async fn apply<M: RawMutex, O: PixelOutput>(
        self,
        controller: &LightController<M, O>,
    ) -> Result<(), LightError> {
        match self {
            Self::SetPower(on) => controller.set_power(on).await,
            Self::SetBrightness(level) => controller.set_brightness(level).await,
            Self::SetHue(hue) => controller.set_hue(hue).await,
            Self::SetSaturation(saturation) => controller.set_saturation(saturation).await,
        }
    }
}

/// Routes protocol notifications to the controller and identify task
pub struct Dispatcher<'a, M: RawMutex, O> {
    controller: &'a LightController<M, O>,
    identify: &'a IdentifySignals<M>,
    light_endpoint: EndpointId,
    identify_secs: u16,
    abort_identify_on_power_off: bool,
}

impl<'a, M: RawMutex, O: PixelOutput> Dispatcher<'a, M, O> {
    pub const fn new(
        controller: &'a LightController<M, O>,
        identify: &'a IdentifySignals<M>,
        config: &LightConfig,
    ) -> Self {
        Self {
            controller,
            identify,
            light_endpoint: config.light_endpoint,
            identify_secs: config.identify_secs,
            abort_identify_on_power_off: config.abort_identify_on_power_off,
        }
    }

    /// Command `change` resolves to for this light
    pub fn resolve(&self, change: &AttributeChange) -> Option<LightCommand> {
        LightCommand::resolve(change, self.light_endpoint)
    }

    /// Apply an attribute change.
    ///
    /// Returns the command that ran, or `None` when the change was ignored.
    pub async fn handle_attribute(
        &self,
        change: &AttributeChange,
    ) -> Result<Option<LightCommand>, LightError> {
        let Some(command) = self.resolve(change) else {
            debug!("dispatch: ignored {:?}", change);
            return Ok(None);
        };

        if command == LightCommand::SetPower(false) && self.abort_identify_on_power_off {
            self.identify.cancel();
        }
        command.apply(self.controller).await?;
        Ok(Some(command))
    }

    pub fn handle_identify(&self, event: IdentifyEvent) {
        match event {
            IdentifyEvent::Start {
                effect_id,
                effect_variant,
            } => {
                info!(
                    "dispatch: identify start (effect {} variant {})",
                    effect_id, effect_variant
                );
                self.identify.request(self.identify_secs);
            }
            IdentifyEvent::Stop => {
                info!("dispatch: identify stop");
                self.identify.cancel();
            }
        }
    }

    pub async fn handle(&self, event: LightEvent) -> Result<(), LightError> {
        match event {
            LightEvent::Attribute(change) => self.handle_attribute(&change).await.map(|_| ()),
            LightEvent::Identify(event) => {
                self.handle_identify(event);
                Ok(())
            }
        }
    }

    /// Handle every queued event without waiting (non-blocking)
    ///
    /// Errors are logged and do not stop the drain; the next successful
    /// refresh converges the strip. Returns the number of events handled.
    pub async fn process_pending<const SIZE: usize>(&self, queue: &EventQueue<SIZE>) -> usize {
        let mut handled = 0;
        while let Some(event) = queue.take() {
            if let Err(err) = self.handle(event).await {
                warning!("dispatch: {:?} failed: {}", event, err);
            }
            handled += 1;
        }
        handled
    }

    /// Serve the queue forever
    pub async fn run<const SIZE: usize>(&self, queue: &EventQueue<SIZE>) -> ! {
        loop {
            let event = queue.next().await;
            if let Err(err) = self.handle(event).await {
                warning!("dispatch: {:?} failed: {}", event, err);
            }
        }
    }
}
