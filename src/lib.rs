#![no_std]

mod logging;

pub mod color;
pub mod config;
pub mod controller;
pub mod dispatch;
pub mod identify;
pub mod output;
pub mod queue;
pub mod state;
pub mod ws2812;

pub use color::{Hsv, Rgb, hsv_to_rgb};
pub use config::{LightConfig, RestorePolicy};
pub use controller::{LightController, LightError};
pub use dispatch::{
    AttributeChange, AttributeId, AttributeValue, ClusterId, Dispatcher, EndpointId,
    IdentifyEvent, LightCommand, UpdatePhase,
};
pub use identify::{IdentifyOutcome, IdentifySignals, Identifier};
pub use output::{OutputError, PixelOutput, SmartLedsOutput};
pub use queue::{EventQueue, LightEvent, QueueFull};
pub use state::LightState;
pub use embassy_time::Duration;
