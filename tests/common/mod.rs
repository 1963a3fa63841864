#![allow(dead_code)]

use std::{cell::RefCell, rc::Rc};

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embedded_hal_async::delay::DelayNs;
use garland_light::{
    LightConfig, LightController, OutputError, PixelOutput, Rgb, color::BLACK,
};

pub const PIXELS: usize = 4;

pub type Controller = LightController<NoopRawMutex, FakeOutput>;

#[derive(Debug, Default)]
pub struct Recording {
    pub buffer: Vec<Rgb>,
    /// Buffer contents at every successful refresh
    pub flushed: Vec<Vec<Rgb>>,
    pub fail_refreshes: usize,
    pub refresh_attempts: usize,
}

impl Recording {
    pub fn last(&self) -> Option<&Vec<Rgb>> {
        self.flushed.last()
    }
}

/// In-memory strip recording every flush
#[derive(Clone)]
pub struct FakeOutput {
    pub recording: Rc<RefCell<Recording>>,
}

impl FakeOutput {
    pub fn new(pixels: usize) -> Self {
        Self {
            recording: Rc::new(RefCell::new(Recording {
                buffer: vec![Rgb::new(9, 9, 9); pixels],
                ..Recording::default()
            })),
        }
    }

    /// Make the next `count` refreshes fail
    pub fn fail_next(&self, count: usize) {
        self.recording.borrow_mut().fail_refreshes = count;
    }

    pub fn flushed(&self) -> Vec<Vec<Rgb>> {
        self.recording.borrow().flushed.clone()
    }

    pub fn last(&self) -> Vec<Rgb> {
        self.recording.borrow().last().cloned().unwrap_or_default()
    }

    pub fn flush_count(&self) -> usize {
        self.recording.borrow().flushed.len()
    }
}

impl PixelOutput for FakeOutput {
    fn pixel_count(&self) -> usize {
        self.recording.borrow().buffer.len()
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<(), OutputError> {
        let mut recording = self.recording.borrow_mut();
        let len = recording.buffer.len();
        let pixel = recording
            .buffer
            .get_mut(index)
            .ok_or(OutputError::OutOfRange { index, len })?;
        *pixel = color;
        Ok(())
    }

    fn clear(&mut self) {
        for pixel in &mut self.recording.borrow_mut().buffer {
            *pixel = BLACK;
        }
    }

    fn refresh(&mut self) -> Result<(), OutputError> {
        let mut recording = self.recording.borrow_mut();
        recording.refresh_attempts += 1;
        if recording.fail_refreshes > 0 {
            recording.fail_refreshes -= 1;
            return Err(OutputError::Transmit);
        }
        let frame = recording.buffer.clone();
        recording.flushed.push(frame);
        Ok(())
    }
}

/// Delay that records requested pauses and yields once instead of sleeping
#[derive(Clone, Default)]
pub struct StepDelay {
    pub pauses_ms: Rc<RefCell<Vec<u32>>>,
    stall: bool,
}

impl StepDelay {
    /// Pauses never finish, only a cancel ends them
    pub fn stalled() -> Self {
        Self {
            stall: true,
            ..Self::default()
        }
    }

    pub fn pauses(&self) -> Vec<u32> {
        self.pauses_ms.borrow().clone()
    }
}

impl DelayNs for StepDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.delay_us(ns / 1_000).await;
    }

    async fn delay_us(&mut self, us: u32) {
        self.delay_ms(us / 1_000).await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.pauses_ms.borrow_mut().push(ms);
        if self.stall {
            core::future::pending::<()>().await;
        } else {
            embassy_futures::yield_now().await;
        }
    }
}

pub fn uniform(color: Rgb) -> Vec<Rgb> {
    vec![color; PIXELS]
}

/// Controller with an attached fake output; the attach flush is dropped
pub fn attached(config: &LightConfig) -> (Controller, FakeOutput) {
    let output = FakeOutput::new(PIXELS);
    let controller = Controller::new(config);
    embassy_futures::block_on(controller.attach_output(output.clone()))
        .expect("attach output");
    output.recording.borrow_mut().flushed.clear();
    (controller, output)
}
