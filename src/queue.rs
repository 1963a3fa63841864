//! Event queue between the protocol stack and the dispatcher.
//!
//! Notifications arrive on the protocol stack's callback context, which can
//! not await. They are posted here and drained by the dispatcher task.
//! Thread/interrupt safe via critical sections.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use heapless::Deque;

use crate::dispatch::{AttributeChange, IdentifyEvent};

/// Notification for the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightEvent {
    Attribute(AttributeChange),
    Identify(IdentifyEvent),
}

impl From<AttributeChange> for LightEvent {
    fn from(change: AttributeChange) -> Self {
        Self::Attribute(change)
    }
}

impl From<IdentifyEvent> for LightEvent {
    fn from(event: IdentifyEvent) -> Self {
        Self::Identify(event)
    }
}

/// Returned by [`EventQueue::post`] with the event that did not fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFull(pub LightEvent);

impl core::fmt::Display for QueueFull {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("light event queue is full")
    }
}

impl core::error::Error for QueueFull {}

/// Bounded FIFO of [`LightEvent`]s
///
/// Any number of producers may post; one dispatcher should drain it.
pub struct EventQueue<const SIZE: usize> {
    events: Mutex<RefCell<Deque<LightEvent, SIZE>>>,
    ready: Signal<CriticalSectionRawMutex, ()>,
}

impl<const SIZE: usize> EventQueue<SIZE> {
    pub const fn new() -> Self {
        Self {
            events: Mutex::new(RefCell::new(Deque::new())),
            ready: Signal::new(),
        }
    }

    /// Queue an event and wake the dispatcher. Never blocks.
    pub fn post(&self, event: impl Into<LightEvent>) -> Result<(), QueueFull> {
        critical_section::with(|cs| {
            self.events
                .borrow(cs)
                .borrow_mut()
                .push_back(event.into())
                .map_err(QueueFull)
        })?;
        self.ready.signal(());
        Ok(())
    }

    /// Oldest queued event, if any
    pub fn take(&self) -> Option<LightEvent> {
        critical_section::with(|cs| self.events.borrow(cs).borrow_mut().pop_front())
    }

    /// Wait for the next event
    pub async fn next(&self) -> LightEvent {
        loop {
            if let Some(event) = self.take() {
                return event;
            }
            self.ready.wait().await;
        }
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.events.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const SIZE: usize> Default for EventQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}
