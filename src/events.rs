//! Event loop inbox.
//!
//! Buttons, the timer task and the BLE task all post here; `app_task` is
//! the only consumer, so handlers never run concurrently.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use ring_my_phone::platform::TimerHandle;
use ring_my_phone::{Button, SendFailure};

#[derive(Clone, Copy, defmt::Format)]
pub enum AppEvent {
    /// Debounced button press.
    Button(Button),
    /// A single-shot timer expired.
    TimerFired { handle: TimerHandle, cookie: u32 },
    /// The phone wrote to the confirmation characteristic.
    MessageReceived,
    /// A notification to the phone could not be delivered.
    SendFailed(SendFailure),
}

pub type EventChannel = Channel<CriticalSectionRawMutex, AppEvent, 8>;

pub static EVENTS: EventChannel = Channel::new();
