//! Remote-control state machine.
//!
//! [`RingRemote`] owns the only mutable state of the application: the
//! visible [`Status`], the pending revert timer, the callback registration
//! flag, and the request counter. Every handler takes `&mut self` plus the
//! collaborators it touches, and all handlers run on one event loop, so no
//! locking is involved.
//!
//! ## Flow
//!
//! ```text
//! button ──► input (optimistic status) ──► command ──► transport
//!                                            │
//!                                            └─► revert timer (5 s)
//! transport ──► inbound ack   ──► Done   + revert timer
//! transport ──► send failure  ──► Failed + revert timer
//! timer fired (cookie ok)     ──► Ready
//! ```

mod command;
mod inbound;
mod input;
mod timer;

#[cfg(test)]
mod tests;

pub use input::Button;

use crate::platform::{MessageTransport, StatusDisplay, TimerHandle, TimerService};
use crate::status::Status;

/// Sequence number given to each dispatched command.
///
/// The transport has no way to echo it back, so failures and
/// acknowledgements cannot be matched to the command that caused them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RequestTag(pub u32);

/// Application state of the watch remote.
#[derive(Debug, Default)]
pub struct RingRemote {
    status: Status,
    pending_timer: Option<TimerHandle>,
    callbacks_registered: bool,
    last_request: Option<RequestTag>,
}

impl RingRemote {
    /// Fresh state: Ready, no timer, callbacks not attached.
    pub const fn new() -> Self {
        Self {
            status: Status::Ready,
            pending_timer: None,
            callbacks_registered: false,
            last_request: None,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Handle of the outstanding revert timer, if any.
    pub fn pending_timer(&self) -> Option<TimerHandle> {
        self.pending_timer
    }

    pub fn callbacks_registered(&self) -> bool {
        self.callbacks_registered
    }

    /// Tag of the most recently dispatched command.
    pub fn last_request(&self) -> Option<RequestTag> {
        self.last_request
    }

    /// Update the status and write its text to the display.
    pub fn set_status<D>(&mut self, display: &mut D, status: Status)
    where
        D: StatusDisplay + ?Sized,
    {
        self.status = status;
        display.set_text(status.text());
    }

    /// Application start: show Ready and attach the message callbacks once.
    ///
    /// Returns whether callbacks are registered. A failed registration is
    /// not retried.
    pub fn start<P>(&mut self, platform: &mut P) -> bool
    where
        P: StatusDisplay + MessageTransport + ?Sized,
    {
        self.set_status(platform, Status::Ready);
        self.register_callbacks(platform)
    }

    /// Application teardown: drop the revert timer so it cannot fire into
    /// a torn-down context.
    pub fn shutdown<T>(&mut self, timers: &mut T)
    where
        T: TimerService + ?Sized,
    {
        self.cancel_revert_timer(timers);
    }
}
