//! Revert timer - puts the status back to Ready after a transient state.
//!
//! At most one revert timer is outstanding: starting a new one cancels the
//! previous one first, so a burst of events collapses into a single revert
//! anchored to the latest event.

use super::RingRemote;
use crate::config::{STATUS_COOKIE, STATUS_RESET_TIME_MS};
use crate::platform::{StatusDisplay, TimerHandle, TimerService};
use crate::status::Status;

impl RingRemote {
    /// Cancel any pending revert timer, then schedule a fresh one.
    pub fn start_revert_timer<T>(&mut self, timers: &mut T)
    where
        T: TimerService + ?Sized,
    {
        self.cancel_revert_timer(timers);
        self.pending_timer = Some(timers.schedule_once(STATUS_RESET_TIME_MS, STATUS_COOKIE));
    }

    /// Best-effort cancel of the pending revert timer.
    ///
    /// The handle is only cleared when the timer service confirms the
    /// cancel; if the timer already fired the stale handle is kept.
    /// Returns whether a timer was cancelled.
    pub fn cancel_revert_timer<T>(&mut self, timers: &mut T) -> bool
    where
        T: TimerService + ?Sized,
    {
        let Some(handle) = self.pending_timer else {
            return false;
        };

        if timers.cancel(handle) {
            self.pending_timer = None;
            true
        } else {
            #[cfg(feature = "defmt")]
            defmt::debug!("revert timer {} not cancellable, keeping handle", handle);
            false
        }
    }

    /// Timer service callback.
    ///
    /// Any cookie other than the revert cookie is ignored.
    pub fn on_timer_fired<D>(&mut self, display: &mut D, handle: TimerHandle, cookie: u32)
    where
        D: StatusDisplay + ?Sized,
    {
        if cookie != STATUS_COOKIE {
            return;
        }

        if self.pending_timer == Some(handle) {
            self.pending_timer = None;
        }
        self.set_status(display, Status::Ready);
    }
}
