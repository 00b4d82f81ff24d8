//! Inbound listener - ring confirmations from the phone, and the transport
//! callback registration they depend on.

use super::RingRemote;
use crate::platform::{Haptics, MessageTransport, StatusDisplay, TimerService};
use crate::status::Status;

impl RingRemote {
    /// Transport callback: the phone confirmed it rang.
    ///
    /// The payload is not inspected; any inbound message counts.
    pub fn on_message_received<P>(&mut self, platform: &mut P)
    where
        P: StatusDisplay + TimerService + Haptics + ?Sized,
    {
        platform.pulse_short();
        self.set_status(platform, Status::Done);
        self.start_revert_timer(platform);
    }

    /// Attach the inbound / send-failure callbacks to the transport.
    ///
    /// An existing registration is detached first, so there is never more
    /// than one. If detaching fails the old registration is kept as is.
    /// Returns whether callbacks are registered afterwards.
    pub fn register_callbacks<M>(&mut self, transport: &mut M) -> bool
    where
        M: MessageTransport + ?Sized,
    {
        if self.callbacks_registered && transport.deregister_callbacks().is_ok() {
            self.callbacks_registered = false;
        }

        if !self.callbacks_registered {
            match transport.register_callbacks() {
                Ok(()) => self.callbacks_registered = true,
                Err(_e) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("callback registration failed: {}", _e);
                }
            }
        }

        #[cfg(feature = "defmt")]
        defmt::info!("message callbacks registered: {}", self.callbacks_registered);
        self.callbacks_registered
    }
}
