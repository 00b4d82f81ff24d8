//! Collaborator traits - the seams between the remote-control logic and
//! the watch hardware / host services.
//!
//! The firmware binary implements these over the SoftDevice, the OLED and
//! Embassy timers; host tests implement them with recording fakes.

use crate::error::{Error, SendFailure};

/// Opaque handle of a scheduled single-shot timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerHandle(pub u32);

/// Text field the status line is written into.
pub trait StatusDisplay {
    fn set_text(&mut self, text: &'static str);
}

/// Single-shot timer service.
///
/// Fired timers are delivered back to the event loop as
/// `(handle, cookie)` pairs; see [`RingRemote::on_timer_fired`].
///
/// [`RingRemote::on_timer_fired`]: crate::remote::RingRemote::on_timer_fired
pub trait TimerService {
    /// Schedule a timer firing once after `delay_ms`.
    fn schedule_once(&mut self, delay_ms: u32, cookie: u32) -> TimerHandle;

    /// Cancel a pending timer.
    ///
    /// Returns `false` if the timer already fired or cannot be cancelled.
    fn cancel(&mut self, handle: TimerHandle) -> bool;
}

/// Asynchronous message channel to the paired phone.
///
/// Outbound sends follow an acquire / write / send / release sequence.
/// Delivery failures arrive later as [`RingRemote::on_send_failed`];
/// inbound messages as [`RingRemote::on_message_received`]. Neither is
/// delivered unless callbacks are registered.
///
/// [`RingRemote::on_send_failed`]: crate::remote::RingRemote::on_send_failed
/// [`RingRemote::on_message_received`]: crate::remote::RingRemote::on_message_received
pub trait MessageTransport {
    /// Reserve the outbound buffer.
    fn out_acquire(&mut self) -> Result<(), Error>;

    /// The reserved outbound buffer. Only valid between acquire and release.
    fn out_buffer(&mut self) -> &mut [u8];

    /// Dispatch the first `len` bytes of the outbound buffer.
    fn out_send(&mut self, len: usize) -> Result<(), SendFailure>;

    /// Return the outbound buffer to the transport.
    fn out_release(&mut self);

    fn register_callbacks(&mut self) -> Result<(), Error>;

    fn deregister_callbacks(&mut self) -> Result<(), Error>;
}

/// Vibration motor.
pub trait Haptics {
    /// Fire-and-forget short vibration.
    fn pulse_short(&mut self);
}

/// Everything the event loop needs from the watch.
pub trait Platform: StatusDisplay + TimerService + MessageTransport + Haptics {}

impl<P> Platform for P where P: StatusDisplay + TimerService + MessageTransport + Haptics {}
