//! Unit tests for the remote-control state machine.
//!
//! These run on the host against a recording mock of every collaborator.

use super::{Button, RequestTag, RingRemote};
use crate::config::{STATUS_COOKIE, STATUS_RESET_TIME_MS};
use crate::error::{Error, SendFailure};
use crate::platform::{Haptics, MessageTransport, StatusDisplay, TimerHandle, TimerService};
use crate::protocol::{decode_command, Command, COMMAND_MESSAGE_SIZE};
use crate::status::Status;
use heapless::Vec;

#[derive(Default)]
struct MockPlatform {
    // Display
    texts: Vec<&'static str, 32>,

    // Timers
    next_handle: u32,
    live_timers: Vec<TimerHandle, 8>,
    schedules: Vec<(u32, u32), 32>,
    cancel_fails: bool,

    // Transport
    buffer_unavailable: bool,
    acquired: bool,
    releases: u32,
    out: [u8; 16],
    sent: Vec<Command, 16>,
    reject_send: Option<SendFailure>,
    registrations: u32,
    register_fails: bool,
    deregister_fails: bool,

    // Haptics
    pulses: u32,
}

impl MockPlatform {
    fn last_text(&self) -> Option<&'static str> {
        self.texts.last().copied()
    }

    fn pending_timers(&self) -> usize {
        self.live_timers.len()
    }

    /// Fire the oldest live timer, as the timer service would.
    fn fire_next(&mut self) -> Option<TimerHandle> {
        if self.live_timers.is_empty() {
            return None;
        }
        Some(self.live_timers.remove(0))
    }
}

impl StatusDisplay for MockPlatform {
    fn set_text(&mut self, text: &'static str) {
        self.texts.push(text).unwrap();
    }
}

impl TimerService for MockPlatform {
    fn schedule_once(&mut self, delay_ms: u32, cookie: u32) -> TimerHandle {
        self.next_handle += 1;
        let handle = TimerHandle(self.next_handle);
        self.live_timers.push(handle).unwrap();
        self.schedules.push((delay_ms, cookie)).unwrap();
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        if self.cancel_fails {
            return false;
        }
        match self.live_timers.iter().position(|h| *h == handle) {
            Some(i) => {
                self.live_timers.remove(i);
                true
            }
            None => false,
        }
    }
}

impl MessageTransport for MockPlatform {
    fn out_acquire(&mut self) -> Result<(), Error> {
        if self.buffer_unavailable {
            return Err(Error::BufferUnavailable);
        }
        assert!(!self.acquired, "outbound buffer acquired twice");
        self.acquired = true;
        Ok(())
    }

    fn out_buffer(&mut self) -> &mut [u8] {
        assert!(self.acquired);
        &mut self.out
    }

    fn out_send(&mut self, len: usize) -> Result<(), SendFailure> {
        assert!(self.acquired);
        assert_eq!(len, COMMAND_MESSAGE_SIZE);
        if let Some(reason) = self.reject_send {
            return Err(reason);
        }
        let cmd = decode_command(&self.out[..len]).unwrap();
        self.sent.push(cmd).unwrap();
        Ok(())
    }

    fn out_release(&mut self) {
        assert!(self.acquired, "release without acquire");
        self.acquired = false;
        self.releases += 1;
    }

    fn register_callbacks(&mut self) -> Result<(), Error> {
        if self.register_fails {
            return Err(Error::Registration);
        }
        self.registrations += 1;
        Ok(())
    }

    fn deregister_callbacks(&mut self) -> Result<(), Error> {
        if self.deregister_fails {
            return Err(Error::Deregistration);
        }
        self.registrations -= 1;
        Ok(())
    }
}

impl Haptics for MockPlatform {
    fn pulse_short(&mut self) {
        self.pulses += 1;
    }
}

fn started() -> (RingRemote, MockPlatform) {
    let mut remote = RingRemote::new();
    let mut platform = MockPlatform::default();
    assert!(remote.start(&mut platform));
    (remote, platform)
}

// ════════════════════════════════════════════════════════════════════════
// Startup / shutdown
// ════════════════════════════════════════════════════════════════════════

#[test]
fn start_shows_ready_and_registers_once() {
    let (remote, platform) = started();
    assert_eq!(remote.status(), Status::Ready);
    assert_eq!(platform.last_text(), Some("Ready"));
    assert!(remote.callbacks_registered());
    assert_eq!(platform.registrations, 1);
    assert_eq!(remote.pending_timer(), None);
    assert_eq!(remote.last_request(), None);
}

#[test]
fn start_with_failed_registration_is_not_fatal() {
    let mut remote = RingRemote::new();
    let mut platform = MockPlatform {
        register_fails: true,
        ..Default::default()
    };
    assert!(!remote.start(&mut platform));
    assert!(!remote.callbacks_registered());
    assert_eq!(remote.status(), Status::Ready);
}

#[test]
fn shutdown_cancels_pending_timer() {
    let (mut remote, mut platform) = started();
    remote.on_ring_button(&mut platform).unwrap();
    assert_eq!(platform.pending_timers(), 1);

    remote.shutdown(&mut platform);
    assert_eq!(platform.pending_timers(), 0);
    assert_eq!(remote.pending_timer(), None);
}

#[test]
fn shutdown_without_timer_is_noop() {
    let (mut remote, mut platform) = started();
    remote.shutdown(&mut platform);
    assert_eq!(remote.pending_timer(), None);
}

// ════════════════════════════════════════════════════════════════════════
// Input dispatcher + command channel
// ════════════════════════════════════════════════════════════════════════

#[test]
fn ring_button_sends_start() {
    let (mut remote, mut platform) = started();
    let tag = remote.on_ring_button(&mut platform).unwrap();

    assert_eq!(remote.status(), Status::Ringing);
    assert_eq!(platform.last_text(), Some("Ringing"));
    assert_eq!(platform.sent.as_slice(), &[Command::Start]);
    assert_eq!(platform.releases, 1);
    assert_eq!(tag, RequestTag(0));
    assert_eq!(remote.last_request(), Some(tag));
    assert_eq!(
        platform.schedules.as_slice(),
        &[(STATUS_RESET_TIME_MS, STATUS_COOKIE)]
    );
}

#[test]
fn silence_button_sends_stop() {
    let (mut remote, mut platform) = started();
    remote.on_silence_button(&mut platform).unwrap();

    assert_eq!(remote.status(), Status::Silencing);
    assert_eq!(platform.last_text(), Some("Silencing"));
    assert_eq!(platform.sent.as_slice(), &[Command::Stop]);
    assert_eq!(platform.pending_timers(), 1);
}

#[test]
fn handle_button_routes_up_and_down() {
    let (mut remote, mut platform) = started();
    remote.handle_button(&mut platform, Button::Up).unwrap();
    remote.handle_button(&mut platform, Button::Down).unwrap();
    assert_eq!(platform.sent.as_slice(), &[Command::Start, Command::Stop]);
}

#[test]
fn ring_then_silence_supersedes_timer() {
    let (mut remote, mut platform) = started();
    remote.on_ring_button(&mut platform).unwrap();
    let first = remote.pending_timer().unwrap();

    remote.on_silence_button(&mut platform).unwrap();
    let second = remote.pending_timer().unwrap();

    assert_eq!(remote.status(), Status::Silencing);
    assert_ne!(first, second);
    assert_eq!(platform.pending_timers(), 1);
    assert_eq!(platform.live_timers[0], second);
}

#[test]
fn request_tags_increase() {
    let (mut remote, mut platform) = started();
    let a = remote.on_ring_button(&mut platform).unwrap();
    let b = remote.on_silence_button(&mut platform).unwrap();
    let c = remote.on_ring_button(&mut platform).unwrap();
    assert!(a < b && b < c);
    assert_eq!(remote.last_request(), Some(c));
}

#[test]
fn buffer_unavailable_keeps_optimistic_status() {
    // The send is dropped silently: status stays on the optimistic text
    // until the revert timer fires. No "Busy" status is introduced.
    let (mut remote, mut platform) = started();
    platform.buffer_unavailable = true;

    let result = remote.on_ring_button(&mut platform);

    assert_eq!(result, Err(Error::BufferUnavailable));
    assert_eq!(remote.status(), Status::Ringing);
    assert!(platform.sent.is_empty());
    assert_eq!(platform.releases, 0);
    assert_eq!(platform.pending_timers(), 1);
    assert_eq!(remote.last_request(), None);

    let handle = platform.fire_next().unwrap();
    remote.on_timer_fired(&mut platform, handle, STATUS_COOKIE);
    assert_eq!(remote.status(), Status::Ready);
}

#[test]
fn rejected_send_releases_buffer_and_fails() {
    let (mut remote, mut platform) = started();
    platform.reject_send = Some(SendFailure::NotConnected);

    let result = remote.on_ring_button(&mut platform);

    assert_eq!(result, Err(Error::Send(SendFailure::NotConnected)));
    assert_eq!(remote.status(), Status::Failed);
    assert_eq!(platform.last_text(), Some("Failed :("));
    assert_eq!(platform.releases, 1);
    assert!(!platform.acquired);
    assert_eq!(platform.pending_timers(), 1);
}

#[test]
fn buffer_released_after_every_send() {
    let (mut remote, mut platform) = started();
    for _ in 0..5 {
        remote.on_ring_button(&mut platform).unwrap();
        assert!(!platform.acquired);
    }
    assert_eq!(platform.releases, 5);
}

// ════════════════════════════════════════════════════════════════════════
// Asynchronous outcomes
// ════════════════════════════════════════════════════════════════════════

#[test]
fn send_failure_shows_failed_and_restarts_timer() {
    let (mut remote, mut platform) = started();
    remote.on_ring_button(&mut platform).unwrap();
    let before = remote.pending_timer().unwrap();

    remote.on_send_failed(&mut platform, SendFailure::Timeout);

    assert_eq!(remote.status(), Status::Failed);
    assert_eq!(platform.last_text(), Some("Failed :("));
    let after = remote.pending_timer().unwrap();
    assert_ne!(before, after);
    assert_eq!(platform.pending_timers(), 1);
}

#[test]
fn stale_failure_cannot_be_told_apart() {
    // Start fails after Stop was already sent. Without correlation the
    // failure is applied to the current state anyway.
    let (mut remote, mut platform) = started();
    let start = remote.on_ring_button(&mut platform).unwrap();
    let stop = remote.on_silence_button(&mut platform).unwrap();
    assert!(start < stop);

    remote.on_send_failed(&mut platform, SendFailure::Nack);

    assert_eq!(remote.status(), Status::Failed);
    assert_eq!(remote.last_request(), Some(stop));
}

#[test]
fn confirmation_pulses_once_and_shows_done() {
    let (mut remote, mut platform) = started();
    remote.on_ring_button(&mut platform).unwrap();

    remote.on_message_received(&mut platform);

    assert_eq!(platform.pulses, 1);
    assert_eq!(remote.status(), Status::Done);
    assert_eq!(platform.last_text(), Some("Done"));
    assert_eq!(platform.pending_timers(), 1);
}

#[test]
fn confirmation_without_request_still_counts() {
    let (mut remote, mut platform) = started();
    remote.on_message_received(&mut platform);
    assert_eq!(remote.status(), Status::Done);
    assert!(remote.pending_timer().is_some());
}

// ════════════════════════════════════════════════════════════════════════
// Revert timer
// ════════════════════════════════════════════════════════════════════════

#[test]
fn timer_fire_reverts_to_ready() {
    let (mut remote, mut platform) = started();
    remote.on_ring_button(&mut platform).unwrap();

    let handle = platform.fire_next().unwrap();
    remote.on_timer_fired(&mut platform, handle, STATUS_COOKIE);

    assert_eq!(remote.status(), Status::Ready);
    assert_eq!(platform.last_text(), Some("Ready"));
    assert_eq!(remote.pending_timer(), None);
}

#[test]
fn timer_with_wrong_cookie_is_ignored() {
    let (mut remote, mut platform) = started();
    remote.on_ring_button(&mut platform).unwrap();
    let handle = remote.pending_timer().unwrap();
    let shown = platform.texts.len();

    remote.on_timer_fired(&mut platform, handle, STATUS_COOKIE + 1);

    assert_eq!(remote.status(), Status::Ringing);
    assert_eq!(platform.texts.len(), shown);
    assert_eq!(remote.pending_timer(), Some(handle));
}

#[test]
fn failed_cancel_keeps_stale_handle() {
    let (mut remote, mut platform) = started();
    remote.on_ring_button(&mut platform).unwrap();
    let handle = remote.pending_timer().unwrap();

    platform.cancel_fails = true;
    assert!(!remote.cancel_revert_timer(&mut platform));
    assert_eq!(remote.pending_timer(), Some(handle));
}

#[test]
fn cancel_without_pending_timer() {
    let (mut remote, mut platform) = started();
    assert!(!remote.cancel_revert_timer(&mut platform));
}

#[test]
fn restart_after_failed_cancel_tracks_new_timer() {
    let (mut remote, mut platform) = started();
    remote.on_ring_button(&mut platform).unwrap();
    // The first timer fires but its event has not been handled yet.
    let fired = platform.fire_next().unwrap();

    remote.on_silence_button(&mut platform).unwrap();
    let current = remote.pending_timer().unwrap();
    assert_ne!(fired, current);
    assert_eq!(platform.pending_timers(), 1);
}

// ════════════════════════════════════════════════════════════════════════
// Callback registration
// ════════════════════════════════════════════════════════════════════════

#[test]
fn register_twice_leaves_one_registration() {
    let (mut remote, mut platform) = started();
    assert!(remote.register_callbacks(&mut platform));
    assert!(remote.register_callbacks(&mut platform));
    assert_eq!(platform.registrations, 1);
    assert!(remote.callbacks_registered());
}

#[test]
fn failed_deregister_keeps_existing_registration() {
    let (mut remote, mut platform) = started();
    platform.deregister_fails = true;
    assert!(remote.register_callbacks(&mut platform));
    assert_eq!(platform.registrations, 1);
}

#[test]
fn failed_reregister_reports_unregistered() {
    let (mut remote, mut platform) = started();
    platform.register_fails = true;
    assert!(!remote.register_callbacks(&mut platform));
    assert_eq!(platform.registrations, 0);
    assert!(!remote.callbacks_registered());
}
