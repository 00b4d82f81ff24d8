//! Input dispatcher - the two action-bar buttons.
//!
//! Status is set optimistically before anything reaches the phone. There is
//! no in-flight tracking: a Start and a Stop sent back to back may resolve
//! in either order, and the display shows whichever event lands last.

use super::{RequestTag, RingRemote};
use crate::error::Error;
use crate::platform::{MessageTransport, StatusDisplay, TimerService};
use crate::protocol::Command;
use crate::status::Status;

/// Physical button events (after debouncing).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Top button - ring the phone.
    Up,
    /// Bottom button - silence the phone.
    Down,
}

impl RingRemote {
    pub fn on_ring_button<P>(&mut self, platform: &mut P) -> Result<RequestTag, Error>
    where
        P: StatusDisplay + TimerService + MessageTransport + ?Sized,
    {
        self.set_status(platform, Status::Ringing);
        self.send_command(platform, Command::Start)
    }

    pub fn on_silence_button<P>(&mut self, platform: &mut P) -> Result<RequestTag, Error>
    where
        P: StatusDisplay + TimerService + MessageTransport + ?Sized,
    {
        self.set_status(platform, Status::Silencing);
        self.send_command(platform, Command::Stop)
    }

    /// Route a button press to its handler.
    pub fn handle_button<P>(&mut self, platform: &mut P, button: Button) -> Result<RequestTag, Error>
    where
        P: StatusDisplay + TimerService + MessageTransport + ?Sized,
    {
        match button {
            Button::Up => self.on_ring_button(platform),
            Button::Down => self.on_silence_button(platform),
        }
    }
}
