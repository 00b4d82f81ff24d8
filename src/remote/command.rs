//! Command channel - sends Start/Stop to the phone.

use super::{RequestTag, RingRemote};
use crate::error::{Error, SendFailure};
use crate::platform::{MessageTransport, StatusDisplay, TimerService};
use crate::protocol::{encode_command, Command};
use crate::status::Status;

/// Reserved outbound buffer. Released on drop, whatever happened to it.
struct Outbound<'t, T: MessageTransport + ?Sized> {
    transport: &'t mut T,
}

impl<'t, T: MessageTransport + ?Sized> Outbound<'t, T> {
    fn acquire(transport: &'t mut T) -> Result<Self, Error> {
        transport.out_acquire()?;
        Ok(Self { transport })
    }

    fn buffer(&mut self) -> &mut [u8] {
        self.transport.out_buffer()
    }

    fn send(&mut self, len: usize) -> Result<(), SendFailure> {
        self.transport.out_send(len)
    }
}

impl<T: MessageTransport + ?Sized> Drop for Outbound<'_, T> {
    fn drop(&mut self) {
        self.transport.out_release();
    }
}

impl RingRemote {
    /// Send `cmd` to the phone.
    ///
    /// The revert timer is (re)started first, whatever the outcome. If no
    /// outbound buffer is available the send is dropped and the status is
    /// left as it is; the error is returned for logging only. A send the
    /// transport rejects on the spot is treated like a delivery failure.
    pub fn send_command<P>(&mut self, platform: &mut P, cmd: Command) -> Result<RequestTag, Error>
    where
        P: StatusDisplay + TimerService + MessageTransport + ?Sized,
    {
        self.start_revert_timer(platform);

        let tag = RequestTag(self.last_request.map_or(0, |t| t.0.wrapping_add(1)));

        let sent = {
            let mut outbound = match Outbound::acquire(&mut *platform) {
                Ok(outbound) => outbound,
                Err(e) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("{} dropped: {}", cmd, e);
                    return Err(e);
                }
            };
            let len = encode_command(cmd, outbound.buffer())?;
            self.last_request = Some(tag);
            outbound.send(len)
        };

        match sent {
            Ok(()) => Ok(tag),
            Err(reason) => {
                self.on_send_failed(platform, reason);
                Err(Error::Send(reason))
            }
        }
    }

    /// Transport callback: an outbound message was not delivered.
    ///
    /// There is no request correlation, so this applies to whichever
    /// command is current.
    pub fn on_send_failed<P>(&mut self, platform: &mut P, reason: SendFailure)
    where
        P: StatusDisplay + TimerService + ?Sized,
    {
        #[cfg(feature = "defmt")]
        defmt::warn!("send failed ({}), last request {}", reason, self.last_request);
        #[cfg(not(feature = "defmt"))]
        let _ = reason;

        self.set_status(platform, Status::Failed);
        self.start_revert_timer(platform);
    }
}
