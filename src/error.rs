//! Unified error type for ring-my-phone.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` (behind the `defmt` feature) for efficient
//! on-target logging.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Transport
    /// No outbound message buffer could be acquired.
    BufferUnavailable,

    /// Buffer too small for the encoded message.
    BufferOverflow,

    /// The transport rejected or failed to deliver an outbound message.
    Send(SendFailure),

    /// Message callbacks could not be attached to the transport.
    Registration,

    /// Message callbacks could not be detached from the transport.
    Deregistration,
}

/// Reasons the transport gives for a failed delivery.
///
/// Reported asynchronously and never correlated with a specific command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendFailure {
    /// No phone is connected.
    NotConnected,
    /// The phone refused the message.
    Nack,
    /// The phone did not acknowledge in time.
    Timeout,
    /// A previous message is still in flight.
    Busy,
    /// Any other transport-internal error.
    Internal,
}

// Convenience conversions

impl From<SendFailure> for Error {
    fn from(e: SendFailure) -> Self {
        Error::Send(e)
    }
}
