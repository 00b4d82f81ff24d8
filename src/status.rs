//! Human-visible status line.

/// The single status shown on the watch face.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// Idle, waiting for a button press.
    #[default]
    Ready,
    /// A ring request was just sent.
    Ringing,
    /// A silence request was just sent.
    Silencing,
    /// The phone confirmed it rang.
    Done,
    /// The transport reported a delivery failure.
    Failed,
}

impl Status {
    /// Fixed display string bound to this status.
    pub const fn text(self) -> &'static str {
        match self {
            Status::Ready => "Ready",
            Status::Ringing => "Ringing",
            Status::Silencing => "Silencing",
            Status::Done => "Done",
            Status::Failed => "Failed :(",
        }
    }

    /// Every status except Ready reverts after the reset delay.
    pub const fn is_transient(self) -> bool {
        !matches!(self, Status::Ready)
    }
}
