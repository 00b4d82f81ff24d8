//! Host-testable core of the ring-my-phone watch remote.
//!
//! Two buttons on the watch ask a paired phone to start or stop ringing.
//! The status line shows what just happened and falls back to "Ready"
//! five seconds after the last event.
//!
//! Everything hardware-facing sits behind the traits in [`platform`]; the
//! firmware binary (`main.rs`, `embedded` feature) implements them on the
//! nRF52840 and runs [`remote::RingRemote`] from a single event loop.
//!
//! Usage: `cargo test --lib` (unit) or `cargo test` (unit + integration).

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod error;
pub mod platform;
pub mod protocol;
pub mod remote;
pub mod status;

pub use error::{Error, SendFailure};
pub use protocol::Command;
pub use remote::{Button, RequestTag, RingRemote};
pub use status::Status;
