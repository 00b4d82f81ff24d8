//! Bluetooth Low Energy subsystem.
//!
//! This module drives the Nordic SoftDevice S140 in **Peripheral** role;
//! the phone companion app connects to the watch:
//!
//! 1. **GATT server** - one service with a *command* characteristic
//!    (notify, watch → phone) and a *confirm* characteristic
//!    (write, phone → watch).
//! 2. **Link task** - advertises, accepts a connection, runs the GATT
//!    server until disconnect, then advertises again.
//! 3. **Transport** - `MessageTransport` for the event loop; notifications
//!    are sent from an owned outbound buffer and delivery failures come
//!    back later as `AppEvent::SendFailed`.
//!
//! Inbound writes and send failures only reach the event loop while
//! callbacks are registered.

pub mod server;
pub mod transport;

use core::cell::RefCell;
use core::sync::atomic::{AtomicBool, Ordering};

use crate::events::{AppEvent, EVENTS};
use defmt::warn;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use nrf_softdevice::ble::Connection;

/// The phone link, while one is up.
static CONNECTION: Mutex<CriticalSectionRawMutex, RefCell<Option<Connection>>> =
    Mutex::new(RefCell::new(None));

/// Whether inbound / failure callbacks are attached.
static CALLBACKS: AtomicBool = AtomicBool::new(false);

fn current_connection() -> Option<Connection> {
    CONNECTION.lock(|c| c.borrow().clone())
}

fn set_connection(conn: Option<Connection>) {
    CONNECTION.lock(|c| *c.borrow_mut() = conn);
}

fn callbacks_attached() -> bool {
    CALLBACKS.load(Ordering::Acquire)
}

/// Post a transport callback to the event loop, if callbacks are attached.
///
/// Called from non-async contexts (GATT closure, transport send); a full
/// inbox drops the event.
fn deliver(event: AppEvent) {
    if !callbacks_attached() {
        return;
    }
    if EVENTS.try_send(event).is_err() {
        warn!("event inbox full - dropping {}", event);
    }
}
