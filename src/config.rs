//! Application-wide constants and compile-time configuration.
//!
//! All timing parameters, protocol constants, and hardware tuning
//! live here so they can be adjusted in one place.

// Status

/// Title shown above the status line.
pub const APP_TITLE: &str = "Ring My Phone";

/// How long a transient status stays visible before reverting to Ready (ms).
pub const STATUS_RESET_TIME_MS: u32 = 5000;

/// Cookie attached to the revert timer. Only this value is ever scheduled.
pub const STATUS_COOKIE: u32 = 1;

// Protocol

/// Dictionary key carrying the command byte.
pub const CMD_KEY: u32 = 0x0;

/// Command values understood by the phone companion app.
pub const CMD_START: u8 = 0x01;
pub const CMD_STOP: u8 = 0x02;

/// Transport message buffer sizes (bytes).
pub const INBOUND_BUFFER_SIZE: usize = 256;
pub const OUTBOUND_BUFFER_SIZE: usize = 256;

// BLE

/// Name placed in the advertising payload.
pub const BLE_DEVICE_NAME: &str = "RingMyPhone";

/// BLE connection interval range (in 1.25 ms units).
/// 24..40 = 30..50 ms; this link carries a handful of bytes per minute.
pub const BLE_CONN_INTERVAL_MIN: u16 = 24;
pub const BLE_CONN_INTERVAL_MAX: u16 = 40;

/// BLE slave latency (number of connection events the peripheral can skip).
pub const BLE_SLAVE_LATENCY: u16 = 4;

/// BLE supervision timeout (in 10 ms units). 400 = 4 s.
pub const BLE_SUP_TIMEOUT: u16 = 400;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Button UP (ring)       → P0.11
//   Button DOWN (silence)  → P0.12
//   I²C SDA                → P0.26
//   I²C SCL                → P0.27
//   Vibration motor        → P0.06

/// Button debounce time (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 50;

/// Length of a short haptic pulse (ms).
pub const HAPTIC_SHORT_PULSE_MS: u64 = 100;
