//! `MessageTransport` over the GATT command characteristic.

use core::sync::atomic::Ordering;

use crate::ble::server::Server;
use crate::ble::{current_connection, deliver, CALLBACKS};
use crate::events::AppEvent;
use defmt::debug;
use nrf_softdevice::ble::gatt_server::{self, NotifyValueError};
use ring_my_phone::config::OUTBOUND_BUFFER_SIZE;
use ring_my_phone::platform::MessageTransport;
use ring_my_phone::{Error, SendFailure};

pub struct BleTransport {
    server: &'static Server,
    out: [u8; OUTBOUND_BUFFER_SIZE],
    reserved: bool,
}

impl BleTransport {
    pub fn new(server: &'static Server) -> Self {
        Self {
            server,
            out: [0; OUTBOUND_BUFFER_SIZE],
            reserved: false,
        }
    }

    fn notify(&self, data: &[u8]) -> Result<(), SendFailure> {
        let conn = current_connection().ok_or(SendFailure::NotConnected)?;
        let handle = self.server.ring.command_value_handle;
        gatt_server::notify_value(&conn, handle, data).map_err(|e| match e {
            NotifyValueError::Disconnected => SendFailure::NotConnected,
            _ => SendFailure::Internal,
        })
    }
}

impl MessageTransport for BleTransport {
    fn out_acquire(&mut self) -> Result<(), Error> {
        if self.reserved {
            return Err(Error::BufferUnavailable);
        }
        self.reserved = true;
        Ok(())
    }

    fn out_buffer(&mut self) -> &mut [u8] {
        &mut self.out
    }

    /// Delivery outcome is reported through the event loop, never here.
    fn out_send(&mut self, len: usize) -> Result<(), SendFailure> {
        let len = len.min(self.out.len());
        match self.notify(&self.out[..len]) {
            Ok(()) => debug!("sent {} bytes", len),
            Err(reason) => deliver(AppEvent::SendFailed(reason)),
        }
        Ok(())
    }

    fn out_release(&mut self) {
        self.reserved = false;
    }

    fn register_callbacks(&mut self) -> Result<(), Error> {
        CALLBACKS.store(true, Ordering::Release);
        Ok(())
    }

    fn deregister_callbacks(&mut self) -> Result<(), Error> {
        CALLBACKS.store(false, Ordering::Release);
        Ok(())
    }
}
