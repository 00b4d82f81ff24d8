//! The watch as one `Platform`: display, timers, BLE transport, vibrator.

use crate::ble::transport::BleTransport;
use crate::haptics::Vibrator;
use crate::timers::EmbassyTimers;
use crate::ui::display::OledStatus;
use ring_my_phone::platform::{
    Haptics, MessageTransport, StatusDisplay, TimerHandle, TimerService,
};
use ring_my_phone::{Error, SendFailure};

pub struct Watch<I2C> {
    pub display: OledStatus<I2C>,
    pub timers: EmbassyTimers,
    pub transport: BleTransport,
    pub haptics: Vibrator,
}

impl<I2C> StatusDisplay for Watch<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn set_text(&mut self, text: &'static str) {
        self.display.set_text(text);
    }
}

impl<I2C> TimerService for Watch<I2C> {
    fn schedule_once(&mut self, delay_ms: u32, cookie: u32) -> TimerHandle {
        self.timers.schedule_once(delay_ms, cookie)
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.timers.cancel(handle)
    }
}

impl<I2C> MessageTransport for Watch<I2C> {
    fn out_acquire(&mut self) -> Result<(), Error> {
        self.transport.out_acquire()
    }

    fn out_buffer(&mut self) -> &mut [u8] {
        self.transport.out_buffer()
    }

    fn out_send(&mut self, len: usize) -> Result<(), SendFailure> {
        self.transport.out_send(len)
    }

    fn out_release(&mut self) {
        self.transport.out_release();
    }

    fn register_callbacks(&mut self) -> Result<(), Error> {
        self.transport.register_callbacks()
    }

    fn deregister_callbacks(&mut self) -> Result<(), Error> {
        self.transport.deregister_callbacks()
    }
}

impl<I2C> Haptics for Watch<I2C> {
    fn pulse_short(&mut self) {
        self.haptics.pulse_short();
    }
}
