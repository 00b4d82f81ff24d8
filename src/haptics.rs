//! Vibration motor on a GPIO (driven through a small MOSFET).

use embassy_nrf::gpio::{AnyPin, Level, Output, OutputDrive};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};
use ring_my_phone::config::HAPTIC_SHORT_PULSE_MS;
use ring_my_phone::platform::Haptics;

static PULSE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// `Haptics` front-end; the pulse itself runs in `haptics_task`.
pub struct Vibrator;

impl Haptics for Vibrator {
    fn pulse_short(&mut self) {
        PULSE.signal(());
    }
}

#[embassy_executor::task]
pub async fn haptics_task(pin: AnyPin) -> ! {
    let mut motor = Output::new(pin, Level::Low, OutputDrive::Standard);

    loop {
        PULSE.wait().await;
        motor.set_high();
        Timer::after(Duration::from_millis(HAPTIC_SHORT_PULSE_MS)).await;
        motor.set_low();
    }
}
