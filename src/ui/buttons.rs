//! GPIO button input with async debouncing.
//!
//! Two physical buttons (active-low with internal pull-up):
//!   - UP   - ring the phone
//!   - DOWN - silence the phone
//!
//! Each button is handled by an async task that waits for a GPIO edge,
//! debounces it, and posts the press to the event loop.

use crate::events::{AppEvent, EVENTS};
use defmt::info;
use embassy_nrf::gpio::{AnyPin, Input, Pull};
use embassy_time::{Duration, Timer};
use ring_my_phone::config::BUTTON_DEBOUNCE_MS;
use ring_my_phone::Button;

/// Run a single button polling loop.
///
/// Waits for the pin to go low (pressed), debounces, posts the event,
/// then waits for release before repeating.
#[embassy_executor::task(pool_size = 2)]
pub async fn button_task(pin: AnyPin, button: Button) -> ! {
    let mut btn = Input::new(pin, Pull::Up);

    loop {
        // Wait for falling edge (button press, active-low).
        btn.wait_for_falling_edge().await;

        // Debounce: wait and re-check.
        Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;

        if btn.is_low() {
            info!("Button: {}", button);
            EVENTS.send(AppEvent::Button(button)).await;

            // Wait for release to avoid repeat triggers.
            btn.wait_for_rising_edge().await;
            Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
        }
    }
}
