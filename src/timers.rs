//! Single-shot timer service on top of `embassy-time`.
//!
//! One task owns the hardware wait. `schedule_once` arms it, replacing
//! whatever was armed; `cancel` disarms it only if that handle is still
//! armed. Once a timer expires it is no longer cancellable, even if the
//! `TimerFired` event is still queued.

use core::cell::Cell;

use crate::events::{AppEvent, EVENTS};
use defmt::debug;
use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};
use ring_my_phone::platform::{TimerHandle, TimerService};

#[derive(Clone, Copy)]
enum TimerRequest {
    Arm {
        handle: TimerHandle,
        delay_ms: u32,
        cookie: u32,
    },
    Disarm,
}

static REQUESTS: Signal<CriticalSectionRawMutex, TimerRequest> = Signal::new();

/// Handle currently armed in the timer task.
static ARMED: Mutex<CriticalSectionRawMutex, Cell<Option<TimerHandle>>> =
    Mutex::new(Cell::new(None));

/// `TimerService` front-end used by the event loop.
pub struct EmbassyTimers {
    next_handle: u32,
}

impl EmbassyTimers {
    pub const fn new() -> Self {
        Self { next_handle: 0 }
    }
}

impl TimerService for EmbassyTimers {
    fn schedule_once(&mut self, delay_ms: u32, cookie: u32) -> TimerHandle {
        self.next_handle = self.next_handle.wrapping_add(1);
        let handle = TimerHandle(self.next_handle);
        ARMED.lock(|armed| armed.set(Some(handle)));
        REQUESTS.signal(TimerRequest::Arm {
            handle,
            delay_ms,
            cookie,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        let was_armed = take_armed(handle);
        if was_armed {
            REQUESTS.signal(TimerRequest::Disarm);
        }
        was_armed
    }
}

/// Clear `handle` if it is still the armed timer. Returns whether it was.
fn take_armed(handle: TimerHandle) -> bool {
    ARMED.lock(|armed| {
        if armed.get() == Some(handle) {
            armed.set(None);
            true
        } else {
            false
        }
    })
}

#[embassy_executor::task]
pub async fn timer_task() -> ! {
    loop {
        let mut request = REQUESTS.wait().await;

        while let TimerRequest::Arm {
            handle,
            delay_ms,
            cookie,
        } = request
        {
            let expiry = Timer::after(Duration::from_millis(delay_ms as u64));
            match select(expiry, REQUESTS.wait()).await {
                Either::First(()) => {
                    if take_armed(handle) {
                        debug!("timer {} fired", handle);
                        EVENTS.send(AppEvent::TimerFired { handle, cookie }).await;
                    }
                    break;
                }
                Either::Second(next) => request = next,
            }
        }
    }
}
