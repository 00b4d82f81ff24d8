//! ring-my-phone firmware entry point (nRF52840 + S140).
//!
//! Task layout:
//!
//! ```text
//! button_task ×2 ─┐
//! timer_task ─────┼──► EVENTS ──► app_task (RingRemote + Watch)
//! link_task ──────┘                 │
//!                                   ├─► OLED status line
//!                                   ├─► timer_task (arm / disarm)
//!                                   ├─► GATT notify
//!                                   └─► haptics_task
//! ```

#![no_std]
#![no_main]

mod ble;
mod events;
mod haptics;
mod timers;
mod ui;
mod watch;

use ble::server::{link_task, Server};
use ble::transport::BleTransport;
use defmt::{info, unwrap, warn};
use embassy_executor::Spawner;
use embassy_nrf::gpio::Pin;
use embassy_nrf::interrupt::{self, InterruptExt, Priority};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use events::{AppEvent, EVENTS};
use haptics::{haptics_task, Vibrator};
use nrf_softdevice::{raw, Softdevice};
use ring_my_phone::config::BLE_DEVICE_NAME;
use ring_my_phone::{Button, RingRemote};
use static_cell::StaticCell;
use timers::{timer_task, EmbassyTimers};
use ui::buttons::button_task;
use ui::display::OledStatus;
use watch::Watch;
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

type WatchI2c = Twim<'static, peripherals::TWISPI0>;

static SERVER: StaticCell<Server> = StaticCell::new();

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

/// The event loop. Sole owner of the application state.
#[embassy_executor::task]
async fn app_task(mut watch: Watch<WatchI2c>) -> ! {
    let mut remote = RingRemote::new();
    if !remote.start(&mut watch) {
        warn!("message callbacks not registered - confirmations will be ignored");
    }

    loop {
        match EVENTS.receive().await {
            AppEvent::Button(button) => {
                if let Err(e) = remote.handle_button(&mut watch, button) {
                    warn!("{} not sent: {}", button, e);
                }
            }
            AppEvent::TimerFired { handle, cookie } => {
                remote.on_timer_fired(&mut watch, handle, cookie);
            }
            AppEvent::MessageReceived => remote.on_message_received(&mut watch),
            AppEvent::SendFailed(reason) => remote.on_send_failed(&mut watch, reason),
        }
        info!("status: {}", remote.status());
    }
}

fn softdevice_config() -> nrf_softdevice::Config {
    nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_XTAL as u8,
            rc_ctiv: 0,
            rc_temp_ctiv: 0,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_20_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 256 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: raw::BLE_GATTS_ATTR_TAB_SIZE_DEFAULT,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
            central_role_count: 0,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: BLE_DEVICE_NAME.as_ptr() as _,
            current_len: BLE_DEVICE_NAME.len() as u16,
            max_len: BLE_DEVICE_NAME.len() as u16,
            write_perm: unsafe { core::mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("ring-my-phone starting");

    // The SoftDevice reserves priorities 0, 1 and 4.
    let mut config = embassy_nrf::config::Config::default();
    config.gpiote_interrupt_priority = Priority::P2;
    config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(config);
    interrupt::SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0.set_priority(Priority::P3);

    let sd = Softdevice::enable(&softdevice_config());
    let server: &'static Server = SERVER.init(unwrap!(Server::new(sd)));
    unwrap!(spawner.spawn(softdevice_task(sd)));

    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let watch = Watch {
        display: OledStatus::new(i2c),
        timers: EmbassyTimers::new(),
        transport: BleTransport::new(server),
        haptics: Vibrator,
    };

    unwrap!(spawner.spawn(timer_task()));
    unwrap!(spawner.spawn(haptics_task(p.P0_06.degrade())));
    unwrap!(spawner.spawn(button_task(p.P0_11.degrade(), Button::Up)));
    unwrap!(spawner.spawn(button_task(p.P0_12.degrade(), Button::Down)));
    unwrap!(spawner.spawn(link_task(sd, server)));
    unwrap!(spawner.spawn(app_task(watch)));

    info!("ring-my-phone running");
}
