//! GATT server and the advertise / connect / serve loop.

use crate::ble::{deliver, set_connection};
use crate::events::AppEvent;
use defmt::{info, warn};
use nrf_softdevice::ble::{gatt_server, peripheral};
use nrf_softdevice::raw;
use nrf_softdevice::Softdevice;
use ring_my_phone::config::{
    BLE_CONN_INTERVAL_MAX, BLE_CONN_INTERVAL_MIN, BLE_SLAVE_LATENCY, BLE_SUP_TIMEOUT,
    INBOUND_BUFFER_SIZE,
};

/// Value of the confirm characteristic. Contents are never inspected.
pub type ConfirmValue = heapless::Vec<u8, INBOUND_BUFFER_SIZE>;

/// Value of the command characteristic (one encoded dictionary).
pub type CommandValue = heapless::Vec<u8, 32>;

#[nrf_softdevice::gatt_service(uuid = "d1ad936b-1768-460e-885a-d796896a38c2")]
pub struct RingService {
    /// Outbound command dictionary - the phone subscribes to notifications.
    #[characteristic(uuid = "d1ad0001-1768-460e-885a-d796896a38c2", read, notify)]
    pub command: CommandValue,

    /// Ring confirmation - any write means "the phone rang".
    #[characteristic(uuid = "d1ad0002-1768-460e-885a-d796896a38c2", write, write_without_response)]
    pub confirm: ConfirmValue,
}

#[nrf_softdevice::gatt_server]
pub struct Server {
    pub ring: RingService,
}

/// Advertising payload: flags + complete local name "RingMyPhone".
#[rustfmt::skip]
static ADV_DATA: [u8; 16] = [
    0x02, 0x01, raw::BLE_GAP_ADV_FLAGS_LE_ONLY_GENERAL_DISC_MODE as u8,
    0x0c, 0x09, b'R', b'i', b'n', b'g', b'M', b'y', b'P', b'h', b'o', b'n', b'e',
];

/// Scan response: 128-bit ring service UUID (little-endian).
#[rustfmt::skip]
static SCAN_DATA: [u8; 18] = [
    0x11, 0x07,
    0xc2, 0x38, 0x6a, 0x89, 0x96, 0xd7, 0x5a, 0x88,
    0x0e, 0x46, 0x68, 0x17, 0x6b, 0x93, 0xad, 0xd1,
];

/// Advertise, serve one phone at a time, repeat.
#[embassy_executor::task]
pub async fn link_task(sd: &'static Softdevice, server: &'static Server) -> ! {
    let config = peripheral::Config::default();

    loop {
        let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
            adv_data: &ADV_DATA,
            scan_data: &SCAN_DATA,
        };

        let conn = match peripheral::advertise_connectable(sd, adv, &config).await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("advertising failed: {:?}", e);
                continue;
            }
        };

        info!("phone connected");
        let params = raw::ble_gap_conn_params_t {
            min_conn_interval: BLE_CONN_INTERVAL_MIN,
            max_conn_interval: BLE_CONN_INTERVAL_MAX,
            slave_latency: BLE_SLAVE_LATENCY,
            conn_sup_timeout: BLE_SUP_TIMEOUT,
        };
        if conn.set_conn_params(params).is_err() {
            warn!("could not request connection parameters");
        }
        set_connection(Some(conn.clone()));

        let reason = gatt_server::run(&conn, server, |event| match event {
            ServerEvent::Ring(RingServiceEvent::ConfirmWrite(_)) => {
                deliver(AppEvent::MessageReceived);
            }
            ServerEvent::Ring(RingServiceEvent::CommandCccdWrite { notifications }) => {
                info!("command notifications: {}", notifications);
            }
        })
        .await;

        set_connection(None);
        info!("phone disconnected: {:?}", reason);
    }
}
