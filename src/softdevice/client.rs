//! BLE GATT client for the thermometer service.
//!
//! After GAP connection is established, [`SoftdeviceCentral`]:
//! 1. Discovers the thermometer service (128-bit UUID).
//! 2. Records every characteristic with its properties and descriptors.
//! 3. Writes the notify interval and the notification enable bits to the
//!    CCCD of the thermometer characteristic.
//!
//! [`run_notification_loop`] then forwards raw notifications to the
//! reporter task via a channel.

use crate::ble::{GattCentral, Uuid128};
use crate::config::{
    BLE_CONN_INTERVAL_MAX, BLE_CONN_INTERVAL_MIN, BLE_SLAVE_LATENCY, BLE_SUP_TIMEOUT,
    CCCD_UUID, CHARACTERISTIC_UUID, PAYLOAD_CAPACITY, PAYLOAD_QUEUE_DEPTH, SERVICE_UUID,
};
use crate::sensor::NotificationPayload;
use crate::{BleError, Error};
use defmt::{info, warn};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use heapless::Vec;
use nrf_softdevice::ble::gatt_client::{self, Characteristic, Descriptor, DiscoverError};
use nrf_softdevice::ble::{central, Address, Connection, HvxType, Uuid};
use nrf_softdevice::{raw, Softdevice};

/// Characteristics kept per discovered service.
const MAX_CHARACTERISTICS: usize = 8;

/// Descriptors kept per characteristic.
const MAX_DESCRIPTORS: usize = 4;

/// CCCD value enabling notifications.
const CCCD_NOTIFY: u16 = 0x0001;

fn sd_uuid(uuid: &Uuid128) -> Uuid {
    Uuid::new_128(&uuid.to_le_bytes())
}

/// A characteristic of the thermometer service as discovered on the peer.
#[derive(Clone)]
pub struct RemoteCharacteristic {
    uuid: Option<Uuid>,
    value_handle: u16,
    can_notify: bool,
    descriptors: Vec<(Option<Uuid>, u16), MAX_DESCRIPTORS>,
}

impl RemoteCharacteristic {
    fn descriptor_handle(&self, uuid: &Uuid) -> Option<u16> {
        self.descriptors
            .iter()
            .find(|(u, _)| u.as_ref() == Some(uuid))
            .map(|&(_, handle)| handle)
    }
}

/// Hand-written `gatt_client::Client` for the thermometer service.
///
/// Discovery never fails on a missing characteristic here: lookups happen
/// afterwards so the orchestrator can tell the two cases apart.
pub struct ThermometerService {
    characteristics: Vec<RemoteCharacteristic, MAX_CHARACTERISTICS>,
}

impl ThermometerService {
    fn characteristic(&self, uuid: &Uuid) -> Option<&RemoteCharacteristic> {
        self.characteristics
            .iter()
            .find(|c| c.uuid.as_ref() == Some(uuid))
    }

    fn is_reading_handle(&self, handle: u16) -> bool {
        self.characteristic(&sd_uuid(&CHARACTERISTIC_UUID))
            .is_some_and(|c| c.value_handle == handle)
    }
}

impl gatt_client::Client for ThermometerService {
    type Event = NotificationPayload;

    fn on_hvx(
        &self,
        _conn: &Connection,
        type_: HvxType,
        handle: u16,
        data: &[u8],
    ) -> Option<Self::Event> {
        if !matches!(type_, HvxType::Notification) || !self.is_reading_handle(handle) {
            return None;
        }
        let mut payload = NotificationPayload::new();
        let len = data.len().min(PAYLOAD_CAPACITY);
        let _ = payload.extend_from_slice(&data[..len]);
        Some(payload)
    }

    fn uuid() -> Uuid {
        sd_uuid(&SERVICE_UUID)
    }

    fn new_undiscovered(_conn: Connection) -> Self {
        Self {
            characteristics: Vec::new(),
        }
    }

    fn discovered_characteristic(
        &mut self,
        characteristic: &Characteristic,
        descriptors: &[Descriptor],
    ) {
        let mut remote = RemoteCharacteristic {
            uuid: characteristic.uuid,
            value_handle: characteristic.handle_value,
            can_notify: characteristic.props.notify() != 0,
            descriptors: Vec::new(),
        };
        for d in descriptors {
            if remote.descriptors.push((d.uuid, d.handle)).is_err() {
                warn!("Too many descriptors on handle {}", characteristic.handle_value);
                break;
            }
        }
        if self.characteristics.push(remote).is_err() {
            warn!("Too many characteristics - ignoring handle {}", characteristic.handle_value);
        }
    }

    fn discovery_complete(&mut self) -> Result<(), DiscoverError> {
        Ok(())
    }
}

/// [`GattCentral`] over the SoftDevice central + GATT client APIs.
pub struct SoftdeviceCentral {
    sd: &'static Softdevice,
}

impl SoftdeviceCentral {
    pub fn new(sd: &'static Softdevice) -> Self {
        Self { sd }
    }
}

impl GattCentral for SoftdeviceCentral {
    type Address = Address;
    type Link = Connection;
    type Service = ThermometerService;
    type Characteristic = RemoteCharacteristic;
    type Descriptor = u16;

    async fn connect(&mut self, address: Address) -> Result<Connection, Error> {
        info!("Connecting to {}", address);

        let whitelist = [&address];
        let conn_cfg = central::ConnectConfig {
            scan_config: central::ScanConfig {
                whitelist: Some(&whitelist),
                ..Default::default()
            },
            conn_params: raw::ble_gap_conn_params_t {
                min_conn_interval: BLE_CONN_INTERVAL_MIN,
                max_conn_interval: BLE_CONN_INTERVAL_MAX,
                slave_latency: BLE_SLAVE_LATENCY,
                conn_sup_timeout: BLE_SUP_TIMEOUT,
            },
            ..Default::default()
        };

        central::connect(self.sd, &conn_cfg)
            .await
            .map_err(|_| BleError::ConnectFailed.into())
    }

    fn disconnect(&mut self, link: &Connection) {
        let _ = link.disconnect();
    }

    async fn find_service(
        &mut self,
        link: &Connection,
        uuid: &Uuid128,
    ) -> Result<Option<ThermometerService>, Error> {
        // The client type is bound to one service UUID.
        if *uuid != SERVICE_UUID {
            return Ok(None);
        }

        match gatt_client::discover::<ThermometerService>(link).await {
            Ok(service) => {
                info!(
                    "Thermometer service discovered ({} characteristics)",
                    service.characteristics.len()
                );
                Ok(Some(service))
            }
            Err(DiscoverError::ServiceNotFound) => Ok(None),
            Err(DiscoverError::Disconnected) => Err(BleError::Disconnected.into()),
            Err(_) => Err(BleError::DiscoveryFailed.into()),
        }
    }

    async fn find_characteristic(
        &mut self,
        service: &ThermometerService,
        uuid: &Uuid128,
    ) -> Option<RemoteCharacteristic> {
        service.characteristic(&sd_uuid(uuid)).cloned()
    }

    async fn find_descriptor(
        &mut self,
        characteristic: &RemoteCharacteristic,
        uuid: u16,
    ) -> Option<u16> {
        characteristic.descriptor_handle(&Uuid::new_16(uuid))
    }

    async fn write_descriptor(
        &mut self,
        link: &Connection,
        descriptor: &u16,
        value: &[u8],
        require_response: bool,
    ) -> Result<(), Error> {
        let written = if require_response {
            gatt_client::write(link, *descriptor, value).await.is_ok()
        } else {
            gatt_client::write_without_response(link, *descriptor, value)
                .await
                .is_ok()
        };

        if written {
            Ok(())
        } else {
            warn!("Write to handle {} failed", descriptor);
            Err(BleError::WriteFailed.into())
        }
    }

    fn can_notify(&self, characteristic: &RemoteCharacteristic) -> bool {
        characteristic.can_notify
    }

    async fn subscribe(
        &mut self,
        link: &Connection,
        characteristic: &RemoteCharacteristic,
        require_ack: bool,
    ) -> Result<(), Error> {
        let Some(cccd) = characteristic.descriptor_handle(&Uuid::new_16(CCCD_UUID)) else {
            return Err(BleError::SubscribeFailed.into());
        };

        self.write_descriptor(link, &cccd, &CCCD_NOTIFY.to_le_bytes(), require_ack)
            .await
            .map_err(|_| BleError::SubscribeFailed.into())
    }
}

/// Run the notification listener loop.
///
/// Blocks until the connection drops. Each notification from the reading
/// characteristic is queued for the reporter task.
pub async fn run_notification_loop(
    conn: &Connection,
    service: &ThermometerService,
    payload_tx: Sender<'_, CriticalSectionRawMutex, NotificationPayload, PAYLOAD_QUEUE_DEPTH>,
) {
    info!("Notification loop started");

    let _result = gatt_client::run(conn, service, |payload| {
        // try_send avoids blocking; if the reporter is behind, we drop.
        if payload_tx.try_send(payload).is_err() {
            warn!("Payload channel full - dropping notification");
        }
    })
    .await;

    info!("Notification loop ended (connection closed)");
}
