//! BLE GAP scanner - looks for the target thermometer.
//!
//! Uses the SoftDevice Central-role scanning API. Every report that
//! carries a local name goes through the [`DiscoveryFilter`]; the scan
//! ends on the first match or when the scan timeout expires.

use crate::ble::adv_parser::extract_device_name;
use crate::ble::{AdvertisedDevice, DiscoveryFilter, MatchSignal, ScanControl};
use crate::config::{BLE_MAX_SEEN, BLE_SCAN_DURATION_SECS, TARGET_DEVICE_NAME};
use crate::{BleError, Error};
use defmt::{debug, info, warn};
use heapless::Vec;
use nrf_softdevice::ble::{central, Address};
use nrf_softdevice::Softdevice;

/// Per-scan bookkeeping the discovery filter can stop and clear.
struct ScanSession {
    /// Advertisers already logged, so each shows up once.
    seen: Vec<Address, BLE_MAX_SEEN>,
    stop_requested: bool,
}

impl ScanSession {
    fn new() -> Self {
        Self {
            seen: Vec::new(),
            stop_requested: false,
        }
    }

    fn note(&mut self, address: Address, name: &str, rssi: i8) {
        if !self.seen.contains(&address) && self.seen.push(address).is_ok() {
            debug!("Found: {} (RSSI {})", name, rssi);
        }
    }
}

impl ScanControl for ScanSession {
    fn stop(&mut self) {
        self.stop_requested = true;
    }

    fn clear_results(&mut self) {
        self.seen.clear();
    }
}

/// Scan for [`TARGET_DEVICE_NAME`] for at most `BLE_SCAN_DURATION_SECS`.
///
/// Returns `Ok(None)` when the window closes without a match.
pub async fn scan_for_target(sd: &Softdevice) -> Result<Option<MatchSignal<Address>>, Error> {
    info!("BLE scan starting ({} s window)", BLE_SCAN_DURATION_SECS);

    let config = central::ScanConfig {
        // Active scan to retrieve scan-response data (device names).
        active: true,
        // 10 ms units.
        timeout: (BLE_SCAN_DURATION_SECS * 100) as u16,
        ..Default::default()
    };

    let mut filter = DiscoveryFilter::new(TARGET_DEVICE_NAME);
    let mut session = ScanSession::new();

    // Return None to keep scanning, Some(signal) to stop.
    let result = central::scan(sd, &config, |params| {
        let data =
            unsafe { core::slice::from_raw_parts(params.data.p_data, params.data.len as usize) };

        let name = extract_device_name(data)?;
        let address = Address::from_raw(params.peer_addr);
        session.note(address, name.as_str(), params.rssi);

        let device = AdvertisedDevice {
            address,
            name,
            rssi: params.rssi,
        };
        let signal = filter.on_advertisement(&device, &mut session);
        if session.stop_requested {
            signal
        } else {
            None
        }
    })
    .await;

    match result {
        Ok(signal) => {
            info!("Matched {}", signal.address());
            Ok(Some(signal))
        }
        Err(central::ScanError::Timeout) => {
            info!("BLE scan complete - {} not found", TARGET_DEVICE_NAME);
            Ok(None)
        }
        Err(_) => {
            warn!("BLE scan ended with error");
            Err(BleError::ScanFailed.into())
        }
    }
}
