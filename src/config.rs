//! Application-wide constants and compile-time configuration.
//!
//! Target identity, GATT identifiers, timing parameters and channel
//! depths live here so they can be tuned in one place.

use crate::ble::Uuid128;

// Target peripheral

/// Advertised name of the thermometer we connect to (exact, case-sensitive).
pub const TARGET_DEVICE_NAME: &str = "LYWSD03MMC";

/// Primary service exposing the temperature/humidity characteristic.
pub const SERVICE_UUID: Uuid128 = Uuid128::from_u128(0xebe0ccb0_7a0a_4b0c_8a1a_6ff2997da3a6);

/// Temperature / humidity / voltage notification characteristic.
pub const CHARACTERISTIC_UUID: Uuid128 = Uuid128::from_u128(0xebe0ccc1_7a0a_4b0c_8a1a_6ff2997da3a6);

/// Client Characteristic Configuration Descriptor.
pub const CCCD_UUID: u16 = 0x2902;

/// Notify interval written to the CCCD (minutes).
pub const NOTIFY_INTERVAL_MINUTES: u16 = 3;

// Sensor

/// Battery voltage treated as 100 % (volts).
pub const MAX_BATTERY_VOLTAGE: f32 = 3.3;

// BLE

/// Duration of the discovery scan (seconds). No match in this window
/// ends the scan silently.
pub const BLE_SCAN_DURATION_SECS: u64 = 30;

/// Delay between boot and the first scan, leaves time to attach RTT (seconds).
pub const STARTUP_DELAY_SECS: u64 = 3;

/// Maximum number of distinct advertisers remembered during one scan.
pub const BLE_MAX_SEEN: usize = 16;

/// BLE connection interval range (in 1.25 ms units).
/// The thermometer only notifies every few minutes, so favour power.
pub const BLE_CONN_INTERVAL_MIN: u16 = 24;
pub const BLE_CONN_INTERVAL_MAX: u16 = 40;

/// BLE slave latency (number of connection events the peripheral can skip).
pub const BLE_SLAVE_LATENCY: u16 = 0;

/// BLE supervision timeout (in 10 ms units). 400 = 4 s.
pub const BLE_SUP_TIMEOUT: u16 = 400;

// Channels

/// Largest notification we keep (one ATT payload at the default MTU).
pub const PAYLOAD_CAPACITY: usize = 20;

/// Depth of the notification payload queue between BLE and reporter tasks.
pub const PAYLOAD_QUEUE_DEPTH: usize = 4;
