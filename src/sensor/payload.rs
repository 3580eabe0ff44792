//! LYWSD03MMC notification payload.
//!
//! Layout (5 bytes, little-endian):
//! ```text
//! Byte 0-1: Temperature (i16, 0.01 °C)
//! Byte 2:   Relative humidity (u8, %)
//! Byte 3-4: Battery voltage (u16, 0.01 V)
//! ```
//!
//! Trailing bytes beyond the fifth are ignored.

use crate::config::{MAX_BATTERY_VOLTAGE, PAYLOAD_CAPACITY};
use crate::Error;

/// Minimum length carrying temperature and humidity.
pub const MIN_PAYLOAD_SIZE: usize = 4;

/// Full payload size including the battery voltage.
pub const PAYLOAD_SIZE: usize = 5;

/// Raw notification bytes as delivered by the radio stack.
pub type NotificationPayload = heapless::Vec<u8, PAYLOAD_CAPACITY>;

/// One decoded thermometer reading.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecodedReading {
    /// Temperature in °C.
    pub temperature_c: f32,
    /// Relative humidity in %.
    pub humidity_pct: u8,
    /// Battery voltage in volts.
    pub battery_voltage: f32,
    /// Battery charge estimate, 0..=100.
    pub battery_pct: f32,
}

/// Decode a raw notification into a [`DecodedReading`].
pub fn decode(data: &[u8]) -> Result<DecodedReading, Error> {
    if data.len() < MIN_PAYLOAD_SIZE {
        return Err(Error::InsufficientData { len: data.len() });
    }
    if data.len() < PAYLOAD_SIZE {
        return Err(Error::IncompleteVoltageField);
    }

    let temperature_c = f32::from(i16::from_le_bytes([data[0], data[1]])) / 100.0;
    let humidity_pct = data[2];
    let battery_voltage = f32::from(u16::from_le_bytes([data[3], data[4]])) / 100.0;

    Ok(DecodedReading {
        temperature_c,
        humidity_pct,
        battery_voltage,
        battery_pct: convert_voltage_to_percentage(battery_voltage, MAX_BATTERY_VOLTAGE),
    })
}

/// Map a battery voltage onto 0..=100 % of `max_voltage`, clamping out-of-range input.
pub fn convert_voltage_to_percentage(voltage: f32, max_voltage: f32) -> f32 {
    voltage.clamp(0.0, max_voltage) / max_voltage * 100.0
}

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests (run on host, not embedded)
// ═══════════════════════════════════════════════════════════════════════════
