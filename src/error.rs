//! Unified error type for mitemp-central.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` (behind the `defmt` feature) for efficient
//! on-target logging, and `Display` for the operator console.

use core::fmt;

/// Top-level error type used across the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Payload
    /// Notification shorter than the temperature + humidity fields.
    InsufficientData { len: usize },

    /// Notification holds only the low byte of the battery voltage.
    IncompleteVoltageField,

    // BLE
    /// The radio stack returned a BLE-level error.
    Ble(BleError),

    /// The peer does not expose the thermometer service.
    ServiceNotFound,

    /// The thermometer characteristic is missing from the service.
    CharacteristicNotFound,

    /// The CCCD (0x2902) is missing from the characteristic.
    DescriptorNotFound,

    /// The characteristic cannot notify.
    NotifyUnsupported,
}

/// Subset of BLE errors we propagate (keeps the enum `Copy`-friendly).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BleError {
    /// Scan could not start.
    ScanFailed,
    /// Connection attempt failed.
    ConnectFailed,
    /// GATT discovery failed for a reason other than a missing service.
    DiscoveryFailed,
    /// Descriptor write failed.
    WriteFailed,
    /// Characteristic subscribe failed.
    SubscribeFailed,
    /// Link dropped mid-operation.
    Disconnected,
}

// Convenience conversions

impl From<BleError> for Error {
    fn from(e: BleError) -> Self {
        Error::Ble(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InsufficientData { .. } => f.write_str("Error: Insufficient data length"),
            Error::IncompleteVoltageField => {
                f.write_str("Error: Incomplete battery voltage field")
            }
            Error::Ble(e) => fmt::Display::fmt(e, f),
            Error::ServiceNotFound => f.write_str("Failed to find service UUID"),
            Error::CharacteristicNotFound => f.write_str("Failed to find characteristic UUID"),
            Error::DescriptorNotFound => f.write_str("CCCD descriptor not found"),
            Error::NotifyUnsupported => {
                f.write_str("Characteristic does not support notifications")
            }
        }
    }
}

impl fmt::Display for BleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            BleError::ScanFailed => "Failed to start scan",
            BleError::ConnectFailed => "Failed to connect to server",
            BleError::DiscoveryFailed => "GATT discovery failed",
            BleError::WriteFailed => "Descriptor write failed",
            BleError::SubscribeFailed => "Failed to subscribe to notifications",
            BleError::Disconnected => "Connection lost",
        };
        f.write_str(msg)
    }
}
