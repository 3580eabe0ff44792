//! Thermometer payload decoding and reporting.

pub mod payload;
pub mod report;

pub use payload::{convert_voltage_to_percentage, decode, DecodedReading, NotificationPayload};
pub use report::{handle_notification, write_reading};
