//! Nordic SoftDevice S140 implementation of the central ports.
//!
//! 1. **Scanner** - active scan fed through [`crate::ble::DiscoveryFilter`].
//! 2. **Client** - GATT discovery of the thermometer service, CCCD writes
//!    and the notification loop, exposed as a [`crate::ble::GattCentral`].
//!
//! Operator output goes to RTT through [`DefmtConsole`].

pub mod client;
pub mod scanner;

use crate::ble::Console;

/// Operator console printing each line over defmt-rtt.
pub struct DefmtConsole;

impl Console for DefmtConsole {
    fn line(&mut self, text: &str) {
        defmt::println!("{=str}", text);
    }
}
