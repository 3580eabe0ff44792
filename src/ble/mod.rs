//! Bluetooth Low Energy central logic.
//!
//! This module holds the radio-independent half of the central role:
//!
//! 1. **Discovery filter** - picks the target out of the advertisement
//!    stream by advertised name and hands its address over exactly once.
//! 2. **Orchestrator** - drives connect → service → characteristic →
//!    notify-interval → subscribe against a [`GattCentral`] port.
//! 3. **Interval configurator** - best-effort CCCD write of the notify
//!    interval.
//!
//! The SoftDevice implementation of the ports lives in `crate::softdevice`.

pub mod adv_parser;
pub mod central;
pub mod discovery;
pub mod interval;
pub mod orchestrator;

#[cfg(test)]
pub(crate) mod mock;

pub use central::{Console, GattCentral, ScanControl};
pub use discovery::DiscoveryFilter;
pub use orchestrator::{Connected, Orchestrator, State};

use heapless::String;

/// 128-bit GATT UUID, stored as its big-endian numeric value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Uuid128(u128);

impl Uuid128 {
    pub const fn from_u128(value: u128) -> Self {
        Self(value)
    }

    pub const fn as_u128(&self) -> u128 {
        self.0
    }

    /// Byte order used on the air and by the SoftDevice (least significant first).
    pub const fn to_le_bytes(&self) -> [u8; 16] {
        self.0.to_le_bytes()
    }
}

/// One advertisement report, reduced to what discovery needs.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdvertisedDevice<A> {
    /// Link-layer address of the advertiser.
    pub address: A,
    /// Advertised local name; empty when the report carried none.
    pub name: String<32>,
    /// Received Signal Strength Indicator (dBm).
    pub rssi: i8,
}

/// One-shot "device found" hand-off carrying the target address.
///
/// Not `Clone`: whoever holds it owns the single connection attempt.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MatchSignal<A> {
    address: A,
}

impl<A> MatchSignal<A> {
    pub(crate) fn new(address: A) -> Self {
        Self { address }
    }

    pub fn address(&self) -> &A {
        &self.address
    }

    pub fn into_address(self) -> A {
        self.address
    }
}
