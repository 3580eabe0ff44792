//! Ports between the central logic and the radio stack / operator output.
//!
//! The orchestrator only talks to these traits, so the same state machine
//! runs against the SoftDevice on target and against mocks on the host.

use core::future::Future;

use super::Uuid128;
use crate::Error;

/// Line-oriented operator output (serial console, RTT, test buffer).
pub trait Console {
    fn line(&mut self, text: &str);
}

/// Control over the scan that produced an advertisement.
pub trait ScanControl {
    /// Stop scanning; no further reports are delivered for this session.
    fn stop(&mut self);

    /// Drop any buffered scan results.
    fn clear_results(&mut self);
}

/// GATT client operations of the radio stack, central role.
///
/// Lookups return `None` when the peer does not expose the attribute.
/// Operations that can fail on the link return `Err(Error::Ble(_))`.
pub trait GattCentral {
    /// Peer link-layer address.
    type Address: Copy;
    /// Handle to an established link.
    type Link;
    /// A discovered primary service.
    type Service;
    /// A discovered characteristic.
    type Characteristic;
    /// A discovered descriptor.
    type Descriptor;

    /// Establish a link to `address`.
    fn connect(&mut self, address: Self::Address)
        -> impl Future<Output = Result<Self::Link, Error>>;

    /// Tear down `link`. Errors are ignored: the link is unusable either way.
    fn disconnect(&mut self, link: &Self::Link);

    /// Find the primary service `uuid` on the peer.
    fn find_service(
        &mut self,
        link: &Self::Link,
        uuid: &Uuid128,
    ) -> impl Future<Output = Result<Option<Self::Service>, Error>>;

    /// Find characteristic `uuid` in a discovered service.
    fn find_characteristic(
        &mut self,
        service: &Self::Service,
        uuid: &Uuid128,
    ) -> impl Future<Output = Option<Self::Characteristic>>;

    /// Find the descriptor with 16-bit `uuid` on a characteristic.
    fn find_descriptor(
        &mut self,
        characteristic: &Self::Characteristic,
        uuid: u16,
    ) -> impl Future<Output = Option<Self::Descriptor>>;

    /// Write `value` to a descriptor, optionally waiting for the write response.
    fn write_descriptor(
        &mut self,
        link: &Self::Link,
        descriptor: &Self::Descriptor,
        value: &[u8],
        require_response: bool,
    ) -> impl Future<Output = Result<(), Error>>;

    /// Whether the characteristic advertises the notify property.
    fn can_notify(&self, characteristic: &Self::Characteristic) -> bool;

    /// Enable notifications; `require_ack` waits for the peer to confirm the
    /// CCCD write.
    fn subscribe(
        &mut self,
        link: &Self::Link,
        characteristic: &Self::Characteristic,
        require_ack: bool,
    ) -> impl Future<Output = Result<(), Error>>;
}
