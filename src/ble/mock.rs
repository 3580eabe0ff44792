//! In-memory [`GattCentral`] used by the host unit tests.

use std::string::{String, ToString};
use std::vec::Vec;

use super::{Console, GattCentral, Uuid128};
use crate::config::{CHARACTERISTIC_UUID, SERVICE_UUID};
use crate::{BleError, Error};

/// What the simulated peer exposes and how its operations behave.
#[derive(Clone, Copy)]
pub(crate) struct MockPeer {
    pub connect_ok: bool,
    pub has_service: bool,
    pub has_characteristic: bool,
    pub has_cccd: bool,
    pub can_notify: bool,
    pub descriptor_write_fails: bool,
    pub subscribe_fails: bool,
}

impl MockPeer {
    /// A well-behaved LYWSD03MMC.
    pub fn thermometer() -> Self {
        Self {
            connect_ok: true,
            has_service: true,
            has_characteristic: true,
            has_cccd: true,
            can_notify: true,
            descriptor_write_fails: false,
            subscribe_fails: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
    Connect(u64),
    Disconnect(u64),
    FindService(Uuid128),
    FindCharacteristic(Uuid128),
    FindDescriptor(u16),
    WriteDescriptor {
        uuid: u16,
        value: Vec<u8>,
        require_response: bool,
    },
    Subscribe {
        require_ack: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct MockCharacteristic {
    pub notify: bool,
}

pub(crate) struct MockCentral {
    peer: MockPeer,
    pub calls: Vec<Call>,
}

impl MockCentral {
    pub fn new(peer: MockPeer) -> Self {
        Self {
            peer,
            calls: Vec::new(),
        }
    }

    pub fn thermometer_characteristic(&self) -> MockCharacteristic {
        MockCharacteristic {
            notify: self.peer.can_notify,
        }
    }

    pub fn subscribed(&self) -> bool {
        self.calls
            .iter()
            .any(|c| matches!(c, Call::Subscribe { .. }))
    }
}

impl GattCentral for MockCentral {
    type Address = u64;
    type Link = u64;
    type Service = Uuid128;
    type Characteristic = MockCharacteristic;
    type Descriptor = u16;

    async fn connect(&mut self, address: u64) -> Result<u64, Error> {
        self.calls.push(Call::Connect(address));
        if self.peer.connect_ok {
            Ok(address)
        } else {
            Err(BleError::ConnectFailed.into())
        }
    }

    fn disconnect(&mut self, link: &u64) {
        self.calls.push(Call::Disconnect(*link));
    }

    async fn find_service(&mut self, _link: &u64, uuid: &Uuid128) -> Result<Option<Uuid128>, Error> {
        self.calls.push(Call::FindService(*uuid));
        Ok((self.peer.has_service && *uuid == SERVICE_UUID).then_some(*uuid))
    }

    async fn find_characteristic(
        &mut self,
        _service: &Uuid128,
        uuid: &Uuid128,
    ) -> Option<MockCharacteristic> {
        self.calls.push(Call::FindCharacteristic(*uuid));
        (self.peer.has_characteristic && *uuid == CHARACTERISTIC_UUID)
            .then(|| self.thermometer_characteristic())
    }

    async fn find_descriptor(&mut self, _characteristic: &MockCharacteristic, uuid: u16) -> Option<u16> {
        self.calls.push(Call::FindDescriptor(uuid));
        self.peer.has_cccd.then_some(uuid)
    }

    async fn write_descriptor(
        &mut self,
        _link: &u64,
        descriptor: &u16,
        value: &[u8],
        require_response: bool,
    ) -> Result<(), Error> {
        self.calls.push(Call::WriteDescriptor {
            uuid: *descriptor,
            value: value.to_vec(),
            require_response,
        });
        if self.peer.descriptor_write_fails {
            Err(BleError::WriteFailed.into())
        } else {
            Ok(())
        }
    }

    fn can_notify(&self, characteristic: &MockCharacteristic) -> bool {
        characteristic.notify
    }

    async fn subscribe(
        &mut self,
        _link: &u64,
        _characteristic: &MockCharacteristic,
        require_ack: bool,
    ) -> Result<(), Error> {
        self.calls.push(Call::Subscribe { require_ack });
        if self.peer.subscribe_fails {
            Err(BleError::SubscribeFailed.into())
        } else {
            Ok(())
        }
    }
}

/// Console that keeps every line for assertions.
#[derive(Default)]
pub(crate) struct RecordingConsole(pub Vec<String>);

impl Console for RecordingConsole {
    fn line(&mut self, text: &str) {
        self.0.push(text.to_string());
    }
}
