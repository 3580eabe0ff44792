//! One-shot connection state machine.
//!
//! ```text
//! Idle → Connecting → ServiceLookup → CharacteristicLookup
//!      → ConfiguringNotify → Subscribing → Connected
//! ```
//!
//! Any step after `Idle` may end in `Failed`. `ConfiguringNotify` never
//! fails: a missing CCCD only skips the interval write. `Connected` and
//! `Failed` are terminal; there is no reconnect. Each attempt consumes a
//! [`MatchSignal`], so a new attempt needs a new discovery match.

use core::fmt::Write;

use heapless::String;

use super::{interval, Console, GattCentral, MatchSignal};
use crate::config::{CHARACTERISTIC_UUID, NOTIFY_INTERVAL_MINUTES, SERVICE_UUID};
use crate::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    Idle,
    Connecting,
    ServiceLookup,
    CharacteristicLookup,
    ConfiguringNotify,
    Subscribing,
    Connected,
    Failed(Error),
}

/// Everything the notification loop needs once the link is up.
pub struct Connected<C: GattCentral> {
    pub link: C::Link,
    pub service: C::Service,
    pub characteristic: C::Characteristic,
    /// Whether the notify interval reached the peer.
    pub interval_configured: bool,
}

pub struct Orchestrator<C: GattCentral> {
    central: C,
    state: State,
}

impl<C: GattCentral> Orchestrator<C> {
    pub const fn new(central: C) -> Self {
        Self {
            central,
            state: State::Idle,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == State::Connected
    }

    pub fn central(&self) -> &C {
        &self.central
    }

    pub fn central_mut(&mut self) -> &mut C {
        &mut self.central
    }

    /// Connect to the matched device and subscribe to its readings.
    ///
    /// Progress and failures are reported on `console`; the result only
    /// tells the caller whether the link is usable.
    pub async fn connect(
        &mut self,
        signal: MatchSignal<C::Address>,
        console: &mut impl Console,
    ) -> Result<Connected<C>, Error> {
        match self.establish(signal.into_address(), console).await {
            Ok(connected) => {
                self.state = State::Connected;
                console.line("Connected to the BLE Server.");
                Ok(connected)
            }
            Err(e) => {
                self.state = State::Failed(e);
                let mut line: String<48> = String::new();
                let _ = write!(line, "{}", e);
                console.line(&line);
                console.line("Failed to connect to the server.");
                Err(e)
            }
        }
    }

    async fn establish(
        &mut self,
        address: C::Address,
        console: &mut impl Console,
    ) -> Result<Connected<C>, Error> {
        self.state = State::Connecting;
        let link = self.central.connect(address).await?;

        self.state = State::ServiceLookup;
        let service = match self.central.find_service(&link, &SERVICE_UUID).await {
            Ok(Some(service)) => service,
            Ok(None) => return Err(self.abort(&link, Error::ServiceNotFound)),
            Err(e) => return Err(self.abort(&link, e)),
        };

        self.state = State::CharacteristicLookup;
        let Some(characteristic) = self
            .central
            .find_characteristic(&service, &CHARACTERISTIC_UUID)
            .await
        else {
            return Err(self.abort(&link, Error::CharacteristicNotFound));
        };

        self.state = State::ConfiguringNotify;
        let interval_configured = interval::configure(
            &mut self.central,
            &link,
            &characteristic,
            NOTIFY_INTERVAL_MINUTES,
            console,
        )
        .await;

        self.state = State::Subscribing;
        if !self.central.can_notify(&characteristic) {
            return Err(self.abort(&link, Error::NotifyUnsupported));
        }
        if let Err(e) = self.central.subscribe(&link, &characteristic, true).await {
            return Err(self.abort(&link, e));
        }

        Ok(Connected {
            link,
            service,
            characteristic,
            interval_configured,
        })
    }

    fn abort(&mut self, link: &C::Link, e: Error) -> Error {
        self.central.disconnect(link);
        e
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests (run on host, not embedded)
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ble::mock::{Call, MockCentral, MockPeer, RecordingConsole};
    use crate::config::CCCD_UUID;
    use crate::BleError;
    use embassy_futures::block_on;

    fn run(peer: MockPeer) -> (Orchestrator<MockCentral>, Result<Connected<MockCentral>, Error>, RecordingConsole) {
        let mut orchestrator = Orchestrator::new(MockCentral::new(peer));
        let mut console = RecordingConsole::default();
        let result = block_on(orchestrator.connect(MatchSignal::new(0xA4C1_38C3_7522), &mut console));
        (orchestrator, result, console)
    }

    #[test]
    fn starts_idle() {
        let orchestrator = Orchestrator::new(MockCentral::new(MockPeer::thermometer()));
        assert_eq!(orchestrator.state(), State::Idle);
        assert!(!orchestrator.is_connected());
    }

    #[test]
    fn happy_path_walks_every_step() {
        let (orchestrator, result, console) = run(MockPeer::thermometer());

        let connected = result.unwrap();
        assert_eq!(connected.link, 0xA4C1_38C3_7522);
        assert!(connected.interval_configured);
        assert_eq!(orchestrator.state(), State::Connected);
        assert_eq!(
            orchestrator.central().calls,
            [
                Call::Connect(0xA4C1_38C3_7522),
                Call::FindService(SERVICE_UUID),
                Call::FindCharacteristic(CHARACTERISTIC_UUID),
                Call::FindDescriptor(CCCD_UUID),
                Call::WriteDescriptor {
                    uuid: CCCD_UUID,
                    value: vec![0x03, 0x00],
                    require_response: false,
                },
                Call::Subscribe { require_ack: true },
            ]
        );
        assert_eq!(console.0, ["Connected to the BLE Server."]);
    }

    #[test]
    fn connect_failure_aborts_before_lookup() {
        let (orchestrator, result, console) = run(MockPeer {
            connect_ok: false,
            ..MockPeer::thermometer()
        });

        assert_eq!(result.err(), Some(Error::Ble(BleError::ConnectFailed)));
        assert_eq!(
            orchestrator.state(),
            State::Failed(Error::Ble(BleError::ConnectFailed))
        );
        assert_eq!(orchestrator.central().calls, [Call::Connect(0xA4C1_38C3_7522)]);
        assert_eq!(
            console.0,
            ["Failed to connect to server", "Failed to connect to the server."]
        );
    }

    #[test]
    fn missing_service_fails_without_subscription() {
        let (orchestrator, result, console) = run(MockPeer {
            has_service: false,
            ..MockPeer::thermometer()
        });

        assert_eq!(result.err(), Some(Error::ServiceNotFound));
        assert_eq!(orchestrator.state(), State::Failed(Error::ServiceNotFound));
        assert!(!orchestrator.is_connected());
        assert!(!orchestrator.central().subscribed());
        assert_eq!(
            orchestrator.central().calls.last(),
            Some(&Call::Disconnect(0xA4C1_38C3_7522))
        );
        assert_eq!(console.0[0], "Failed to find service UUID");
    }

    #[test]
    fn missing_characteristic_fails() {
        let (orchestrator, result, console) = run(MockPeer {
            has_characteristic: false,
            ..MockPeer::thermometer()
        });

        assert_eq!(result.err(), Some(Error::CharacteristicNotFound));
        assert_eq!(
            orchestrator.state(),
            State::Failed(Error::CharacteristicNotFound)
        );
        assert!(!orchestrator.central().subscribed());
        assert_eq!(console.0[0], "Failed to find characteristic UUID");
    }

    #[test]
    fn missing_cccd_still_subscribes() {
        let (orchestrator, result, console) = run(MockPeer {
            has_cccd: false,
            ..MockPeer::thermometer()
        });

        let connected = result.unwrap();
        assert!(!connected.interval_configured);
        assert!(orchestrator.is_connected());
        assert!(orchestrator.central().subscribed());
        assert_eq!(
            console.0,
            ["CCCD descriptor not found", "Connected to the BLE Server."]
        );
    }

    #[test]
    fn notify_unsupported_is_surfaced() {
        let (orchestrator, result, console) = run(MockPeer {
            can_notify: false,
            ..MockPeer::thermometer()
        });

        assert_eq!(result.err(), Some(Error::NotifyUnsupported));
        assert_eq!(orchestrator.state(), State::Failed(Error::NotifyUnsupported));
        assert!(!orchestrator.central().subscribed());
        assert_eq!(
            console.0[0],
            "Characteristic does not support notifications"
        );
    }

    #[test]
    fn subscribe_failure_disconnects() {
        let (orchestrator, result, _) = run(MockPeer {
            subscribe_fails: true,
            ..MockPeer::thermometer()
        });

        assert_eq!(result.err(), Some(Error::Ble(BleError::SubscribeFailed)));
        assert_eq!(
            orchestrator.central().calls.last(),
            Some(&Call::Disconnect(0xA4C1_38C3_7522))
        );
    }
}
