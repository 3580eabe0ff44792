//! mitemp-central firmware entry point.
//!
//! Task layout:
//! - `softdevice_task` runs the SoftDevice event loop.
//! - `scan_task` waits for the startup delay, scans once and hands the
//!   match to `central_task` through [`TARGET`].
//! - `central_task` runs the connection state machine once, then pumps
//!   notifications into [`PAYLOADS`] until the link drops.
//! - `reporter_task` decodes each payload and prints the reading.

#![no_std]
#![no_main]

use defmt::{error, info, unwrap};
use embassy_executor::Spawner;
use embassy_nrf::interrupt::Priority;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};
use mitemp_central::ble::{Console, MatchSignal, Orchestrator};
use mitemp_central::config::{PAYLOAD_QUEUE_DEPTH, STARTUP_DELAY_SECS};
use mitemp_central::sensor::{handle_notification, NotificationPayload};
use mitemp_central::softdevice::client::{self, SoftdeviceCentral};
use mitemp_central::softdevice::{scanner, DefmtConsole};
use nrf_softdevice::ble::Address;
use nrf_softdevice::{raw, Softdevice};
use {defmt_rtt as _, panic_probe as _};

/// Scanner → central hand-off of the matched address.
static TARGET: Signal<CriticalSectionRawMutex, MatchSignal<Address>> = Signal::new();

/// Raw notifications, BLE → reporter.
static PAYLOADS: Channel<CriticalSectionRawMutex, NotificationPayload, PAYLOAD_QUEUE_DEPTH> =
    Channel::new();

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

#[embassy_executor::task]
async fn scan_task(sd: &'static Softdevice) {
    Timer::after(Duration::from_secs(STARTUP_DELAY_SECS)).await;

    let mut console = DefmtConsole;
    console.line("Scanning...");

    match scanner::scan_for_target(sd).await {
        Ok(Some(signal)) => {
            console.line("Device found. Connecting!");
            TARGET.signal(signal);
        }
        Ok(None) => {}
        Err(e) => error!("Scan aborted: {}", e),
    }
}

#[embassy_executor::task]
async fn central_task(sd: &'static Softdevice) {
    let signal = TARGET.wait().await;

    let mut console = DefmtConsole;
    let mut orchestrator = Orchestrator::new(SoftdeviceCentral::new(sd));

    // Failures are already reported on the console; single attempt only.
    let Ok(connected) = orchestrator.connect(signal, &mut console).await else {
        info!("Connection attempt finished in state {}", orchestrator.state());
        return;
    };

    client::run_notification_loop(&connected.link, &connected.service, PAYLOADS.sender()).await;
    info!("Link closed - idle");
}

#[embassy_executor::task]
async fn reporter_task() -> ! {
    let mut console = DefmtConsole;
    loop {
        let payload = PAYLOADS.receive().await;
        handle_notification(&payload, &mut console);
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("mitemp-central starting");

    // The SoftDevice reserves priorities 0, 1 and 4.
    let mut config = embassy_nrf::config::Config::default();
    config.gpiote_interrupt_priority = Priority::P2;
    config.time_interrupt_priority = Priority::P2;
    let _p = embassy_nrf::init(config);

    let sd_config = nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 23 }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 0,
            central_role_count: 1,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        ..Default::default()
    };

    let sd: &'static Softdevice = Softdevice::enable(&sd_config);

    unwrap!(spawner.spawn(softdevice_task(sd)));
    unwrap!(spawner.spawn(reporter_task()));
    unwrap!(spawner.spawn(central_task(sd)));
    unwrap!(spawner.spawn(scan_task(sd)));
}
