//! Library interface for mitemp-central.
//!
//! The pure logic (payload decoding, discovery filtering, the connection
//! state machine) builds for the host and is unit tested there:
//!
//! Usage: `cargo test`
//!
//! The SoftDevice adapters in `softdevice` and the firmware entry in
//! `main.rs` are only built with the `embedded` feature.

#![cfg_attr(not(test), no_std)]

pub mod ble;
pub mod config;
pub mod error;
pub mod sensor;

#[cfg(feature = "embedded")]
pub mod softdevice;

pub use error::{BleError, Error};
