//! Notify-interval configuration through the CCCD.
//!
//! The thermometer reads the two CCCD bytes as a little-endian notify
//! interval in minutes. The write is best effort: a missing descriptor or a
//! failed write is reported on the console and the caller carries on.

use core::fmt::Write;

use heapless::String;

use super::{Console, GattCentral};
use crate::config::CCCD_UUID;
use crate::Error;

/// Encode the interval as written to the descriptor.
pub const fn interval_bytes(interval_minutes: u16) -> [u8; 2] {
    [
        (interval_minutes & 0xFF) as u8,
        ((interval_minutes >> 8) & 0xFF) as u8,
    ]
}

/// Write the notify interval to the characteristic's CCCD.
///
/// Returns `true` when the write was issued.
pub async fn configure<C: GattCentral>(
    central: &mut C,
    link: &C::Link,
    characteristic: &C::Characteristic,
    interval_minutes: u16,
    console: &mut impl Console,
) -> bool {
    let Some(cccd) = central.find_descriptor(characteristic, CCCD_UUID).await else {
        report(console, Error::DescriptorNotFound);
        return false;
    };

    let value = interval_bytes(interval_minutes);
    match central.write_descriptor(link, &cccd, &value, false).await {
        Ok(()) => true,
        Err(e) => {
            report(console, e);
            false
        }
    }
}

fn report(console: &mut impl Console, e: Error) {
    let mut line: String<48> = String::new();
    let _ = write!(line, "{}", e);
    console.line(&line);
}
