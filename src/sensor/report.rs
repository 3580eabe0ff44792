//! Operator-facing rendering of decoded readings.

use core::fmt::Write;

use heapless::String;

use super::payload::{decode, DecodedReading};
use crate::ble::Console;

/// Longest line we render ("Battery: 100.00% (655.35v)" plus headroom).
const LINE_CAPACITY: usize = 48;

/// Write the reading block: a blank separator line followed by
/// temperature, humidity and battery lines.
pub fn write_reading(reading: &DecodedReading, console: &mut impl Console) {
    let mut line: String<LINE_CAPACITY> = String::new();

    console.line("");

    let _ = write!(line, "Temperature: {:.2}°C", reading.temperature_c);
    console.line(&line);

    line.clear();
    let _ = write!(line, "Humidity: {}%", reading.humidity_pct);
    console.line(&line);

    line.clear();
    let _ = write!(
        line,
        "Battery: {:.2}% ({:.2}v)",
        reading.battery_pct, reading.battery_voltage
    );
    console.line(&line);
}

/// Decode one notification and report it, or report why it was dropped.
pub fn handle_notification(data: &[u8], console: &mut impl Console) -> Option<DecodedReading> {
    match decode(data) {
        Ok(reading) => {
            write_reading(&reading, console);
            Some(reading)
        }
        Err(e) => {
            let mut line: String<LINE_CAPACITY> = String::new();
            let _ = write!(line, "{}", e);
            console.line(&line);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::String as StdString;

    #[derive(Default)]
    struct Lines(Vec<StdString>);

    impl Console for Lines {
        fn line(&mut self, text: &str) {
            self.0.push(text.to_string());
        }
    }

    #[test]
    fn reading_block_format() {
        let mut out = Lines::default();
        let reading = handle_notification(&[0xB8, 0x0B, 0x38, 0x3A, 0x01], &mut out);

        assert!(reading.is_some());
        assert_eq!(
            out.0,
            [
                "",
                "Temperature: 30.00°C",
                "Humidity: 56%",
                "Battery: 95.15% (3.14v)"
            ]
        );
    }

    #[test]
    fn short_payload_reports_error_only() {
        let mut out = Lines::default();
        assert!(handle_notification(&[0x01, 0x02], &mut out).is_none());
        assert_eq!(out.0, ["Error: Insufficient data length"]);
    }

    #[test]
    fn four_byte_payload_reports_voltage_error() {
        let mut out = Lines::default();
        assert!(handle_notification(&[0x01, 0x02, 0x03, 0x04], &mut out).is_none());
        assert_eq!(out.0, ["Error: Incomplete battery voltage field"]);
    }

    #[test]
    fn extreme_values_fit_line_buffer() {
        let mut out = Lines::default();
        handle_notification(&[0x00, 0x80, 0xFF, 0xFF, 0xFF], &mut out);
        assert_eq!(out.0[1], "Temperature: -327.68°C");
        assert_eq!(out.0[2], "Humidity: 255%");
        assert_eq!(out.0[3], "Battery: 100.00% (655.35v)");
    }
}
