//! Display formatting for calendar timestamps.
//!
//! The shop frontend renders timestamps as `YYYY/MM/DD HH:MM:SS`. The value
//! is trusted to already be in the zone the caller wants displayed — no
//! conversion, no locale handling.

use chrono::{Datelike, Timelike};

/// Format a calendar value as `YYYY/MM/DD HH:MM:SS`.
///
/// Accepts any chrono value carrying both date and clock components
/// (`NaiveDateTime`, `DateTime<Tz>`). Month through second are zero-padded
/// to two digits; the year is printed as-is.
pub fn format_time<T: Datelike + Timelike>(t: &T) -> String {
    format!(
        "{}/{}/{} {}:{}:{}",
        t.year(),
        pad(t.month()),
        pad(t.day()),
        pad(t.hour()),
        pad(t.minute()),
        pad(t.second()),
    )
}

/// Zero-left-pad to a minimum width of two decimal digits.
/// Values of three or more digits pass through unchanged.
fn pad(n: u32) -> String {
    let s = n.to_string();
    if s.len() == 1 {
        format!("0{s}")
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn pads_single_digits() {
        assert_eq!(pad(5), "05");
        assert_eq!(pad(0), "00");
    }

    #[test]
    fn leaves_two_digits_unchanged() {
        assert_eq!(pad(12), "12");
        assert_eq!(pad(99), "99");
    }

    #[test]
    fn passes_three_digits_through() {
        assert_eq!(pad(100), "100");
    }

    #[test]
    fn formats_single_digit_components() {
        let t = at(2023, 1, 9, 3, 4, 5);
        assert_eq!(format_time(&t), "2023/01/09 03:04:05");
    }

    #[test]
    fn formats_two_digit_components() {
        let t = at(1999, 12, 31, 23, 59, 59);
        assert_eq!(format_time(&t), "1999/12/31 23:59:59");
    }

    #[test]
    fn december_stays_december() {
        let t = at(2024, 12, 1, 0, 0, 0);
        assert!(format_time(&t).starts_with("2024/12/01"));
    }

    #[test]
    fn formatting_is_pure() {
        let t = at(2023, 6, 15, 12, 30, 45);
        assert_eq!(format_time(&t), format_time(&t));
    }

    #[test]
    fn zoned_values_format_in_their_own_zone() {
        use chrono::{DateTime, FixedOffset};
        let t: DateTime<FixedOffset> =
            DateTime::parse_from_rfc3339("2023-01-09T03:04:05+08:00").unwrap();
        // The +08:00 wall clock is what gets printed, not UTC.
        assert_eq!(format_time(&t), "2023/01/09 03:04:05");
    }
}
