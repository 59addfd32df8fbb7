//! Wall-clock and elapsed-time helpers.
//!
//! The simulator never reads the system clock itself. Every time-dependent
//! operation receives `now` as a [`NaiveDateTime`]; [`wall_clock_now`] is the
//! one place the live presentation layer turns local time into that value.

use std::time::Duration;

use chrono::{Local, NaiveDateTime, TimeDelta};

/// Label format for sample timestamps (`HH:MM:SS`).
pub const LABEL_FORMAT: &str = "%H:%M:%S";

/// Current local wall-clock time, without timezone.
pub fn wall_clock_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Convert fractional seconds into a microsecond-resolution [`TimeDelta`].
pub fn secs_to_delta(secs: f64) -> TimeDelta {
    if !secs.is_finite() {
        return TimeDelta::zero();
    }
    TimeDelta::microseconds((secs * 1_000_000.0).round() as i64)
}

/// Like [`secs_to_delta`], but `None` when `secs` is not finite or does not
/// fit in a microsecond [`TimeDelta`].
pub fn try_secs_to_delta(secs: f64) -> Option<TimeDelta> {
    let us = (secs * 1_000_000.0).round();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    if !us.is_finite() || us >= i64::MAX as f64 || us < i64::MIN as f64 {
        return None;
    }
    Some(TimeDelta::microseconds(us as i64))
}

/// Convert a [`TimeDelta`] into fractional seconds.
pub fn delta_secs(delta: TimeDelta) -> f64 {
    match delta.num_microseconds() {
        Some(us) => us as f64 / 1_000_000.0,
        // Beyond ~292k years; millisecond precision is plenty.
        None => delta.num_milliseconds() as f64 / 1000.0,
    }
}

/// Format a timestamp as an `HH:MM:SS` sample label.
pub fn format_label(at: NaiveDateTime) -> String {
    at.format(LABEL_FORMAT).to_string()
}

/// Format an elapsed duration as zero-padded `HH:MM:SS`.
///
/// Hours are not wrapped at 24 and widen past 99.
pub fn format_hms(elapsed: Duration) -> String {
    // Absorb float noise from speed scaling (e.g. 5399.9999999s).
    let total = (elapsed.as_secs_f64() + 1e-6) as u64;
    let (h, m, s) = (total / 3600, (total / 60) % 60, total % 60);
    format!("{h:02}:{m:02}:{s:02}")
}

/// Parse an `HH:MM:SS` string into `(hours, minutes, seconds)`.
///
/// Components must be non-negative integers; minutes and seconds are not
/// range-limited (`0:90:00` reads as one and a half hours). Returns `None`
/// for anything else.
pub fn parse_hms(s: &str) -> Option<(u64, u64, u64)> {
    let mut parts = s.trim().split(':');
    let h = parse_component(parts.next()?)?;
    let m = parse_component(parts.next()?)?;
    let sec = parse_component(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    Some((h, m, sec))
}

fn parse_component(s: &str) -> Option<u64> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Total seconds of an `h:m:s` triple.
pub fn hms_secs(h: u64, m: u64, s: u64) -> f64 {
    (h as f64) * 3600.0 + (m as f64) * 60.0 + s as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_try_secs_to_delta_range() {
        assert_eq!(try_secs_to_delta(1.5), Some(TimeDelta::milliseconds(1500)));
        assert_eq!(try_secs_to_delta(f64::NAN), None);
        assert_eq!(try_secs_to_delta(1.08e13), None);
        assert_eq!(try_secs_to_delta(-1.08e13), None);
    }

    #[test]
    fn test_format_hms_zero() {
        assert_eq!(format_hms(Duration::ZERO), "00:00:00");
    }

    #[test]
    fn test_format_hms_hour_and_a_half() {
        assert_eq!(format_hms(Duration::from_secs(5400)), "01:30:00");
    }

    #[test]
    fn test_format_hms_truncates_fraction() {
        assert_eq!(format_hms(Duration::from_secs_f64(59.9)), "00:00:59");
    }

    #[test]
    fn test_format_hms_absorbs_float_noise() {
        assert_eq!(format_hms(Duration::from_secs_f64(5399.9999999)), "01:30:00");
    }

    #[test]
    fn test_format_hms_past_a_day() {
        assert_eq!(format_hms(Duration::from_secs(100 * 3600 + 61)), "100:01:01");
    }

    #[test]
    fn test_parse_hms_valid() {
        assert_eq!(parse_hms("01:30:00"), Some((1, 30, 0)));
        assert_eq!(parse_hms(" 2:5:7 "), Some((2, 5, 7)));
        assert_eq!(parse_hms("0:90:00"), Some((0, 90, 0)));
    }

    #[test]
    fn test_parse_hms_rejects_malformed() {
        assert_eq!(parse_hms(""), None);
        assert_eq!(parse_hms("01:30"), None);
        assert_eq!(parse_hms("01:30:00:00"), None);
        assert_eq!(parse_hms("-1:00:00"), None);
        assert_eq!(parse_hms("1.5:00:00"), None);
        assert_eq!(parse_hms("aa:bb:cc"), None);
        assert_eq!(parse_hms("1::0"), None);
    }

    #[test]
    fn test_delta_roundtrip_exact_on_whole_seconds() {
        assert_eq!(delta_secs(secs_to_delta(5400.0)), 5400.0);
        assert_eq!(delta_secs(at(10, 0, 1) - at(10, 0, 0)), 1.0);
    }

    #[test]
    fn test_secs_to_delta_non_finite_is_zero() {
        assert_eq!(secs_to_delta(f64::NAN), TimeDelta::zero());
        assert_eq!(secs_to_delta(f64::INFINITY), TimeDelta::zero());
    }

    #[test]
    fn test_format_label() {
        assert_eq!(format_label(at(9, 5, 3)), "09:05:03");
    }

    #[test]
    fn test_hms_secs() {
        assert_eq!(hms_secs(1, 30, 0), 5400.0);
        assert_eq!(hms_secs(0, 0, 42), 42.0);
    }
}
