//! Time source injected into the router

use chrono::{DateTime, Local};

/// Supplies "now" to handlers that stamp items
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Wall clock in the local timezone
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Unix timestamp with fractional seconds, e.g. `1700000000.123456`
///
/// Always contains a decimal point, even on a whole second.
pub fn timestamp_id(at: &DateTime<Local>) -> String {
    #[allow(clippy::cast_precision_loss)]
    let secs = at.timestamp_micros() as f64 / 1_000_000.0;
    format!("{secs:?}")
}

/// Local ISO-8601 time without offset; fraction only when non-zero
pub fn iso_local(at: &DateTime<Local>) -> String {
    let naive = at.naive_local();
    if at.timestamp_subsec_micros() == 0 {
        naive.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        naive.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, TimeZone};

    #[test]
    fn test_timestamp_id_has_fraction() {
        let at = Local.timestamp_opt(1_700_000_000, 500_000_000).unwrap();
        assert_eq!(timestamp_id(&at), "1700000000.5");

        let whole = Local.timestamp_opt(1_700_000_000, 0).unwrap();
        assert_eq!(timestamp_id(&whole), "1700000000.0");
    }

    #[test]
    fn test_iso_local_parses_back() {
        let at = Local.timestamp_opt(1_700_000_000, 123_456_000).unwrap();
        let text = iso_local(&at);
        assert!(text.ends_with(".123456"), "got {text}");
        let parsed = NaiveDateTime::parse_from_str(&text, "%Y-%m-%dT%H:%M:%S%.f").unwrap();
        assert_eq!(parsed, at.naive_local());
    }

    #[test]
    fn test_iso_local_omits_zero_fraction() {
        let at = Local.timestamp_opt(1_700_000_000, 0).unwrap();
        assert!(!iso_local(&at).contains('.'));
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let a = SystemClock.now();
        let b = SystemClock.now();
        assert!(b >= a);
    }
}
