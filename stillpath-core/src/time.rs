//! Calendar-day helpers. Streaks count local days; the backend stores UTC instants.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Resolve a UTC instant to the user's local calendar day, given an IANA tz
/// like "America/Chicago".
pub fn local_day(instant: DateTime<Utc>, tz: &str) -> Result<NaiveDate> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;
    Ok(instant.with_timezone(&tz).date_naive())
}

/// Whole days from `earlier` to `later`. Negative if `later` precedes `earlier`.
pub fn day_gap(earlier: NaiveDate, later: NaiveDate) -> i64 {
    (later - earlier).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_local_day_rolls_back_across_midnight_utc() {
        // 03:30 UTC on Feb 20 is still Feb 19 in Chicago (CST, UTC-6).
        let instant = Utc.with_ymd_and_hms(2026, 2, 20, 3, 30, 0).unwrap();
        let day = local_day(instant, "America/Chicago").unwrap();
        assert_eq!(day, NaiveDate::from_ymd_opt(2026, 2, 19).unwrap());
    }

    #[test]
    fn test_invalid_timezone_errors() {
        let instant = Utc.with_ymd_and_hms(2026, 2, 20, 3, 30, 0).unwrap();
        assert!(local_day(instant, "Not/AZone").is_err());
    }

    #[test]
    fn test_day_gap_sign() {
        let a = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
        assert_eq!(day_gap(a, b), 3);
        assert_eq!(day_gap(b, a), -3);
    }
}
