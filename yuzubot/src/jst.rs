//! JST (UTC+9) day/hour keys. Counters, fortune history, and snapshots all
//! partition by the Japanese calendar day.

use chrono::{DateTime, FixedOffset, Timelike, Utc};

fn jst() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).expect("valid fixed offset")
}

/// `yyyy-MM-dd` day key of the given instant, in JST.
pub fn day_key(at: DateTime<Utc>) -> String {
    at.with_timezone(&jst()).format("%Y-%m-%d").to_string()
}

/// Hour (0–23) of the given instant, in JST.
pub fn hour_key(at: DateTime<Utc>) -> i64 {
    i64::from(at.with_timezone(&jst()).hour())
}

/// Minute (0–59) of the given instant, in JST.
pub fn minute_key(at: DateTime<Utc>) -> u32 {
    at.with_timezone(&jst()).minute()
}

/// Today's day key.
pub fn today() -> String {
    day_key(Utc::now())
}

/// The current JST hour.
pub fn current_hour() -> i64 {
    hour_key(Utc::now())
}

/// The current JST minute.
pub fn current_minute() -> u32 {
    minute_key(Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn day_rolls_over_at_jst_midnight() {
        // 15:00 UTC = 00:00 JST next day
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 15, 0, 0).unwrap();
        assert_eq!(day_key(at), "2024-01-02");

        let before = Utc.with_ymd_and_hms(2024, 1, 1, 14, 59, 59).unwrap();
        assert_eq!(day_key(before), "2024-01-01");
    }

    #[test]
    fn hour_is_reported_in_jst() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(hour_key(at), 9);
        assert_eq!(minute_key(at), 0);
    }
}
