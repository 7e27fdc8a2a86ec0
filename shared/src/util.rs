/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Local business day (`YYYY-MM-DD`) for a millisecond timestamp
///
/// Falls back to today if the timestamp is out of chrono's range.
pub fn business_day(millis: i64) -> String {
    use chrono::{Local, TimeZone};
    Local
        .timestamp_millis_opt(millis)
        .single()
        .unwrap_or_else(Local::now)
        .format("%Y-%m-%d")
        .to_string()
}
