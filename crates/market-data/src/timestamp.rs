//! Epoch-millisecond to UTC date string conversion.

use chrono::DateTime;

/// Output layout, always rendered in UTC.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Convert epoch milliseconds to `YYYY-MM-DD HH:MM:SS UTC`.
///
/// Sub-second precision is truncated. Returns `None` only when the value is
/// outside the representable calendar range.
///
/// ```
/// use finage_market_data::epoch_to_date;
///
/// assert_eq!(
///     epoch_to_date(1583400000000).as_deref(),
///     Some("2020-03-05 09:20:00 UTC")
/// );
/// ```
pub fn epoch_to_date(epoch_ms: i64) -> Option<String> {
    DateTime::from_timestamp_millis(epoch_ms).map(|dt| dt.format(DATE_FORMAT).to_string())
}
