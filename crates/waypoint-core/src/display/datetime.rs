//! Date and time display utilities.
//!
//! Wrapper types that format timestamps and civil dates consistently
//! using the system timezone.

use std::fmt;

use jiff::{civil::Date, tz::TimeZone, Timestamp};

/// A wrapper around `Timestamp` that provides system timezone formatting
/// via the `Display` trait.
///
/// # Format
///
/// The display format follows the pattern: `YYYY-MM-DD HH:MM:SS TZ`
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// A wrapper around a civil `Date` that formats as a weekday-qualified
/// calendar day, e.g. `Thu 2026-08-06`.
pub struct CalendarDay<'a>(pub &'a Date);

impl fmt::Display for CalendarDay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%a %Y-%m-%d"))
    }
}
