//! Input validation for the editing surface. The core trusts values past
//! this point and never re-validates them.

use regex::Regex;
use std::sync::OnceLock;

use tend_core::parse_month_day;

static MONTH_DAY_RE: OnceLock<Regex> = OnceLock::new();
static TIME_RE: OnceLock<Regex> = OnceLock::new();

/// "MM/DD" with a real month/day combination ("2/30" fails the range check).
pub fn valid_month_day(s: &str) -> bool {
    let re = MONTH_DAY_RE.get_or_init(|| Regex::new(r"^\d{1,2}/\d{1,2}$").unwrap());
    re.is_match(s) && parse_month_day(s).is_some()
}

/// 24-hour "HH:MM".
pub fn valid_time_of_day(s: &str) -> bool {
    let re = TIME_RE.get_or_init(|| Regex::new(r"^([01]?\d|2[0-3]):[0-5]\d$").unwrap());
    re.is_match(s)
}

/// Weekday index, 0 = Sunday .. 6 = Saturday.
pub fn valid_quiet_day(day: u8) -> bool {
    day <= 6
}

/// Early warnings need at least one day of lead.
pub fn valid_early_warning_days(days: i64) -> bool {
    days >= 1
}
