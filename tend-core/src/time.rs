//! Temporal utilities: day arithmetic, recurring month/day dates, fire times.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

const MS_PER_DAY: i64 = 86_400_000;

/// Whole days between two instants, floored millisecond arithmetic.
///
/// Deliberately not calendar-aware: across a DST transition the result can
/// be off by one. That matches the app's observed behavior and is cheaper
/// than a calendar walk for data this small.
pub fn days_between(a: DateTime<Utc>, b: DateTime<Utc>) -> i64 {
    (b - a).num_milliseconds().div_euclid(MS_PER_DAY)
}

/// Parse a year-less "MM/DD" string. Missing slash, non-numeric components,
/// or out-of-range month/day all come back as `None`.
pub fn parse_month_day(s: &str) -> Option<(u32, u32)> {
    let (m, d) = s.split_once('/')?;
    let month: u32 = m.trim().parse().ok()?;
    let day: u32 = d.trim().parse().ok()?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    Some((month, day))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextOccurrence {
    pub days_until: i64,
    pub date: NaiveDate,
}

/// Next annual occurrence of a "MM/DD" date on or after `today`.
///
/// `days_until == 0` means the date is today; a candidate earlier in the
/// current year rolls over to next year. Feb 29 only constructs on leap
/// years, so the scan covers enough years to reach the next one even across
/// a skipped century leap year (2100: 2097..=2104 is a 7-year gap); a day
/// that never constructs (e.g. "02/30") degrades to `None`.
pub fn next_occurrence(month_day: &str, today: NaiveDate) -> Option<NextOccurrence> {
    use chrono::Datelike;

    let (month, day) = parse_month_day(month_day)?;
    let candidate = (today.year()..=today.year() + 8)
        .filter_map(|y| NaiveDate::from_ymd_opt(y, month, day))
        .find(|d| *d >= today)?;

    Some(NextOccurrence {
        days_until: (candidate - today).num_days(),
        date: candidate,
    })
}

/// Non-validating "HH:MM" parse; malformed components degrade to 0.
/// Real validation belongs to the settings-editing surface.
pub fn parse_time_of_day(s: &str) -> (u32, u32) {
    let (h, m) = s.split_once(':').unwrap_or((s, ""));
    (h.trim().parse().unwrap_or(0), m.trim().parse().unwrap_or(0))
}

/// Calendar date at the user's wall clock.
pub fn local_today(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// Absolute UTC instant for `date` at `hour:minute` on the user's wall clock.
///
/// DST fold picks the earlier instant; a spring-forward gap shifts the wall
/// clock one hour later so the intent still lands on the intended day.
pub fn local_fire_time(date: NaiveDate, hour: u32, minute: u32, tz: Tz) -> DateTime<Utc> {
    let time = NaiveTime::from_hms_opt(hour.min(23), minute.min(59), 0).unwrap_or(NaiveTime::MIN);
    let naive = date.and_time(time);

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        LocalResult::None => tz
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive)),
    }
}

/// Human-readable age of a timestamp relative to `now`, for list views.
pub fn format_relative(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = days_between(date, now);
    match days {
        i64::MIN..=-1 => "In the future".to_string(),
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{days} days ago"),
        7..=29 => format!("{} weeks ago", days / 7),
        30..=364 => format!("{} months ago", days / 30),
        _ => format!("{} years ago", days / 365),
    }
}
