//! Relationship health: derived status, decay signal, urgency ordering.
//!
//! Everything here is recomputed from `(last_contact_date, frequency, now)`;
//! nothing is stored or transitioned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::person::Person;
use crate::time::days_between;

/// Sentinel for "never contacted"; larger than any target interval.
pub const NEVER_CONTACTED_DAYS_SINCE: i64 = 999;
/// The app's exact sentinel for a never-contacted days-until-due.
pub const NEVER_CONTACTED_DAYS_UNTIL_DUE: i64 = -999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HealthStatus {
    Healthy,
    DueSoon,
    Overdue,
}

impl HealthStatus {
    pub fn label(self) -> &'static str {
        match self {
            HealthStatus::Healthy => "Healthy",
            HealthStatus::DueSoon => "Due soon",
            HealthStatus::Overdue => "Overdue",
        }
    }
}

/// Whole days since last contact, or the never-contacted sentinel.
pub fn days_since_contact(person: &Person, now: DateTime<Utc>) -> i64 {
    match person.last_contact_date {
        Some(last) => days_between(last, now),
        None => NEVER_CONTACTED_DAYS_SINCE,
    }
}

pub fn health_status(person: &Person, now: DateTime<Utc>) -> HealthStatus {
    let days = days_since_contact(person, now);
    let target = person.frequency.target_days();
    let warning = target as f64 * 0.8;

    if days >= target {
        HealthStatus::Overdue
    } else if days as f64 >= warning {
        HealthStatus::DueSoon
    } else {
        HealthStatus::Healthy
    }
}

/// Days until contact is due; negative means overdue by that many days.
/// Used for ranking, never surfaced as a status.
pub fn days_until_due(person: &Person, now: DateTime<Utc>) -> i64 {
    match person.last_contact_date {
        Some(last) => person.frequency.target_days() - days_between(last, now),
        None => NEVER_CONTACTED_DAYS_UNTIL_DUE,
    }
}

/// Linear decay from 100 right after contact to 0 at the due date, clamped.
pub fn signal_percentage(person: &Person, now: DateTime<Utc>) -> f64 {
    let target = person.frequency.target_days() as f64;
    let days = days_since_contact(person, now) as f64;
    (((target - days) / target) * 100.0).clamp(0.0, 100.0)
}

/// Most overdue first. The sort is stable and has no secondary key: people
/// with equal days-until-due keep their input order.
pub fn sort_by_urgency(people: &[Person], now: DateTime<Utc>) -> Vec<Person> {
    let mut ranked = people.to_vec();
    ranked.sort_by_key(|p| days_until_due(p, now));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::ContactFrequency;
    use chrono::{Duration, TimeZone};

    fn person(id: &str, frequency: ContactFrequency) -> Person {
        let created = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        Person::new(id, id, frequency, created)
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn fresh_contact_is_healthy_at_full_signal() {
        let p = person("p1", ContactFrequency::Weekly).with_last_contact(now());
        assert_eq!(health_status(&p, now()), HealthStatus::Healthy);
        assert_eq!(signal_percentage(&p, now()), 100.0);
        assert_eq!(days_until_due(&p, now()), 7);
    }

    #[test]
    fn warning_threshold_is_eighty_percent_of_target() {
        // Weekly target 7, warning at 5.6 days.
        let due_soon = person("p1", ContactFrequency::Weekly)
            .with_last_contact(now() - Duration::days(6));
        assert_eq!(health_status(&due_soon, now()), HealthStatus::DueSoon);

        let healthy = person("p2", ContactFrequency::Weekly)
            .with_last_contact(now() - Duration::days(5));
        assert_eq!(health_status(&healthy, now()), HealthStatus::Healthy);

        let overdue = person("p3", ContactFrequency::Weekly)
            .with_last_contact(now() - Duration::days(7));
        assert_eq!(health_status(&overdue, now()), HealthStatus::Overdue);
    }

    #[test]
    fn overdue_stays_overdue_and_signal_clamps_at_zero() {
        let p = person("p1", ContactFrequency::Daily)
            .with_last_contact(now() - Duration::days(400));
        assert_eq!(health_status(&p, now()), HealthStatus::Overdue);
        assert_eq!(signal_percentage(&p, now()), 0.0);
        assert_eq!(days_until_due(&p, now()), 1 - 400);
    }

    #[test]
    fn never_contacted_is_maximally_overdue() {
        let p = person("p1", ContactFrequency::Quarterly);
        assert_eq!(health_status(&p, now()), HealthStatus::Overdue);
        assert_eq!(days_until_due(&p, now()), NEVER_CONTACTED_DAYS_UNTIL_DUE);
        assert_eq!(signal_percentage(&p, now()), 0.0);
    }

    #[test]
    fn future_contact_clamps_signal_at_hundred() {
        let p = person("p1", ContactFrequency::Daily)
            .with_last_contact(now() + Duration::days(3));
        assert_eq!(signal_percentage(&p, now()), 100.0);
        assert_eq!(health_status(&p, now()), HealthStatus::Healthy);
    }

    #[test]
    fn urgency_sort_is_stable_for_ties() {
        let overdue_a = person("a", ContactFrequency::Weekly)
            .with_last_contact(now() - Duration::days(10));
        let overdue_b = person("b", ContactFrequency::Weekly)
            .with_last_contact(now() - Duration::days(10));
        let fresh = person("c", ContactFrequency::Weekly).with_last_contact(now());

        let ranked = sort_by_urgency(&[fresh, overdue_a, overdue_b], now());
        let ids: Vec<&str> = ranked.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn never_contacted_ranks_before_merely_overdue() {
        let very_late = person("late", ContactFrequency::Daily)
            .with_last_contact(now() - Duration::days(30));
        let never = person("never", ContactFrequency::Quarterly);

        let ranked = sort_by_urgency(&[very_late, never], now());
        assert_eq!(ranked[0].id, "never");
    }
}
