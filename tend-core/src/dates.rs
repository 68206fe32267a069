//! Recurring-date collection: flatten every MM/DD source across people and
//! their family members into a window of upcoming events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::person::Person;
use crate::time::next_occurrence;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateKind {
    Birthday,
    Anniversary,
    SpouseBirthday,
    KidBirthday,
}

/// A named upcoming event, recomputed on every scheduling pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingDate {
    pub owner_id: String,
    pub owner_name: String,
    pub kind: DateKind,
    pub label: String,
    /// The stored "MM/DD" value this event came from.
    pub raw_date: String,
    pub days_until: i64,
    pub date: NaiveDate,
}

/// Scan all people for birthday/anniversary/spouse/kid dates falling within
/// `0..=max_window` days of `today`, sorted ascending by days-until.
///
/// Malformed date strings are silently skipped, and events landing on the
/// same day are not deduplicated; ties keep scan order.
pub fn collect_upcoming_dates(people: &[Person], max_window: i64, today: NaiveDate) -> Vec<UpcomingDate> {
    let mut out = Vec::new();

    for person in people {
        if let Some(raw) = &person.birthday {
            push_event(
                &mut out,
                person,
                DateKind::Birthday,
                format!("{}'s birthday", person.name),
                raw,
                max_window,
                today,
            );
        }
        if let Some(raw) = &person.anniversary {
            push_event(
                &mut out,
                person,
                DateKind::Anniversary,
                format!("{}'s anniversary", person.name),
                raw,
                max_window,
                today,
            );
        }
        if let Some(spouse) = &person.spouse {
            if let Some(raw) = &spouse.birthday {
                push_event(
                    &mut out,
                    person,
                    DateKind::SpouseBirthday,
                    format!("{}'s birthday", spouse.name),
                    raw,
                    max_window,
                    today,
                );
            }
        }
        for kid in &person.kids {
            if let Some(raw) = &kid.birthday {
                push_event(
                    &mut out,
                    person,
                    DateKind::KidBirthday,
                    format!("{}'s birthday", kid.name),
                    raw,
                    max_window,
                    today,
                );
            }
        }
    }

    out.sort_by_key(|d| d.days_until);
    out
}

fn push_event(
    out: &mut Vec<UpcomingDate>,
    person: &Person,
    kind: DateKind,
    label: String,
    raw: &str,
    max_window: i64,
    today: NaiveDate,
) {
    let Some(occ) = next_occurrence(raw, today) else {
        return;
    };
    if occ.days_until > max_window {
        return;
    }
    out.push(UpcomingDate {
        owner_id: person.id.clone(),
        owner_name: person.name.clone(),
        kind,
        label,
        raw_date: raw.to_string(),
        days_until: occ.days_until,
        date: occ.date,
    });
}
