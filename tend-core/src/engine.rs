//! Reminder policy engine: `(people, settings, now)` in, notification
//! intents out.
//!
//! The engine is a pure function of its inputs (modulo the injected rng used
//! for message wording); the orchestrator relies on that for safe
//! cancel-and-reinstall, so nothing here reads the wall clock or touches I/O.

use anyhow::Result;
use chrono::{DateTime, Datelike, Duration, Utc};
use chrono_tz::Tz;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::dates::collect_upcoming_dates;
use crate::health::{health_status, sort_by_urgency, HealthStatus};
use crate::messages::{random_note, warm_message};
use crate::person::Person;
use crate::settings::AppSettings;
use crate::time::{local_fire_time, local_today, parse_time_of_day};

pub const DECAY_TITLE: &str = "Tend Your Garden";
pub const WEEKLY_TITLE: &str = "Weekly Check-in";
pub const DAY_OF_TITLE: &str = "Today's the Day";
pub const EARLY_WARNING_TITLE: &str = "Coming Up";

/// Minimum look-ahead for the date collector: keeps day-of reminders
/// discoverable even when early warning is disabled or set very small.
const DATE_WINDOW_FLOOR: i64 = 30;

/// A fully specified future notification, not yet submitted to the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationIntent {
    pub fire_at: DateTime<Utc>,
    pub title: String,
    pub body: String,
    /// Person to navigate to when the delivered notification is tapped.
    /// Date reminders carry no navigation target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

/// Compute the complete set of notifications that should exist right now.
///
/// Policy, in order: decay reminder for the single most urgent relationship
/// (suppressed outright if tomorrow is a quiet day), weekly summary when more
/// than one person needs attention (no quiet-day check, as observed in the
/// app), then per-event day-of and early-warning date reminders. Intents are
/// never deduplicated or merged.
pub fn build_notification_intents(
    people: &[Person],
    settings: &AppSettings,
    tz: Tz,
    now: DateTime<Utc>,
    rng: &mut impl Rng,
) -> Vec<NotificationIntent> {
    let mut out = Vec::new();
    if !settings.notifications.enabled {
        return out;
    }

    let (hour, minute) = parse_time_of_day(&settings.notifications.preferred_time);
    let today = local_today(now, tz);

    let needs_attention: Vec<Person> = people
        .iter()
        .filter(|p| health_status(p, now) != HealthStatus::Healthy)
        .cloned()
        .collect();

    if !needs_attention.is_empty() {
        let ranked = sort_by_urgency(&needs_attention, now);
        let most_urgent = &ranked[0];

        // Decay reminder fires tomorrow or not at all: a quiet tomorrow
        // suppresses it outright instead of rolling to the next free day.
        let tomorrow = today + Duration::days(1);
        let tomorrow_weekday = tomorrow.weekday().num_days_from_sunday() as u8;
        if !settings.notifications.quiet_days.contains(&tomorrow_weekday) {
            let status = health_status(most_urgent, now);
            let mut body = warm_message(&most_urgent.name, status, rng);
            if let Some(note) = random_note(&most_urgent.notes, rng) {
                body.push_str(&format!(" — ask about: {}", note.content));
            }
            out.push(NotificationIntent {
                fire_at: local_fire_time(tomorrow, hour, minute, tz),
                title: DECAY_TITLE.to_string(),
                body,
                correlation_id: Some(most_urgent.id.clone()),
            });
        }

        // Weekly summary is exempt from quiet days; that asymmetry is the
        // observed app behavior and is kept as-is.
        if needs_attention.len() > 1 {
            out.push(NotificationIntent {
                fire_at: local_fire_time(today + Duration::days(7), hour, minute, tz),
                title: WEEKLY_TITLE.to_string(),
                body: format!(
                    "You have {} relationships that could use some attention. \
                     Open Tend to see who's on your list.",
                    needs_attention.len()
                ),
                correlation_id: Some(most_urgent.id.clone()),
            });
        }
    }

    if let Some(date_settings) = &settings.date_reminders {
        let window = date_settings.early_warning_days.max(DATE_WINDOW_FLOOR);
        for event in collect_upcoming_dates(people, window, today) {
            if date_settings.on_the_day_enabled && event.days_until >= 0 {
                let fire_at = local_fire_time(event.date, hour, minute, tz);
                // The preferred time may already be behind us today; a past
                // instant is skipped for this pass, not shifted.
                if fire_at > now {
                    out.push(NotificationIntent {
                        fire_at,
                        title: DAY_OF_TITLE.to_string(),
                        body: format!("It's {} today. Reach out and celebrate!", event.label),
                        correlation_id: None,
                    });
                }
            }

            // Exact-equality match: the warning exists on one pass window
            // only. Run the engine daily or it is missed entirely.
            if date_settings.early_warning_enabled
                && event.days_until == date_settings.early_warning_days
            {
                let fire_at = local_fire_time(today, hour, minute, tz);
                if fire_at > now {
                    let lead = if date_settings.early_warning_days == 1 {
                        "1 day".to_string()
                    } else {
                        format!("{} days", date_settings.early_warning_days)
                    };
                    out.push(NotificationIntent {
                        fire_at,
                        title: EARLY_WARNING_TITLE.to_string(),
                        body: format!("{} is in {}", event.label, lead),
                        correlation_id: None,
                    });
                }
            }
        }
    }

    out
}

/// Read-only snapshot supplier, the persistence side of a scheduling pass.
pub trait PersonSource {
    fn people(&self) -> Result<Vec<Person>>;
    fn settings(&self) -> Result<AppSettings>;
}

/// Device-notification surface: full cancel plus reinstall, never incremental.
pub trait SchedulingPort {
    fn cancel_all(&mut self) -> Result<()>;
    /// Submit one intent; returns an opaque handle.
    fn schedule(&mut self, intent: &NotificationIntent) -> Result<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassOutcome {
    pub intents: Vec<NotificationIntent>,
    pub handles: Vec<String>,
}

/// One full scheduling pass: snapshot, compute, cancel everything, reinstall.
///
/// The cancel/install pair is not atomic. An interruption in between leaves
/// zero scheduled reminders until the next pass, which is the accepted
/// failure mode; racing passes are the caller's problem (last writer wins).
pub fn run_scheduling_pass<S, P, R>(
    source: &S,
    port: &mut P,
    tz: Tz,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<PassOutcome>
where
    S: PersonSource,
    P: SchedulingPort,
    R: Rng,
{
    let people = source.people()?;
    let settings = source.settings()?;
    let intents = build_notification_intents(&people, &settings, tz, now, rng);

    port.cancel_all()?;
    let mut handles = Vec::with_capacity(intents.len());
    for intent in &intents {
        handles.push(port.schedule(intent)?);
    }

    Ok(PassOutcome { intents, handles })
}
