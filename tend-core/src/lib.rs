//! tend-core: relationship health and reminder-scheduling engine for Tend.
//!
//! Pure decision logic only: given an immutable snapshot of people and
//! settings plus an explicit `now`, the core answers what each relationship's
//! state is, who needs attention in what order, and which notifications
//! should exist. Persistence and delivery live behind the `PersonSource` and
//! `SchedulingPort` traits.

pub mod dates;
pub mod engine;
pub mod health;
pub mod messages;
pub mod person;
pub mod settings;
pub mod time;

pub use dates::{collect_upcoming_dates, DateKind, UpcomingDate};
pub use engine::{
    build_notification_intents, run_scheduling_pass, NotificationIntent, PassOutcome,
    PersonSource, SchedulingPort,
};
pub use health::{
    days_since_contact, days_until_due, health_status, signal_percentage, sort_by_urgency,
    HealthStatus,
};
pub use messages::{message_pool, random_note, warm_message};
pub use person::{
    ContactFrequency, FamilyMember, Interaction, InteractionType, Note, Person, RelationshipType,
};
pub use settings::{AppSettings, DateReminderSettings, NotificationSettings};
pub use time::{
    days_between, format_relative, local_fire_time, local_today, next_occurrence,
    parse_month_day, parse_time_of_day, NextOccurrence,
};
