use anyhow::{bail, Result};
use chrono::Utc;
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use rand::thread_rng;
use tracing::info;

mod notify;
mod store;
mod validation;

use notify::FileSchedulingPort;
use store::{generate_id, Store};
use tend_core::{
    build_notification_intents, collect_upcoming_dates, days_until_due, format_relative,
    health_status, run_scheduling_pass, signal_percentage, sort_by_urgency, ContactFrequency,
    Interaction, InteractionType, Note, Person, RelationshipType,
};

#[derive(Parser, Debug)]
#[command(name = "tend", version, about = "Tend: keep your relationships from drifting")]
struct Cli {
    /// IANA timezone used for reminder fire times
    #[arg(long, default_value = "America/Chicago")]
    timezone: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a person to the garden
    Add {
        name: String,

        /// daily | weekly | fortnightly | monthly | quarterly
        #[arg(long, default_value = "monthly")]
        frequency: String,

        /// friend | family | partner | other
        #[arg(long, default_value = "friend")]
        relationship: String,

        /// Recurring birthday, MM/DD
        #[arg(long)]
        birthday: Option<String>,

        /// Recurring anniversary, MM/DD
        #[arg(long)]
        anniversary: Option<String>,
    },

    /// Log an interaction and reset the contact clock
    Contact {
        /// Person name or id
        name: String,

        /// text | call | in-person | date-night
        #[arg(long, default_value = "text")]
        kind: String,

        #[arg(long)]
        note: Option<String>,
    },

    /// Attach a free-form note (reminders may surface it as a conversation hint)
    Note {
        /// Person name or id
        name: String,
        content: String,
    },

    /// Show the garden, most urgent first
    List,

    /// Show upcoming birthdays and anniversaries
    Dates,

    /// Recompute and reinstall all scheduled reminders
    Schedule {
        /// Print the intents without touching the scheduled queue
        #[arg(long)]
        dry_run: bool,
    },

    /// Show or change reminder settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum SettingsCommand {
    Show,
    Set {
        #[arg(long)]
        enabled: Option<bool>,

        /// "HH:MM" 24-hour local time
        #[arg(long)]
        preferred_time: Option<String>,

        /// Comma-separated weekday indices, 0=Sunday..6=Saturday (empty clears)
        #[arg(long)]
        quiet_days: Option<String>,

        #[arg(long)]
        early_warning: Option<bool>,

        #[arg(long)]
        early_warning_days: Option<i64>,

        #[arg(long)]
        on_the_day: Option<bool>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let tz: Tz = cli
        .timezone
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {}", cli.timezone))?;
    let store = Store::open_default()?;

    match cli.command {
        Command::Add {
            name,
            frequency,
            relationship,
            birthday,
            anniversary,
        } => add_person(&store, name, frequency, relationship, birthday, anniversary),
        Command::Contact { name, kind, note } => log_contact(&store, &name, &kind, note),
        Command::Note { name, content } => add_note(&store, &name, content),
        Command::List => list_garden(&store),
        Command::Dates => list_dates(&store, tz),
        Command::Schedule { dry_run } => schedule(&store, tz, dry_run),
        Command::Settings { command } => match command {
            SettingsCommand::Show => show_settings(&store),
            SettingsCommand::Set {
                enabled,
                preferred_time,
                quiet_days,
                early_warning,
                early_warning_days,
                on_the_day,
            } => set_settings(
                &store,
                enabled,
                preferred_time,
                quiet_days,
                early_warning,
                early_warning_days,
                on_the_day,
            ),
        },
    }
}

fn parse_frequency(s: &str) -> Result<ContactFrequency> {
    Ok(match s {
        "daily" => ContactFrequency::Daily,
        "weekly" => ContactFrequency::Weekly,
        "fortnightly" => ContactFrequency::Fortnightly,
        "monthly" => ContactFrequency::Monthly,
        "quarterly" => ContactFrequency::Quarterly,
        other => bail!("unknown frequency '{other}' (daily|weekly|fortnightly|monthly|quarterly)"),
    })
}

fn parse_relationship(s: &str) -> Result<RelationshipType> {
    Ok(match s {
        "friend" => RelationshipType::Friend,
        "family" => RelationshipType::Family,
        "partner" => RelationshipType::Partner,
        "other" => RelationshipType::Other,
        other => bail!("unknown relationship '{other}' (friend|family|partner|other)"),
    })
}

fn parse_interaction(s: &str) -> Result<InteractionType> {
    Ok(match s {
        "text" => InteractionType::Text,
        "call" => InteractionType::Call,
        "in-person" => InteractionType::InPerson,
        "date-night" => InteractionType::DateNight,
        other => bail!("unknown interaction '{other}' (text|call|in-person|date-night)"),
    })
}

fn add_person(
    store: &Store,
    name: String,
    frequency: String,
    relationship: String,
    birthday: Option<String>,
    anniversary: Option<String>,
) -> Result<()> {
    for date in [&birthday, &anniversary].into_iter().flatten() {
        if !validation::valid_month_day(date) {
            bail!("'{date}' is not a valid MM/DD date");
        }
    }

    let now = Utc::now();
    let mut people = store.load_people()?;
    let mut person = Person::new(generate_id(now, &mut thread_rng()), name, parse_frequency(&frequency)?, now)
        .with_relationship(parse_relationship(&relationship)?);
    person.birthday = birthday;
    person.anniversary = anniversary;

    println!(
        "Added {} ({}, {})",
        person.name,
        person.relationship.label(),
        person.frequency.label()
    );
    people.push(person);
    store.save_people(&people)?;
    Ok(())
}

fn log_contact(store: &Store, name: &str, kind: &str, note: Option<String>) -> Result<()> {
    let kind = parse_interaction(kind)?;
    let now = Utc::now();
    let mut people = store.load_people()?;

    let person = Store::find_person(&mut people, name)?;
    person.last_contact_date = Some(now);
    person.interactions.push(Interaction {
        id: generate_id(now, &mut thread_rng()),
        kind,
        date: now,
        note,
    });
    println!("Logged {} with {}", kind.label(), person.name);

    store.save_people(&people)?;
    Ok(())
}

fn add_note(store: &Store, name: &str, content: String) -> Result<()> {
    let now = Utc::now();
    let mut people = store.load_people()?;

    let person = Store::find_person(&mut people, name)?;
    person.notes.push(Note {
        id: generate_id(now, &mut thread_rng()),
        content,
        created_at: now,
    });
    println!("Noted for {}", person.name);

    store.save_people(&people)?;
    Ok(())
}

fn list_garden(store: &Store) -> Result<()> {
    let people = store.load_people()?;
    if people.is_empty() {
        println!("Your garden is empty. Plant someone: tend add <name>");
        return Ok(());
    }

    let now = Utc::now();
    for person in sort_by_urgency(&people, now) {
        let status = health_status(&person, now);
        let last = match person.last_contact_date {
            Some(d) => format_relative(d, now),
            None => "Never".to_string(),
        };
        println!(
            "[{:>8}] {:<20} {:>3.0}% | {} | every {} | last contact: {}",
            status.label(),
            person.name,
            signal_percentage(&person, now),
            format_due(days_until_due(&person, now)),
            person.frequency.label().to_lowercase(),
            last,
        );
    }
    Ok(())
}

fn format_due(days: i64) -> String {
    if days < 0 {
        format!("{} days over", -days)
    } else {
        format!("due in {days} days")
    }
}

fn list_dates(store: &Store, tz: Tz) -> Result<()> {
    let people = store.load_people()?;
    let settings = store.load_settings()?;
    let window = settings
        .date_reminders
        .map(|d| d.early_warning_days.max(30))
        .unwrap_or(30);

    let today = tend_core::local_today(Utc::now(), tz);
    let events = collect_upcoming_dates(&people, window, today);
    if events.is_empty() {
        println!("No birthdays or anniversaries in the next {window} days.");
        return Ok(());
    }

    println!("Upcoming (next {window} days):\n");
    for event in events {
        let when = match event.days_until {
            0 => "today!".to_string(),
            1 => "tomorrow".to_string(),
            n => format!("in {n} days"),
        };
        println!("  {} | {} ({})", event.date.format("%b %d"), event.label, when);
    }
    Ok(())
}

fn schedule(store: &Store, tz: Tz, dry_run: bool) -> Result<()> {
    let now = Utc::now();

    if dry_run {
        let people = store.load_people()?;
        let settings = store.load_settings()?;
        let intents = build_notification_intents(&people, &settings, tz, now, &mut thread_rng());
        print_intents(&intents, tz);
        return Ok(());
    }

    let mut port = FileSchedulingPort::open(store.scheduled_path())?;
    let outcome = run_scheduling_pass(store, &mut port, tz, now, &mut thread_rng())?;
    info!(installed = outcome.intents.len(), "scheduling pass complete");
    print_intents(&outcome.intents, tz);
    println!(
        "\nInstalled {} reminder(s) -> {}",
        outcome.intents.len(),
        store.scheduled_path().display()
    );
    Ok(())
}

fn print_intents(intents: &[tend_core::NotificationIntent], tz: Tz) {
    if intents.is_empty() {
        println!("Nothing to remind about. The garden is tended.");
        return;
    }
    for intent in intents {
        println!(
            "{} | {} | {}",
            intent.fire_at.with_timezone(&tz).format("%Y-%m-%d %H:%M %Z"),
            intent.title,
            intent.body
        );
    }
}

fn show_settings(store: &Store) -> Result<()> {
    let settings = store.load_settings()?;
    print!("{}", toml::to_string_pretty(&settings)?);
    Ok(())
}

fn set_settings(
    store: &Store,
    enabled: Option<bool>,
    preferred_time: Option<String>,
    quiet_days: Option<String>,
    early_warning: Option<bool>,
    early_warning_days: Option<i64>,
    on_the_day: Option<bool>,
) -> Result<()> {
    let mut settings = store.load_settings()?;

    if let Some(enabled) = enabled {
        settings.notifications.enabled = enabled;
    }
    if let Some(time) = preferred_time {
        if !validation::valid_time_of_day(&time) {
            bail!("'{time}' is not a valid HH:MM time");
        }
        settings.notifications.preferred_time = time;
    }
    if let Some(days) = quiet_days {
        let mut parsed = Vec::new();
        for part in days.split(',').filter(|p| !p.trim().is_empty()) {
            let day: u8 = part
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("'{part}' is not a weekday index"))?;
            if !validation::valid_quiet_day(day) {
                bail!("quiet day {day} out of range (0=Sunday..6=Saturday)");
            }
            parsed.push(day);
        }
        settings.notifications.quiet_days = parsed;
    }

    if early_warning.is_some() || early_warning_days.is_some() || on_the_day.is_some() {
        let date_settings = settings.date_reminders.get_or_insert_with(Default::default);
        if let Some(on) = early_warning {
            date_settings.early_warning_enabled = on;
        }
        if let Some(days) = early_warning_days {
            if !validation::valid_early_warning_days(days) {
                bail!("early warning needs at least 1 day of lead");
            }
            date_settings.early_warning_days = days;
        }
        if let Some(on) = on_the_day {
            date_settings.on_the_day_enabled = on;
        }
    }

    store.save_settings(&settings)?;
    show_settings(store)
}
