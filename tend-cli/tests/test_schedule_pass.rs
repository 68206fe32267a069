//! Full scheduling pass through the file-backed ports: store snapshot in,
//! scheduled.json out, idempotent under re-run.

use chrono::{Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

use tend_core::{run_scheduling_pass, AppSettings, ContactFrequency, Person};

// The binary crate isn't linkable from integration tests, so the port and
// store modules are included directly.
#[path = "../src/store.rs"]
mod store;
#[path = "../src/notify.rs"]
mod notify;

use notify::FileSchedulingPort;
use store::Store;

fn temp_root(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tend-it-{tag}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn pass_installs_decay_and_weekly_from_store_snapshot() {
    let store = Store::at(temp_root("pass")).unwrap();
    let now = Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap();
    let created = now - Duration::days(100);

    let people = vec![
        Person::new("a", "Asha", ContactFrequency::Weekly, created)
            .with_last_contact(now - Duration::days(20)),
        Person::new("b", "Ben", ContactFrequency::Monthly, created)
            .with_last_contact(now - Duration::days(40)),
        Person::new("c", "Cal", ContactFrequency::Quarterly, created).with_last_contact(now),
    ];
    store.save_people(&people).unwrap();

    let mut settings = AppSettings::default();
    settings.date_reminders = None;
    store.save_settings(&settings).unwrap();

    let tz = "UTC".parse().unwrap();
    let mut port = FileSchedulingPort::open(store.scheduled_path()).unwrap();
    let outcome =
        run_scheduling_pass(&store, &mut port, tz, now, &mut StdRng::seed_from_u64(11)).unwrap();

    // Two people need attention: one decay nudge for the most urgent plus a
    // weekly summary.
    assert_eq!(outcome.intents.len(), 2);
    assert_eq!(outcome.intents[0].correlation_id.as_deref(), Some("a"));
    assert!(outcome.intents[1].body.contains("2 relationships"));

    // The queue survives on disk and a re-run replaces it wholesale.
    let on_disk = FileSchedulingPort::open(store.scheduled_path()).unwrap();
    assert_eq!(on_disk.scheduled().len(), 2);

    let again =
        run_scheduling_pass(&store, &mut port, tz, now, &mut StdRng::seed_from_u64(11)).unwrap();
    assert_eq!(again.intents, outcome.intents);
    assert_eq!(
        FileSchedulingPort::open(store.scheduled_path()).unwrap().scheduled().len(),
        2
    );
}

#[test]
fn pass_with_date_reminders_includes_day_of_intent() {
    let store = Store::at(temp_root("dates")).unwrap();
    let now = Utc.with_ymd_and_hms(2026, 6, 15, 8, 0, 0).unwrap();
    let created = now - Duration::days(100);

    store
        .save_people(&[Person::new("m", "Maya", ContactFrequency::Monthly, created)
            .with_last_contact(now)
            .with_birthday("06/15")])
        .unwrap();
    store.save_settings(&AppSettings::default()).unwrap();

    let tz = "UTC".parse().unwrap();
    let mut port = FileSchedulingPort::open(store.scheduled_path()).unwrap();
    let outcome =
        run_scheduling_pass(&store, &mut port, tz, now, &mut StdRng::seed_from_u64(0)).unwrap();

    assert_eq!(outcome.intents.len(), 1);
    assert!(outcome.intents[0].body.contains("Maya's birthday"));
    assert_eq!(
        outcome.intents[0].fire_at,
        Utc.with_ymd_and_hms(2026, 6, 15, 9, 0, 0).unwrap()
    );
}
