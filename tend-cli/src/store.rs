//! File-backed persistence for people and settings under ~/.tend.
//!
//! People live in `people.json`, settings in `settings.toml`. The core only
//! ever sees read-only snapshots through the `PersonSource` trait.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};

use tend_core::{AppSettings, Person, PersonSource};

const PEOPLE_FILE: &str = "people.json";
const SETTINGS_FILE: &str = "settings.toml";
const SCHEDULED_FILE: &str = "scheduled.json";

pub fn tend_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".tend"))
}

#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Open (creating if needed) the default store at ~/.tend.
    pub fn open_default() -> Result<Self> {
        Self::at(tend_home()?)
    }

    pub fn at(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).with_context(|| format!("create {}", root.display()))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn scheduled_path(&self) -> PathBuf {
        self.root.join(SCHEDULED_FILE)
    }

    fn people_path(&self) -> PathBuf {
        self.root.join(PEOPLE_FILE)
    }

    fn settings_path(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE)
    }

    pub fn load_people(&self) -> Result<Vec<Person>> {
        let p = self.people_path();
        if !p.exists() {
            return Ok(Vec::new());
        }
        let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
        serde_json::from_str(&s).with_context(|| format!("parse {}", p.display()))
    }

    pub fn save_people(&self, people: &[Person]) -> Result<()> {
        let p = self.people_path();
        let json = serde_json::to_string_pretty(people)?;
        fs::write(&p, json).with_context(|| format!("write {}", p.display()))?;
        Ok(())
    }

    pub fn load_settings(&self) -> Result<AppSettings> {
        let p = self.settings_path();
        if !p.exists() {
            return Ok(AppSettings::default());
        }
        let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
        toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
    }

    pub fn save_settings(&self, settings: &AppSettings) -> Result<()> {
        let p = self.settings_path();
        let s = toml::to_string_pretty(settings).context("serialize settings")?;
        fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
        Ok(())
    }

    /// Case-insensitive lookup by name or exact id.
    pub fn find_person<'a>(people: &'a mut [Person], key: &str) -> Result<&'a mut Person> {
        let lowered = key.to_lowercase();
        match people
            .iter_mut()
            .find(|p| p.id == key || p.name.to_lowercase() == lowered)
        {
            Some(p) => Ok(p),
            None => bail!("no person matching '{key}' (try `tend list`)"),
        }
    }
}

impl PersonSource for Store {
    fn people(&self) -> Result<Vec<Person>> {
        self.load_people()
    }

    fn settings(&self) -> Result<AppSettings> {
        self.load_settings()
    }
}

/// Timestamp-plus-entropy ids in the shape the app has always used.
pub fn generate_id(now: DateTime<Utc>, rng: &mut impl Rng) -> String {
    format!("{:x}-{:04x}", now.timestamp_millis(), rng.gen_range(0..=u16::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tend_core::ContactFrequency;

    fn temp_store(tag: &str) -> Store {
        let dir = std::env::temp_dir().join(format!("tend-store-{tag}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        Store::at(dir).unwrap()
    }

    #[test]
    fn empty_store_yields_no_people_and_default_settings() {
        let store = temp_store("empty");
        assert!(store.load_people().unwrap().is_empty());
        assert_eq!(store.load_settings().unwrap(), AppSettings::default());
    }

    #[test]
    fn people_and_settings_round_trip() {
        let store = temp_store("roundtrip");
        let created = Utc.with_ymd_and_hms(2026, 1, 10, 9, 0, 0).unwrap();
        let people = vec![
            Person::new("p1", "Maya", ContactFrequency::Weekly, created).with_birthday("06/15"),
        ];
        store.save_people(&people).unwrap();
        assert_eq!(store.load_people().unwrap(), people);

        let mut settings = AppSettings::default();
        settings.notifications.quiet_days = vec![0, 6];
        store.save_settings(&settings).unwrap();
        assert_eq!(store.load_settings().unwrap(), settings);
    }

    #[test]
    fn find_person_matches_name_case_insensitively() {
        let created = Utc.with_ymd_and_hms(2026, 1, 10, 9, 0, 0).unwrap();
        let mut people = vec![Person::new("p1", "Maya", ContactFrequency::Weekly, created)];
        assert_eq!(Store::find_person(&mut people, "maya").unwrap().id, "p1");
        assert_eq!(Store::find_person(&mut people, "p1").unwrap().id, "p1");
        assert!(Store::find_person(&mut people, "nobody").is_err());
    }

    #[test]
    fn generated_ids_carry_timestamp_prefix_and_entropy_suffix() {
        let now = Utc.with_ymd_and_hms(2026, 1, 10, 9, 0, 0).unwrap();
        let id = generate_id(now, &mut StdRng::seed_from_u64(1));
        let prefix = format!("{:x}-", now.timestamp_millis());
        assert!(id.starts_with(&prefix));

        let suffix = &id[prefix.len()..];
        assert_eq!(suffix.len(), 4);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
