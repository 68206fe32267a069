//! File-backed scheduling port: `scheduled.json` stands in for the device
//! notification queue, with the same cancel-all-then-reinstall contract.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use tend_core::{NotificationIntent, SchedulingPort};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledNotification {
    pub handle: String,
    #[serde(flatten)]
    pub intent: NotificationIntent,
}

#[derive(Debug)]
pub struct FileSchedulingPort {
    path: PathBuf,
    queue: Vec<ScheduledNotification>,
}

impl FileSchedulingPort {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let queue = if path.exists() {
            let s = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
            serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))?
        } else {
            Vec::new()
        };
        Ok(Self { path, queue })
    }

    pub fn scheduled(&self) -> &[ScheduledNotification] {
        &self.queue
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.queue)?;
        fs::write(&self.path, json).with_context(|| format!("write {}", self.path.display()))?;
        Ok(())
    }
}

impl SchedulingPort for FileSchedulingPort {
    fn cancel_all(&mut self) -> Result<()> {
        debug!(cancelled = self.queue.len(), "clearing scheduled notifications");
        self.queue.clear();
        self.persist()
    }

    fn schedule(&mut self, intent: &NotificationIntent) -> Result<String> {
        let handle = format!("ntf-{}", self.queue.len() + 1);
        self.queue.push(ScheduledNotification {
            handle: handle.clone(),
            intent: intent.clone(),
        });
        self.persist()?;
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tend-notify-{tag}-{}.json", std::process::id()))
    }

    fn intent(title: &str) -> NotificationIntent {
        NotificationIntent {
            fire_at: Utc.with_ymd_and_hms(2026, 3, 3, 9, 0, 0).unwrap(),
            title: title.to_string(),
            body: "body".to_string(),
            correlation_id: Some("p1".to_string()),
        }
    }

    #[test]
    fn schedule_and_cancel_round_trip_through_disk() {
        let path = temp_path("roundtrip");
        let _ = fs::remove_file(&path);

        let mut port = FileSchedulingPort::open(&path).unwrap();
        port.cancel_all().unwrap();
        let h1 = port.schedule(&intent("one")).unwrap();
        let h2 = port.schedule(&intent("two")).unwrap();
        assert_ne!(h1, h2);

        // A fresh open sees the persisted queue.
        let reopened = FileSchedulingPort::open(&path).unwrap();
        assert_eq!(reopened.scheduled().len(), 2);
        assert_eq!(reopened.scheduled()[0].intent.title, "one");

        let mut reopened = reopened;
        reopened.cancel_all().unwrap();
        assert!(FileSchedulingPort::open(&path).unwrap().scheduled().is_empty());
    }
}
