//! Streak persistence as primitive key/value pairs.
//!
//! Each field is stored as its own string: integers in decimal, the date as
//! `YYYY-MM-DD` (empty before the first check-in), booleans as `true`/`false`.
//! A value that cannot be parsed is treated as absent so a corrupt entry
//! never blocks the app.

use chrono::NaiveDate;
use tracing::warn;

use super::tracker::StreakRecord;
use crate::error::Result;
use crate::storage::Database;

const KEY_STREAK: &str = "KICKUP_STREAK";
const KEY_LAST_LOGIN: &str = "KICKUP_LAST_LOGIN";
const KEY_FREEZE_COUNT: &str = "KICKUP_FREEZE_COUNT";
const KEY_FREEZE_ACTIVE: &str = "KICKUP_FREEZE_ACTIVE";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Loads and saves a [`StreakRecord`] through the kv table.
pub struct StreakStore<'a> {
    db: &'a Database,
}

impl<'a> StreakStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Read the stored record; missing or unreadable fields take defaults.
    pub fn load(&self) -> Result<StreakRecord> {
        Ok(StreakRecord {
            current_streak: self.read(KEY_STREAK, |v| v.parse().ok())?.unwrap_or(0),
            last_check_in: self.read(KEY_LAST_LOGIN, |v| {
                NaiveDate::parse_from_str(v, DATE_FORMAT).ok()
            })?,
            freeze_inventory: self.read(KEY_FREEZE_COUNT, |v| v.parse().ok())?.unwrap_or(0),
            freeze_armed: self
                .read(KEY_FREEZE_ACTIVE, |v| v.parse().ok())?
                .unwrap_or(false),
        })
    }

    /// Write every field in one transaction.
    pub fn save(&self, record: &StreakRecord) -> Result<()> {
        let last_login = record
            .last_check_in
            .map(|date| date.format(DATE_FORMAT).to_string())
            .unwrap_or_default();
        self.db.kv_set_many(&[
            (KEY_STREAK, record.current_streak.to_string()),
            (KEY_LAST_LOGIN, last_login),
            (KEY_FREEZE_COUNT, record.freeze_inventory.to_string()),
            (KEY_FREEZE_ACTIVE, record.freeze_armed.to_string()),
        ])
    }

    fn read<T>(&self, key: &str, parse: impl FnOnce(&str) -> Option<T>) -> Result<Option<T>> {
        let Some(raw) = self.db.kv_get(key)? else {
            return Ok(None);
        };
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        let parsed = parse(raw);
        if parsed.is_none() {
            warn!(key, value = %raw, "unreadable streak value; using default");
        }
        Ok(parsed)
    }
}
