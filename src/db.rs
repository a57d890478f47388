use std::path::Path;

use rusqlite::{Connection, OptionalExtension};
use serde_json::Value;

use crate::error::Result;
use crate::models::{Record, Settings};
use crate::state::AppState;

pub const DB_FILE: &str = "spendlog.db";
pub const DATA_KEY: &str = "sft:data:v3";
pub const SETTINGS_KEY: &str = "sft:settings:v3";

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT DEFAULT (datetime('now'))
);
";

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

pub fn get_item(conn: &Connection, key: &str) -> Result<Option<String>> {
    let value = conn
        .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
        .optional()?;
    Ok(value)
}

pub fn set_item(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, datetime('now')) \
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        rusqlite::params![key, value],
    )?;
    Ok(())
}

/// Key-value store holding the record collection and settings as JSON.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (creating if needed) the store inside `data_dir`.
    pub fn open(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;
        let conn = get_connection(&data_dir.join(DB_FILE))?;
        init_db(&conn)?;
        log::debug!("opened store in {}", data_dir.display());
        Ok(Self { conn })
    }

    /// Missing data, or a value that is not a JSON array, loads as an empty
    /// collection. Unreadable elements inside the array are skipped one by one.
    pub fn load_records(&self) -> Result<Vec<Record>> {
        let Some(raw) = get_item(&self.conn, DATA_KEY)? else {
            return Ok(Vec::new());
        };
        let items: Vec<Value> = match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                log::warn!("stored records under {DATA_KEY} are unreadable, starting empty: {e}");
                return Ok(Vec::new());
            }
        };
        let mut records = Vec::with_capacity(items.len());
        for (i, item) in items.into_iter().enumerate() {
            match serde_json::from_value::<Record>(item) {
                Ok(rec) => records.push(rec),
                Err(e) => log::warn!("skipping unreadable stored record #{}: {e}", i + 1),
            }
        }
        Ok(records)
    }

    /// Unreadable or missing settings load as defaults.
    pub fn load_settings(&self) -> Result<Settings> {
        let Some(raw) = get_item(&self.conn, SETTINGS_KEY)? else {
            return Ok(Settings::default());
        };
        match serde_json::from_str(&raw) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                log::warn!("stored settings under {SETTINGS_KEY} are unreadable, using defaults: {e}");
                Ok(Settings::default())
            }
        }
    }

    pub fn load(&self) -> Result<AppState> {
        Ok(AppState::new(self.load_records()?, self.load_settings()?))
    }

    /// The only write path: every mutation, imports included, ends here.
    pub fn save(&self, state: &AppState) -> Result<()> {
        let records = serde_json::to_string(&state.records)?;
        let settings = serde_json::to_string(&state.settings)?;
        let tx = self.conn.unchecked_transaction()?;
        set_item(&tx, DATA_KEY, &records)?;
        set_item(&tx, SETTINGS_KEY, &settings)?;
        tx.commit()?;
        log::debug!("saved {} record(s) and settings", state.records.len());
        Ok(())
    }

    #[cfg(test)]
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::RecordFields;

    fn test_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_init_db_is_idempotent() {
        let (_dir, store) = test_store();
        init_db(store.connection()).unwrap();
    }

    #[test]
    fn test_get_set_item() {
        let (_dir, store) = test_store();
        let conn = store.connection();
        assert_eq!(get_item(conn, "k").unwrap(), None);
        set_item(conn, "k", "one").unwrap();
        set_item(conn, "k", "two").unwrap();
        assert_eq!(get_item(conn, "k").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn test_empty_store_loads_defaults() {
        let (_dir, store) = test_store();
        let state = store.load().unwrap();
        assert!(state.records.is_empty());
        assert_eq!(state.settings, Settings::default());
    }

    #[test]
    fn test_corrupt_values_fall_back() {
        let (_dir, store) = test_store();
        set_item(store.connection(), DATA_KEY, "{not json").unwrap();
        set_item(store.connection(), SETTINGS_KEY, "42").unwrap();
        assert!(store.load_records().unwrap().is_empty());
        assert_eq!(store.load_settings().unwrap(), Settings::default());
    }

    #[test]
    fn test_one_bad_stored_record_does_not_drop_the_rest() {
        let (_dir, store) = test_store();
        let good = r#"{"id":"rec_0001","description":"Tea","amount":5,"category":"Food",
            "date":"2025-09-01","createdAt":"x","updatedAt":"x"}"#;
        let bad = r#"{"id":"rec_0002","description":"Yacht","amount":null,"category":"Fun",
            "date":"2025-09-01","createdAt":"x","updatedAt":"x"}"#;
        set_item(store.connection(), DATA_KEY, &format!("[{bad},{good}]")).unwrap();
        let records = store.load_records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "rec_0001");
    }

    #[test]
    fn test_huge_amount_never_reaches_the_store() {
        let (dir, store) = test_store();
        let mut state = store.load().unwrap();
        let mut fields = RecordFields {
            description: Some("Tea".into()),
            amount: Some("5".into()),
            category: Some("Food".into()),
            date: Some("2025-09-01".into()),
            receipt_url: None,
        };
        state.add_record(&fields).unwrap();
        fields.description = Some("Yacht".into());
        fields.amount = Some("9".repeat(400));
        assert!(state.add_record(&fields).is_err());
        store.save(&state).unwrap();
        drop(store);

        let loaded = Store::open(dir.path()).unwrap().load().unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.records[0].amount, 5.0);
    }

    #[test]
    fn test_save_and_reload() {
        let (dir, store) = test_store();
        let mut state = store.load().unwrap();
        state
            .add_record(&RecordFields {
                description: Some("Lunch".into()),
                amount: Some("12.50".into()),
                category: Some("Food".into()),
                date: Some("2025-09-29".into()),
                receipt_url: None,
            })
            .unwrap();
        state.settings.cap = Some(500.0);
        store.save(&state).unwrap();
        drop(store);

        let reopened = Store::open(dir.path()).unwrap();
        let loaded = reopened.load().unwrap();
        assert_eq!(loaded.records, state.records);
        assert_eq!(loaded.settings.cap, Some(500.0));
    }
}
