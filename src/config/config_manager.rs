// ==========================================
// League Availability - Config manager
// ==========================================
// Responsibility: typed reads of global settings with defaults
// Storage: config_kv table (key-value + scope)
// ==========================================

use crate::config::availability_config_trait::AvailabilityConfigReader;
use rusqlite::{params, Connection};
use std::error::Error;
use std::sync::{Arc, Mutex};

// ==========================================
// ConfigManager
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// Share an existing connection.
    ///
    /// The shared PRAGMAs are re-applied (idempotent).
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("lock poisoned: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// Read one value from config_kv (scope_id='global').
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("lock poisoned: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// Upsert one global value.
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("lock poisoned: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value, updated_at)
             VALUES ('global', ?1, ?2, datetime('now'))
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    /// Parse a stored value, falling back to `default` when it is
    /// missing or malformed.
    fn get_parsed_or_default<T>(&self, key: &str, default: T) -> Result<T, Box<dyn Error>>
    where
        T: std::str::FromStr + Copy + std::fmt::Display,
    {
        let Some(raw) = self.get_config_value(key)? else {
            return Ok(default);
        };
        match raw.trim().parse::<T>() {
            Ok(value) => Ok(value),
            Err(_) => {
                tracing::warn!(
                    config_key = key,
                    raw_value = %raw,
                    default = %default,
                    "malformed config value, using default"
                );
                Ok(default)
            }
        }
    }
}

// ==========================================
// AvailabilityConfigReader implementation
// ==========================================
impl AvailabilityConfigReader for ConfigManager {
    fn get_query_timeout_ms(&self) -> Result<u64, Box<dyn Error>> {
        self.get_parsed_or_default(config_keys::QUERY_TIMEOUT_MS, defaults::QUERY_TIMEOUT_MS)
    }

    fn get_calendar_window_days(&self) -> Result<u32, Box<dyn Error>> {
        self.get_parsed_or_default(
            config_keys::CALENDAR_WINDOW_DAYS,
            defaults::CALENDAR_WINDOW_DAYS,
        )
    }

    fn get_max_batch_size(&self) -> Result<usize, Box<dyn Error>> {
        self.get_parsed_or_default(config_keys::MAX_BATCH_SIZE, defaults::MAX_BATCH_SIZE)
    }
}

// ==========================================
// Config keys
// ==========================================
pub mod config_keys {
    pub const QUERY_TIMEOUT_MS: &str = "availability.query_timeout_ms";
    pub const CALENDAR_WINDOW_DAYS: &str = "availability.calendar_window_days";
    pub const MAX_BATCH_SIZE: &str = "availability.max_batch_size";
}

pub mod defaults {
    pub const QUERY_TIMEOUT_MS: u64 = 5_000;
    pub const CALENDAR_WINDOW_DAYS: u32 = 28;
    pub const MAX_BATCH_SIZE: usize = 366;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> ConfigManager {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::ensure_schema(&conn).unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    #[test]
    fn test_defaults_when_unset() {
        let cm = manager();
        assert_eq!(cm.get_query_timeout_ms().unwrap(), 5_000);
        assert_eq!(cm.get_calendar_window_days().unwrap(), 28);
        assert_eq!(cm.get_max_batch_size().unwrap(), 366);
    }

    #[test]
    fn test_override_and_malformed_value() {
        let cm = manager();
        cm.set_global_config_value(config_keys::CALENDAR_WINDOW_DAYS, "14")
            .unwrap();
        assert_eq!(cm.get_calendar_window_days().unwrap(), 14);

        cm.set_global_config_value(config_keys::MAX_BATCH_SIZE, "lots")
            .unwrap();
        assert_eq!(cm.get_max_batch_size().unwrap(), 366);
    }
}
