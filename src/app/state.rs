// ==========================================
// League Availability - Application state
// ==========================================
// Responsibility: open the shared connection once and wire the
// repository, config and API on top of it.
// ==========================================

use rusqlite::Connection;
use std::sync::{Arc, Mutex};

use crate::api::AvailabilityApi;
use crate::config::ConfigManager;
use crate::repository::AvailabilityRepository;

/// Shared state handed to every caller of the engine.
pub struct AppState {
    /// Database path
    pub db_path: String,

    pub availability_api: Arc<AvailabilityApi>,

    pub config_manager: Arc<ConfigManager>,
}

impl AppState {
    /// Open (or create) the database at `db_path` and build the APIs.
    ///
    /// The schema is bootstrapped idempotently.
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!(db_path = %db_path, "initialising AppState");

        let mut conn = crate::db::open_sqlite_connection(&db_path)
            .map_err(|e| format!("cannot open database: {}", e))?;
        crate::perf::install_sqlite_tracing(&mut conn);
        crate::db::ensure_schema(&conn).map_err(|e| format!("schema bootstrap failed: {}", e))?;

        Self::from_connection(db_path, Arc::new(Mutex::new(conn)))
    }

    /// Wire the state over an already configured connection.
    pub fn from_connection(db_path: String, conn: Arc<Mutex<Connection>>) -> Result<Self, String> {
        let availability_repo = Arc::new(AvailabilityRepository::from_connection(conn.clone()));
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn)
                .map_err(|e| format!("config manager init failed: {}", e))?,
        );

        let availability_api = Arc::new(AvailabilityApi::new(
            availability_repo,
            config_manager.clone(),
        ));

        tracing::info!("AppState ready");
        Ok(Self {
            db_path,
            availability_api,
            config_manager,
        })
    }
}

/// Default database path.
///
/// 1. `LEAGUE_AVAILABILITY_DB_PATH` when set and non-empty
/// 2. `<data_dir>/league-availability/league_availability.db`
/// 3. `./league_availability.db`
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var("LEAGUE_AVAILABILITY_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./league_availability.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("league-availability");
        // best-effort: fall back to the working directory
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("league_availability.db");
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_default_db_path() {
        let path = get_default_db_path();
        assert!(!path.is_empty());
        assert!(path.ends_with(".db"));
    }

    #[test]
    fn test_app_state_bootstraps_schema() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("state.db").to_string_lossy().to_string();
        let state = AppState::new(db_path.clone()).unwrap();
        assert_eq!(state.db_path, db_path);

        let conn = Connection::open(&db_path).unwrap();
        assert_eq!(
            crate::db::read_schema_version(&conn).unwrap(),
            Some(crate::db::CURRENT_SCHEMA_VERSION)
        );
    }
}
