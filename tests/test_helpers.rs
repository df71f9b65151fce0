// ==========================================
// Test helpers
// ==========================================
// Temporary database files, schema bootstrap and seeding of the
// league tables (owned by other subsystems, so tests write them
// directly).
// ==========================================

#![allow(dead_code)]

use league_availability::api::AvailabilityApi;
use league_availability::app::AppState;
use league_availability::db::{configure_sqlite_connection, ensure_schema};
use rusqlite::{params, Connection};
use std::error::Error;
use tempfile::NamedTempFile;
use uuid::Uuid;

/// Create a temporary database file with the schema applied.
///
/// # Returns
/// - NamedTempFile: keep alive for the duration of the test
/// - String: database path
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = Connection::open(&db_path)?;
    configure_sqlite_connection(&conn)?;
    ensure_schema(&conn)?;

    Ok((temp_file, db_path))
}

pub fn open_seed_connection(db_path: &str) -> Result<Connection, Box<dyn Error>> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

// ==========================================
// League seeding
// ==========================================

pub fn insert_season(conn: &Connection, name: &str) -> Result<i64, Box<dyn Error>> {
    conn.execute(
        "INSERT INTO seasons (name, is_active) VALUES (?1, 1)",
        params![name],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_division(conn: &Connection, season_id: i64, name: &str) -> Result<i64, Box<dyn Error>> {
    conn.execute(
        "INSERT INTO divisions (season_id, name) VALUES (?1, ?2)",
        params![season_id, name],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_team(
    conn: &Connection,
    division_id: i64,
    season_id: i64,
    name: &str,
) -> Result<i64, Box<dyn Error>> {
    conn.execute(
        "INSERT INTO teams (division_id, season_id, name) VALUES (?1, ?2, ?3)",
        params![division_id, season_id, name],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert a player and return its UUID.
pub fn insert_player(conn: &Connection, first: &str, last: &str) -> Result<String, Box<dyn Error>> {
    let id = Uuid::new_v4().to_string();
    conn.execute(
        "INSERT INTO players (id, first_name, last_name) VALUES (?1, ?2, ?3)",
        params![id, first, last],
    )?;
    Ok(id)
}

pub fn add_to_roster(
    conn: &Connection,
    player_id: &str,
    team_id: i64,
    season_id: i64,
    active: bool,
) -> Result<(), Box<dyn Error>> {
    conn.execute(
        "INSERT INTO player_teams (player_id, team_id, season_id, is_active) VALUES (?1, ?2, ?3, ?4)",
        params![player_id, team_id, season_id, active],
    )?;
    Ok(())
}

pub fn insert_fixture(
    conn: &Connection,
    season_id: i64,
    division_id: i64,
    home_team_id: i64,
    away_team_id: i64,
    scheduled_date: &str,
) -> Result<i64, Box<dyn Error>> {
    conn.execute(
        "INSERT INTO fixtures (season_id, division_id, home_team_id, away_team_id, scheduled_date)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![season_id, division_id, home_team_id, away_team_id, scheduled_date],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn count_rows(conn: &Connection, table: &str, player_id: &str) -> i64 {
    conn.query_row(
        &format!("SELECT COUNT(*) FROM {} WHERE player_id = ?1", table),
        [player_id],
        |row| row.get(0),
    )
    .unwrap()
}

// ==========================================
// Standard league: one season, one division, two teams, one
// fixture on Thursday 2025-06-12
// ==========================================

pub struct League {
    pub season_id: i64,
    pub division_id: i64,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub fixture_id: i64,
}

pub fn seed_league(conn: &Connection) -> Result<League, Box<dyn Error>> {
    let season_id = insert_season(conn, "Summer 2025")?;
    let division_id = insert_division(conn, season_id, "Division 1")?;
    let home_team_id = insert_team(conn, division_id, season_id, "Parks A")?;
    let away_team_id = insert_team(conn, division_id, season_id, "Riverside B")?;
    let fixture_id = insert_fixture(
        conn,
        season_id,
        division_id,
        home_team_id,
        away_team_id,
        "2025-06-12",
    )?;
    Ok(League {
        season_id,
        division_id,
        home_team_id,
        away_team_id,
        fixture_id,
    })
}

/// Temp database + seeded league + AppState wired over it.
pub struct TestEnv {
    _file: NamedTempFile,
    pub db_path: String,
    pub conn: Connection,
    pub state: AppState,
    pub league: League,
}

impl TestEnv {
    pub fn new() -> Self {
        let (file, db_path) = create_test_db().expect("create test db");
        let conn = open_seed_connection(&db_path).expect("open seed connection");
        let league = seed_league(&conn).expect("seed league");
        let state = AppState::new(db_path.clone()).expect("app state");
        Self {
            _file: file,
            db_path,
            conn,
            state,
            league,
        }
    }

    pub fn api(&self) -> &AvailabilityApi {
        &self.state.availability_api
    }

    pub fn player(&self, first: &str, last: &str) -> String {
        insert_player(&self.conn, first, last).expect("insert player")
    }
}

pub fn date(y: i32, m: u32, d: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
