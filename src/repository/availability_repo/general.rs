// ==========================================
// General weekly pattern (player_general_availability)
// ==========================================
// Key: (player_id, day_of_week, season_id). Writing Clear deletes the row.
// ==========================================

use super::rows::{map_general, GENERAL_COLUMNS};
use super::{ensure_player_exists, ensure_season_exists, AvailabilityRepository};
use crate::domain::availability::GeneralAvailabilityPattern;
use crate::domain::types::{AvailabilityStatus, DayOfWeek, StatusInput};
use crate::repository::deadline::Deadline;
use crate::repository::error::RepositoryResult;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};

impl AvailabilityRepository {
    /// Upsert the weekly pattern for one (player, day, season).
    ///
    /// # Returns
    /// - `Ok(Some(row))`: stored row after the write
    /// - `Ok(None)`: `Clear` removed the row (or there was none)
    pub fn set_general(
        &self,
        player_id: &str,
        day: DayOfWeek,
        season_id: i64,
        status: StatusInput,
        notes: &str,
        deadline: &Deadline,
    ) -> RepositoryResult<Option<GeneralAvailabilityPattern>> {
        self.write_tx(deadline, |tx| {
            ensure_player_exists(tx, player_id)?;
            ensure_season_exists(tx, season_id)?;

            match status.stored_status() {
                Some(stored) => {
                    let row = upsert_general(tx, player_id, day, season_id, stored, notes, Utc::now())?;
                    Ok(Some(row))
                }
                None => {
                    delete_general(tx, player_id, day, season_id)?;
                    Ok(None)
                }
            }
        })
    }

    /// Weekly pattern of one player for one season, Monday first.
    pub fn list_general(
        &self,
        player_id: &str,
        season_id: i64,
        deadline: &Deadline,
    ) -> RepositoryResult<Vec<GeneralAvailabilityPattern>> {
        self.read_snapshot(deadline, |snapshot| {
            list_general_rows(snapshot.conn(), player_id, season_id)
        })
    }
}

pub(crate) fn find_general(
    conn: &Connection,
    player_id: &str,
    day: DayOfWeek,
    season_id: i64,
) -> RepositoryResult<Option<GeneralAvailabilityPattern>> {
    let sql = format!(
        "SELECT {GENERAL_COLUMNS} FROM player_general_availability
         WHERE player_id = ?1 AND day_of_week = ?2 AND season_id = ?3"
    );
    let row = conn
        .query_row(&sql, params![player_id, day.to_db_str(), season_id], map_general)
        .optional()?;
    Ok(row)
}

fn list_general_rows(
    conn: &Connection,
    player_id: &str,
    season_id: i64,
) -> RepositoryResult<Vec<GeneralAvailabilityPattern>> {
    let sql = format!(
        "SELECT {GENERAL_COLUMNS} FROM player_general_availability
         WHERE player_id = ?1 AND season_id = ?2
         ORDER BY CASE day_of_week
             WHEN 'Monday' THEN 1 WHEN 'Tuesday' THEN 2 WHEN 'Wednesday' THEN 3
             WHEN 'Thursday' THEN 4 WHEN 'Friday' THEN 5 WHEN 'Saturday' THEN 6
             ELSE 7 END"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![player_id, season_id], map_general)?
        .collect::<SqliteResult<Vec<_>>>()?;
    Ok(rows)
}

fn upsert_general(
    conn: &Connection,
    player_id: &str,
    day: DayOfWeek,
    season_id: i64,
    status: AvailabilityStatus,
    notes: &str,
    now: DateTime<Utc>,
) -> RepositoryResult<GeneralAvailabilityPattern> {
    let sql = format!(
        "INSERT INTO player_general_availability
             (player_id, day_of_week, season_id, status, notes, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
         ON CONFLICT (player_id, day_of_week, season_id) DO UPDATE SET
             status = excluded.status,
             notes = excluded.notes,
             updated_at = excluded.updated_at
         RETURNING {GENERAL_COLUMNS}"
    );
    let row = conn.query_row(
        &sql,
        params![player_id, day.to_db_str(), season_id, status.to_db_str(), notes, now],
        map_general,
    )?;
    Ok(row)
}

fn delete_general(
    conn: &Connection,
    player_id: &str,
    day: DayOfWeek,
    season_id: i64,
) -> RepositoryResult<usize> {
    let n = conn.execute(
        "DELETE FROM player_general_availability
         WHERE player_id = ?1 AND day_of_week = ?2 AND season_id = ?3",
        params![player_id, day.to_db_str(), season_id],
    )?;
    Ok(n)
}
