// ==========================================
// Fixture overrides (player_fixture_availability)
// ==========================================
// Key: (player_id, fixture_id). Writing Clear deletes the row.
// ==========================================

use super::rows::{map_fixture, FIXTURE_COLUMNS};
use super::{ensure_fixture_exists, ensure_player_exists, AvailabilityRepository};
use crate::domain::availability::FixtureAvailability;
use crate::domain::types::StatusInput;
use crate::repository::deadline::Deadline;
use crate::repository::error::RepositoryResult;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

impl AvailabilityRepository {
    /// Upsert the override for one (player, fixture).
    pub fn set_fixture_override(
        &self,
        player_id: &str,
        fixture_id: i64,
        status: StatusInput,
        notes: &str,
        deadline: &Deadline,
    ) -> RepositoryResult<Option<FixtureAvailability>> {
        self.write_tx(deadline, |tx| {
            ensure_player_exists(tx, player_id)?;
            ensure_fixture_exists(tx, fixture_id)?;

            let Some(stored) = status.stored_status() else {
                delete_override(tx, player_id, fixture_id)?;
                return Ok(None);
            };

            let sql = format!(
                "INSERT INTO player_fixture_availability
                     (player_id, fixture_id, status, notes, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?5)
                 ON CONFLICT (player_id, fixture_id) DO UPDATE SET
                     status = excluded.status,
                     notes = excluded.notes,
                     updated_at = excluded.updated_at
                 RETURNING {FIXTURE_COLUMNS}"
            );
            let row = tx.query_row(
                &sql,
                params![player_id, fixture_id, stored.to_db_str(), notes, Utc::now()],
                map_fixture,
            )?;
            Ok(Some(row))
        })
    }

    /// Remove the override for one (player, fixture).
    ///
    /// # Returns
    /// - `Ok(true)`: a row was deleted
    pub fn delete_fixture_override(
        &self,
        player_id: &str,
        fixture_id: i64,
        deadline: &Deadline,
    ) -> RepositoryResult<bool> {
        self.write_tx(deadline, |tx| {
            let n = delete_override(tx, player_id, fixture_id)?;
            Ok(n > 0)
        })
    }
}

pub(crate) fn find_fixture_override(
    conn: &Connection,
    player_id: &str,
    fixture_id: i64,
) -> RepositoryResult<Option<FixtureAvailability>> {
    let sql = format!(
        "SELECT {FIXTURE_COLUMNS} FROM player_fixture_availability
         WHERE player_id = ?1 AND fixture_id = ?2"
    );
    let row = conn
        .query_row(&sql, params![player_id, fixture_id], map_fixture)
        .optional()?;
    Ok(row)
}

fn delete_override(conn: &Connection, player_id: &str, fixture_id: i64) -> RepositoryResult<usize> {
    let n = conn.execute(
        "DELETE FROM player_fixture_availability WHERE player_id = ?1 AND fixture_id = ?2",
        params![player_id, fixture_id],
    )?;
    Ok(n)
}
