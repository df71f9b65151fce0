// ==========================================
// Date-range exceptions (player_availability_exceptions)
// ==========================================
// Ranges may overlap; nothing here picks a winner.
// A single-date write replaces only rows whose range is exactly [d, d].
// ==========================================

use super::rows::{map_exception, EXCEPTION_COLUMNS};
use super::{ensure_player_exists, AvailabilityRepository};
use crate::domain::availability::{DateAvailabilityChange, DateException};
use crate::domain::types::{AvailabilityStatus, StatusInput};
use crate::repository::deadline::Deadline;
use crate::repository::error::RepositoryResult;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, Result as SqliteResult};

impl AvailabilityRepository {
    /// Single-date upsert: drop any [date, date] exception, then insert
    /// the new one unless `status` is Clear.
    pub fn set_exception(
        &self,
        player_id: &str,
        date: NaiveDate,
        status: StatusInput,
        reason: &str,
        deadline: &Deadline,
    ) -> RepositoryResult<Option<DateException>> {
        self.write_tx(deadline, |tx| {
            ensure_player_exists(tx, player_id)?;
            replace_single_day(tx, player_id, date, status.stored_status(), reason, Utc::now())
        })
    }

    /// Apply date changes in caller order inside one transaction.
    ///
    /// Any failing entry rolls back every entry before it.
    ///
    /// # Returns
    /// - `Ok(count)`: number of entries applied
    pub fn apply_date_changes(
        &self,
        player_id: &str,
        changes: &[DateAvailabilityChange],
        deadline: &Deadline,
    ) -> RepositoryResult<usize> {
        if changes.is_empty() {
            return Ok(0);
        }

        self.write_tx(deadline, |tx| {
            ensure_player_exists(tx, player_id)?;
            let now = Utc::now();
            for change in changes {
                replace_single_day(tx, player_id, change.date, change.status, &change.reason, now)?;
            }
            Ok(changes.len())
        })
    }

    /// Store one exception covering [start_date, end_date].
    pub fn create_exception(
        &self,
        player_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        status: AvailabilityStatus,
        reason: &str,
        deadline: &Deadline,
    ) -> RepositoryResult<DateException> {
        self.write_tx(deadline, |tx| {
            ensure_player_exists(tx, player_id)?;
            insert_exception(tx, player_id, start_date, end_date, status, reason, Utc::now())
        })
    }

    /// Exceptions overlapping [from, to], ordered by start date.
    pub fn list_exceptions(
        &self,
        player_id: &str,
        from: NaiveDate,
        to: NaiveDate,
        deadline: &Deadline,
    ) -> RepositoryResult<Vec<DateException>> {
        self.read_snapshot(deadline, |snapshot| {
            let sql = format!(
                "SELECT {EXCEPTION_COLUMNS} FROM player_availability_exceptions
                 WHERE player_id = ?1 AND start_date <= ?3 AND end_date >= ?2
                 ORDER BY start_date, id"
            );
            let mut stmt = snapshot.conn().prepare(&sql)?;
            let rows = stmt
                .query_map(params![player_id, from, to], map_exception)?
                .collect::<SqliteResult<Vec<_>>>()?;
            Ok(rows)
        })
    }

    /// Delete one exception of `player_id`.
    ///
    /// # Returns
    /// - `Ok(true)`: a row was deleted
    /// - `Ok(false)`: no such exception for this player
    pub fn delete_exception(
        &self,
        player_id: &str,
        exception_id: i64,
        deadline: &Deadline,
    ) -> RepositoryResult<bool> {
        self.write_tx(deadline, |tx| {
            let n = tx.execute(
                "DELETE FROM player_availability_exceptions WHERE id = ?1 AND player_id = ?2",
                params![exception_id, player_id],
            )?;
            Ok(n > 0)
        })
    }

    /// Delete exceptions lying wholly inside [from, to].
    pub fn clear_exceptions_within(
        &self,
        player_id: &str,
        from: NaiveDate,
        to: NaiveDate,
        deadline: &Deadline,
    ) -> RepositoryResult<usize> {
        self.write_tx(deadline, |tx| {
            let n = tx.execute(
                "DELETE FROM player_availability_exceptions
                 WHERE player_id = ?1 AND start_date >= ?2 AND end_date <= ?3",
                params![player_id, from, to],
            )?;
            Ok(n)
        })
    }
}

/// All exceptions of `player_id` whose range contains `date`.
pub(crate) fn exceptions_covering(
    conn: &Connection,
    player_id: &str,
    date: NaiveDate,
) -> RepositoryResult<Vec<DateException>> {
    let sql = format!(
        "SELECT {EXCEPTION_COLUMNS} FROM player_availability_exceptions
         WHERE player_id = ?1 AND start_date <= ?2 AND end_date >= ?2
         ORDER BY id"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![player_id, date], map_exception)?
        .collect::<SqliteResult<Vec<_>>>()?;
    Ok(rows)
}

fn replace_single_day(
    conn: &Connection,
    player_id: &str,
    date: NaiveDate,
    status: Option<AvailabilityStatus>,
    reason: &str,
    now: DateTime<Utc>,
) -> RepositoryResult<Option<DateException>> {
    conn.execute(
        "DELETE FROM player_availability_exceptions
         WHERE player_id = ?1 AND start_date = ?2 AND end_date = ?2",
        params![player_id, date],
    )?;

    match status {
        Some(status) => {
            let row = insert_exception(conn, player_id, date, date, status, reason, now)?;
            Ok(Some(row))
        }
        None => Ok(None),
    }
}

fn insert_exception(
    conn: &Connection,
    player_id: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: AvailabilityStatus,
    reason: &str,
    now: DateTime<Utc>,
) -> RepositoryResult<DateException> {
    let sql = format!(
        "INSERT INTO player_availability_exceptions
             (player_id, status, start_date, end_date, reason, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         RETURNING {EXCEPTION_COLUMNS}"
    );
    let row = conn.query_row(
        &sql,
        params![player_id, status.to_db_str(), start_date, end_date, reason, now],
        map_exception,
    )?;
    Ok(row)
}
