// ==========================================
// League Availability - Availability signal store
// ==========================================
// Red line: Repository holds no precedence rules
// ==========================================
// Tables: player_general_availability, player_availability_exceptions,
//         player_fixture_availability, player_divisions
// Every public operation takes a Deadline and runs inside exactly one
// transaction. Writes use BEGIN IMMEDIATE so the write lock is held from
// the first statement; reads share one deferred snapshot.
// ==========================================

mod division;
mod exception;
mod fixture_override;
mod general;
mod rows;

pub(crate) use exception::exceptions_covering;
pub(crate) use fixture_override::find_fixture_override;
pub(crate) use general::find_general;

use crate::repository::deadline::{Deadline, DeadlineGuard};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::snapshot::StoreSnapshot;
use rusqlite::{Connection, OptionalExtension, Transaction, TransactionBehavior};
use std::sync::{Arc, Mutex};

// ==========================================
// AvailabilityRepository
// ==========================================
pub struct AvailabilityRepository {
    conn: Arc<Mutex<Connection>>,
}

impl AvailabilityRepository {
    /// Share an existing connection.
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Run `f` inside one IMMEDIATE transaction.
    ///
    /// The deadline covers the statements issued by `f`; it is removed
    /// before COMMIT/ROLLBACK so finishing the transaction is never
    /// interrupted.
    pub(crate) fn write_tx<T, F>(&self, deadline: &Deadline, f: F) -> RepositoryResult<T>
    where
        F: FnOnce(&Transaction<'_>) -> RepositoryResult<T>,
    {
        deadline.check()?;
        let conn = self.get_conn()?;
        let tx = Transaction::new_unchecked(&conn, TransactionBehavior::Immediate)?;

        let result = {
            let _guard = DeadlineGuard::install(&tx, deadline)?;
            f(&tx)
        };

        match result {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            Err(e) => {
                // Dropping rolls back; an interrupted statement may already
                // have ended the transaction, so a rollback error is ignored.
                drop(tx);
                Err(e)
            }
        }
    }

    /// Run `f` against one read snapshot covering signal and league tables.
    pub fn read_snapshot<T, F>(&self, deadline: &Deadline, f: F) -> RepositoryResult<T>
    where
        F: FnOnce(&StoreSnapshot<'_>) -> RepositoryResult<T>,
    {
        deadline.check()?;
        let conn = self.get_conn()?;
        let tx = Transaction::new_unchecked(&conn, TransactionBehavior::Deferred)?;

        let result = {
            let _guard = DeadlineGuard::install(&tx, deadline)?;
            let snapshot = StoreSnapshot::new(&tx);
            f(&snapshot)
        };

        let value = result?;
        tx.commit()?;
        Ok(value)
    }
}

// ==========================================
// Reference checks shared by the write paths
// ==========================================

pub(crate) fn ensure_player_exists(conn: &Connection, player_id: &str) -> RepositoryResult<()> {
    let found: Option<i64> = conn
        .query_row("SELECT 1 FROM players WHERE id = ?1", [player_id], |row| {
            row.get(0)
        })
        .optional()?;
    match found {
        Some(_) => Ok(()),
        None => Err(RepositoryError::not_found("Player", player_id)),
    }
}

pub(crate) fn ensure_fixture_exists(conn: &Connection, fixture_id: i64) -> RepositoryResult<()> {
    let found: Option<i64> = conn
        .query_row("SELECT 1 FROM fixtures WHERE id = ?1", [fixture_id], |row| {
            row.get(0)
        })
        .optional()?;
    match found {
        Some(_) => Ok(()),
        None => Err(RepositoryError::not_found("Fixture", fixture_id)),
    }
}

pub(crate) fn ensure_season_exists(conn: &Connection, season_id: i64) -> RepositoryResult<()> {
    let found: Option<i64> = conn
        .query_row("SELECT 1 FROM seasons WHERE id = ?1", [season_id], |row| {
            row.get(0)
        })
        .optional()?;
    match found {
        Some(_) => Ok(()),
        None => Err(RepositoryError::not_found("Season", season_id)),
    }
}

pub(crate) fn ensure_division_exists(conn: &Connection, division_id: i64) -> RepositoryResult<()> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM divisions WHERE id = ?1",
            [division_id],
            |row| row.get(0),
        )
        .optional()?;
    match found {
        Some(_) => Ok(()),
        None => Err(RepositoryError::not_found("Division", division_id)),
    }
}
