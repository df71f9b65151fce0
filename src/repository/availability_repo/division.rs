// ==========================================
// Division eligibility registrations (player_divisions)
// ==========================================

use super::rows::{map_division, DIVISION_COLUMNS};
use super::{ensure_division_exists, ensure_player_exists, ensure_season_exists, AvailabilityRepository};
use crate::domain::availability::PlayerDivision;
use crate::repository::deadline::Deadline;
use crate::repository::error::RepositoryResult;
use chrono::Utc;
use rusqlite::{params, Result as SqliteResult};

impl AvailabilityRepository {
    /// Register a player for a division/season. Re-registering is a no-op.
    ///
    /// # Returns
    /// - `Ok(true)`: a new registration was stored
    /// - `Ok(false)`: the registration already existed
    pub fn add_player_division(
        &self,
        player_id: &str,
        division_id: i64,
        season_id: i64,
        deadline: &Deadline,
    ) -> RepositoryResult<bool> {
        self.write_tx(deadline, |tx| {
            ensure_player_exists(tx, player_id)?;
            ensure_division_exists(tx, division_id)?;
            ensure_season_exists(tx, season_id)?;

            let n = tx.execute(
                "INSERT INTO player_divisions (player_id, division_id, season_id, created_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT (player_id, division_id, season_id) DO NOTHING",
                params![player_id, division_id, season_id, Utc::now()],
            )?;
            Ok(n > 0)
        })
    }

    pub fn remove_player_division(
        &self,
        player_id: &str,
        division_id: i64,
        season_id: i64,
        deadline: &Deadline,
    ) -> RepositoryResult<bool> {
        self.write_tx(deadline, |tx| {
            let n = tx.execute(
                "DELETE FROM player_divisions
                 WHERE player_id = ?1 AND division_id = ?2 AND season_id = ?3",
                params![player_id, division_id, season_id],
            )?;
            Ok(n > 0)
        })
    }

    /// Registrations of one player in one season, by division id.
    pub fn list_player_divisions(
        &self,
        player_id: &str,
        season_id: i64,
        deadline: &Deadline,
    ) -> RepositoryResult<Vec<PlayerDivision>> {
        self.read_snapshot(deadline, |snapshot| {
            let sql = format!(
                "SELECT {DIVISION_COLUMNS} FROM player_divisions
                 WHERE player_id = ?1 AND season_id = ?2
                 ORDER BY division_id"
            );
            let mut stmt = snapshot.conn().prepare(&sql)?;
            let rows = stmt
                .query_map(params![player_id, season_id], map_division)?
                .collect::<SqliteResult<Vec<_>>>()?;
            Ok(rows)
        })
    }
}
