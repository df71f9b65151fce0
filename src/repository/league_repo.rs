// ==========================================
// League Availability - League context reads
// ==========================================
// Tables: players, teams, player_teams, fixtures, player_divisions
// Owned by fixture/team management. This module only reads them.
// scheduled_date is normalised with date() so a stored time part is
// tolerated.
// ==========================================

use crate::domain::league::{FixtureSummary, PlayerSummary, TeamContext};
use crate::repository::error::RepositoryResult;
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::collections::BTreeSet;

const FIXTURE_COLUMNS: &str =
    "id, date(scheduled_date), season_id, division_id, home_team_id, away_team_id";

fn map_fixture_summary(row: &Row<'_>) -> rusqlite::Result<FixtureSummary> {
    Ok(FixtureSummary {
        fixture_id: row.get(0)?,
        scheduled_date: row.get(1)?,
        season_id: row.get(2)?,
        division_id: row.get(3)?,
        home_team_id: row.get(4)?,
        away_team_id: row.get(5)?,
    })
}

fn map_player_summary(row: &Row<'_>) -> rusqlite::Result<PlayerSummary> {
    Ok(PlayerSummary {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
    })
}

pub(crate) fn find_fixture(
    conn: &Connection,
    fixture_id: i64,
) -> RepositoryResult<Option<FixtureSummary>> {
    let sql = format!("SELECT {FIXTURE_COLUMNS} FROM fixtures WHERE id = ?1");
    let row = conn
        .query_row(&sql, [fixture_id], map_fixture_summary)
        .optional()?;
    Ok(row)
}

/// Fixtures of a division scheduled on or after `from`, earliest first.
pub(crate) fn division_fixtures_from(
    conn: &Connection,
    division_id: i64,
    from: NaiveDate,
) -> RepositoryResult<Vec<FixtureSummary>> {
    let sql = format!(
        "SELECT {FIXTURE_COLUMNS} FROM fixtures
         WHERE division_id = ?1 AND date(scheduled_date) >= ?2
         ORDER BY date(scheduled_date), id"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![division_id, from], map_fixture_summary)?
        .collect::<SqliteResult<Vec<_>>>()?;
    Ok(rows)
}

pub(crate) fn find_team(conn: &Connection, team_id: i64) -> RepositoryResult<Option<TeamContext>> {
    let row = conn
        .query_row(
            "SELECT id, division_id, season_id, name FROM teams WHERE id = ?1",
            [team_id],
            |row| {
                Ok(TeamContext {
                    team_id: row.get(0)?,
                    division_id: row.get(1)?,
                    season_id: row.get(2)?,
                    name: row.get(3)?,
                })
            },
        )
        .optional()?;
    Ok(row)
}

pub(crate) fn find_player(
    conn: &Connection,
    player_id: &str,
) -> RepositoryResult<Option<PlayerSummary>> {
    let row = conn
        .query_row(
            "SELECT id, first_name, last_name FROM players WHERE id = ?1",
            [player_id],
            map_player_summary,
        )
        .optional()?;
    Ok(row)
}

/// Summaries for `ids`, ordered by last name then first name.
/// Ids with no players row are skipped.
pub(crate) fn player_summaries(
    conn: &Connection,
    ids: &BTreeSet<String>,
) -> RepositoryResult<Vec<PlayerSummary>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!(
        "SELECT id, first_name, last_name FROM players
         WHERE id IN ({placeholders})
         ORDER BY last_name, first_name, id"
    );
    let values: Vec<Value> = ids.iter().map(|id| Value::Text(id.clone())).collect();
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(values), map_player_summary)?
        .collect::<SqliteResult<Vec<_>>>()?;
    Ok(rows)
}

/// Active roster of one team for its season, ordered by last name then first name.
pub(crate) fn team_roster(
    conn: &Connection,
    team_id: i64,
    season_id: i64,
) -> RepositoryResult<Vec<PlayerSummary>> {
    let mut stmt = conn.prepare(
        "SELECT p.id, p.first_name, p.last_name
         FROM player_teams pt
         JOIN players p ON p.id = pt.player_id
         WHERE pt.team_id = ?1 AND pt.season_id = ?2 AND pt.is_active = 1
         ORDER BY p.last_name, p.first_name, p.id",
    )?;
    let rows = stmt
        .query_map(params![team_id, season_id], map_player_summary)?
        .collect::<SqliteResult<Vec<_>>>()?;
    Ok(rows)
}

/// Players registered for (division, season) in player_divisions.
pub(crate) fn division_registered_player_ids(
    conn: &Connection,
    division_id: i64,
    season_id: i64,
) -> RepositoryResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT player_id FROM player_divisions
         WHERE division_id = ?1 AND season_id = ?2",
    )?;
    let rows = stmt
        .query_map(params![division_id, season_id], |row| row.get(0))?
        .collect::<SqliteResult<Vec<String>>>()?;
    Ok(rows)
}

/// Players on an active roster of any team in (division, season).
pub(crate) fn division_roster_player_ids(
    conn: &Connection,
    division_id: i64,
    season_id: i64,
) -> RepositoryResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT pt.player_id
         FROM player_teams pt
         JOIN teams t ON t.id = pt.team_id
         WHERE t.division_id = ?1 AND t.season_id = ?2
           AND pt.season_id = ?2 AND pt.is_active = 1",
    )?;
    let rows = stmt
        .query_map(params![division_id, season_id], |row| row.get(0))?
        .collect::<SqliteResult<Vec<String>>>()?;
    Ok(rows)
}
