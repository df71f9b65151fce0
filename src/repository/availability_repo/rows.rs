// Row mappers for the signal tables.
// Stored text that no longer parses surfaces as a conversion failure
// instead of being coerced to a default.

use crate::domain::availability::{
    DateException, FixtureAvailability, GeneralAvailabilityPattern, PlayerDivision,
};
use crate::domain::types::{AvailabilityStatus, DayOfWeek, UnknownStatus};
use rusqlite::types::Type;
use rusqlite::Row;

pub(super) const GENERAL_COLUMNS: &str =
    "id, player_id, day_of_week, season_id, status, notes, created_at, updated_at";

pub(super) const EXCEPTION_COLUMNS: &str =
    "id, player_id, status, start_date, end_date, reason, created_at";

pub(super) const FIXTURE_COLUMNS: &str =
    "id, player_id, fixture_id, status, notes, created_at, updated_at";

pub(super) const DIVISION_COLUMNS: &str = "id, player_id, division_id, season_id, created_at";

fn status_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<AvailabilityStatus> {
    let raw: String = row.get(idx)?;
    AvailabilityStatus::from_db_str(&raw)
        .filter(AvailabilityStatus::is_storable)
        .ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(UnknownStatus(raw)))
        })
}

fn day_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<DayOfWeek> {
    let raw: String = row.get(idx)?;
    raw.parse::<DayOfWeek>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(super) fn map_general(row: &Row<'_>) -> rusqlite::Result<GeneralAvailabilityPattern> {
    Ok(GeneralAvailabilityPattern {
        id: row.get(0)?,
        player_id: row.get(1)?,
        day_of_week: day_at(row, 2)?,
        season_id: row.get(3)?,
        status: status_at(row, 4)?,
        notes: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

pub(super) fn map_exception(row: &Row<'_>) -> rusqlite::Result<DateException> {
    Ok(DateException {
        id: row.get(0)?,
        player_id: row.get(1)?,
        status: status_at(row, 2)?,
        start_date: row.get(3)?,
        end_date: row.get(4)?,
        reason: row.get(5)?,
        created_at: row.get(6)?,
    })
}

pub(super) fn map_fixture(row: &Row<'_>) -> rusqlite::Result<FixtureAvailability> {
    Ok(FixtureAvailability {
        id: row.get(0)?,
        player_id: row.get(1)?,
        fixture_id: row.get(2)?,
        status: status_at(row, 3)?,
        notes: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

pub(super) fn map_division(row: &Row<'_>) -> rusqlite::Result<PlayerDivision> {
    Ok(PlayerDivision {
        id: row.get(0)?,
        player_id: row.get(1)?,
        division_id: row.get(2)?,
        season_id: row.get(3)?,
        created_at: row.get(4)?,
    })
}
