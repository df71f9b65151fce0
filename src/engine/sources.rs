// ==========================================
// League Availability - Engine read seams
// ==========================================
// What the engine needs from storage, as traits. The repository
// snapshot implements all three against one transaction; engine unit
// tests implement them in memory.
// "No row" is Ok(None) / an empty collection, never an error.
// ==========================================

use crate::domain::availability::DateException;
use crate::domain::league::{FixtureSummary, PlayerSummary, TeamContext};
use crate::domain::types::{AvailabilityStatus, DayOfWeek};
use crate::repository::error::RepositoryResult;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// The three stored signal kinds, looked up per player.
pub trait AvailabilitySignals {
    fn fixture_override(
        &self,
        player_id: &str,
        fixture_id: i64,
    ) -> RepositoryResult<Option<AvailabilityStatus>>;

    /// Every exception whose range contains `date`, in no particular order.
    fn exceptions_covering(
        &self,
        player_id: &str,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<DateException>>;

    fn general_pattern(
        &self,
        player_id: &str,
        day: DayOfWeek,
        season_id: i64,
    ) -> RepositoryResult<Option<AvailabilityStatus>>;
}

/// The two independent eligibility sources for a (division, season).
pub trait EligibilitySource {
    /// Players explicitly registered for the division/season.
    fn division_registered_players(
        &self,
        division_id: i64,
        season_id: i64,
    ) -> RepositoryResult<BTreeSet<String>>;

    /// Players on an active roster of any team in the division/season.
    fn division_roster_players(
        &self,
        division_id: i64,
        season_id: i64,
    ) -> RepositoryResult<BTreeSet<String>>;
}

/// Read-only fixture/team/player lookups.
pub trait LeagueDirectory {
    fn fixture(&self, fixture_id: i64) -> RepositoryResult<Option<FixtureSummary>>;

    fn team(&self, team_id: i64) -> RepositoryResult<Option<TeamContext>>;

    fn player(&self, player_id: &str) -> RepositoryResult<Option<PlayerSummary>>;

    /// Summaries ordered by last name then first name; unknown ids are skipped.
    fn player_summaries(&self, ids: &BTreeSet<String>) -> RepositoryResult<Vec<PlayerSummary>>;

    /// Active roster ordered by last name then first name.
    fn team_roster(&self, team_id: i64, season_id: i64) -> RepositoryResult<Vec<PlayerSummary>>;

    fn division_fixtures_from(
        &self,
        division_id: i64,
        from: NaiveDate,
    ) -> RepositoryResult<Vec<FixtureSummary>>;
}
