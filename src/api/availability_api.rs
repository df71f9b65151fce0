// ==========================================
// League Availability - Availability API
// ==========================================
// Responsibility: validate input, pick the deadline, run the engine
// against one store snapshot, map errors for callers.
// Reads go through AvailabilityRepository::read_snapshot; writes go
// through the repository (single records) or the batch coordinator.
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{
    parse_day_of_week, parse_status_input, parse_stored_status, validate_date_range,
    validate_player_id, validate_record_id,
};
use crate::config::AvailabilityConfigReader;
use crate::domain::availability::{
    DateAvailabilityChange, DateException, FixtureAvailability, GeneralAvailabilityPattern,
    PlayerDivision, Resolution,
};
use crate::domain::league::{
    AvailablePlayer, CalendarDay, FixtureSummary, FixtureWithAvailability, PlayerSummary,
    RosterAvailability, TeamContext,
};
use crate::engine::{
    AvailabilityResolver, AvailabilityStats, BatchMutationCoordinator, LeagueDirectory,
    RosterAvailabilityQuery,
};
use crate::perf::PerfGuard;
use crate::repository::{AvailabilityRepository, Deadline, RepositoryError, RepositoryResult};

/// Longest calendar window a caller may request.
const MAX_CALENDAR_DAYS: u32 = 366;

/// One entry of a batch request, as received from a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateChangeRequest {
    pub date: NaiveDate,
    pub status: String,
    #[serde(default)]
    pub reason: String,
}

// ==========================================
// AvailabilityApi
// ==========================================
#[derive(Clone)]
pub struct AvailabilityApi {
    repo: Arc<AvailabilityRepository>,
    config: Arc<dyn AvailabilityConfigReader>,
    deadline_override: Option<Deadline>,
}

impl AvailabilityApi {
    pub fn new(repo: Arc<AvailabilityRepository>, config: Arc<dyn AvailabilityConfigReader>) -> Self {
        Self {
            repo,
            config,
            deadline_override: None,
        }
    }

    /// Handle whose operations use `deadline` instead of the configured
    /// `availability.query_timeout_ms`.
    pub fn with_deadline(&self, deadline: Deadline) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
            deadline_override: Some(deadline),
        }
    }

    fn deadline(&self) -> ApiResult<Deadline> {
        if let Some(deadline) = &self.deadline_override {
            return Ok(deadline.clone());
        }
        let timeout_ms = self.config.get_query_timeout_ms().map_err(config_error)?;
        if timeout_ms == 0 {
            return Ok(Deadline::none());
        }
        Ok(Deadline::after(Duration::from_millis(timeout_ms)))
    }

    // ==========================================
    // Resolution and roster queries
    // ==========================================

    /// Effective status of one player for one fixture.
    #[instrument(skip(self))]
    pub fn resolve(&self, player_id: &str, fixture_id: i64) -> ApiResult<Resolution> {
        let _perf = PerfGuard::new("api.resolve");
        let player_id = validate_player_id(player_id)?;
        validate_record_id("fixture_id", fixture_id)?;
        let deadline = self.deadline()?;

        let resolution = self.repo.read_snapshot(&deadline, |store| {
            let fixture = require_fixture(store, fixture_id)?;
            require_player(store, player_id)?;
            AvailabilityResolver::resolve_for_fixture(store, player_id, &fixture.context())
        })?;
        Ok(resolution)
    }

    /// Eligible players resolved as Available, each once, with the winning tier.
    #[instrument(skip(self))]
    pub fn available_players_for_fixture(&self, fixture_id: i64) -> ApiResult<Vec<AvailablePlayer>> {
        let _perf = PerfGuard::new("api.available_players_for_fixture");
        validate_record_id("fixture_id", fixture_id)?;
        let deadline = self.deadline()?;

        let players = self.repo.read_snapshot(&deadline, |store| {
            let fixture = require_fixture(store, fixture_id)?;
            RosterAvailabilityQuery::available_players(store, &fixture.context())
        })?;
        Ok(players)
    }

    /// Every active member of `team_id` with their status for `fixture_id`.
    #[instrument(skip(self))]
    pub fn team_roster_availability(
        &self,
        team_id: i64,
        fixture_id: i64,
    ) -> ApiResult<Vec<RosterAvailability>> {
        let _perf = PerfGuard::new("api.team_roster_availability");
        validate_record_id("team_id", team_id)?;
        validate_record_id("fixture_id", fixture_id)?;
        let deadline = self.deadline()?;

        let roster = self.repo.read_snapshot(&deadline, |store| {
            let fixture = require_fixture(store, fixture_id)?;
            let team = require_team(store, team_id)?;
            RosterAvailabilityQuery::team_roster_availability(store, &team, &fixture.context())
        })?;
        Ok(roster)
    }

    /// Fixtures of a division on or after `from` with one player's status.
    #[instrument(skip(self))]
    pub fn fixtures_with_player_availability(
        &self,
        division_id: i64,
        player_id: &str,
        from: NaiveDate,
    ) -> ApiResult<Vec<FixtureWithAvailability>> {
        let _perf = PerfGuard::new("api.fixtures_with_player_availability");
        validate_record_id("division_id", division_id)?;
        let player_id = validate_player_id(player_id)?;
        let deadline = self.deadline()?;

        let fixtures = self.repo.read_snapshot(&deadline, |store| {
            require_player(store, player_id)?;
            RosterAvailabilityQuery::fixtures_with_player_availability(
                store,
                division_id,
                player_id,
                from,
            )
        })?;
        Ok(fixtures)
    }

    /// Day-by-day status starting at `from`, without fixture overrides.
    ///
    /// `days` defaults to `availability.calendar_window_days`.
    #[instrument(skip(self))]
    pub fn availability_calendar(
        &self,
        player_id: &str,
        season_id: i64,
        from: NaiveDate,
        days: Option<u32>,
    ) -> ApiResult<Vec<CalendarDay>> {
        let _perf = PerfGuard::new("api.availability_calendar");
        let player_id = validate_player_id(player_id)?;
        validate_record_id("season_id", season_id)?;
        let days = match days {
            Some(n) if n == 0 || n > MAX_CALENDAR_DAYS => {
                return Err(ApiError::invalid(format!(
                    "calendar window must be 1..={} days, got {}",
                    MAX_CALENDAR_DAYS, n
                )));
            }
            Some(n) => n,
            None => self.config.get_calendar_window_days().map_err(config_error)?,
        };
        let deadline = self.deadline()?;

        let calendar = self.repo.read_snapshot(&deadline, |store| {
            require_player(store, player_id)?;
            AvailabilityResolver::calendar(store, player_id, season_id, from, days)
        })?;
        Ok(calendar)
    }

    /// Counts over the default calendar window starting at `from`.
    pub fn availability_stats(
        &self,
        player_id: &str,
        season_id: i64,
        from: NaiveDate,
    ) -> ApiResult<AvailabilityStats> {
        let _perf = PerfGuard::new("api.availability_stats");
        let calendar = self.availability_calendar(player_id, season_id, from, None)?;
        Ok(AvailabilityStats::from_calendar(&calendar))
    }

    // ==========================================
    // General weekly pattern
    // ==========================================

    /// Upsert (or with `clear`, delete) the weekly default for one day.
    #[instrument(skip(self))]
    pub fn set_general_availability(
        &self,
        player_id: &str,
        day_of_week: &str,
        season_id: i64,
        status: &str,
        notes: &str,
    ) -> ApiResult<Option<GeneralAvailabilityPattern>> {
        let _perf = PerfGuard::new("api.set_general_availability");
        let player_id = validate_player_id(player_id)?;
        let day = parse_day_of_week(day_of_week)?;
        validate_record_id("season_id", season_id)?;
        let status = parse_status_input(status)?;
        let deadline = self.deadline()?;

        let stored = self
            .repo
            .set_general(player_id, day, season_id, status, notes, &deadline)?;
        tracing::info!(player_id, %day, season_id, cleared = stored.is_none(), "general availability set");
        Ok(stored)
    }

    pub fn list_general_availability(
        &self,
        player_id: &str,
        season_id: i64,
    ) -> ApiResult<Vec<GeneralAvailabilityPattern>> {
        let _perf = PerfGuard::new("api.list_general_availability");
        let player_id = validate_player_id(player_id)?;
        validate_record_id("season_id", season_id)?;
        let deadline = self.deadline()?;
        Ok(self.repo.list_general(player_id, season_id, &deadline)?)
    }

    // ==========================================
    // Date exceptions
    // ==========================================

    /// Single-date upsert; `clear` removes the [date, date] exception.
    #[instrument(skip(self))]
    pub fn set_date_availability(
        &self,
        player_id: &str,
        date: NaiveDate,
        status: &str,
        reason: &str,
    ) -> ApiResult<Option<DateException>> {
        let _perf = PerfGuard::new("api.set_date_availability");
        let player_id = validate_player_id(player_id)?;
        let status = parse_status_input(status)?;
        let deadline = self.deadline()?;

        let stored = self
            .coordinator()?
            .apply_single(player_id, date, status, reason, &deadline)?;
        Ok(stored)
    }

    /// Apply all date changes atomically.
    ///
    /// Every entry is parsed first; one malformed entry rejects the whole
    /// batch before anything is written.
    #[instrument(skip(self, changes), fields(count = changes.len()))]
    pub fn set_batch_availability(
        &self,
        player_id: &str,
        changes: &[DateChangeRequest],
    ) -> ApiResult<usize> {
        let _perf = PerfGuard::new("api.set_batch_availability");
        let player_id = validate_player_id(player_id)?;

        let parsed = changes
            .iter()
            .enumerate()
            .map(|(idx, req)| -> ApiResult<DateAvailabilityChange> {
                let status = parse_status_input(&req.status).map_err(|e| {
                    tracing::warn!(player_id, idx, status = %req.status, "batch entry rejected");
                    ApiError::invalid(format!("changes[{}]: {}", idx, e))
                })?;
                Ok(DateAvailabilityChange {
                    date: req.date,
                    status: status.stored_status(),
                    reason: req.reason.clone(),
                })
            })
            .collect::<ApiResult<Vec<_>>>()?;

        let deadline = self.deadline()?;
        let applied = self.coordinator()?.apply(player_id, &parsed, &deadline)?;
        Ok(applied)
    }

    /// Store one exception covering [start_date, end_date].
    #[instrument(skip(self))]
    pub fn create_exception(
        &self,
        player_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        status: &str,
        reason: &str,
    ) -> ApiResult<DateException> {
        let _perf = PerfGuard::new("api.create_exception");
        let player_id = validate_player_id(player_id)?;
        validate_date_range(start_date, end_date)?;
        let status = parse_stored_status(status)?;
        let deadline = self.deadline()?;

        let row = self
            .repo
            .create_exception(player_id, start_date, end_date, status, reason, &deadline)?;
        tracing::info!(player_id, exception_id = row.id, %start_date, %end_date, "exception created");
        Ok(row)
    }

    /// Exceptions overlapping [from, to].
    pub fn list_exceptions(
        &self,
        player_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ApiResult<Vec<DateException>> {
        let _perf = PerfGuard::new("api.list_exceptions");
        let player_id = validate_player_id(player_id)?;
        validate_date_range(from, to)?;
        let deadline = self.deadline()?;
        Ok(self.repo.list_exceptions(player_id, from, to, &deadline)?)
    }

    /// Returns false when the player has no exception with that id.
    #[instrument(skip(self))]
    pub fn delete_exception(&self, player_id: &str, exception_id: i64) -> ApiResult<bool> {
        let _perf = PerfGuard::new("api.delete_exception");
        let player_id = validate_player_id(player_id)?;
        validate_record_id("exception_id", exception_id)?;
        let deadline = self.deadline()?;
        Ok(self.repo.delete_exception(player_id, exception_id, &deadline)?)
    }

    /// Delete exceptions lying wholly inside [from, to].
    #[instrument(skip(self))]
    pub fn clear_exceptions_within(
        &self,
        player_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ApiResult<usize> {
        let _perf = PerfGuard::new("api.clear_exceptions_within");
        let player_id = validate_player_id(player_id)?;
        validate_date_range(from, to)?;
        let deadline = self.deadline()?;
        let removed = self
            .repo
            .clear_exceptions_within(player_id, from, to, &deadline)?;
        tracing::info!(player_id, removed, "exceptions cleared");
        Ok(removed)
    }

    // ==========================================
    // Fixture overrides
    // ==========================================

    #[instrument(skip(self))]
    pub fn set_fixture_availability(
        &self,
        player_id: &str,
        fixture_id: i64,
        status: &str,
        notes: &str,
    ) -> ApiResult<Option<FixtureAvailability>> {
        let _perf = PerfGuard::new("api.set_fixture_availability");
        let player_id = validate_player_id(player_id)?;
        validate_record_id("fixture_id", fixture_id)?;
        let status = parse_status_input(status)?;
        let deadline = self.deadline()?;

        let stored = self
            .repo
            .set_fixture_override(player_id, fixture_id, status, notes, &deadline)?;
        tracing::info!(player_id, fixture_id, cleared = stored.is_none(), "fixture availability set");
        Ok(stored)
    }

    #[instrument(skip(self))]
    pub fn clear_fixture_availability(&self, player_id: &str, fixture_id: i64) -> ApiResult<bool> {
        let _perf = PerfGuard::new("api.clear_fixture_availability");
        let player_id = validate_player_id(player_id)?;
        validate_record_id("fixture_id", fixture_id)?;
        let deadline = self.deadline()?;
        Ok(self
            .repo
            .delete_fixture_override(player_id, fixture_id, &deadline)?)
    }

    // ==========================================
    // Division registrations
    // ==========================================

    #[instrument(skip(self))]
    pub fn add_player_division(
        &self,
        player_id: &str,
        division_id: i64,
        season_id: i64,
    ) -> ApiResult<bool> {
        let _perf = PerfGuard::new("api.add_player_division");
        let player_id = validate_player_id(player_id)?;
        validate_record_id("division_id", division_id)?;
        validate_record_id("season_id", season_id)?;
        let deadline = self.deadline()?;
        Ok(self
            .repo
            .add_player_division(player_id, division_id, season_id, &deadline)?)
    }

    #[instrument(skip(self))]
    pub fn remove_player_division(
        &self,
        player_id: &str,
        division_id: i64,
        season_id: i64,
    ) -> ApiResult<bool> {
        let _perf = PerfGuard::new("api.remove_player_division");
        let player_id = validate_player_id(player_id)?;
        validate_record_id("division_id", division_id)?;
        validate_record_id("season_id", season_id)?;
        let deadline = self.deadline()?;
        Ok(self
            .repo
            .remove_player_division(player_id, division_id, season_id, &deadline)?)
    }

    pub fn list_player_divisions(
        &self,
        player_id: &str,
        season_id: i64,
    ) -> ApiResult<Vec<PlayerDivision>> {
        let _perf = PerfGuard::new("api.list_player_divisions");
        let player_id = validate_player_id(player_id)?;
        validate_record_id("season_id", season_id)?;
        let deadline = self.deadline()?;
        Ok(self
            .repo
            .list_player_divisions(player_id, season_id, &deadline)?)
    }

    fn coordinator(&self) -> ApiResult<BatchMutationCoordinator> {
        let max_batch_size = self.config.get_max_batch_size().map_err(config_error)?;
        Ok(BatchMutationCoordinator::new(self.repo.clone(), max_batch_size))
    }
}

// ==========================================
// Required lookups (absence is NotFound here, unlike signal tiers)
// ==========================================

fn require_fixture<S: LeagueDirectory>(store: &S, fixture_id: i64) -> RepositoryResult<FixtureSummary> {
    store
        .fixture(fixture_id)?
        .ok_or_else(|| RepositoryError::not_found("Fixture", fixture_id))
}

fn require_player<S: LeagueDirectory>(store: &S, player_id: &str) -> RepositoryResult<PlayerSummary> {
    store
        .player(player_id)?
        .ok_or_else(|| RepositoryError::not_found("Player", player_id))
}

fn require_team<S: LeagueDirectory>(store: &S, team_id: i64) -> RepositoryResult<TeamContext> {
    store
        .team(team_id)?
        .ok_or_else(|| RepositoryError::not_found("Team", team_id))
}

fn config_error(err: Box<dyn Error>) -> ApiError {
    ApiError::StorageFailure(format!("config read failed: {}", err))
}
