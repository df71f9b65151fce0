// ==========================================
// League Availability - Read snapshot
// ==========================================
// Borrowed view over one open transaction. Every read made through a
// snapshot sees the same committed state, so a resolution never mixes
// rows from before and after a concurrent write.
// ==========================================

use crate::domain::availability::DateException;
use crate::domain::league::{FixtureSummary, PlayerSummary, TeamContext};
use crate::domain::types::{AvailabilityStatus, DayOfWeek};
use crate::engine::sources::{AvailabilitySignals, EligibilitySource, LeagueDirectory};
use crate::repository::availability_repo::{
    exceptions_covering, find_fixture_override, find_general,
};
use crate::repository::error::RepositoryResult;
use crate::repository::league_repo;
use chrono::NaiveDate;
use rusqlite::Connection;
use std::collections::BTreeSet;

pub struct StoreSnapshot<'a> {
    conn: &'a Connection,
}

impl<'a> StoreSnapshot<'a> {
    pub(crate) fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub(crate) fn conn(&self) -> &'a Connection {
        self.conn
    }
}

impl AvailabilitySignals for StoreSnapshot<'_> {
    fn fixture_override(
        &self,
        player_id: &str,
        fixture_id: i64,
    ) -> RepositoryResult<Option<AvailabilityStatus>> {
        Ok(find_fixture_override(self.conn, player_id, fixture_id)?.map(|row| row.status))
    }

    fn exceptions_covering(
        &self,
        player_id: &str,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<DateException>> {
        exceptions_covering(self.conn, player_id, date)
    }

    fn general_pattern(
        &self,
        player_id: &str,
        day: DayOfWeek,
        season_id: i64,
    ) -> RepositoryResult<Option<AvailabilityStatus>> {
        Ok(find_general(self.conn, player_id, day, season_id)?.map(|row| row.status))
    }
}

impl EligibilitySource for StoreSnapshot<'_> {
    fn division_registered_players(
        &self,
        division_id: i64,
        season_id: i64,
    ) -> RepositoryResult<BTreeSet<String>> {
        let ids = league_repo::division_registered_player_ids(self.conn, division_id, season_id)?;
        Ok(ids.into_iter().collect())
    }

    fn division_roster_players(
        &self,
        division_id: i64,
        season_id: i64,
    ) -> RepositoryResult<BTreeSet<String>> {
        let ids = league_repo::division_roster_player_ids(self.conn, division_id, season_id)?;
        Ok(ids.into_iter().collect())
    }
}

impl LeagueDirectory for StoreSnapshot<'_> {
    fn fixture(&self, fixture_id: i64) -> RepositoryResult<Option<FixtureSummary>> {
        league_repo::find_fixture(self.conn, fixture_id)
    }

    fn team(&self, team_id: i64) -> RepositoryResult<Option<TeamContext>> {
        league_repo::find_team(self.conn, team_id)
    }

    fn player(&self, player_id: &str) -> RepositoryResult<Option<PlayerSummary>> {
        league_repo::find_player(self.conn, player_id)
    }

    fn player_summaries(&self, ids: &BTreeSet<String>) -> RepositoryResult<Vec<PlayerSummary>> {
        league_repo::player_summaries(self.conn, ids)
    }

    fn team_roster(&self, team_id: i64, season_id: i64) -> RepositoryResult<Vec<PlayerSummary>> {
        league_repo::team_roster(self.conn, team_id, season_id)
    }

    fn division_fixtures_from(
        &self,
        division_id: i64,
        from: NaiveDate,
    ) -> RepositoryResult<Vec<FixtureSummary>> {
        league_repo::division_fixtures_from(self.conn, division_id, from)
    }
}
