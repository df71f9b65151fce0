// ==========================================
// League Availability - Roster availability queries
// ==========================================
// available(F) = { p ∈ eligible(F) : resolve(p, F) == Available }
// Every player is resolved independently through AvailabilityResolver,
// so the reported tier is always the winning one and a player can
// appear at most once.
// ==========================================

use crate::domain::league::{
    AvailablePlayer, FixtureContext, FixtureWithAvailability, RosterAvailability, TeamContext,
};
use crate::domain::types::PrecedenceTier;
use crate::engine::eligibility::EligibilityBuilder;
use crate::engine::resolver::AvailabilityResolver;
use crate::engine::sources::{AvailabilitySignals, EligibilitySource, LeagueDirectory};
use crate::repository::error::RepositoryResult;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

pub struct RosterAvailabilityQuery;

impl RosterAvailabilityQuery {
    /// Eligible players resolved as Available for `fixture`,
    /// ordered by last name then first name.
    pub fn available_players<S>(
        store: &S,
        fixture: &FixtureContext,
    ) -> RepositoryResult<Vec<AvailablePlayer>>
    where
        S: AvailabilitySignals + EligibilitySource + LeagueDirectory,
    {
        let eligible = EligibilityBuilder::eligible_players(store, fixture)?;

        // keyed by player id: one entry per player
        let mut winners: BTreeMap<String, PrecedenceTier> = BTreeMap::new();
        for player_id in &eligible {
            let resolution = AvailabilityResolver::resolve_for_fixture(store, player_id, fixture)?;
            if let (true, Some(tier)) = (resolution.is_available(), resolution.tier) {
                winners.insert(player_id.clone(), tier);
            }
        }

        let ids: BTreeSet<String> = winners.keys().cloned().collect();
        let players = store
            .player_summaries(&ids)?
            .into_iter()
            .filter_map(|player| {
                winners
                    .get(&player.id)
                    .copied()
                    .map(|tier| AvailablePlayer { player, tier })
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            fixture_id = fixture.fixture_id,
            eligible = eligible.len(),
            available = players.len(),
            "available players resolved"
        );
        Ok(players)
    }

    /// Every active roster member of `team` with their resolved status
    /// for `fixture`. Not filtered.
    pub fn team_roster_availability<S>(
        store: &S,
        team: &TeamContext,
        fixture: &FixtureContext,
    ) -> RepositoryResult<Vec<RosterAvailability>>
    where
        S: AvailabilitySignals + LeagueDirectory,
    {
        let roster = store.team_roster(team.team_id, fixture.season_id)?;
        let mut out = Vec::with_capacity(roster.len());
        for player in roster {
            let resolution = AvailabilityResolver::resolve_for_fixture(store, &player.id, fixture)?;
            out.push(RosterAvailability {
                player,
                status: resolution.status,
                tier: resolution.tier,
            });
        }
        Ok(out)
    }

    /// Fixtures of `division_id` on or after `from`, each with
    /// `player_id`'s resolved status.
    pub fn fixtures_with_player_availability<S>(
        store: &S,
        division_id: i64,
        player_id: &str,
        from: NaiveDate,
    ) -> RepositoryResult<Vec<FixtureWithAvailability>>
    where
        S: AvailabilitySignals + LeagueDirectory,
    {
        let fixtures = store.division_fixtures_from(division_id, from)?;
        let mut out = Vec::with_capacity(fixtures.len());
        for fixture in fixtures {
            let resolution =
                AvailabilityResolver::resolve_for_fixture(store, player_id, &fixture.context())?;
            out.push(FixtureWithAvailability {
                fixture,
                status: resolution.status,
                tier: resolution.tier,
            });
        }
        Ok(out)
    }
}
