// ==========================================
// League Availability - Eligibility set builder
// ==========================================
// eligible(F) = registered(division, season) ∪ active_roster(division, season)
// Recomputed on every call.
// ==========================================

use crate::domain::league::FixtureContext;
use crate::engine::sources::EligibilitySource;
use crate::repository::error::RepositoryResult;
use std::collections::BTreeSet;

pub struct EligibilityBuilder;

impl EligibilityBuilder {
    /// Player ids allowed to be considered for `fixture`, each once.
    pub fn eligible_players<S: EligibilitySource>(
        source: &S,
        fixture: &FixtureContext,
    ) -> RepositoryResult<BTreeSet<String>> {
        let registered = source.division_registered_players(fixture.division_id, fixture.season_id)?;
        let rostered = source.division_roster_players(fixture.division_id, fixture.season_id)?;

        let eligible: BTreeSet<String> = registered.union(&rostered).cloned().collect();
        tracing::debug!(
            fixture_id = fixture.fixture_id,
            registered = registered.len(),
            rostered = rostered.len(),
            eligible = eligible.len(),
            "eligibility set built"
        );
        Ok(eligible)
    }
}
