// ==========================================
// League Availability - Availability resolver
// ==========================================
// Precedence: FIXTURE -> EXCEPTION -> GENERAL -> Unknown
// Exceptions covering the same date: newest created_at wins,
// equal timestamps fall back to the higher id.
// ==========================================

use crate::domain::availability::{winning_exception, Resolution};
use crate::domain::league::{CalendarDay, FixtureContext};
use crate::domain::types::{AvailabilityStatus, DayOfWeek, PrecedenceTier};
use crate::engine::sources::AvailabilitySignals;
use crate::repository::error::RepositoryResult;
use chrono::{Days, NaiveDate};

/// Where and when a player would be playing.
///
/// `fixture_id` is None for calendar days, which disables the fixture tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionContext {
    pub fixture_id: Option<i64>,
    pub date: NaiveDate,
    pub season_id: i64,
}

impl ResolutionContext {
    pub fn for_fixture(fixture: &FixtureContext) -> Self {
        Self {
            fixture_id: Some(fixture.fixture_id),
            date: fixture.scheduled_date,
            season_id: fixture.season_id,
        }
    }

    pub fn for_date(date: NaiveDate, season_id: i64) -> Self {
        Self {
            fixture_id: None,
            date,
            season_id,
        }
    }

    pub fn day_of_week(&self) -> DayOfWeek {
        DayOfWeek::of_date(self.date)
    }
}

type TierProvider<S> =
    fn(&S, &str, &ResolutionContext) -> RepositoryResult<Option<AvailabilityStatus>>;

fn fixture_tier<S: AvailabilitySignals>(
    signals: &S,
    player_id: &str,
    ctx: &ResolutionContext,
) -> RepositoryResult<Option<AvailabilityStatus>> {
    match ctx.fixture_id {
        Some(fixture_id) => signals.fixture_override(player_id, fixture_id),
        None => Ok(None),
    }
}

fn exception_tier<S: AvailabilitySignals>(
    signals: &S,
    player_id: &str,
    ctx: &ResolutionContext,
) -> RepositoryResult<Option<AvailabilityStatus>> {
    let covering = signals.exceptions_covering(player_id, ctx.date)?;
    Ok(winning_exception(&covering, ctx.date).map(|e| e.status))
}

fn general_tier<S: AvailabilitySignals>(
    signals: &S,
    player_id: &str,
    ctx: &ResolutionContext,
) -> RepositoryResult<Option<AvailabilityStatus>> {
    signals.general_pattern(player_id, ctx.day_of_week(), ctx.season_id)
}

/// AvailabilityResolver - stateless three-tier fallback
pub struct AvailabilityResolver;

impl AvailabilityResolver {
    /// Resolve one player against one context.
    ///
    /// Tiers are tried in precedence order and the first one holding a
    /// signal answers; later tiers are never read.
    pub fn resolve<S: AvailabilitySignals>(
        signals: &S,
        player_id: &str,
        ctx: &ResolutionContext,
    ) -> RepositoryResult<Resolution> {
        let chain: [(PrecedenceTier, TierProvider<S>); 3] = [
            (PrecedenceTier::Fixture, fixture_tier::<S>),
            (PrecedenceTier::Exception, exception_tier::<S>),
            (PrecedenceTier::General, general_tier::<S>),
        ];

        for (tier, provider) in chain {
            if let Some(status) = provider(signals, player_id, ctx)? {
                tracing::debug!(player_id, %tier, %status, date = %ctx.date, "resolved");
                return Ok(Resolution::from_tier(tier, status));
            }
        }

        tracing::debug!(player_id, date = %ctx.date, "no signal, Unknown");
        Ok(Resolution::unknown())
    }

    pub fn resolve_for_fixture<S: AvailabilitySignals>(
        signals: &S,
        player_id: &str,
        fixture: &FixtureContext,
    ) -> RepositoryResult<Resolution> {
        Self::resolve(signals, player_id, &ResolutionContext::for_fixture(fixture))
    }

    /// One entry per day starting at `from`, without the fixture tier.
    pub fn calendar<S: AvailabilitySignals>(
        signals: &S,
        player_id: &str,
        season_id: i64,
        from: NaiveDate,
        days: u32,
    ) -> RepositoryResult<Vec<CalendarDay>> {
        let mut out = Vec::with_capacity(days as usize);
        for offset in 0..days {
            let Some(date) = from.checked_add_days(Days::new(u64::from(offset))) else {
                break;
            };
            let resolution = Self::resolve(signals, player_id, &ResolutionContext::for_date(date, season_id))?;
            out.push(CalendarDay {
                date,
                status: resolution.status,
                tier: resolution.tier,
            });
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::availability::DateException;
    use chrono::{TimeZone, Utc};
    use std::cell::Cell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemorySignals {
        overrides: HashMap<(String, i64), AvailabilityStatus>,
        exceptions: Vec<DateException>,
        general: HashMap<(String, DayOfWeek, i64), AvailabilityStatus>,
        general_reads: Cell<usize>,
    }

    impl AvailabilitySignals for MemorySignals {
        fn fixture_override(
            &self,
            player_id: &str,
            fixture_id: i64,
        ) -> RepositoryResult<Option<AvailabilityStatus>> {
            Ok(self.overrides.get(&(player_id.to_string(), fixture_id)).copied())
        }

        fn exceptions_covering(
            &self,
            player_id: &str,
            date: NaiveDate,
        ) -> RepositoryResult<Vec<DateException>> {
            Ok(self
                .exceptions
                .iter()
                .filter(|e| e.player_id == player_id && e.covers(date))
                .cloned()
                .collect())
        }

        fn general_pattern(
            &self,
            player_id: &str,
            day: DayOfWeek,
            season_id: i64,
        ) -> RepositoryResult<Option<AvailabilityStatus>> {
            self.general_reads.set(self.general_reads.get() + 1);
            Ok(self
                .general
                .get(&(player_id.to_string(), day, season_id))
                .copied())
        }
    }

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    fn exception(id: i64, start: NaiveDate, end: NaiveDate, created_secs: i64, status: AvailabilityStatus) -> DateException {
        DateException {
            id,
            player_id: "p1".to_string(),
            status,
            start_date: start,
            end_date: end,
            reason: String::new(),
            created_at: Utc.timestamp_opt(1_700_000_000 + created_secs, 0).unwrap(),
        }
    }

    fn thursday_fixture() -> FixtureContext {
        FixtureContext {
            fixture_id: 7,
            scheduled_date: d(6, 12),
            season_id: 1,
            division_id: 3,
        }
    }

    #[test]
    fn test_fixture_override_beats_everything() {
        let mut signals = MemorySignals::default();
        signals
            .overrides
            .insert(("p1".to_string(), 7), AvailabilityStatus::IfNeeded);
        signals.exceptions.push(exception(1, d(6, 10), d(6, 20), 0, AvailabilityStatus::Unavailable));
        signals.general.insert(
            ("p1".to_string(), DayOfWeek::Thursday, 1),
            AvailabilityStatus::Available,
        );

        let r = AvailabilityResolver::resolve_for_fixture(&signals, "p1", &thursday_fixture()).unwrap();
        assert_eq!(r.status, AvailabilityStatus::IfNeeded);
        assert_eq!(r.tier, Some(PrecedenceTier::Fixture));
        // short-circuit: lower tiers never consulted
        assert_eq!(signals.general_reads.get(), 0);
    }

    #[test]
    fn test_newest_exception_wins() {
        let mut signals = MemorySignals::default();
        signals.exceptions.push(exception(1, d(6, 10), d(6, 20), 100, AvailabilityStatus::Available));
        signals.exceptions.push(exception(2, d(6, 11), d(6, 13), 50, AvailabilityStatus::Unavailable));

        let r = AvailabilityResolver::resolve_for_fixture(&signals, "p1", &thursday_fixture()).unwrap();
        assert_eq!(r.status, AvailabilityStatus::Available);
        assert_eq!(r.tier, Some(PrecedenceTier::Exception));
    }

    #[test]
    fn test_general_then_unknown() {
        let mut signals = MemorySignals::default();
        signals.general.insert(
            ("p1".to_string(), DayOfWeek::Thursday, 1),
            AvailabilityStatus::Unavailable,
        );

        let r = AvailabilityResolver::resolve_for_fixture(&signals, "p1", &thursday_fixture()).unwrap();
        assert_eq!(r.status, AvailabilityStatus::Unavailable);
        assert_eq!(r.tier, Some(PrecedenceTier::General));

        let r = AvailabilityResolver::resolve_for_fixture(&signals, "p2", &thursday_fixture()).unwrap();
        assert_eq!(r, Resolution::unknown());
    }

    #[test]
    fn test_general_pattern_is_season_scoped() {
        let mut signals = MemorySignals::default();
        signals.general.insert(
            ("p1".to_string(), DayOfWeek::Thursday, 2),
            AvailabilityStatus::Available,
        );
        let r = AvailabilityResolver::resolve_for_fixture(&signals, "p1", &thursday_fixture()).unwrap();
        assert_eq!(r.status, AvailabilityStatus::Unknown);
    }

    #[test]
    fn test_calendar_skips_fixture_tier() {
        let mut signals = MemorySignals::default();
        signals
            .overrides
            .insert(("p1".to_string(), 7), AvailabilityStatus::Available);
        signals.exceptions.push(exception(1, d(6, 12), d(6, 12), 0, AvailabilityStatus::Unavailable));
        signals.general.insert(
            ("p1".to_string(), DayOfWeek::Friday, 1),
            AvailabilityStatus::IfNeeded,
        );

        let days = AvailabilityResolver::calendar(&signals, "p1", 1, d(6, 11), 3).unwrap();
        assert_eq!(days.len(), 3);
        assert_eq!(days[0].status, AvailabilityStatus::Unknown);
        assert_eq!(days[1].status, AvailabilityStatus::Unavailable);
        assert_eq!(days[1].tier, Some(PrecedenceTier::Exception));
        assert_eq!(days[2].status, AvailabilityStatus::IfNeeded);
        assert_eq!(days[2].tier, Some(PrecedenceTier::General));
    }
}
