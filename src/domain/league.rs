// ==========================================
// League Availability - League context (read-only)
// ==========================================
// Fixture, team and player views owned by fixture/team management.
// The engine only reads them.
// ==========================================

use crate::domain::types::{AvailabilityStatus, PrecedenceTier};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// FixtureContext - what resolution needs to know about a fixture
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureContext {
    pub fixture_id: i64,
    pub scheduled_date: NaiveDate,
    pub season_id: i64,
    pub division_id: i64,
}

// ==========================================
// FixtureSummary
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureSummary {
    pub fixture_id: i64,
    pub scheduled_date: NaiveDate,
    pub season_id: i64,
    pub division_id: i64,
    pub home_team_id: i64,
    pub away_team_id: i64,
}

impl FixtureSummary {
    pub fn context(&self) -> FixtureContext {
        FixtureContext {
            fixture_id: self.fixture_id,
            scheduled_date: self.scheduled_date,
            season_id: self.season_id,
            division_id: self.division_id,
        }
    }
}

// ==========================================
// TeamContext
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamContext {
    pub team_id: i64,
    pub division_id: i64,
    pub season_id: i64,
    pub name: String,
}

// ==========================================
// PlayerSummary
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

// ==========================================
// Query results
// ==========================================

/// An eligible player resolved as Available, tagged with the winning tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailablePlayer {
    pub player: PlayerSummary,
    pub tier: PrecedenceTier,
}

/// One roster member with their full resolved status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterAvailability {
    pub player: PlayerSummary,
    pub status: AvailabilityStatus,
    pub tier: Option<PrecedenceTier>,
}

/// A division fixture with one player's resolved status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureWithAvailability {
    pub fixture: FixtureSummary,
    pub status: AvailabilityStatus,
    pub tier: Option<PrecedenceTier>,
}

/// One day of a player's availability calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub status: AvailabilityStatus,
    pub tier: Option<PrecedenceTier>,
}
