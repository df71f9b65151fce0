// ==========================================
// League Availability - Availability signals
// ==========================================
// The three independently maintained signal kinds, plus division
// eligibility registrations.
// Aligned with tables: player_general_availability,
// player_availability_exceptions, player_fixture_availability,
// player_divisions
// ==========================================

use crate::domain::types::{AvailabilityStatus, DayOfWeek, PrecedenceTier};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// GeneralAvailabilityPattern - weekly default
// ==========================================
// Unique per (player_id, day_of_week, season_id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralAvailabilityPattern {
    pub id: i64,
    pub player_id: String,
    pub day_of_week: DayOfWeek,
    pub season_id: i64,
    pub status: AvailabilityStatus,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ==========================================
// DateException - date-range override
// ==========================================
// Ranges of one player may overlap; overlap is settled at read time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateException {
    pub id: i64,
    pub player_id: String,
    pub status: AvailabilityStatus,
    pub start_date: NaiveDate, // inclusive
    pub end_date: NaiveDate,   // inclusive
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

impl DateException {
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn is_single_day(&self) -> bool {
        self.start_date == self.end_date
    }

    /// Among exceptions covering one date the most recently created wins;
    /// equal timestamps fall back to the higher id.
    pub fn precedence_key(&self) -> (DateTime<Utc>, i64) {
        (self.created_at, self.id)
    }
}

/// Pick the winning exception among those covering `date`.
pub fn winning_exception(exceptions: &[DateException], date: NaiveDate) -> Option<&DateException> {
    exceptions
        .iter()
        .filter(|e| e.covers(date))
        .max_by_key(|e| e.precedence_key())
}

// ==========================================
// FixtureAvailability - fixture-specific override
// ==========================================
// Unique per (player_id, fixture_id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureAvailability {
    pub id: i64,
    pub player_id: String,
    pub fixture_id: i64,
    pub status: AvailabilityStatus,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ==========================================
// PlayerDivision - division eligibility registration
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerDivision {
    pub id: i64,
    pub player_id: String,
    pub division_id: i64,
    pub season_id: i64,
    pub created_at: DateTime<Utc>,
}

// ==========================================
// DateAvailabilityChange - one entry of a batch
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateAvailabilityChange {
    pub date: NaiveDate,
    /// None clears the single-day exception for `date`.
    pub status: Option<AvailabilityStatus>,
    pub reason: String,
}

// ==========================================
// Resolution - effective status plus winning tier
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub status: AvailabilityStatus,
    /// None when no tier produced a signal (status is Unknown).
    pub tier: Option<PrecedenceTier>,
}

impl Resolution {
    pub fn unknown() -> Self {
        Self {
            status: AvailabilityStatus::Unknown,
            tier: None,
        }
    }

    pub fn from_tier(tier: PrecedenceTier, status: AvailabilityStatus) -> Self {
        Self {
            status,
            tier: Some(tier),
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == AvailabilityStatus::Available
    }
}
