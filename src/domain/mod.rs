// ==========================================
// League Availability - Domain layer
// ==========================================
// Entities and value types. No data access, no engine logic.
// ==========================================

pub mod availability;
pub mod league;
pub mod types;

pub use availability::{
    winning_exception, DateAvailabilityChange, DateException, FixtureAvailability,
    GeneralAvailabilityPattern, PlayerDivision, Resolution,
};
pub use league::{
    AvailablePlayer, CalendarDay, FixtureContext, FixtureSummary, FixtureWithAvailability,
    PlayerSummary, RosterAvailability, TeamContext,
};
pub use types::{AvailabilityStatus, DayOfWeek, PrecedenceTier, StatusInput};
