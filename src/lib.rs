// ==========================================
// League Availability - Core library
// ==========================================
// Player availability resolution for an amateur tennis league:
// three stored signals merged by precedence, division eligibility,
// roster-wide availability and atomic date-change batches.
// Stack: Rust + SQLite
// ==========================================

// ==========================================
// Modules
// ==========================================

// Domain layer - entities and value types
pub mod domain;

// Repository layer - data access
pub mod repository;

// Engine layer - precedence and eligibility rules
pub mod engine;

// Config layer
pub mod config;

// Database infrastructure (PRAGMAs, schema bootstrap)
pub mod db;

// Logging
pub mod logging;

// SQL profiling
pub mod perf;

// API layer
pub mod api;

// Application layer - wiring
pub mod app;

// ==========================================
// Re-exports
// ==========================================

pub use domain::types::{AvailabilityStatus, DayOfWeek, PrecedenceTier, StatusInput};

pub use domain::{
    AvailablePlayer, CalendarDay, DateAvailabilityChange, DateException, FixtureAvailability,
    FixtureWithAvailability, GeneralAvailabilityPattern, PlayerDivision, PlayerSummary,
    Resolution, RosterAvailability,
};

pub use engine::{AvailabilityResolver, AvailabilityStats, RosterAvailabilityQuery};

pub use api::{ApiError, ApiResult, AvailabilityApi, DateChangeRequest};

pub use repository::Deadline;

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "League Availability";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
