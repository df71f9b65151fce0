// ==========================================
// League Availability - Engine layer
// ==========================================
// Responsibility: precedence, eligibility and batch rules
// Red line: Engine builds no SQL; it reads through the traits in `sources`
// ==========================================

pub mod batch;
pub mod eligibility;
pub mod resolver;
pub mod roster_query;
pub mod sources;
pub mod stats;

pub use batch::BatchMutationCoordinator;
pub use eligibility::EligibilityBuilder;
pub use resolver::{AvailabilityResolver, ResolutionContext};
pub use roster_query::RosterAvailabilityQuery;
pub use sources::{AvailabilitySignals, EligibilitySource, LeagueDirectory};
pub use stats::AvailabilityStats;
