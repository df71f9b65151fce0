// ==========================================
// League Availability - Repository layer
// ==========================================
// Red line: Repository holds no business rules
// ==========================================
// Responsibility: data access over the shared SQLite connection
// Constraint: every query is parameterised
// ==========================================

pub mod availability_repo;
pub mod deadline;
pub mod error;
pub mod league_repo;
pub mod snapshot;

pub use availability_repo::AvailabilityRepository;
pub use deadline::{Deadline, DeadlineGuard};
pub use error::{RepositoryError, RepositoryResult};
pub use snapshot::StoreSnapshot;
