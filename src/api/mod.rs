// ==========================================
// League Availability - API layer
// ==========================================
// Responsibility: public operations for collaborators (HTTP layer,
// captain tooling, the CLI)
// ==========================================

pub mod availability_api;
pub mod error;
pub mod validator;

pub use availability_api::{AvailabilityApi, DateChangeRequest};
pub use error::{ApiError, ApiResult};
