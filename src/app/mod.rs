// ==========================================
// League Availability - Application layer
// ==========================================
// Responsibility: wiring and shared state
// ==========================================

pub mod state;

pub use state::{get_default_db_path, AppState};
