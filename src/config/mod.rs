// ==========================================
// League Availability - Config layer
// ==========================================
// Storage: config_kv table, global scope
// ==========================================

pub mod availability_config_trait;
pub mod config_manager;

pub use availability_config_trait::AvailabilityConfigReader;
pub use config_manager::{config_keys, defaults, ConfigManager};
