// ==========================================
// League Availability - Availability config reader
// ==========================================
// Responsibility: the configuration the API layer reads (no implementation)
// Red line: no config writes, no business logic
// ==========================================

use std::error::Error;

// ==========================================
// AvailabilityConfigReader Trait
// ==========================================
// Implemented by ConfigManager (config_kv table)
pub trait AvailabilityConfigReader: Send + Sync {
    /// Default per-operation deadline in milliseconds.
    ///
    /// # Default
    /// - 5000 (0 disables the deadline)
    fn get_query_timeout_ms(&self) -> Result<u64, Box<dyn Error>>;

    /// Number of days in the availability calendar.
    ///
    /// # Default
    /// - 28
    fn get_calendar_window_days(&self) -> Result<u32, Box<dyn Error>>;

    /// Maximum number of entries in one batch of date changes.
    ///
    /// # Default
    /// - 366
    fn get_max_batch_size(&self) -> Result<usize, Box<dyn Error>>;
}
