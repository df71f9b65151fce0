// ==========================================
// League Availability - Calendar statistics
// ==========================================
// Unknown days are not counted as decided.
// available_percent = (available + if_needed) / decided * 100
// ==========================================

use crate::domain::league::CalendarDay;
use crate::domain::types::AvailabilityStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityStats {
    pub total_available: u32,
    pub total_unavailable: u32,
    pub total_if_needed: u32,
    pub total_unknown: u32,
    /// 0.0 when no day is decided
    pub available_percent: f64,
}

impl AvailabilityStats {
    pub fn from_calendar(days: &[CalendarDay]) -> Self {
        let mut stats = AvailabilityStats {
            total_available: 0,
            total_unavailable: 0,
            total_if_needed: 0,
            total_unknown: 0,
            available_percent: 0.0,
        };

        for day in days {
            match day.status {
                AvailabilityStatus::Available => stats.total_available += 1,
                AvailabilityStatus::Unavailable => stats.total_unavailable += 1,
                AvailabilityStatus::IfNeeded => stats.total_if_needed += 1,
                AvailabilityStatus::Unknown => stats.total_unknown += 1,
            }
        }

        let decided = stats.total_available + stats.total_unavailable + stats.total_if_needed;
        if decided > 0 {
            stats.available_percent = f64::from(stats.total_available + stats.total_if_needed)
                / f64::from(decided)
                * 100.0;
        }
        stats
    }
}
