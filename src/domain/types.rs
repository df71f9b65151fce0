// ==========================================
// League Availability - Domain types
// ==========================================
// Status vocabulary, day-of-week and precedence tiers.
// Storage names match the values persisted in the signal tables.
// ==========================================

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// AvailabilityStatus
// ==========================================
// Unknown is the absence of any signal and is never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AvailabilityStatus {
    Available,
    Unavailable,
    IfNeeded, // tentative ("maybe")
    Unknown,
}

impl AvailabilityStatus {
    /// Value stored in the `status` column.
    pub fn to_db_str(&self) -> &'static str {
        match self {
            AvailabilityStatus::Available => "Available",
            AvailabilityStatus::Unavailable => "Unavailable",
            AvailabilityStatus::IfNeeded => "IfNeeded",
            AvailabilityStatus::Unknown => "Unknown",
        }
    }

    /// Parse a stored `status` column value.
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Available" => Some(AvailabilityStatus::Available),
            "Unavailable" => Some(AvailabilityStatus::Unavailable),
            "IfNeeded" => Some(AvailabilityStatus::IfNeeded),
            "Unknown" => Some(AvailabilityStatus::Unknown),
            _ => None,
        }
    }

    /// Slug used by the player-facing calendar (`Unknown` renders as `clear`).
    pub fn as_client_slug(&self) -> &'static str {
        match self {
            AvailabilityStatus::Available => "available",
            AvailabilityStatus::Unavailable => "unavailable",
            AvailabilityStatus::IfNeeded => "if-needed",
            AvailabilityStatus::Unknown => "clear",
        }
    }

    /// Whether a stored row may carry this status.
    pub fn is_storable(&self) -> bool {
        !matches!(self, AvailabilityStatus::Unknown)
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// StatusInput - write-side status
// ==========================================
// Clear means "delete whatever is stored for this slot".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusInput {
    Set(AvailabilityStatus),
    Clear,
}

impl StatusInput {
    /// Status to store, or None when the slot must be cleared.
    pub fn stored_status(&self) -> Option<AvailabilityStatus> {
        match self {
            StatusInput::Set(status) => Some(*status),
            StatusInput::Clear => None,
        }
    }
}

/// Error returned when an input string names no known status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown availability status '{}'", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for StatusInput {
    type Err = UnknownStatus;

    /// Accepts storage names and client slugs, case-insensitively.
    /// `Unknown` is not accepted: callers clear a slot instead of storing it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(StatusInput::Set(AvailabilityStatus::Available)),
            "unavailable" => Ok(StatusInput::Set(AvailabilityStatus::Unavailable)),
            "ifneeded" | "if-needed" | "if_needed" | "maybe" => {
                Ok(StatusInput::Set(AvailabilityStatus::IfNeeded))
            }
            "clear" => Ok(StatusInput::Clear),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

impl From<AvailabilityStatus> for StatusInput {
    fn from(status: AvailabilityStatus) -> Self {
        match status {
            AvailabilityStatus::Unknown => StatusInput::Clear,
            other => StatusInput::Set(other),
        }
    }
}

// ==========================================
// DayOfWeek
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub fn of_date(date: NaiveDate) -> Self {
        Self::from(date.weekday())
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

/// Error returned when an input string names no day of the week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDayOfWeek(pub String);

impl fmt::Display for UnknownDayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown day of week '{}'", self.0)
    }
}

impl std::error::Error for UnknownDayOfWeek {}

impl FromStr for DayOfWeek {
    type Err = UnknownDayOfWeek;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // chrono accepts "Mon" and "Monday" in any case
        s.trim()
            .parse::<Weekday>()
            .map(DayOfWeek::from)
            .map_err(|_| UnknownDayOfWeek(s.to_string()))
    }
}

// ==========================================
// PrecedenceTier
// ==========================================
// Ordering follows precedence: Fixture beats Exception beats General.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrecedenceTier {
    Fixture,
    Exception,
    General,
}

impl fmt::Display for PrecedenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrecedenceTier::Fixture => write!(f, "FIXTURE"),
            PrecedenceTier::Exception => write!(f, "EXCEPTION"),
            PrecedenceTier::General => write!(f, "GENERAL"),
        }
    }
}
