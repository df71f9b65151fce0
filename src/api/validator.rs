// ==========================================
// League Availability - Input validation
// ==========================================
// Responsibility: reject malformed input before any store access.
// Every failure is ApiError::ValidationFailure.
// ==========================================

use chrono::NaiveDate;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::types::{AvailabilityStatus, DayOfWeek, StatusInput};

/// Player ids are UUID strings.
pub fn validate_player_id(player_id: &str) -> ApiResult<&str> {
    let trimmed = player_id.trim();
    if trimmed.is_empty() {
        return Err(ApiError::invalid("player_id must not be empty"));
    }
    Uuid::parse_str(trimmed)
        .map_err(|e| ApiError::invalid(format!("player_id '{}' is not a UUID: {}", player_id, e)))?;
    Ok(trimmed)
}

/// Fixture, team, division, season and exception ids are positive.
pub fn validate_record_id(field: &str, id: i64) -> ApiResult<i64> {
    if id <= 0 {
        return Err(ApiError::invalid(format!("{} must be positive, got {}", field, id)));
    }
    Ok(id)
}

/// Write-side status: storage names, client slugs, or `clear`.
pub fn parse_status_input(raw: &str) -> ApiResult<StatusInput> {
    raw.parse::<StatusInput>()
        .map_err(|e| ApiError::invalid(e.to_string()))
}

/// A status that must be stored (Clear is rejected).
pub fn parse_stored_status(raw: &str) -> ApiResult<AvailabilityStatus> {
    match parse_status_input(raw)? {
        StatusInput::Set(status) => Ok(status),
        StatusInput::Clear => Err(ApiError::invalid(
            "status 'clear' is not allowed here; delete the record instead",
        )),
    }
}

pub fn parse_day_of_week(raw: &str) -> ApiResult<DayOfWeek> {
    raw.parse::<DayOfWeek>()
        .map_err(|e| ApiError::invalid(e.to_string()))
}

/// Inclusive range; a single day has start == end.
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> ApiResult<()> {
    if start > end {
        return Err(ApiError::invalid(format!(
            "start date {} is after end date {}",
            start, end
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_must_be_uuid() {
        assert!(validate_player_id("9b2f6a4e-1d3c-4f7a-9e2b-0c5d8a1f3e77").is_ok());
        assert!(matches!(
            validate_player_id("  "),
            Err(ApiError::ValidationFailure(_))
        ));
        assert!(matches!(
            validate_player_id("player-1"),
            Err(ApiError::ValidationFailure(_))
        ));
    }

    #[test]
    fn test_stored_status_rejects_clear() {
        assert_eq!(
            parse_stored_status("if-needed").unwrap(),
            AvailabilityStatus::IfNeeded
        );
        assert!(parse_stored_status("clear").is_err());
        assert!(parse_status_input("clear").is_ok());
        assert!(parse_status_input("sometimes").is_err());
    }

    #[test]
    fn test_date_range() {
        let a = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let b = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
        assert!(validate_date_range(a, b).is_ok());
        assert!(validate_date_range(a, a).is_ok());
        assert!(matches!(
            validate_date_range(b, a),
            Err(ApiError::ValidationFailure(_))
        ));
    }

    #[test]
    fn test_parse_inputs() {
        assert_eq!(parse_day_of_week("Thursday").unwrap(), DayOfWeek::Thursday);
        assert!(parse_day_of_week("Thursdai").is_err());
        assert!(validate_record_id("fixture_id", 0).is_err());
    }
}
