// ==========================================
// League Availability - Batch mutation coordinator
// ==========================================
// All date changes of one call land in one transaction or none do.
// Entries are checked before the store is touched; the store rolls
// back on any failure it hits itself.
// ==========================================

use crate::domain::availability::{DateAvailabilityChange, DateException};
use crate::domain::types::{AvailabilityStatus, StatusInput};
use crate::repository::availability_repo::AvailabilityRepository;
use crate::repository::deadline::Deadline;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use std::sync::Arc;

pub struct BatchMutationCoordinator {
    repo: Arc<AvailabilityRepository>,
    max_batch_size: usize,
}

impl BatchMutationCoordinator {
    pub fn new(repo: Arc<AvailabilityRepository>, max_batch_size: usize) -> Self {
        Self {
            repo,
            max_batch_size,
        }
    }

    /// Apply `changes` for `player_id` atomically, in caller order.
    ///
    /// # Returns
    /// - `Ok(0)`: empty input, nothing touched
    /// - `Ok(n)`: all n entries applied
    pub fn apply(
        &self,
        player_id: &str,
        changes: &[DateAvailabilityChange],
        deadline: &Deadline,
    ) -> RepositoryResult<usize> {
        if changes.is_empty() {
            return Ok(0);
        }
        self.check_batch(changes)?;

        let applied = self.repo.apply_date_changes(player_id, changes, deadline)?;
        tracing::info!(player_id, applied, "date availability batch committed");
        Ok(applied)
    }

    /// Single-date change: one-entry batch semantics without the size check.
    pub fn apply_single(
        &self,
        player_id: &str,
        date: NaiveDate,
        status: StatusInput,
        reason: &str,
        deadline: &Deadline,
    ) -> RepositoryResult<Option<DateException>> {
        let stored = self.repo.set_exception(player_id, date, status, reason, deadline)?;
        tracing::info!(player_id, %date, cleared = stored.is_none(), "date availability set");
        Ok(stored)
    }

    fn check_batch(&self, changes: &[DateAvailabilityChange]) -> RepositoryResult<()> {
        if changes.len() > self.max_batch_size {
            return Err(RepositoryError::ValidationError(format!(
                "batch of {} changes exceeds the limit of {}",
                changes.len(),
                self.max_batch_size
            )));
        }

        for (idx, change) in changes.iter().enumerate() {
            if change.status == Some(AvailabilityStatus::Unknown) {
                return Err(RepositoryError::FieldValueError {
                    field: format!("changes[{idx}].status"),
                    message: "Unknown cannot be stored; use Clear".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;
    use std::sync::Mutex;

    fn coordinator(max: usize) -> BatchMutationCoordinator {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::ensure_schema(&conn).unwrap();
        let repo = AvailabilityRepository::from_connection(Arc::new(Mutex::new(conn)));
        BatchMutationCoordinator::new(Arc::new(repo), max)
    }

    fn change(day: u32, status: Option<AvailabilityStatus>) -> DateAvailabilityChange {
        DateAvailabilityChange {
            date: NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
            status,
            reason: String::new(),
        }
    }

    #[test]
    fn test_empty_batch_is_noop_even_for_unknown_player() {
        let c = coordinator(10);
        assert_eq!(c.apply("nobody", &[], &Deadline::none()).unwrap(), 0);
    }

    #[test]
    fn test_oversized_batch_rejected() {
        let c = coordinator(2);
        let changes = vec![
            change(1, Some(AvailabilityStatus::Available)),
            change(2, Some(AvailabilityStatus::Available)),
            change(3, Some(AvailabilityStatus::Available)),
        ];
        assert!(matches!(
            c.apply("p1", &changes, &Deadline::none()),
            Err(RepositoryError::ValidationError(_))
        ));
    }

    #[test]
    fn test_unknown_status_entry_rejected() {
        let c = coordinator(10);
        let changes = vec![
            change(1, Some(AvailabilityStatus::Available)),
            change(2, Some(AvailabilityStatus::Unknown)),
        ];
        let err = c.apply("p1", &changes, &Deadline::none()).unwrap_err();
        assert!(matches!(err, RepositoryError::FieldValueError { ref field, .. } if field == "changes[1].status"));
    }
}
