// ==========================================
// League Availability - Operation deadline
// ==========================================
// A deadline is installed as a SQLite progress handler for the
// duration of one store operation. When it fires SQLite interrupts
// the running statement; the open transaction is rolled back when
// it is dropped and the caller sees DeadlineExceeded.
// ==========================================

use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::Connection;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Number of SQLite VM instructions between deadline checks
const PROGRESS_CHECK_INTERVAL: i32 = 1_000;

/// Caller-supplied deadline and/or cancellation flag
#[derive(Debug, Clone, Default)]
pub struct Deadline {
    expires_at: Option<Instant>,
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl Deadline {
    /// No deadline, no cancellation
    pub fn none() -> Self {
        Self::default()
    }

    pub fn after(timeout: Duration) -> Self {
        Self {
            expires_at: Some(Instant::now() + timeout),
            cancel_flag: None,
        }
    }

    pub fn at(instant: Instant) -> Self {
        Self {
            expires_at: Some(instant),
            cancel_flag: None,
        }
    }

    /// Attach a flag that cancels the operation once set to true.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel_flag = Some(flag);
        self
    }

    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }

    pub fn is_unbounded(&self) -> bool {
        self.expires_at.is_none() && self.cancel_flag.is_none()
    }

    pub fn is_expired(&self) -> bool {
        let timed_out = self.expires_at.map_or(false, |at| Instant::now() >= at);
        let cancelled = self
            .cancel_flag
            .as_ref()
            .map_or(false, |flag| flag.load(Ordering::Relaxed));
        timed_out || cancelled
    }

    /// Fail fast before touching the store.
    pub fn check(&self) -> RepositoryResult<()> {
        if self.is_expired() {
            return Err(RepositoryError::DeadlineExceeded(
                "deadline passed before the operation started".to_string(),
            ));
        }
        Ok(())
    }
}

/// Installs the deadline on a connection and removes it on drop.
pub struct DeadlineGuard<'c> {
    conn: &'c Connection,
    installed: bool,
}

impl<'c> DeadlineGuard<'c> {
    pub fn install(conn: &'c Connection, deadline: &Deadline) -> RepositoryResult<Self> {
        deadline.check()?;

        if deadline.is_unbounded() {
            return Ok(Self {
                conn,
                installed: false,
            });
        }

        let watched = deadline.clone();
        conn.progress_handler(PROGRESS_CHECK_INTERVAL, Some(move || watched.is_expired()));
        Ok(Self {
            conn,
            installed: true,
        })
    }
}

impl Drop for DeadlineGuard<'_> {
    fn drop(&mut self) {
        if self.installed {
            self.conn.progress_handler(0, None::<fn() -> bool>);
        }
    }
}
