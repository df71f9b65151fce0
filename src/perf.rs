// ==========================================
// League Availability - SQL statement profiling
// ==========================================
// One profile callback per connection: every finished statement is
// counted against the innermost open PerfGuard on the calling thread,
// and statements over the slow threshold are logged under `slow_sql`.
// A connection without the callback contributes nothing.
// ==========================================

use rusqlite::Connection;
use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

pub const PERF_SQL_ENV: &str = "LEAGUE_AVAILABILITY_PERF_SQL";
pub const SLOW_SQL_MS_ENV: &str = "LEAGUE_AVAILABILITY_SLOW_SQL_MS";

const SLOW_SQL_LOG_LEN: usize = 400;

// profile() takes a plain fn, so the threshold cannot live in a closure
static SLOW_STATEMENT_MS: AtomicU64 = AtomicU64::new(0);

thread_local! {
    static OPEN_SCOPES: Cell<u32> = Cell::new(0);
    static STATEMENTS: Cell<u64> = Cell::new(0);
    static SLOW_STATEMENTS: Cell<u64> = Cell::new(0);
}

/// Profiling switches for one connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerfSettings {
    pub enabled: bool,
    /// 0 disables slow-statement logging
    pub slow_ms: u64,
}

impl PerfSettings {
    /// `LEAGUE_AVAILABILITY_PERF_SQL` (default: on in debug builds) and
    /// `LEAGUE_AVAILABILITY_SLOW_SQL_MS` (default 50 ms debug, 200 ms release).
    pub fn from_env() -> Self {
        let enabled = match std::env::var(PERF_SQL_ENV) {
            Ok(v) => matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            ),
            Err(_) => cfg!(debug_assertions),
        };
        let slow_ms = std::env::var(SLOW_SQL_MS_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(if cfg!(debug_assertions) { 50 } else { 200 });
        Self { enabled, slow_ms }
    }
}

/// Single-line SQL cut to at most `max_chars` characters.
fn compact_sql(sql: &str, max_chars: usize) -> String {
    let flat = sql.split_whitespace().collect::<Vec<_>>().join(" ");
    match flat.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &flat[..cut]),
        None => flat,
    }
}

/// Install profiling configured from the environment.
pub fn install_sqlite_tracing(conn: &mut Connection) -> bool {
    install_sqlite_profiling(conn, PerfSettings::from_env())
}

/// Install (or remove) the profile callback on `conn`.
///
/// # Returns
/// whether profiling is now active on this connection
pub fn install_sqlite_profiling(conn: &mut Connection, settings: PerfSettings) -> bool {
    if !settings.enabled {
        conn.profile(None);
        return false;
    }
    SLOW_STATEMENT_MS.store(settings.slow_ms, Ordering::Relaxed);
    conn.profile(Some(on_statement_finished));
    true
}

fn bump(counter: &'static std::thread::LocalKey<Cell<u64>>) {
    if OPEN_SCOPES.with(|d| d.get() > 0) {
        counter.with(|c| c.set(c.get().saturating_add(1)));
    }
}

fn on_statement_finished(sql: &str, duration: Duration) {
    bump(&STATEMENTS);

    let ms = duration.as_millis() as u64;
    let threshold = SLOW_STATEMENT_MS.load(Ordering::Relaxed);
    if threshold == 0 || ms < threshold {
        return;
    }
    tracing::warn!(
        target: "slow_sql",
        duration_ms = ms,
        sql = %compact_sql(sql, SLOW_SQL_LOG_LEN),
        "slow statement"
    );
    bump(&SLOW_STATEMENTS);
}

/// Scope guard for one operation; logs elapsed time and statement
/// counts under target `perf` when dropped. Guards nest.
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    statements_at_start: u64,
    slow_at_start: u64,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        OPEN_SCOPES.with(|d| d.set(d.get().saturating_add(1)));
        Self {
            op,
            start: Instant::now(),
            statements_at_start: STATEMENTS.with(|c| c.get()),
            slow_at_start: SLOW_STATEMENTS.with(|c| c.get()),
        }
    }

    /// Statements finished on this thread since the guard was created.
    pub fn statements_so_far(&self) -> u64 {
        STATEMENTS.with(|c| c.get()).saturating_sub(self.statements_at_start)
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_millis() as u64;
        let sql_count = self.statements_so_far();
        let slow_sql_count = SLOW_STATEMENTS
            .with(|c| c.get())
            .saturating_sub(self.slow_at_start);

        tracing::debug!(
            target: "perf",
            op = self.op,
            elapsed_ms,
            sql_count,
            slow_sql_count,
            "done"
        );

        OPEN_SCOPES.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profiled_connection() -> Connection {
        let mut conn = Connection::open_in_memory().unwrap();
        let settings = PerfSettings {
            enabled: true,
            slow_ms: 0,
        };
        assert!(install_sqlite_profiling(&mut conn, settings));
        conn
    }

    #[test]
    fn test_compact_sql_flattens_and_cuts_on_char_boundary() {
        assert_eq!(compact_sql("SELECT 1\n  FROM   t", 100), "SELECT 1 FROM t");
        assert_eq!(compact_sql("SELECT 'é' FROM t", 9), "SELECT 'é...");
    }

    #[test]
    fn test_guard_counts_statements_when_enabled() {
        let conn = profiled_connection();

        let guard = PerfGuard::new("test.count");
        conn.execute_batch("CREATE TABLE t (x INTEGER); INSERT INTO t VALUES (1);")
            .unwrap();
        assert_eq!(guard.statements_so_far(), 2);

        let n: i64 = conn.query_row("SELECT count(*) FROM t", [], |r| r.get(0)).unwrap();
        assert_eq!(n, 1);
        conn.execute("INSERT INTO t VALUES (2)", []).unwrap();
        assert_eq!(guard.statements_so_far(), 4);
    }

    #[test]
    fn test_statements_outside_a_guard_are_not_counted() {
        let conn = profiled_connection();
        conn.execute_batch("CREATE TABLE t (x INTEGER);").unwrap();

        let guard = PerfGuard::new("test.idle");
        assert_eq!(guard.statements_so_far(), 0);
    }

    #[test]
    fn test_disabled_connection_counts_nothing() {
        let mut conn = Connection::open_in_memory().unwrap();
        let settings = PerfSettings {
            enabled: false,
            slow_ms: 0,
        };
        assert!(!install_sqlite_profiling(&mut conn, settings));

        let guard = PerfGuard::new("test.off");
        conn.execute_batch("CREATE TABLE t (x INTEGER);").unwrap();
        assert_eq!(guard.statements_so_far(), 0);
    }
}
