// ==========================================
// League Availability - Command line front end
// ==========================================
// Thin wrapper over AvailabilityApi; every command prints JSON on stdout.
// Logs go to stderr (RUST_LOG); per-operation SQL counts under target `perf`.
// ==========================================

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use serde::Serialize;

use league_availability::app::{get_default_db_path, AppState};
use league_availability::{logging, DateChangeRequest};

#[derive(Parser)]
#[command(version, about = "Player availability for league fixtures")]
struct Cli {
    /// SQLite database (default: LEAGUE_AVAILABILITY_DB_PATH or the user data dir)
    #[arg(long, value_name = "PATH", global = true)]
    db: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Effective status of one player for one fixture
    Resolve { player: String, fixture: i64 },

    /// Eligible players available for a fixture
    Available { fixture: i64 },

    /// A team's roster with each player's status for a fixture
    Roster { team: i64, fixture: i64 },

    /// Day-by-day availability (no fixture overrides)
    Calendar {
        player: String,
        season: i64,
        /// First day (default: today)
        from: Option<NaiveDate>,
        #[arg(long)]
        days: Option<u32>,
    },

    /// Available / unavailable / if-needed counts over the calendar window
    Stats {
        player: String,
        season: i64,
        from: Option<NaiveDate>,
    },

    /// Upcoming division fixtures with one player's status
    Fixtures {
        division: i64,
        player: String,
        from: Option<NaiveDate>,
    },

    /// Set or clear one date (status: available | unavailable | if-needed | clear)
    SetDate {
        player: String,
        date: NaiveDate,
        status: String,
        #[arg(long, default_value = "")]
        reason: String,
    },

    /// Apply a JSON array of {date, status, reason} atomically
    Batch {
        player: String,
        #[arg(long, value_name = "FILE")]
        file: String,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let db_path = cli.db.unwrap_or_else(get_default_db_path);
    let state = AppState::new(db_path.clone())
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("opening {}", db_path))?;
    let api = &state.availability_api;
    let today = Local::now().date_naive();

    match cli.cmd {
        Cmd::Resolve { player, fixture } => {
            print_json(&api.resolve(&player, fixture)?)?;
        }
        Cmd::Available { fixture } => {
            print_json(&api.available_players_for_fixture(fixture)?)?;
        }
        Cmd::Roster { team, fixture } => {
            print_json(&api.team_roster_availability(team, fixture)?)?;
        }
        Cmd::Calendar {
            player,
            season,
            from,
            days,
        } => {
            let from = from.unwrap_or(today);
            print_json(&api.availability_calendar(&player, season, from, days)?)?;
        }
        Cmd::Stats {
            player,
            season,
            from,
        } => {
            print_json(&api.availability_stats(&player, season, from.unwrap_or(today))?)?;
        }
        Cmd::Fixtures {
            division,
            player,
            from,
        } => {
            let from = from.unwrap_or(today);
            print_json(&api.fixtures_with_player_availability(division, &player, from)?)?;
        }
        Cmd::SetDate {
            player,
            date,
            status,
            reason,
        } => {
            print_json(&api.set_date_availability(&player, date, &status, &reason)?)?;
        }
        Cmd::Batch { player, file } => {
            let raw = std::fs::read_to_string(&file).with_context(|| format!("reading {}", file))?;
            let changes: Vec<DateChangeRequest> =
                serde_json::from_str(&raw).with_context(|| format!("parsing {}", file))?;
            let applied = api.set_batch_availability(&player, &changes)?;
            print_json(&serde_json::json!({ "applied": applied }))?;
        }
    }

    Ok(())
}
