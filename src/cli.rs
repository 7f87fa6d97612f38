use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::WatchConfig;
use crate::engine::StoppageEngine;
use crate::error::WatchError;
use crate::play::parse_timestamp;
use crate::schedule::calendar_entries;

/// Offline front end over payloads already fetched from the data provider.
#[derive(Parser, Debug)]
#[command(name = "stoppage-watch")]
#[command(about = "Infer game stoppages from play-by-play payloads", long_about = None)]
struct Cli {
    /// JSON config file with heuristic overrides
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a game's play-by-play payload
    Status {
        /// Opaque game identifier echoed into the response
        #[arg(long)]
        game_id: String,

        /// Payload JSON file (reads stdin when omitted)
        #[arg(long)]
        payload: Option<PathBuf>,

        /// Evaluate as of this RFC 3339 instant instead of now
        #[arg(long)]
        now: Option<String>,
    },

    /// List live games and games starting soon from a scoreboard payload
    Schedule {
        /// Scoreboard JSON file (reads stdin when omitted)
        #[arg(long)]
        payload: Option<PathBuf>,

        /// Override the configured horizon for upcoming games
        #[arg(long)]
        horizon_hours: Option<i64>,

        /// Filter as of this RFC 3339 instant instead of now
        #[arg(long)]
        now: Option<String>,
    },

    /// Print the calendar entries of a scoreboard payload
    Calendar {
        /// Scoreboard JSON file (reads stdin when omitted)
        #[arg(long)]
        payload: Option<PathBuf>,
    },
}

pub fn run() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = match cli.config.as_deref() {
        Some(path) => WatchConfig::load(path)?,
        None => WatchConfig::default(),
    };

    let output = execute(cli.command, config)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn execute(command: Commands, config: WatchConfig) -> Result<Value> {
    match command {
        Commands::Status {
            game_id,
            payload,
            now,
        } => {
            let raw = read_payload(payload.as_deref())?;
            let now = resolve_now(now.as_deref())?;
            let response = StoppageEngine::new(config).evaluate_at(&game_id, &raw, now);
            Ok(serde_json::to_value(response)?)
        }
        Commands::Schedule {
            payload,
            horizon_hours,
            now,
        } => {
            let config = WatchConfig {
                schedule_horizon_hours: horizon_hours.unwrap_or(config.schedule_horizon_hours),
                ..config
            };
            config.validate()?;

            let raw = read_payload(payload.as_deref())?;
            let now = resolve_now(now.as_deref())?;
            let games = StoppageEngine::new(config).live_and_soon_at(&raw, now);
            Ok(json!({ "games": games }))
        }
        Commands::Calendar { payload } => {
            let raw = read_payload(payload.as_deref())?;
            Ok(json!({ "calendar": calendar_entries(&raw) }))
        }
    }
}

fn read_payload(path: Option<&Path>) -> Result<Value, WatchError> {
    let Some(path) = path else {
        let mut raw_json = String::new();
        std::io::stdin()
            .read_to_string(&mut raw_json)
            .map_err(|error| WatchError::Io {
                path: PathBuf::from("<stdin>"),
                source: error,
            })?;
        return parse_payload(&raw_json, "stdin");
    };

    let raw_json = std::fs::read_to_string(path).map_err(|error| WatchError::Io {
        path: path.to_path_buf(),
        source: error,
    })?;
    parse_payload(&raw_json, &format!("'{}'", path.display()))
}

fn parse_payload(raw_json: &str, origin: &str) -> Result<Value, WatchError> {
    serde_json::from_str(raw_json).map_err(|error| WatchError::Json {
        origin: origin.to_string(),
        source: error,
    })
}

fn resolve_now(now: Option<&str>) -> Result<DateTime<Utc>, WatchError> {
    match now {
        Some(value) => {
            parse_timestamp(value).ok_or_else(|| WatchError::InvalidTimestamp(value.to_string()))
        }
        None => Ok(Utc::now()),
    }
}

#[cfg(test)]
mod tests {
    use super::{execute, read_payload, resolve_now, Cli, Commands};
    use crate::config::WatchConfig;
    use crate::error::WatchError;
    use chrono::{TimeZone, Utc};
    use clap::Parser;
    use serde_json::json;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_directory() -> std::path::PathBuf {
        let timestamp_nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|duration| duration.as_nanos())
            .unwrap_or(0);
        let process_id = std::process::id();
        std::env::temp_dir().join(format!(
            "stoppage_watch_cli_test_{process_id}_{timestamp_nanos}"
        ))
    }

    #[test]
    fn parses_status_arguments() {
        let cli = Cli::try_parse_from([
            "stoppage-watch",
            "status",
            "--game-id",
            "401547417",
            "--now",
            "2024-01-07T18:30:00Z",
        ])
        .expect("Expected status arguments to parse");

        match cli.command {
            Commands::Status { game_id, now, payload } => {
                assert_eq!(game_id, "401547417");
                assert_eq!(now.as_deref(), Some("2024-01-07T18:30:00Z"));
                assert!(payload.is_none());
            }
            other => panic!("Unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unparsable_now() {
        assert!(matches!(
            resolve_now(Some("half past six")),
            Err(WatchError::InvalidTimestamp(_))
        ));
        assert_eq!(
            resolve_now(Some("2024-01-07T18:30:00Z")).expect("Expected valid timestamp"),
            Utc.with_ymd_and_hms(2024, 1, 7, 18, 30, 0).unwrap()
        );
    }

    #[test]
    fn evaluates_status_from_payload_file() {
        let temp_directory = unique_temp_directory();
        std::fs::create_dir_all(&temp_directory)
            .expect("Failed to create temporary cli test directory");
        let payload_path = temp_directory.join("plays.json");
        let payload = json!({
            "items": [{
                "sequenceNumber": "1",
                "wallclock": "2024-01-07T18:29:50Z",
                "type": { "text": "Timeout" },
                "period": { "number": 2 },
                "clock": { "displayValue": "0:42" },
            }],
        });
        std::fs::write(&payload_path, payload.to_string()).expect("Failed to write test payload");

        let output = execute(
            Commands::Status {
                game_id: "401547417".to_string(),
                payload: Some(payload_path.clone()),
                now: Some("2024-01-07T18:30:00Z".to_string()),
            },
            WatchConfig::default(),
        )
        .expect("Expected status evaluation to succeed");

        assert_eq!(output["isStoppage"], true);
        assert_eq!(output["confidence"], "high");
        assert_eq!(output["stoppageDurationPretty"], "10s");
        assert_eq!(output["gameStatus"], "Q2 0:42");

        std::fs::remove_dir_all(&temp_directory)
            .expect("Failed to remove temporary cli test directory");
    }

    #[test]
    fn reports_missing_and_malformed_payloads() {
        let temp_directory = unique_temp_directory();
        std::fs::create_dir_all(&temp_directory)
            .expect("Failed to create temporary cli test directory");

        let missing_path = temp_directory.join("missing.json");
        assert!(matches!(
            read_payload(Some(&missing_path)),
            Err(WatchError::Io { .. })
        ));

        let broken_path = temp_directory.join("broken.json");
        std::fs::write(&broken_path, "{\"items\": [").expect("Failed to write test payload");
        assert!(matches!(
            read_payload(Some(&broken_path)),
            Err(WatchError::Json { .. })
        ));

        std::fs::remove_dir_all(&temp_directory)
            .expect("Failed to remove temporary cli test directory");
    }

    #[test]
    fn negative_horizon_override_is_rejected() {
        let result = execute(
            Commands::Schedule {
                payload: None,
                horizon_hours: Some(-2),
                now: None,
            },
            WatchConfig::default(),
        );

        assert!(result.is_err());
    }
}
