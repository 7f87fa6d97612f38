use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::play::{parse_timestamp, text_at, value_at};

pub const DEFAULT_SCHEDULE_HORIZON_HOURS: i64 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameState {
    #[serde(rename = "pre")]
    Scheduled,
    #[serde(rename = "in")]
    InProgress,
    #[serde(rename = "post")]
    Final,
}

impl GameState {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "pre" => Some(Self::Scheduled),
            "in" => Some(Self::InProgress),
            "post" => Some(Self::Final),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledGame {
    pub id: String,
    pub short_name: Option<String>,
    pub state: GameState,
    pub start: DateTime<Utc>,
}

/// `leagues[0].calendar` of a scoreboard payload.
pub fn calendar_entries(scoreboard: &Value) -> &[Value] {
    scoreboard
        .pointer("/leagues/0/calendar")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

pub fn scoreboard_events(scoreboard: &Value) -> &[Value] {
    scoreboard
        .get("events")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Games that are in progress, or scheduled to start within
/// `horizon_hours` of `now`, ordered by start time.
pub fn filter_live_and_soon(
    events: &[Value],
    now: DateTime<Utc>,
    horizon_hours: i64,
) -> Vec<ScheduledGame> {
    let horizon = TimeDelta::try_hours(horizon_hours)
        .and_then(|window| now.checked_add_signed(window))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    let mut games = events
        .iter()
        .filter_map(read_scheduled_game)
        .filter(|game| match game.state {
            GameState::InProgress => true,
            GameState::Scheduled => game.start <= horizon,
            GameState::Final => false,
        })
        .collect::<Vec<ScheduledGame>>();

    games.sort_by_key(|game| game.start);

    tracing::debug!(
        total_events = events.len(),
        live_or_soon = games.len(),
        horizon_hours,
        "Filtered scoreboard events"
    );

    games
}

fn read_scheduled_game(event: &Value) -> Option<ScheduledGame> {
    let id = read_event_id(event)?;
    let state = text_at(event, &["status", "type", "state"]).and_then(GameState::parse)?;
    let start_text = text_at(event, &["date"])
        .filter(|date| !date.is_empty())
        .or_else(|| {
            event
                .pointer("/competitions/0/date")
                .and_then(Value::as_str)
        })?;
    let start = parse_timestamp(start_text)?;

    Some(ScheduledGame {
        id,
        short_name: text_at(event, &["shortName"]).map(str::to_string),
        state,
        start,
    })
}

fn read_event_id(event: &Value) -> Option<String> {
    match value_at(event, &["id"])? {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}
