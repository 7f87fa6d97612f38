use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::config::WatchConfig;
use crate::response::{to_unified_response, UnifiedResponse};
use crate::schedule::{filter_live_and_soon, scoreboard_events, ScheduledGame};

/// Entry point for callers that already hold a parsed upstream payload.
///
/// Holds only immutable configuration, so one engine can serve any number of
/// concurrent requests.
#[derive(Clone, Copy, Debug, Default)]
pub struct StoppageEngine {
    config: WatchConfig,
}

impl StoppageEngine {
    pub fn new(config: WatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WatchConfig {
        &self.config
    }

    pub fn evaluate(&self, game_id: &str, raw: &Value) -> UnifiedResponse {
        self.evaluate_at(game_id, raw, Utc::now())
    }

    pub fn evaluate_at(&self, game_id: &str, raw: &Value, now: DateTime<Utc>) -> UnifiedResponse {
        to_unified_response(game_id, raw, now, self.config.silence_threshold_seconds)
    }

    /// Live and upcoming games from a scoreboard payload.
    pub fn live_and_soon(&self, scoreboard: &Value) -> Vec<ScheduledGame> {
        self.live_and_soon_at(scoreboard, Utc::now())
    }

    pub fn live_and_soon_at(&self, scoreboard: &Value, now: DateTime<Utc>) -> Vec<ScheduledGame> {
        filter_live_and_soon(
            scoreboard_events(scoreboard),
            now,
            self.config.schedule_horizon_hours,
        )
    }
}
