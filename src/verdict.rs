use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::explicit::detect_explicit_stoppage;
use crate::implicit::{silence_reason, silent_stoppage_duration};
use crate::ordering::latest_play;
use crate::play::Play;

const UNKNOWN_GAME_STATUS: &str = "unknown";
const GENERIC_STOPPAGE_REASON: &str = "Stoppage";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoppageVerdict {
    pub is_stoppage: bool,
    pub confidence: Confidence,
    pub stoppage_reason: Option<String>,
    pub stoppage_duration_seconds: Option<i64>,
    pub game_status: String,
    pub last_play_summary: String,
}

impl StoppageVerdict {
    /// The verdict when there is nothing to look at.
    pub fn no_plays() -> Self {
        Self {
            is_stoppage: false,
            confidence: Confidence::Low,
            stoppage_reason: None,
            stoppage_duration_seconds: None,
            game_status: UNKNOWN_GAME_STATUS.to_string(),
            last_play_summary: String::new(),
        }
    }
}

/// Runs explicit detection on the latest play and falls back to the
/// silence heuristic when its text carries no stoppage vocabulary.
pub fn infer_stoppage(
    plays: &[Play<'_>],
    now: DateTime<Utc>,
    silence_threshold_seconds: i64,
) -> StoppageVerdict {
    let Some(last_play) = latest_play(plays) else {
        return StoppageVerdict::no_plays();
    };

    let elapsed_seconds = last_play.seconds_since(now);
    let type_text = last_play.type_text();
    let game_status = format_game_status(last_play);
    let last_play_summary = last_play_summary(last_play);

    if let Some(signal) = detect_explicit_stoppage(type_text, last_play.short_text()) {
        tracing::debug!(
            signal = ?signal,
            elapsed_seconds = ?elapsed_seconds,
            "Explicit stoppage signal in latest play"
        );

        let stoppage_reason = if type_text.is_empty() {
            GENERIC_STOPPAGE_REASON.to_string()
        } else {
            type_text.to_string()
        };

        return StoppageVerdict {
            is_stoppage: true,
            confidence: Confidence::High,
            stoppage_reason: Some(stoppage_reason),
            stoppage_duration_seconds: elapsed_seconds.map(|elapsed| elapsed.max(0)),
            game_status,
            last_play_summary,
        };
    }

    if let Some(silence) = silent_stoppage_duration(elapsed_seconds, silence_threshold_seconds) {
        tracing::debug!(
            silence_seconds = silence,
            threshold_seconds = silence_threshold_seconds,
            "No events within silence threshold"
        );

        return StoppageVerdict {
            is_stoppage: true,
            confidence: Confidence::Medium,
            stoppage_reason: Some(silence_reason(silence_threshold_seconds)),
            stoppage_duration_seconds: Some(silence),
            game_status,
            last_play_summary,
        };
    }

    StoppageVerdict {
        is_stoppage: false,
        confidence: Confidence::Medium,
        stoppage_reason: None,
        stoppage_duration_seconds: None,
        game_status,
        last_play_summary,
    }
}

/// `Q<period> <clock>`, with `?` for an unknown period.
pub fn format_game_status(play: &Play<'_>) -> String {
    let period = play
        .period_number()
        .map(|number| number.to_string())
        .unwrap_or_else(|| "?".to_string());
    let clock = play.clock_display().unwrap_or_default();

    format!("Q{period} {clock}").trim().to_string()
}

fn last_play_summary(play: &Play<'_>) -> String {
    [play.short_text(), play.type_text()]
        .into_iter()
        .find(|text| !text.is_empty())
        .unwrap_or_default()
        .to_string()
}
