use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::ordering::latest_play;
use crate::play::Play;
use crate::verdict::{infer_stoppage, Confidence};

/// Field names the upstream payload may carry its play list under, in order
/// of preference.
pub const PLAY_LIST_FIELDS: [&str; 2] = ["items", "plays"];
pub const MISSING_DURATION_PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedResponse {
    pub game_id: String,
    pub is_stoppage: bool,
    pub confidence: Confidence,
    pub stoppage_reason: Option<String>,
    pub stoppage_duration_seconds: Option<i64>,
    pub stoppage_duration_pretty: String,
    pub game_status: String,
    pub last_play_summary: String,
    pub total_plays: usize,
    pub debug: ResponseDebug,
}

/// Diagnostic payload. Nothing downstream reads it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDebug {
    pub last_play: Value,
}

/// The play list of a raw payload. The first preferred field that is present
/// and not null is used; if that value is not an array the list is empty.
pub fn select_play_list(raw: &Value) -> &[Value] {
    PLAY_LIST_FIELDS
        .iter()
        .find_map(|field_name| raw.get(field_name).filter(|value| !value.is_null()))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

pub fn to_unified_response(
    game_id: &str,
    raw: &Value,
    now: DateTime<Utc>,
    silence_threshold_seconds: i64,
) -> UnifiedResponse {
    let raw_plays = select_play_list(raw);
    let plays = raw_plays.iter().map(Play::from_value).collect::<Vec<Play<'_>>>();
    let verdict = infer_stoppage(&plays, now, silence_threshold_seconds);
    let last_play = latest_play(&plays)
        .map(|play| play.raw().clone())
        .unwrap_or(Value::Null);

    tracing::info!(
        game_id,
        total_plays = raw_plays.len(),
        is_stoppage = verdict.is_stoppage,
        confidence = ?verdict.confidence,
        "Evaluated game status"
    );

    UnifiedResponse {
        game_id: game_id.to_string(),
        is_stoppage: verdict.is_stoppage,
        confidence: verdict.confidence,
        stoppage_duration_pretty: format_duration(
            verdict.stoppage_duration_seconds.map(|seconds| seconds as f64),
        ),
        stoppage_reason: verdict.stoppage_reason,
        stoppage_duration_seconds: verdict.stoppage_duration_seconds,
        game_status: verdict.game_status,
        last_play_summary: verdict.last_play_summary,
        total_plays: raw_plays.len(),
        debug: ResponseDebug { last_play },
    }
}

/// Renders `125` as `2m 5s` and `45` as `45s`. Negative values clamp to
/// zero; missing or non-finite values render as the placeholder.
pub fn format_duration(seconds: Option<f64>) -> String {
    let Some(seconds) = seconds.filter(|value| value.is_finite()) else {
        return MISSING_DURATION_PLACEHOLDER.to_string();
    };

    let whole_seconds = seconds.floor().max(0.0) as u64;
    let minutes = whole_seconds / 60;
    let remainder = whole_seconds % 60;

    if minutes > 0 {
        format!("{minutes}m {remainder}s")
    } else {
        format!("{remainder}s")
    }
}
