use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

const NAIVE_TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%MZ",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// A single play from the upstream feed, read leniently.
///
/// Every field is optional and tolerates a wrong JSON type: anything that
/// cannot be read degrades to `None` (or an empty string for the text
/// accessors) instead of failing.
#[derive(Debug, Clone)]
pub struct Play<'a> {
    raw: &'a Value,
    sequence_number: Option<f64>,
    wallclock: Option<DateTime<Utc>>,
    period_number: Option<i64>,
    clock_display: Option<&'a str>,
    type_text: &'a str,
    short_text: &'a str,
}

impl<'a> Play<'a> {
    pub fn from_value(raw: &'a Value) -> Self {
        Self {
            raw,
            sequence_number: value_at(raw, &["sequenceNumber"]).and_then(parse_sequence_number),
            wallclock: text_at(raw, &["wallclock"]).and_then(parse_timestamp),
            period_number: value_at(raw, &["period", "number"]).and_then(parse_period_number),
            clock_display: text_at(raw, &["clock", "displayValue"]),
            type_text: first_non_empty(&[
                text_at(raw, &["type", "text"]),
                text_at(raw, &["type", "alternativeText"]),
            ]),
            short_text: first_non_empty(&[
                text_at(raw, &["shortText"]),
                text_at(raw, &["shortAlternativeText"]),
            ]),
        }
    }

    pub fn raw(&self) -> &'a Value {
        self.raw
    }

    pub fn sequence_number(&self) -> Option<f64> {
        self.sequence_number
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.wallclock
    }

    pub fn period_number(&self) -> Option<i64> {
        self.period_number
    }

    pub fn clock_display(&self) -> Option<&'a str> {
        self.clock_display
    }

    /// `type.text`, falling back to `type.alternativeText`.
    pub fn type_text(&self) -> &'a str {
        self.type_text
    }

    /// `shortText`, falling back to `shortAlternativeText`.
    pub fn short_text(&self) -> &'a str {
        self.short_text
    }

    /// Whole seconds elapsed between the play's wallclock and `now`, floored.
    /// Negative when the wallclock lies in the future.
    pub fn seconds_since(&self, now: DateTime<Utc>) -> Option<i64> {
        let wallclock = self.wallclock?;
        let elapsed_millis = now.signed_duration_since(wallclock).num_milliseconds();
        Some(elapsed_millis.div_euclid(1000))
    }
}

impl<'a> From<&'a Value> for Play<'a> {
    fn from(raw: &'a Value) -> Self {
        Play::from_value(raw)
    }
}

/// Parses the timestamp shapes the feed is known to emit. Timestamps without
/// an offset are read as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Ok(parsed) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Some(parsed) = NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
    {
        return Some(parsed.and_utc());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

pub(crate) fn value_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(value, |current, key| current.get(key))
        .filter(|found| !found.is_null())
}

pub(crate) fn text_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    value_at(value, path).and_then(Value::as_str)
}

fn first_non_empty<'a>(candidates: &[Option<&'a str>]) -> &'a str {
    candidates
        .iter()
        .flatten()
        .copied()
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

fn parse_sequence_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };

    number.is_finite().then_some(number)
}

fn parse_period_number(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.is_finite() && float.fract() == 0.0)
                .map(|float| float as i64)
        }),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
}
