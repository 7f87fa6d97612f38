/// Default number of seconds of feed silence after which a stoppage is
/// assumed. A live feed normally emits at least one play per minute.
pub const DEFAULT_SILENCE_THRESHOLD_SECONDS: i64 = 60;

/// Returns the silence duration when it is strictly longer than the
/// threshold. Unknown elapsed time never signals a stoppage.
pub fn silent_stoppage_duration(elapsed_seconds: Option<i64>, threshold_seconds: i64) -> Option<i64> {
    elapsed_seconds.filter(|elapsed| *elapsed > threshold_seconds)
}

pub fn silence_reason(threshold_seconds: i64) -> String {
    format!("Possible stoppage (no events > {threshold_seconds}s)")
}

#[cfg(test)]
mod tests {
    use super::{silence_reason, silent_stoppage_duration, DEFAULT_SILENCE_THRESHOLD_SECONDS};

    #[test]
    fn threshold_is_exclusive() {
        assert_eq!(
            silent_stoppage_duration(Some(60), DEFAULT_SILENCE_THRESHOLD_SECONDS),
            None
        );
        assert_eq!(
            silent_stoppage_duration(Some(61), DEFAULT_SILENCE_THRESHOLD_SECONDS),
            Some(61)
        );
    }

    #[test]
    fn abstains_without_elapsed_time() {
        assert_eq!(silent_stoppage_duration(None, 0), None);
    }

    #[test]
    fn future_wallclocks_never_trigger() {
        assert_eq!(
            silent_stoppage_duration(Some(-300), DEFAULT_SILENCE_THRESHOLD_SECONDS),
            None
        );
    }

    #[test]
    fn reason_names_the_threshold() {
        assert_eq!(
            silence_reason(DEFAULT_SILENCE_THRESHOLD_SECONDS),
            "Possible stoppage (no events > 60s)"
        );
        assert_eq!(silence_reason(90), "Possible stoppage (no events > 90s)");
    }
}
