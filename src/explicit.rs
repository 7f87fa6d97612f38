use serde::Serialize;

const END_OF_PERIOD_WORDS: [&str; 3] = ["quarter", "half", "game"];

/// Which piece of stoppage vocabulary matched a play's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StoppageSignal {
    Timeout,
    Review,
    TwoMinuteWarning,
    EndOfPeriod,
}

/// Checks the play-type text first, then the short text. Either field
/// matching on its own is enough.
pub fn detect_explicit_stoppage(type_text: &str, short_text: &str) -> Option<StoppageSignal> {
    match_stoppage_text(type_text).or_else(|| match_stoppage_text(short_text))
}

/// Case-insensitive substring match of a single field against the
/// stoppage vocabulary. "end" and the period word must share the field but
/// need not be adjacent.
pub fn match_stoppage_text(text: &str) -> Option<StoppageSignal> {
    if text.is_empty() {
        return None;
    }

    let lower_text = text.to_lowercase();

    if lower_text.contains("timeout") {
        return Some(StoppageSignal::Timeout);
    }
    if is_end_of_period(&lower_text) {
        return Some(StoppageSignal::EndOfPeriod);
    }
    if lower_text.contains("two-minute warning") {
        return Some(StoppageSignal::TwoMinuteWarning);
    }
    if lower_text.contains("review") {
        return Some(StoppageSignal::Review);
    }

    None
}

fn is_end_of_period(lower_text: &str) -> bool {
    lower_text.contains("end")
        && END_OF_PERIOD_WORDS
            .iter()
            .any(|period_word| lower_text.contains(period_word))
}

#[cfg(test)]
mod tests {
    use super::{detect_explicit_stoppage, match_stoppage_text, StoppageSignal};

    #[test]
    fn matches_vocabulary_case_insensitively() {
        assert_eq!(
            match_stoppage_text("Timeout KC"),
            Some(StoppageSignal::Timeout)
        );
        assert_eq!(
            match_stoppage_text("OFFICIAL REVIEW"),
            Some(StoppageSignal::Review)
        );
        assert_eq!(
            match_stoppage_text("Two-Minute Warning"),
            Some(StoppageSignal::TwoMinuteWarning)
        );
        assert_eq!(
            match_stoppage_text("End Period"),
            None,
            "End without a period word is not a stoppage"
        );
    }

    #[test]
    fn end_and_period_word_need_not_be_adjacent() {
        assert_eq!(
            match_stoppage_text("End of 2nd Quarter"),
            Some(StoppageSignal::EndOfPeriod)
        );
        assert_eq!(
            match_stoppage_text("Halftime - end"),
            Some(StoppageSignal::EndOfPeriod)
        );
        assert_eq!(
            match_stoppage_text("END GAME"),
            Some(StoppageSignal::EndOfPeriod)
        );
    }

    #[test]
    fn end_and_period_word_must_share_a_field() {
        assert_eq!(detect_explicit_stoppage("End Around", "Quarterback sneak"), None);
    }

    #[test]
    fn short_text_alone_is_sufficient() {
        assert_eq!(
            detect_explicit_stoppage("", "Timeout #2 by NE at 03:12."),
            Some(StoppageSignal::Timeout)
        );
        assert_eq!(
            detect_explicit_stoppage("Penalty", "Play under review"),
            Some(StoppageSignal::Review)
        );
    }

    #[test]
    fn ordinary_plays_do_not_match() {
        assert_eq!(
            detect_explicit_stoppage("Rush", "Henry up the middle for 4 yards"),
            None
        );
        assert_eq!(detect_explicit_stoppage("", ""), None);
    }
}
