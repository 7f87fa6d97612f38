use std::cmp::Ordering;

use crate::play::Play;

/// Chronological comparison of two plays.
///
/// Sequence numbers decide only when both plays carry one and they differ.
/// Otherwise the wallclock decides, with a missing or unparsable wallclock
/// treated as the epoch.
pub fn compare_plays(left: &Play<'_>, right: &Play<'_>) -> Ordering {
    if let (Some(left_sequence), Some(right_sequence)) =
        (left.sequence_number(), right.sequence_number())
    {
        if left_sequence != right_sequence {
            return left_sequence.total_cmp(&right_sequence);
        }
    }

    wallclock_key(left).cmp(&wallclock_key(right))
}

/// The play that sorts last under [`compare_plays`]. Among equal plays the
/// one appearing later in the input wins, matching a stable ascending sort.
pub fn latest_play<'p, 'a>(plays: &'p [Play<'a>]) -> Option<&'p Play<'a>> {
    let latest = plays.iter().max_by(|left, right| compare_plays(left, right));

    if let Some(play) = latest {
        tracing::debug!(
            total_plays = plays.len(),
            sequence_number = ?play.sequence_number(),
            wallclock = ?play.timestamp(),
            "Selected latest play"
        );
    }

    latest
}

fn wallclock_key(play: &Play<'_>) -> i64 {
    play.timestamp()
        .map(|wallclock| wallclock.timestamp_millis())
        .unwrap_or(0)
}
