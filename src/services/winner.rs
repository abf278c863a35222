// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Quest winner determination.
//!
//! Ranking, best first:
//! 1. Higher score. A missing score ranks below every present score.
//! 2. Lower elapsed time. A missing time ranks after every present time.
//! 3. Earlier position in the participant list.

use crate::models::Participant;
use std::cmp::Ordering;

/// Compare two participants' results, `Greater` meaning `a` beats `b`.
///
/// Position is not considered, so two identical results compare `Equal`.
pub fn rank(a: &Participant, b: &Participant) -> Ordering {
    // Option orders None below Some, which is what we want for scores
    a.score.cmp(&b.score).then_with(|| match (a.time, b.time) {
        (Some(ta), Some(tb)) => tb.cmp(&ta),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    })
}

/// Pick the winner of a quest, or `None` for an empty list.
///
/// The candidate only changes when a later participant strictly outranks it,
/// so full ties go to the earliest participant.
pub fn determine_winner(participants: &[Participant]) -> Option<&Participant> {
    let (first, rest) = participants.split_first()?;
    Some(rest.iter().fold(first, |best, current| {
        if rank(current, best) == Ordering::Greater {
            current
        } else {
            best
        }
    }))
}
