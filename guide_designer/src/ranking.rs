use std::cmp::Ordering;

use crate::models::ScoredCandidate;

/// Order candidates best-first and truncate to `max_rows`. Primary key is
/// off-target score descending; ties prefer GC content closer to 50%. The
/// sort is stable, so candidates tied on both keys keep scan order.
pub fn rank_candidates(
    mut scored: Vec<ScoredCandidate>,
    max_rows: usize,
) -> Vec<ScoredCandidate> {
    scored.sort_by(|a, b| {
        b.off_target_score
            .partial_cmp(&a.off_target_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                let a_distance = (50.0 - a.gc_score).abs();
                let b_distance = (50.0 - b.gc_score).abs();
                a_distance
                    .partial_cmp(&b_distance)
                    .unwrap_or(Ordering::Equal)
            })
    });

    scored.truncate(max_rows);
    scored
}
