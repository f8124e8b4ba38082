use crate::models::ScoredCandidate;

/// Marker spliced into the preview string. Purely illustrative text; the
/// output is never re-parsed as sequence data.
pub const CUT_MARKER: &str = "---CUT---";

/// Render the sequence with the marker replacing the 3 bases at
/// `position + 10` of the top-ranked guide. With no reference position, or
/// one closer than 10 bases to the start, the marker lands at
/// `min(len, 10)`. A marker landing inside the final 3 bases silently
/// truncates the replacement.
pub fn simulated_cut_preview(sequence: &str, reference_position: Option<usize>) -> String {
    let marker_at = match reference_position {
        Some(position) if position >= 10 => position + 10,
        _ => sequence.len().min(10),
    };

    let marker_at = marker_at.min(sequence.len());
    let tail_start = (marker_at + 3).min(sequence.len());

    format!(
        "{}{}{}",
        &sequence[..marker_at],
        CUT_MARKER,
        &sequence[tail_start..]
    )
}

/// Convenience wrapper taking the ranked result set directly.
pub fn preview_from_ranked(sequence: &str, ranked: &[ScoredCandidate]) -> String {
    simulated_cut_preview(sequence, ranked.first().map(|c| c.position))
}
