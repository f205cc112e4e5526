//! Greedy overlap resolution between candidate segments.

use log::debug;

use super::segment::Segment;

/// Drop candidates that re-describe a region an already-kept, better-fitting
/// segment covers.
///
/// Candidates are visited best fit first. Ties on `r2` resolve to the window
/// the finder enumerated earlier (smaller start index, then smaller end
/// index), so repeated runs keep the same survivor set. A candidate is
/// dropped when it shares more than `max_overlap` of the smaller of the two
/// window lengths with any kept segment; the ratio is taken against the
/// smaller window so a long candidate cannot absorb an already-kept short
/// one.
///
/// Adjacent and nested windows over the same flat region are near-duplicates
/// of each other; keeping only the best-fitting one spares the selector from
/// disambiguating many near-identical candidates.
pub fn remove_overlaps(mut segments: Vec<Segment>, max_overlap: f64) -> Vec<Segment> {
    let candidates = segments.len();
    segments.sort_by(|a, b| {
        b.r2.total_cmp(&a.r2)
            .then_with(|| a.start_idx.cmp(&b.start_idx))
            .then_with(|| a.end_idx.cmp(&b.end_idx))
    });

    let mut kept: Vec<Segment> = Vec::new();
    for seg in segments {
        let duplicate = kept.iter().any(|k| {
            let shorter = seg.length().min(k.length()) as f64;
            seg.overlap(k) as f64 / shorter > max_overlap
        });
        if !duplicate {
            kept.push(seg);
        }
    }

    debug!(
        "overlap resolver: kept {} of {} candidates",
        kept.len(),
        candidates
    );
    kept
}
