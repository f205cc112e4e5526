//! Turning-point location for splitting forward and reverse scans.

/// Index of the voltage sample where the sweep reverses direction.
///
/// A CV sweep starts at some potential, drives to a vertex potential, and
/// reverses. The turning point is therefore the extremum farthest in
/// potential from the sweep's starting value: the minimum for the usual
/// sweep that starts high and drives negative, the maximum for a sweep that
/// starts at its lower vertex. Ties between equally extremal samples resolve
/// to the first occurrence.
///
/// Non-finite samples are ignored; the first finite sample anchors the
/// starting potential. Input with at least one finite voltage is a
/// precondition (the [`Trace`](crate::trace::Trace) constructor enforces
/// it); an empty or all-NaN slice returns index 0.
pub fn find_turning_point(voltage: &[f64]) -> usize {
    let start = voltage
        .iter()
        .copied()
        .find(|v| v.is_finite())
        .unwrap_or(0.0);

    let mut min_idx = 0;
    let mut min_v = f64::INFINITY;
    let mut max_idx = 0;
    let mut max_v = f64::NEG_INFINITY;
    for (i, &v) in voltage.iter().enumerate() {
        if !v.is_finite() {
            continue;
        }
        if v < min_v {
            min_v = v;
            min_idx = i;
        }
        if v > max_v {
            max_v = v;
            max_idx = i;
        }
    }

    if (max_v - start).abs() > (min_v - start).abs() {
        max_idx
    } else {
        min_idx
    }
}
