//! Sliding-window enumeration of candidate linear segments.

use log::debug;

use super::segment::Segment;
use crate::config::BaselineConfig;
use crate::fit::RunningFit;

/// Enumerate every window that fits a line well enough to be a candidate
/// baseline region.
///
/// For every start index, windows grow one sample at a time up to
/// `max_length`. A window is emitted as a [`Segment`] when it spans at least
/// `min_span` volts and its least-squares fit reaches `r2_threshold`.
/// Windows containing non-finite samples are skipped; since every longer
/// window from the same start would contain the same sample, the growth
/// stops there and enumeration resumes at the next start index.
///
/// The sweep is exhaustive over all placements and sizes: flat regions show
/// up at unpredictable positions and extents, and a single heuristic window
/// misses some of them. Moments are accumulated incrementally, so the cost
/// is one multiply-add per visited sample, `O(n * max_length)` overall,
/// fast for the few thousand samples of a typical sweep.
///
/// Segments are emitted in enumeration order: ascending start index, then
/// ascending end index. Degenerate input (shorter than `min_length`) yields
/// an empty vec, never an error.
pub fn find_segments(voltage: &[f64], current: &[f64], config: &BaselineConfig) -> Vec<Segment> {
    let n = voltage.len().min(current.len());
    let min_length = config.min_length.max(2);
    if n < min_length {
        return Vec::new();
    }

    let mut segments = Vec::new();
    for start in 0..=(n - min_length) {
        let limit = start + config.max_length.min(n - start);
        let mut acc = RunningFit::default();
        for end in start..limit {
            let (v, c) = (voltage[end], current[end]);
            if !v.is_finite() || !c.is_finite() {
                // Every longer window from this start contains this sample.
                break;
            }
            acc.push(v, c);

            if end + 1 - start < min_length {
                continue;
            }
            let span = v - voltage[start];
            if span.abs() < config.min_span {
                continue;
            }
            let Some(fit) = acc.line() else {
                continue;
            };
            if fit.r2 < config.r2_threshold {
                continue;
            }
            segments.push(Segment {
                start_idx: start,
                end_idx: end,
                slope: fit.slope,
                intercept: fit.intercept,
                r2: fit.r2,
                voltage_span: span,
                mean_current: fit.mean_y,
                std_current: fit.std_y,
            });
        }
    }

    debug!(
        "segment finder: {} samples yielded {} candidate windows",
        n,
        segments.len()
    );
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| -0.5 + i as f64 / (n - 1) as f64).collect()
    }

    #[test]
    fn test_linear_trace_yields_candidates_everywhere() {
        let voltage = ramp(60);
        let current: Vec<f64> = voltage.iter().map(|&v| 2.0e-6 * v + 5.0e-6).collect();

        let segments = find_segments(&voltage, &current, &BaselineConfig::default());
        assert!(!segments.is_empty());
        for seg in &segments {
            assert!(seg.r2 >= 0.95);
            assert!(seg.voltage_span.abs() >= 0.02);
            assert!(seg.length() >= 5);
            assert!(seg.length() <= 50);
            assert!((seg.slope - 2.0e-6).abs() < 1.0e-12);
        }
    }

    #[test]
    fn test_emission_order_is_start_then_end() {
        let voltage = ramp(30);
        let current = voltage.clone();

        let segments = find_segments(&voltage, &current, &BaselineConfig::default());
        for pair in segments.windows(2) {
            let earlier = (pair[0].start_idx, pair[0].end_idx);
            let later = (pair[1].start_idx, pair[1].end_idx);
            assert!(earlier < later);
        }
    }

    #[test]
    fn test_narrow_span_windows_are_gated() {
        // 1 mV across the whole trace: no window can span 20 mV.
        let voltage: Vec<f64> = (0..40).map(|i| i as f64 * 2.5e-5).collect();
        let current: Vec<f64> = voltage.iter().map(|&v| 3.0 * v).collect();

        let segments = find_segments(&voltage, &current, &BaselineConfig::default());
        assert!(segments.is_empty());
    }

    #[test]
    fn test_poor_fits_are_gated() {
        let voltage = ramp(40);
        let current: Vec<f64> = (0..40)
            .map(|i| if i % 2 == 0 { 1.0e-5 } else { 0.0 })
            .collect();

        let segments = find_segments(&voltage, &current, &BaselineConfig::default());
        assert!(segments.is_empty());
    }

    #[test]
    fn test_non_finite_samples_exclude_their_windows() {
        let voltage = ramp(40);
        let mut current: Vec<f64> = voltage.iter().map(|&v| v * 1.0e-6).collect();
        current[20] = f64::NAN;

        let segments = find_segments(&voltage, &current, &BaselineConfig::default());
        assert!(!segments.is_empty());
        for seg in &segments {
            assert!(
                seg.end_idx < 20 || seg.start_idx > 20,
                "window [{}, {}] contains the NaN sample",
                seg.start_idx,
                seg.end_idx
            );
        }
    }

    #[test]
    fn test_short_input_yields_nothing() {
        assert!(find_segments(&[], &[], &BaselineConfig::default()).is_empty());
        assert!(find_segments(&[0.0, 0.1], &[1.0, 2.0], &BaselineConfig::default()).is_empty());
    }
}
