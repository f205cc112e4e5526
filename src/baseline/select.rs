//! Candidate scoring and per-direction selection.

use log::debug;

use super::segment::Segment;
use crate::config::BaselineConfig;

/// Score one candidate; higher is better.
///
/// Combines the fit quality with how plausible the window is as an ohmic
/// baseline: long windows are preferred up to a cap, steep fits are
/// penalized (an ohmic baseline is nearly flat), spans in a physically
/// reasonable width band earn a bonus, and quiet windows earn up to the
/// low-noise bonus. The slope and noise terms multiply by
/// `config.current_scale`, which maps the caller's current unit onto the
/// microamp-calibrated weights.
pub(crate) fn score(segment: &Segment, config: &BaselineConfig) -> f64 {
    let w = &config.weights;

    let fit_term = w.r2_weight * segment.r2;
    let length_term = w.length_weight * (segment.length() as f64 / w.length_cap).min(1.0);
    let slope_penalty = (segment.slope.abs() * config.current_scale).min(w.slope_penalty_cap);
    let span = segment.voltage_span.abs();
    let span_term = if span >= w.span_lo && span <= w.span_hi {
        w.span_bonus
    } else {
        0.0
    };
    let noise_term = (w.noise_bonus - segment.std_current * config.current_scale).max(0.0);

    fit_term + length_term - slope_penalty + span_term + noise_term
}

/// Pick the best candidate for each scan direction.
///
/// Candidates whose end lies at or before `turning_point + tolerance` compete
/// for the forward scan; candidates whose start lies at or after
/// `turning_point - tolerance` compete for the reverse scan. The tolerance
/// admits segments adjacent to a slightly mis-estimated turning sample, so a
/// segment can compete in both buckets. An empty bucket yields `None`, which
/// the synthesizer resolves with the whole-half fallback fit.
///
/// Score ties break toward the longer segment, then the smaller start index.
pub fn select_best(
    segments: &[Segment],
    turning_point: usize,
    config: &BaselineConfig,
) -> (Option<Segment>, Option<Segment>) {
    let tolerance = config.turning_tolerance;

    let forward = pick_best(
        segments
            .iter()
            .filter(|s| s.end_idx <= turning_point + tolerance),
        config,
    );
    let reverse = pick_best(
        segments
            .iter()
            .filter(|s| s.start_idx >= turning_point.saturating_sub(tolerance)),
        config,
    );

    debug!(
        "selector: forward {}, reverse {}",
        describe(&forward),
        describe(&reverse)
    );
    (forward, reverse)
}

fn pick_best<'a>(
    candidates: impl Iterator<Item = &'a Segment>,
    config: &BaselineConfig,
) -> Option<Segment> {
    candidates
        .map(|s| (score(s, config), s))
        .max_by(|(score_a, a), (score_b, b)| {
            score_a
                .total_cmp(score_b)
                .then_with(|| a.length().cmp(&b.length()))
                .then_with(|| b.start_idx.cmp(&a.start_idx))
        })
        .map(|(_, s)| *s)
}

fn describe(winner: &Option<Segment>) -> String {
    match winner {
        Some(s) => format!("[{}..{}] (r2 {:.4})", s.start_idx, s.end_idx, s.r2),
        None => "none".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(start_idx: usize, end_idx: usize) -> Segment {
        Segment {
            start_idx,
            end_idx,
            slope: 1.0e-6,
            intercept: 0.0,
            r2: 0.99,
            voltage_span: 0.1,
            mean_current: 5.0e-6,
            std_current: 1.0e-7,
        }
    }

    #[test]
    fn test_buckets_split_around_the_turning_point() {
        let segments = vec![segment(0, 30), segment(60, 90)];

        let (forward, reverse) = select_best(&segments, 50, &BaselineConfig::default());
        assert_eq!(forward.unwrap().start_idx, 0);
        assert_eq!(reverse.unwrap().start_idx, 60);
    }

    #[test]
    fn test_tolerance_admits_segments_near_the_turning_point() {
        // Ends 3 samples past the turning point: inside the default
        // 5-sample tolerance, so it still counts as a forward candidate.
        let segments = vec![segment(20, 53)];

        let (forward, reverse) = select_best(&segments, 50, &BaselineConfig::default());
        assert!(forward.is_some());
        assert!(reverse.is_none());
    }

    #[test]
    fn test_a_segment_can_compete_in_both_buckets() {
        let segments = vec![segment(48, 53)];

        let (forward, reverse) = select_best(&segments, 50, &BaselineConfig::default());
        assert_eq!(forward, reverse);
        assert!(forward.is_some());
    }

    #[test]
    fn test_empty_bucket_yields_none() {
        let (forward, reverse) = select_best(&[], 50, &BaselineConfig::default());
        assert!(forward.is_none());
        assert!(reverse.is_none());
    }

    #[test]
    fn test_better_fit_outscores_worse_fit() {
        let good = Segment {
            r2: 0.999,
            ..segment(0, 19)
        };
        let poor = Segment {
            r2: 0.95,
            ..segment(20, 39)
        };

        let (forward, _) = select_best(&[poor, good], 100, &BaselineConfig::default());
        assert_eq!(forward.unwrap().start_idx, 0);
    }

    #[test]
    fn test_steep_segments_are_penalized() {
        let config = BaselineConfig::default();
        let flat = segment(0, 19);
        let steep = Segment {
            slope: 2.0e-5,
            ..segment(20, 39)
        };

        assert!(score(&flat, &config) > score(&steep, &config));

        let (forward, _) = select_best(&[steep, flat], 100, &config);
        assert_eq!(forward.unwrap().start_idx, 0);
    }

    #[test]
    fn test_current_scale_drives_the_slope_penalty() {
        // In microamperes the same physical slope is a million times
        // larger numerically; the scale keeps the penalty identical.
        let amps = BaselineConfig::default();
        let microamps = BaselineConfig {
            current_scale: 1.0,
            ..BaselineConfig::default()
        };

        let in_amps = segment(0, 19);
        let in_microamps = Segment {
            slope: 1.0,
            std_current: 1.0e-1,
            ..segment(0, 19)
        };

        let delta = score(&in_amps, &amps) - score(&in_microamps, &microamps);
        assert!(delta.abs() < 1e-9, "delta = {delta}");
    }

    #[test]
    fn test_reasonable_span_earns_the_bonus() {
        let config = BaselineConfig::default();
        let inside = segment(0, 19);
        let outside = Segment {
            voltage_span: 0.45,
            ..segment(0, 19)
        };

        let diff = score(&inside, &config) - score(&outside, &config);
        assert!((diff - config.weights.span_bonus).abs() < 1e-12);
    }

    #[test]
    fn test_score_ties_break_toward_longer_then_earlier() {
        let short = segment(10, 24);
        let long = segment(30, 49);
        // Same score terms except capped length: equalize by capping both.
        let config = BaselineConfig {
            weights: crate::config::ScoreWeights {
                length_cap: 10.0,
                ..Default::default()
            },
            ..BaselineConfig::default()
        };

        let (forward, _) = select_best(&[short, long], 100, &config);
        assert_eq!(forward.unwrap().start_idx, 30);

        let twin_a = segment(10, 24);
        let twin_b = segment(40, 54);
        let (forward, _) = select_best(&[twin_b, twin_a], 100, &config);
        assert_eq!(forward.unwrap().start_idx, 10);
    }
}
