//! Baseline synthesis across scan halves.
//!
//! The winning segment of each direction carries a linear model of the ohmic
//! current; the synthesizer evaluates that model at every sample of the
//! half, extrapolating well outside the segment's own window: the
//! non-faradaic response is linear in voltage across the whole half, not
//! just inside the best-fit region. Halves with no winning segment fall back
//! to a whole-half fit.

use log::warn;
use serde::{Deserialize, Serialize};

use super::segment::Segment;
use crate::fit::fit_line;
use crate::trace::Trace;

/// Baseline estimate for one full sweep, split at the turning point.
///
/// `forward_baseline` covers samples `[0, turning_point]` and
/// `reverse_baseline` covers `[turning_point + 1, n - 1]`, so the two
/// lengths always sum to the trace length. A `None` segment marks the half
/// as fallback-derived: downstream consumers should treat that half as
/// lower-confidence (e.g. flag "fallback baseline used" on a report).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineResult {
    /// Baseline current for the forward scan half.
    pub forward_baseline: Vec<f64>,
    /// Baseline current for the reverse scan half.
    pub reverse_baseline: Vec<f64>,
    /// Winning forward segment, absent when the fallback fit was used.
    pub forward_segment: Option<Segment>,
    /// Winning reverse segment, absent when the fallback fit was used.
    pub reverse_segment: Option<Segment>,
    /// Index of the sweep's turning sample.
    pub turning_point: usize,
}

impl BaselineResult {
    /// True when either half came from the whole-half fallback fit.
    pub fn is_fallback(&self) -> bool {
        self.forward_segment.is_none() || self.reverse_segment.is_none()
    }

    /// Both halves concatenated back into one full-sweep baseline.
    pub fn baseline_concat(&self) -> Vec<f64> {
        let mut baseline =
            Vec::with_capacity(self.forward_baseline.len() + self.reverse_baseline.len());
        baseline.extend_from_slice(&self.forward_baseline);
        baseline.extend_from_slice(&self.reverse_baseline);
        baseline
    }

    /// Baseline-corrected current: `current - baseline`, full sweep length.
    ///
    /// `trace` must be the trace this result was detected from; the
    /// corrected array is what peak analysis consumes downstream.
    pub fn corrected(&self, trace: &Trace) -> Vec<f64> {
        debug_assert_eq!(
            trace.len(),
            self.forward_baseline.len() + self.reverse_baseline.len()
        );
        trace
            .current()
            .iter()
            .zip(self.baseline_concat())
            .map(|(&current, baseline)| current - baseline)
            .collect()
    }
}

/// Build the full-sweep baseline from the per-direction winners.
///
/// Each half with a winning segment gets that segment's line evaluated at
/// every sample of the half; a half without one gets the whole-half
/// fallback fit over its own samples.
pub fn synthesize(
    voltage: &[f64],
    current: &[f64],
    turning_point: usize,
    forward_segment: Option<Segment>,
    reverse_segment: Option<Segment>,
) -> BaselineResult {
    let split = (turning_point + 1).min(voltage.len());
    let (v_forward, v_reverse) = voltage.split_at(split);
    let (c_forward, c_reverse) = current.split_at(split);

    let forward_baseline = half_baseline(v_forward, c_forward, &forward_segment, "forward");
    let reverse_baseline = half_baseline(v_reverse, c_reverse, &reverse_segment, "reverse");

    BaselineResult {
        forward_baseline,
        reverse_baseline,
        forward_segment,
        reverse_segment,
        turning_point,
    }
}

fn half_baseline(
    voltage: &[f64],
    current: &[f64],
    segment: &Option<Segment>,
    direction: &str,
) -> Vec<f64> {
    match segment {
        Some(s) => voltage.iter().map(|&v| s.predict(v)).collect(),
        None => {
            if !voltage.is_empty() {
                warn!("no qualifying {direction} segment; fitting the whole half");
            }
            fallback_fit(voltage, current)
        }
    }
}

/// Whole-half degree-1 fit used when no window qualifies.
///
/// Fits all samples of the half with no windowing and no R² gate, so the
/// result is always a full-length array, at the cost of baseline quality
/// on pathological input. A half with fewer than two samples cannot carry a
/// line and comes back NaN-filled. A half whose voltage never moves has no
/// defined slope; the correct degree-1 limit there is the horizontal line
/// at the mean current.
pub fn fallback_fit(voltage_half: &[f64], current_half: &[f64]) -> Vec<f64> {
    let n = voltage_half.len();
    if n < 2 {
        if n == 1 {
            warn!("scan half has a single sample; emitting NaN baseline");
        }
        return vec![f64::NAN; n];
    }

    match fit_line(voltage_half, current_half) {
        Some(fit) => voltage_half.iter().map(|&v| fit.at(v)).collect(),
        None => {
            let mean = current_half.iter().sum::<f64>() / n as f64;
            vec![mean; n]
        }
    }
}
