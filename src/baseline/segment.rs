//! Candidate linear-region value object.

use serde::{Deserialize, Serialize};

/// A contiguous run of samples whose current is well approximated by a line
/// in voltage: a candidate baseline region.
///
/// Segments are materialized by the finder only after their fit passes the
/// R² and span gates, and are never mutated afterwards. The fit metadata is
/// serializable so report layers can annotate plots with it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// First sample index, inclusive.
    pub start_idx: usize,
    /// Last sample index, inclusive; always greater than `start_idx`.
    pub end_idx: usize,
    /// Slope of the fitted line `current ≈ slope * voltage + intercept`.
    pub slope: f64,
    /// Intercept of the fitted line.
    pub intercept: f64,
    /// Coefficient of determination of the fit, in [0, 1].
    pub r2: f64,
    /// Signed `voltage[end_idx] - voltage[start_idx]`.
    pub voltage_span: f64,
    /// Mean current inside the segment.
    pub mean_current: f64,
    /// Standard deviation of current inside the segment.
    pub std_current: f64,
}

impl Segment {
    /// Number of samples covered, both endpoints included.
    #[inline]
    pub fn length(&self) -> usize {
        self.end_idx - self.start_idx + 1
    }

    /// Number of samples shared with another segment.
    #[inline]
    pub fn overlap(&self, other: &Segment) -> usize {
        let lo = self.start_idx.max(other.start_idx);
        let hi = self.end_idx.min(other.end_idx);
        (hi + 1).saturating_sub(lo)
    }

    /// Evaluate the fitted line at a voltage.
    #[inline]
    pub fn predict(&self, voltage: f64) -> f64 {
        self.slope * voltage + self.intercept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(start_idx: usize, end_idx: usize) -> Segment {
        Segment {
            start_idx,
            end_idx,
            slope: 1.0,
            intercept: 0.0,
            r2: 1.0,
            voltage_span: 0.1,
            mean_current: 0.0,
            std_current: 0.0,
        }
    }

    #[test]
    fn test_length_is_inclusive() {
        assert_eq!(segment(3, 7).length(), 5);
    }

    #[test]
    fn test_overlap_counts_shared_samples() {
        assert_eq!(segment(0, 9).overlap(&segment(5, 14)), 5);
        assert_eq!(segment(5, 14).overlap(&segment(0, 9)), 5);
        assert_eq!(segment(0, 4).overlap(&segment(5, 9)), 0);
        assert_eq!(segment(0, 20).overlap(&segment(5, 9)), 5);
    }

    #[test]
    fn test_predict_evaluates_the_line() {
        let seg = Segment {
            slope: 2.0,
            intercept: -1.0,
            ..segment(0, 1)
        };
        assert_eq!(seg.predict(0.5), 0.0);
        assert_eq!(seg.predict(1.0), 1.0);
    }
}
