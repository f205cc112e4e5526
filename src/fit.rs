//! # Least-Squares Line Fitting
//!
//! Degree-1 ordinary least-squares fitting over paired `f64` slices. This is
//! the one numeric kernel shared by the segment finder, the selector's
//! descriptive statistics, and the whole-half fallback fit.
//!
//! Two entry points are provided:
//!
//! - [`fit_line`] fits a complete window in one call.
//! - [`RunningFit`] accumulates moments incrementally so the segment finder
//!   can grow a window one sample at a time at one multiply-add per sample,
//!   instead of refitting every window from scratch.

/// Spread below which a moment sum is treated as zero.
///
/// Guards the slope denominator against voltage plateaus and the R²
/// denominator against perfectly flat current, where floating-point
/// cancellation can leave a tiny negative residue.
const SPREAD_EPS: f64 = 1e-24;

/// Result of a degree-1 least-squares fit of `y` against `x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    /// Slope of the fitted line `y ≈ slope * x + intercept`.
    pub slope: f64,
    /// Intercept of the fitted line.
    pub intercept: f64,
    /// Coefficient of determination, clamped to [0, 1].
    pub r2: f64,
    /// Mean of the dependent values.
    pub mean_y: f64,
    /// Population standard deviation of the dependent values.
    pub std_y: f64,
}

impl LineFit {
    /// Evaluate the fitted line at `x`.
    #[inline]
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Incrementally accumulated raw moments for a degree-1 fit.
///
/// Push `(x, y)` pairs as a window grows, then call [`RunningFit::line`] at
/// any point to solve for the current window. Pushing a non-finite value
/// poisons the accumulator and `line` returns `None`; callers screen
/// samples before pushing.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunningFit {
    n: f64,
    sx: f64,
    sy: f64,
    sxx: f64,
    sxy: f64,
    syy: f64,
}

impl RunningFit {
    /// Add one `(x, y)` pair to the window.
    #[inline]
    pub fn push(&mut self, x: f64, y: f64) {
        self.n += 1.0;
        self.sx += x;
        self.sy += y;
        self.sxx += x * x;
        self.sxy += x * y;
        self.syy += y * y;
    }

    /// Number of accumulated samples.
    #[inline]
    pub fn count(&self) -> usize {
        self.n as usize
    }

    /// Solve the accumulated window.
    ///
    /// Returns `None` for fewer than two samples or when `x` has no spread
    /// (a vertical line has no defined slope). Flat `y` data is reported as
    /// a perfect fit (`r2 = 1.0`): the horizontal line reproduces it exactly.
    pub fn line(&self) -> Option<LineFit> {
        if self.n < 2.0 {
            return None;
        }
        let n = self.n;
        // NaN-poisoned sums normalize to 0.0 through max() and fail here.
        let sxx_c = (self.sxx - self.sx * self.sx / n).max(0.0);
        if sxx_c <= SPREAD_EPS {
            return None;
        }
        let sxy_c = self.sxy - self.sx * self.sy / n;
        let syy_c = (self.syy - self.sy * self.sy / n).max(0.0);

        let slope = sxy_c / sxx_c;
        let mean_y = self.sy / n;
        let intercept = mean_y - slope * self.sx / n;
        if !slope.is_finite() || !intercept.is_finite() {
            // A non-finite y leaks past the x-spread check.
            return None;
        }

        let r2 = if syy_c > SPREAD_EPS {
            let ss_res = (syy_c - slope * sxy_c).max(0.0);
            (1.0 - ss_res / syy_c).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let std_y = (syy_c / n).sqrt();

        Some(LineFit {
            slope,
            intercept,
            r2,
            mean_y,
            std_y,
        })
    }
}

/// Fit `y ≈ slope * x + intercept` over two paired slices.
///
/// Unequal-length slices are fitted over their overlapping prefix.
pub fn fit_line(x: &[f64], y: &[f64]) -> Option<LineFit> {
    let mut acc = RunningFit::default();
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        acc.push(xi, yi);
    }
    acc.line()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_line_is_recovered() {
        let x: Vec<f64> = (0..20).map(|i| -0.5 + i as f64 * 0.05).collect();
        let y: Vec<f64> = x.iter().map(|&v| 3.0 * v - 0.25).collect();

        let fit = fit_line(&x, &y).unwrap();
        assert!((fit.slope - 3.0).abs() < 1e-12);
        assert!((fit.intercept + 0.25).abs() < 1e-12);
        assert!((fit.r2 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_flat_data_is_a_perfect_fit() {
        let x = [0.0, 0.1, 0.2, 0.3];
        let y = [2.5, 2.5, 2.5, 2.5];

        let fit = fit_line(&x, &y).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.r2, 1.0);
        assert_eq!(fit.mean_y, 2.5);
        assert_eq!(fit.std_y, 0.0);
    }

    #[test]
    fn test_noisy_data_lowers_r2() {
        // Alternating residuals around a line: far from a good fit.
        let x: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let y: Vec<f64> = x
            .iter()
            .enumerate()
            .map(|(i, &v)| v + if i % 2 == 0 { 5.0 } else { -5.0 })
            .collect();

        let fit = fit_line(&x, &y).unwrap();
        assert!(fit.r2 < 0.5, "r2 = {}", fit.r2);
    }

    #[test]
    fn test_fewer_than_two_points_has_no_fit() {
        assert!(fit_line(&[], &[]).is_none());
        assert!(fit_line(&[1.0], &[2.0]).is_none());
    }

    #[test]
    fn test_no_x_spread_has_no_fit() {
        let x = [0.2, 0.2, 0.2, 0.2];
        let y = [1.0, 2.0, 3.0, 4.0];
        assert!(fit_line(&x, &y).is_none());
    }

    #[test]
    fn test_nan_poisons_the_accumulator() {
        let x = [0.0, 0.1, f64::NAN, 0.3];
        let y = [1.0, 2.0, 3.0, 4.0];
        assert!(fit_line(&x, &y).is_none());

        let x = [0.0, 0.1, 0.2, 0.3];
        let y = [1.0, 2.0, f64::NAN, 4.0];
        assert!(fit_line(&x, &y).is_none());
    }

    #[test]
    fn test_running_fit_matches_batch_fit() {
        let x: Vec<f64> = (0..50).map(|i| i as f64 * 0.01).collect();
        let y: Vec<f64> = x.iter().map(|&v| -2.0e-6 * v + 4.0e-6).collect();

        let mut acc = RunningFit::default();
        for (&xi, &yi) in x.iter().zip(y.iter()) {
            acc.push(xi, yi);
        }
        let incremental = acc.line().unwrap();
        let batch = fit_line(&x, &y).unwrap();
        assert_eq!(incremental, batch);
        assert_eq!(acc.count(), 50);
    }
}
