//! # Baseline Detection Pipeline
//!
//! Two-step linear-segment baseline detection for cyclic-voltammetry
//! sweeps, assembled from the stage modules in this directory:
//!
//! 1. **Finder** ([`find_segments`]): sliding-window least-squares sweep
//!    enumerating every window that fits a line well enough.
//! 2. **Overlap resolver** ([`remove_overlaps`]): collapses near-duplicate
//!    windows over the same flat region, best fit first.
//! 3. **Scan splitter** ([`find_turning_point`]): locates the sample where
//!    the sweep reverses.
//! 4. **Selector** ([`select_best`]): scores candidates per direction and
//!    picks one winner for each.
//! 5. **Synthesizer** ([`synthesize`]): extrapolates each winner across
//!    its whole half, falling back to a whole-half fit where no window
//!    qualified.
//!
//! [`BaselineDetector`] runs the stages under one configuration;
//! [`detect_baseline`] is the one-call form with defaults.

mod finder;
mod overlap;
mod scan;
mod segment;
mod select;
mod synth;


pub use finder::find_segments;
pub use overlap::remove_overlaps;
pub use scan::find_turning_point;
pub use segment::Segment;
pub use select::select_best;
pub use synth::{fallback_fit, synthesize, BaselineResult};

use log::debug;

use crate::config::{BaselineConfig, ConfigError};
use crate::trace::Trace;

/// Runs the full detection pipeline under one configuration.
///
/// The detector is plain owned data: cheap to clone, free to share across
/// threads, and stateless between calls. Every [`detect`](Self::detect)
/// allocates and returns fresh output.
#[derive(Debug, Clone, Default)]
pub struct BaselineDetector {
    config: BaselineConfig,
}

impl BaselineDetector {
    /// Build a detector after validating the configuration.
    pub fn new(config: BaselineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &BaselineConfig {
        &self.config
    }

    /// Detect the baseline of one sweep.
    ///
    /// Never fails for a constructed [`Trace`]: halves that defeat the
    /// segment search come back from the fallback fitter, marked by an
    /// absent segment in the result.
    pub fn detect(&self, trace: &Trace) -> BaselineResult {
        let voltage = trace.voltage();
        let current = trace.current();

        let candidates = find_segments(voltage, current, &self.config);
        let resolved = remove_overlaps(candidates, self.config.max_overlap);
        let turning_point = find_turning_point(voltage);
        let (forward, reverse) = select_best(&resolved, turning_point, &self.config);

        debug!(
            "detector: {} samples, turning point {}, {} resolved candidates",
            trace.len(),
            turning_point,
            resolved.len()
        );
        synthesize(voltage, current, turning_point, forward, reverse)
    }
}

/// Detect a baseline with default settings in one call.
///
/// Validates the raw arrays, then runs [`BaselineDetector::detect`].
pub fn detect_baseline(
    voltage: Vec<f64>,
    current: Vec<f64>,
) -> Result<BaselineResult, crate::Error> {
    let trace = Trace::new(voltage, current)?;
    Ok(BaselineDetector::default().detect(&trace))
}
