//! # cvbaseline - Baseline Detection for Cyclic Voltammetry
//!
//! `cvbaseline` isolates the ohmic (non-faradaic) background of a
//! cyclic-voltammetry sweep: given a voltage ramp and the measured current
//! response, it finds the flat, linear regions of the forward and reverse
//! scans and synthesizes a continuous baseline across each half. Subtracting
//! that baseline from the raw current is what exposes the redox peaks that
//! downstream analysis cares about.
//!
//! ## Key Features
//!
//! - **Exhaustive segment search**: a sliding-window least-squares sweep
//!   over every window placement and size, because baseline regions vary in
//!   both position and extent and no single heuristic window finds them all.
//!
//! - **Quality gates up front**: windows must span a meaningful potential
//!   range (20 mV by default) and fit a line with R² ≥ 0.95 before they are
//!   ever considered; near-duplicate windows over the same region collapse
//!   to the best-fitting one.
//!
//! - **One winner per scan direction**: candidates are scored on fit
//!   quality, length, flatness, span width, and noise, and the best segment
//!   of each half is extrapolated across the entire half.
//!
//! - **Graceful degradation**: a half with no qualifying window falls back
//!   to a whole-half linear fit, flagged in the result so consumers can
//!   treat it as lower-confidence. Detection never fails on a valid trace.
//!
//! - **Explicit configuration**: every window size, threshold, scoring
//!   weight, and the current-unit scale lives in [`config::BaselineConfig`],
//!   loadable from a partial TOML override file.
//!
//! ## Quick Start
//!
//! ```rust
//! use cvbaseline::prelude::*;
//!
//! // Triangle sweep with a purely ohmic current response.
//! let up: Vec<f64> = (0..100).map(|i| -0.5 + i as f64 / 99.0).collect();
//! let voltage: Vec<f64> = up.iter().chain(up.iter().rev()).copied().collect();
//! let current: Vec<f64> = voltage.iter().map(|&v| 2.0e-6 * v + 5.0e-6).collect();
//!
//! let result = detect_baseline(voltage, current)?;
//!
//! assert_eq!(
//!     result.forward_baseline.len() + result.reverse_baseline.len(),
//!     200
//! );
//! let forward = result.forward_segment.expect("ohmic trace has a forward fit");
//! assert!(forward.r2 > 0.99);
//! # Ok::<(), cvbaseline::Error>(())
//! ```
//!
//! Tuned settings go through [`BaselineDetector`](baseline::BaselineDetector):
//!
//! ```rust
//! use cvbaseline::baseline::BaselineDetector;
//! use cvbaseline::config::BaselineConfig;
//!
//! let config = BaselineConfig {
//!     current_scale: 1.0, // current already in microamperes
//!     ..BaselineConfig::default()
//! };
//! let detector = BaselineDetector::new(config)?;
//! # let _ = detector;
//! # Ok::<(), cvbaseline::config::ConfigError>(())
//! ```
//!
//! ## Input Contract
//!
//! Voltage is in volts; the current unit is the caller's choice but must be
//! consistent with [`config::BaselineConfig::current_scale`] (default
//! assumes amperes carrying microamp-range signals). The two arrays must be
//! equal-length and index-aligned by acquisition order; violations are
//! rejected loudly at [`trace::Trace::new`] rather than recovered, since a
//! baseline silently computed over misaligned data would be worse than an
//! error.

pub mod baseline;
pub mod config;
pub mod error;
pub mod fit;
pub mod trace;

pub use error::Error;

/// Commonly used types, re-exported for one-line imports.
pub mod prelude {
    pub use crate::baseline::{
        detect_baseline, BaselineDetector, BaselineResult, Segment,
    };
    pub use crate::config::{BaselineConfig, ConfigError, ScoreWeights};
    pub use crate::error::Error;
    pub use crate::trace::{Trace, TraceError, TraceSummary};
}
