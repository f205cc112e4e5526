//! # Detector Configuration
//!
//! The instrument software this crate grew out of accumulated several copies
//! of the baseline detector, each with slightly different window sizes,
//! stability thresholds, and scoring constants. All of those knobs live here
//! as one validated [`BaselineConfig`] so tuning happens in one place instead
//! of at scattered call sites.
//!
//! Tuning scripts can ship a partial TOML override file instead of code
//! edits; unset fields keep their defaults:
//!
//! ```toml
//! # baseline.toml
//! min_length = 7
//! r2_threshold = 0.97
//! current_scale = 1.0e9   # nanoamp-range electrode
//!
//! [weights]
//! span_bonus = 15.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors raised while loading or validating a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading a config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML syntax or type error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field value is outside its valid domain.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Weights of the segment selector's score terms.
///
/// The score of a candidate segment is
///
/// ```text
/// score = r2_weight * r2
///       + length_weight * min(length / length_cap, 1)
///       - min(|slope| * current_scale, slope_penalty_cap)
///       + span_bonus            (if span_lo <= |voltage_span| <= span_hi)
///       + max(0, noise_bonus - std_current * current_scale)
/// ```
///
/// where `current_scale` comes from the enclosing [`BaselineConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Weight on the fit's coefficient of determination.
    pub r2_weight: f64,

    /// Weight on the capped length bonus.
    pub length_weight: f64,

    /// Sample count at which the length bonus saturates.
    pub length_cap: f64,

    /// Cap on the scaled steepness penalty.
    pub slope_penalty_cap: f64,

    /// Bonus granted when `|voltage_span|` falls inside `[span_lo, span_hi]`.
    pub span_bonus: f64,

    /// Lower edge (volts) of the rewarded span window.
    pub span_lo: f64,

    /// Upper edge (volts) of the rewarded span window.
    pub span_hi: f64,

    /// Base of the low-noise bonus; scaled current noise is subtracted from it.
    pub noise_bonus: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            r2_weight: 50.0,
            length_weight: 30.0,
            length_cap: 20.0,
            slope_penalty_cap: 10.0,
            span_bonus: 10.0,
            span_lo: 0.05,
            span_hi: 0.3,
            noise_bonus: 10.0,
        }
    }
}

/// All tunable parameters of the baseline detection pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaselineConfig {
    /// Minimum candidate window length in samples.
    pub min_length: usize,

    /// Maximum candidate window length in samples.
    pub max_length: usize,

    /// R² gate a window must pass to become a candidate.
    pub r2_threshold: f64,

    /// Minimum `|voltage span|` in volts a window must cover. A window
    /// narrower than this is not distinguishable from noise.
    pub min_span: f64,

    /// Overlap fraction above which a candidate is dropped as a duplicate
    /// of an already-kept segment.
    pub max_overlap: f64,

    /// Slack in samples around the turning point when bucketing candidates
    /// into forward and reverse scans.
    pub turning_tolerance: usize,

    /// Multiplier mapping current units onto the score terms, which are
    /// calibrated for microamp-range magnitudes. The default `1e6` assumes
    /// current in amperes; pass `1.0` for current already in microamperes,
    /// or `1e9`-scale values for nanoamp-range electrodes.
    pub current_scale: f64,

    /// Selector score weights.
    pub weights: ScoreWeights,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            min_length: 5,
            max_length: 50,
            r2_threshold: 0.95,
            min_span: 0.02,
            max_overlap: 0.6,
            turning_tolerance: 5,
            current_scale: 1.0e6,
            weights: ScoreWeights::default(),
        }
    }
}

impl BaselineConfig {
    /// Load a partial configuration from a TOML file, merged over defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a partial configuration from a TOML string, merged over defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations no detector run could honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_length < 2 {
            return Err(ConfigError::Invalid(format!(
                "min_length must be at least 2 samples, got {}",
                self.min_length
            )));
        }
        if self.max_length < self.min_length {
            return Err(ConfigError::Invalid(format!(
                "max_length ({}) must be >= min_length ({})",
                self.max_length, self.min_length
            )));
        }
        if !(0.0..=1.0).contains(&self.r2_threshold) {
            return Err(ConfigError::Invalid(format!(
                "r2_threshold must be in [0, 1], got {}",
                self.r2_threshold
            )));
        }
        if !self.min_span.is_finite() || self.min_span < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "min_span must be a finite non-negative voltage, got {}",
                self.min_span
            )));
        }
        if !(0.0..=1.0).contains(&self.max_overlap) {
            return Err(ConfigError::Invalid(format!(
                "max_overlap must be in [0, 1], got {}",
                self.max_overlap
            )));
        }
        if !self.current_scale.is_finite() || self.current_scale <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "current_scale must be a finite positive factor, got {}",
                self.current_scale
            )));
        }
        if !self.weights.length_cap.is_finite() || self.weights.length_cap <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "weights.length_cap must be a finite positive sample count, got {}",
                self.weights.length_cap
            )));
        }
        Ok(())
    }
}
