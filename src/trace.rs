//! # Trace Input Type
//!
//! A [`Trace`] owns one cyclic-voltammetry acquisition: a voltage sweep and
//! the current response, index-aligned by sample order. Construction
//! validates the caller contract up front. Mismatched or empty arrays are
//! rejected loudly rather than silently producing a misleading baseline over
//! misaligned data, and the detection pipeline itself never has to re-check
//! array shape.

use serde::Serialize;

/// Errors raised when input arrays violate the trace contract.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    /// Voltage and current arrays have different lengths.
    #[error("array length mismatch: voltage has {voltage_len} samples, current has {current_len}")]
    LengthMismatch {
        voltage_len: usize,
        current_len: usize,
    },

    /// Both arrays are empty.
    #[error("trace is empty")]
    Empty,

    /// The voltage array contains no finite sample, so no scan split exists.
    #[error("voltage contains no finite samples")]
    AllNonFinite,
}

/// An immutable `(voltage, current)` pair in acquisition order.
///
/// Voltage is in volts. Current units are the caller's choice but must be
/// consistent with the configured current scale (see
/// [`BaselineConfig::current_scale`](crate::config::BaselineConfig)).
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    voltage: Vec<f64>,
    current: Vec<f64>,
}

impl Trace {
    /// Take ownership of a validated voltage/current pair.
    pub fn new(voltage: Vec<f64>, current: Vec<f64>) -> Result<Self, TraceError> {
        if voltage.len() != current.len() {
            return Err(TraceError::LengthMismatch {
                voltage_len: voltage.len(),
                current_len: current.len(),
            });
        }
        if voltage.is_empty() {
            return Err(TraceError::Empty);
        }
        if !voltage.iter().any(|v| v.is_finite()) {
            return Err(TraceError::AllNonFinite);
        }
        Ok(Self { voltage, current })
    }

    /// Voltage samples in volts.
    #[inline]
    pub fn voltage(&self) -> &[f64] {
        &self.voltage
    }

    /// Current samples, unit per the caller's convention.
    #[inline]
    pub fn current(&self) -> &[f64] {
        &self.current
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.voltage.len()
    }

    /// Always `false`: empty traces are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.voltage.is_empty()
    }

    /// Iterate over `(voltage, current)` pairs in acquisition order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.voltage
            .iter()
            .copied()
            .zip(self.current.iter().copied())
    }

    /// Descriptive statistics for log lines and reports.
    ///
    /// Ranges are computed over finite samples only.
    pub fn summary(&self) -> TraceSummary {
        let (voltage_min, voltage_max) = finite_range(&self.voltage);
        let (current_min, current_max) = finite_range(&self.current);
        TraceSummary {
            samples: self.len(),
            voltage_min,
            voltage_max,
            current_min,
            current_max,
        }
    }
}

/// Cheap per-trace statistics, serializable for report layers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TraceSummary {
    /// Total sample count.
    pub samples: usize,
    /// Lowest finite voltage, NaN if none.
    pub voltage_min: f64,
    /// Highest finite voltage, NaN if none.
    pub voltage_max: f64,
    /// Lowest finite current, NaN if none.
    pub current_min: f64,
    /// Highest finite current, NaN if none.
    pub current_max: f64,
}

fn finite_range(values: &[f64]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        if !v.is_finite() {
            continue;
        }
        min = min.min(v);
        max = max.max(v);
    }
    if min > max {
        (f64::NAN, f64::NAN)
    } else {
        (min, max)
    }
}
