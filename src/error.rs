//! Crate-level error type.

use crate::config::ConfigError;
use crate::trace::TraceError;

/// Unified error for the crate's fallible entry points.
///
/// Detection itself never fails once a [`Trace`](crate::trace::Trace)
/// exists; errors only arise from caller contract violations (malformed
/// input arrays) or invalid configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input arrays violate the trace contract.
    #[error("trace error: {0}")]
    Trace(#[from] TraceError),

    /// The configuration is unusable.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}
