use thiserror::Error;

/// Unified error type for the hstfocus workspace.
///
/// The variants encode the substitution policy used by the estimator: only
/// `NoData` may be replaced by a caller-supplied fallback value; transport
/// failures (`Provider`) and malformed inputs/outputs always propagate.
#[derive(Debug, Clone, Error)]
pub enum FocusError {
    /// The requested capability is not implemented by the target provider.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// A capability string describing what was requested (e.g. "model-plot").
        capability: &'static str,
    },

    /// The service was reached but reports no model output for the interval.
    #[error("no model data: {what}")]
    NoData {
        /// Description of the missing output, e.g. "focus table for 06/20".
        what: String,
    },

    /// Invalid caller input (malformed calendar string, inverted span, ...).
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The returned table could not be parsed, or is unusable (too few rows,
    /// samples not covering the requested span).
    #[error("malformed model output: {0}")]
    Data(String),

    /// The provider failed for a reason other than "no data".
    #[error("{provider} failed: {msg}")]
    Provider {
        /// Provider name that failed.
        provider: String,
        /// Human-readable error message.
        msg: String,
    },
}

impl FocusError {
    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub const fn unsupported(cap: &'static str) -> Self {
        Self::Unsupported { capability: cap }
    }

    /// Helper: build a `NoData` error for a description of the missing output.
    pub fn no_data(what: impl Into<String>) -> Self {
        Self::NoData { what: what.into() }
    }

    /// Helper: build a `Provider` error with the provider name and message.
    pub fn provider(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            msg: msg.into(),
        }
    }

    /// Whether this failure is eligible for `not_found_value` substitution.
    #[must_use]
    pub const fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData { .. })
    }
}
