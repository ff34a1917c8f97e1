//! The provider contract every focus-model backend implements.

use async_trait::async_trait;

use crate::FocusError;
use crate::types::ModelTableRequest;

/// A backend that can produce model focus data for a calendar-date window.
///
/// The remote STScI service generates its output server-side and serves it
/// back as plaintext; this trait abstracts that (or any stand-in) as a single
/// synchronous fetch with two terminal outcomes: success with a table, or
/// failure. A "no data exists for this window" failure must surface as
/// [`FocusError::NoData`] so the estimator can distinguish it from transport
/// trouble.
#[async_trait]
pub trait FocusModelProvider: Send + Sync {
    /// A stable identifier for logs and error messages (e.g. "stsci").
    fn name(&self) -> &'static str;

    /// Fetch the plaintext model table for one calendar-date window.
    async fn model_table(&self, req: &ModelTableRequest) -> Result<String, FocusError>;

    /// Fetch the rendered PNG plot for the same window, where the backend
    /// offers one. Table-only providers keep the default.
    async fn model_plot(&self, req: &ModelTableRequest) -> Result<Vec<u8>, FocusError> {
        let _ = req;
        Err(FocusError::unsupported("model-plot"))
    }
}
