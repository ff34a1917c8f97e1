//! Estimate the mean focus over a half-hour exposure against the
//! deterministic mock provider.
//!
//! ```bash
//! cargo run -p hstfocus --example mean_focus
//! ```

use std::sync::Arc;

use hstfocus::{Camera, FocusEstimator, FocusError, MeanFocusOptions};
use hstfocus_mock::MockFocusModel;

#[tokio::main]
async fn main() -> Result<(), FocusError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,hstfocus=debug".into()),
        )
        .init();

    let estimator = FocusEstimator::new(Arc::new(MockFocusModel::new()));
    let opts = MeanFocusOptions::new().with_variance(true);

    let estimate = estimator
        .mean_focus(
            "2010-06-20 12:00:00",
            "2010-06-20 12:30:00",
            Camera::Uvis1,
            &opts,
        )
        .await?;

    println!("mean focus : {:+.4} um", estimate.mean);
    if let Some(variance) = estimate.variance {
        println!("variance   : {variance:.6} um^2");
        println!("std dev    : {:.4} um", variance.sqrt());
    }
    Ok(())
}
