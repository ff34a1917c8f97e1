//! hstfocus
//!
//! Continuous-time mean (and variance) of the modeled Hubble Space
//! Telescope focus over an exposure interval.
//!
//! The focus model is served by a [`FocusModelProvider`] one calendar date
//! at a time; [`FocusEstimator`] pads the requested span, fetches every
//! date it touches, merges the sample tables, fits a spline through them
//! and integrates it over the exact span.
//!
//! ```no_run
//! use std::sync::Arc;
//! use hstfocus::{Camera, FocusEstimator, MeanFocusOptions};
//! use hstfocus_mock::MockFocusModel;
//!
//! # async fn run() -> Result<(), hstfocus::FocusError> {
//! let estimator = FocusEstimator::new(Arc::new(MockFocusModel::new()));
//! let estimate = estimator
//!     .mean_focus(
//!         "2010-06-20 12:00:00",
//!         "2010-06-20 12:30:00",
//!         Camera::Uvis1,
//!         &MeanFocusOptions::new().with_variance(true),
//!     )
//!     .await?;
//! println!("mean focus: {:.4} um", estimate.mean);
//! # Ok(())
//! # }
//! ```
#![warn(missing_docs)]

mod estimator;

pub use estimator::{FocusEstimator, MeanFocusOptions};

pub use hstfocus_core::{
    Camera, CalendarInstant, FocusError, FocusEstimate, FocusModelProvider, FocusSample,
    ModelTableRequest, SampleSeries, Spline, SplineOrder, TimeOfDay, TimeSpec, calendar_to_mjd,
    merge_samples, mjd_to_calendar, parse_model_table,
};
