//! Time-series utilities shared by providers and the estimator.
//!
//! Modules include:
//! - `merge`: parse raw model tables and merge them into one ordered series
//! - `spline`: piecewise-polynomial interpolant with exact definite integrals

/// Table parsing and series merging.
pub mod merge;
/// Interpolant fitting, evaluation, and integration.
pub mod spline;

pub use merge::{merge_samples, parse_model_table};
pub use spline::Spline;
