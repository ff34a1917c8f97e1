//! hstfocus-core
//!
//! Core types, traits, and utilities shared across the hstfocus workspace.
//!
//! - `types`: common value types (cameras, calendar instants, samples,
//!   fetch requests, estimates).
//! - `error`: the unified [`FocusError`] taxonomy.
//! - `provider`: the [`FocusModelProvider`] trait implemented by backends.
//! - `julian`: MJD/calendar conversion and calendar-string parsing.
//! - `timeseries`: model-table parsing, series merging, and the spline
//!   interpolant.
//!
//! Everything here is synchronous value manipulation except the provider
//! trait, which is `async_trait` and expects a Tokio 1.x runtime in the
//! calling crates.
#![warn(missing_docs)]

/// Error taxonomy for the workspace.
pub mod error;
/// MJD/calendar conversion.
pub mod julian;
/// The focus-model provider trait.
pub mod provider;
/// Table parsing, merging, and interpolation.
pub mod timeseries;
pub mod types;

pub use error::FocusError;
pub use julian::{calendar_to_mjd, mjd_to_calendar, parse_calendar};
pub use provider::FocusModelProvider;
pub use timeseries::{Spline, merge_samples, parse_model_table};
pub use types::*;
