//! hstfocus-mock
//!
//! CI-safe [`FocusModelProvider`] implementations. [`MockFocusModel`] renders
//! deterministic synthetic tables in the exact plaintext format the STScI
//! tool serves, so the full parse/merge/fit path can run without a network.
//! [`dynamic::DynamicMockProvider`] defers behavior to a test-side
//! controller and records every request it receives.
#![warn(missing_docs)]

/// Controller-driven mock for scripted tests.
pub mod dynamic;

use std::f64::consts::TAU;

use async_trait::async_trait;

use hstfocus_core::{
    FocusError, FocusModelProvider, ModelTableRequest, calendar_to_mjd, mjd_to_calendar,
    types::CalendarInstant,
};

/// Telemetry cadence of the real model output.
const CADENCE_DAYS: f64 = 5.0 / 1_440.0;
/// HST orbital period, the dominant breathing term of the synthetic signal.
const ORBIT_DAYS: f64 = 96.0 / 1_440.0;
/// The telemetry archive the real model draws on starts in 2003.
const FIRST_MODEL_YEAR: i32 = 2003;

/// Deterministic fixture provider.
pub struct MockFocusModel {
    fail: bool,
}

impl Default for MockFocusModel {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFocusModel {
    /// A provider that always serves synthetic tables.
    #[must_use]
    pub const fn new() -> Self {
        Self { fail: false }
    }

    /// A provider whose every fetch fails with a transport error, for
    /// exercising the non-substitutable error path.
    #[must_use]
    pub const fn failing() -> Self {
        Self { fail: true }
    }

    /// Synthetic focus value at an MJD: a slow secular drift plus orbital
    /// breathing. Smooth, so spline fits behave like they do on real data.
    #[must_use]
    pub fn model_value(mjd: f64) -> f64 {
        -0.3 - 1.0e-4 * (mjd - 52_640.0) + 2.5 * (TAU * mjd / ORBIT_DAYS).sin()
    }

    fn render_table(req: &ModelTableRequest) -> String {
        let start = calendar_to_mjd(&CalendarInstant::new(
            req.year,
            req.month,
            req.day,
            req.start.hour,
            req.start.minute,
            0,
        ));
        let stop = calendar_to_mjd(&CalendarInstant::new(
            req.year,
            req.month,
            req.day,
            req.stop.hour,
            req.stop.minute,
            0,
        ));

        let mut table = String::from("JulianDate   Month  Day  Year  Time      Model\n");
        let mut mjd = start;
        while mjd <= stop + 1e-9 {
            let c = mjd_to_calendar(mjd);
            table.push_str(&format!(
                "{:.6}  {:2}  {:2}  {:4}  {:02}:{:02}:{:02}  {:8.4}\n",
                mjd + 2_400_000.5,
                c.month,
                c.day,
                c.year,
                c.hour,
                c.minute,
                c.second,
                Self::model_value(mjd)
            ));
            mjd += CADENCE_DAYS;
        }
        table
    }
}

#[async_trait]
impl FocusModelProvider for MockFocusModel {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn model_table(&self, req: &ModelTableRequest) -> Result<String, FocusError> {
        if self.fail {
            return Err(FocusError::provider("mock", "forced failure"));
        }
        if req.year < FIRST_MODEL_YEAR {
            return Err(FocusError::no_data(format!(
                "model output for {}",
                req.label()
            )));
        }
        Ok(Self::render_table(req))
    }
}
