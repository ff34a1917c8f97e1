//! The interval aggregator: fetch, merge, interpolate, integrate.

use std::sync::Arc;

use hstfocus_core::{
    Camera, CalendarInstant, FocusError, FocusEstimate, FocusModelProvider, ModelTableRequest,
    Spline, SplineOrder, TimeOfDay, TimeSpec, calendar_to_mjd, merge_samples, mjd_to_calendar,
    parse_model_table,
};

/// Fetch padding on each side of the requested span, as a day fraction.
///
/// Remote samples arrive at a coarse fixed cadence (roughly five minutes)
/// and the span boundaries will rarely coincide with a sample timestamp;
/// ten minutes of padding guarantees the fetched set brackets the span, so
/// the interpolant's domain strictly contains it.
const FETCH_PAD_DAYS: f64 = 10.0 / 1_440.0;

/// Options for one [`FocusEstimator::mean_focus`] call.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanFocusOptions {
    /// Interpolant order; cubic by default.
    pub spline: SplineOrder,
    /// Substitute result when the service has no model data for the span.
    /// Transport and format failures are never substituted.
    pub not_found_value: Option<f64>,
    /// Also compute the continuous-time variance.
    pub with_variance: bool,
}

impl MeanFocusOptions {
    /// Default options: cubic interpolant, no substitution, mean only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the interpolant order.
    #[must_use]
    pub const fn spline(mut self, order: SplineOrder) -> Self {
        self.spline = order;
        self
    }

    /// Return this value (for both outputs) instead of failing when the
    /// service reports no model data for the interval.
    #[must_use]
    pub const fn not_found_value(mut self, value: f64) -> Self {
        self.not_found_value = Some(value);
        self
    }

    /// Request the variance alongside the mean.
    #[must_use]
    pub const fn with_variance(mut self, yes: bool) -> Self {
        self.with_variance = yes;
        self
    }
}

/// Estimates the continuous-time mean (and variance) of the modeled focus
/// over an exposure span, by querying a [`FocusModelProvider`] one calendar
/// date at a time and integrating a spline through the merged samples.
///
/// Each call is independent and reentrant as long as the provider is;
/// nothing is cached across calls.
pub struct FocusEstimator {
    provider: Arc<dyn FocusModelProvider>,
}

impl FocusEstimator {
    /// Wrap a provider.
    #[must_use]
    pub fn new(provider: Arc<dyn FocusModelProvider>) -> Self {
        Self { provider }
    }

    /// Mean focus over `[start, end]`, each endpoint an MJD float or a
    /// `"YYYY-MM-DD HH:MM:SS"` calendar string.
    ///
    /// The mean is the definite integral of the fitted interpolant over the
    /// exact requested span divided by the span length, not an arithmetic
    /// average of the discrete samples. A degenerate `end == start` span
    /// returns the interpolant's instantaneous value (variance zero).
    ///
    /// # Errors
    /// - `InvalidArg`: malformed calendar string, non-finite MJD, or
    ///   `end < start`.
    /// - `NoData`: the service has no model output for some fetch window and
    ///   no `not_found_value` was configured.
    /// - `Provider`: transport or server failure; never substituted.
    /// - `Data`: unparsable table, or samples not covering the span.
    pub async fn mean_focus(
        &self,
        start: impl Into<TimeSpec>,
        end: impl Into<TimeSpec>,
        camera: Camera,
        opts: &MeanFocusOptions,
    ) -> Result<FocusEstimate, FocusError> {
        let start_mjd = start.into().to_mjd()?;
        let end_mjd = end.into().to_mjd()?;
        if end_mjd < start_mjd {
            return Err(FocusError::InvalidArg(format!(
                "span end {end_mjd} precedes start {start_mjd}"
            )));
        }

        let windows = fetch_windows(start_mjd - FETCH_PAD_DAYS, end_mjd + FETCH_PAD_DAYS, camera);
        tracing::debug!(
            provider = self.provider.name(),
            windows = windows.len(),
            start = start_mjd,
            end = end_mjd,
            "fetching model tables"
        );

        let mut tables = Vec::with_capacity(windows.len());
        for window in &windows {
            match self.provider.model_table(window).await {
                Ok(text) => tables.push(parse_model_table(&text)?),
                Err(e) if e.is_no_data() => {
                    if let Some(fallback) = opts.not_found_value {
                        tracing::warn!(
                            window = %window.label(),
                            fallback,
                            "no model data for window, substituting"
                        );
                        return Ok(FocusEstimate {
                            mean: fallback,
                            variance: opts.with_variance.then_some(fallback),
                        });
                    }
                    return Err(e);
                }
                Err(e) => return Err(e),
            }
        }

        let series = merge_samples(tables)?;
        if series.first_mjd() > start_mjd || series.last_mjd() < end_mjd {
            return Err(FocusError::Data(format!(
                "model samples cover [{}, {}] but the span is [{start_mjd}, {end_mjd}]",
                series.first_mjd(),
                series.last_mjd()
            )));
        }
        let spline = Spline::fit(&series, opts.spline)?;

        let span = end_mjd - start_mjd;
        let mean = if span == 0.0 {
            spline.value(start_mjd)
        } else {
            spline.integral(start_mjd, end_mjd) / span
        };
        let variance = opts.with_variance.then(|| {
            if span == 0.0 {
                0.0
            } else {
                continuous_variance(&spline, series.len(), start_mjd, end_mjd, mean)
            }
        });
        Ok(FocusEstimate { mean, variance })
    }
}

/// One fetch window per calendar date spanned: the first starts at the
/// padded start time, the last ends at the padded end time, interior dates
/// run 00:00-23:59. Times are truncated to the remote tool's minute
/// granularity. Spans crossing any number of midnights produce one window
/// per date.
fn fetch_windows(padded_start: f64, padded_end: f64, camera: Camera) -> Vec<ModelTableRequest> {
    // Calendar decomposition truncates, and the pad is not exactly
    // representable, so a boundary meant to be a whole minute can land a
    // hair below it and truncate to :59. Half a second of bias absorbs
    // that without disturbing boundaries that already sit on a minute.
    const HALF_SECOND: f64 = 0.5 / 86_400.0;
    let first = mjd_to_calendar(padded_start + HALF_SECOND);
    let last = mjd_to_calendar(padded_end + HALF_SECOND);

    let mut windows = Vec::new();
    let mut date = CalendarInstant::new(first.year, first.month, first.day, 0, 0, 0);
    loop {
        let is_last = (date.year, date.month, date.day) == (last.year, last.month, last.day);
        windows.push(ModelTableRequest {
            year: date.year,
            month: date.month,
            day: date.day,
            start: if windows.is_empty() {
                first.time_of_day()
            } else {
                TimeOfDay::START_OF_DAY
            },
            stop: if is_last {
                last.time_of_day()
            } else {
                TimeOfDay::END_OF_DAY
            },
            camera,
        });
        if is_last {
            break;
        }
        // Midnights are integral MJDs, so stepping a whole day stays exact.
        let next = mjd_to_calendar(calendar_to_mjd(&date) + 1.0);
        date = CalendarInstant::new(next.year, next.month, next.day, 0, 0, 0);
    }
    windows
}

/// Continuous-time variance via `Var = E[x^2] - E[x]^2`: the squared
/// interpolant is sampled at twice the underlying data density and
/// trapezoid-integrated over the span.
fn continuous_variance(spline: &Spline, samples: usize, start: f64, end: f64, mean: f64) -> f64 {
    let intervals = (2 * samples).max(2);
    #[allow(clippy::cast_precision_loss)]
    let step = (end - start) / intervals as f64;
    let mut second_moment = 0.0;
    for i in 0..=intervals {
        #[allow(clippy::cast_precision_loss)]
        let x = if i == intervals {
            end
        } else {
            start + step * i as f64
        };
        let weight = if i == 0 || i == intervals { 0.5 } else { 1.0 };
        let value = spline.value(x);
        second_moment += weight * value * value;
    }
    second_moment *= step / (end - start);
    // Trapezoid slop can push the difference a hair negative on constant
    // signals.
    (second_moment - mean * mean).max(0.0)
}
