//! Value types shared across the hstfocus workspace.
//!
//! Everything here is a plain value created and consumed within one estimator
//! call; nothing is cached or shared across calls.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::FocusError;
use crate::julian;

/// HST cameras the focus model knows about.
///
/// The wire spellings (`UVIS1`, `WFC1`, ...) are the form-control values the
/// STScI focus tool expects. Note the tool will happily produce model values
/// for periods a camera was not mounted; validity ranges are the caller's
/// responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Camera {
    /// WFC3 UVIS chip 1.
    Uvis1,
    /// WFC3 UVIS chip 2.
    Uvis2,
    /// ACS WFC chip 1.
    Wfc1,
    /// ACS WFC chip 2.
    Wfc2,
    /// ACS High Resolution Channel.
    Hrc,
    /// WFPC2 Planetary Camera.
    Pc,
}

impl Camera {
    /// Wire spelling used in fetch requests.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uvis1 => "UVIS1",
            Self::Uvis2 => "UVIS2",
            Self::Wfc1 => "WFC1",
            Self::Wfc2 => "WFC2",
            Self::Hrc => "HRC",
            Self::Pc => "PC",
        }
    }
}

impl fmt::Display for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Camera {
    type Err = FocusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "UVIS1" => Ok(Self::Uvis1),
            "UVIS2" => Ok(Self::Uvis2),
            "WFC1" => Ok(Self::Wfc1),
            "WFC2" => Ok(Self::Wfc2),
            "HRC" => Ok(Self::Hrc),
            "PC" => Ok(Self::Pc),
            other => Err(FocusError::InvalidArg(format!("unknown camera: {other}"))),
        }
    }
}

/// A calendar date and time-of-day at whole-second resolution.
///
/// The derived ordering is field order (year, month, day, hour, minute,
/// second), which is exactly calendar ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CalendarInstant {
    /// Astronomical year; years before 1 AD are negative (no year zero).
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
    /// Day of month, 1-31.
    pub day: u32,
    /// Hour, 0-23.
    pub hour: u32,
    /// Minute, 0-59.
    pub minute: u32,
    /// Second, 0-59 (sub-second remainders are truncated away).
    pub second: u32,
}

impl CalendarInstant {
    /// Build an instant without range checks; fields are trusted as-is.
    #[must_use]
    pub const fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Time-of-day truncated to minute resolution, as used in fetch requests.
    #[must_use]
    pub const fn time_of_day(&self) -> TimeOfDay {
        TimeOfDay {
            hour: self.hour,
            minute: self.minute,
        }
    }
}

impl fmt::Display for CalendarInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// A time-of-day at the minute resolution of the remote fetch interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeOfDay {
    /// Hour, 0-23.
    pub hour: u32,
    /// Minute, 0-59.
    pub minute: u32,
}

impl TimeOfDay {
    /// Midnight.
    pub const START_OF_DAY: Self = Self { hour: 0, minute: 0 };
    /// Last addressable minute of a day.
    pub const END_OF_DAY: Self = Self {
        hour: 23,
        minute: 59,
    };

    /// `HH:MM` form used in request parameters.
    #[must_use]
    pub fn param(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }

    /// `HHMM` form used in generated file names.
    #[must_use]
    pub fn file_stamp(&self) -> String {
        format!("{:02}{:02}", self.hour, self.minute)
    }
}

/// One endpoint of an exposure span: either a raw MJD or a calendar string.
///
/// Calendar strings are six integers (year, month, day, hour, minute, second)
/// separated by any of `:`, `-`, `/`, or space, e.g. `"2010-06-20 12:00:00"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TimeSpec {
    /// Modified Julian Date; the fractional part encodes time-of-day.
    Mjd(f64),
    /// Unparsed calendar string, validated on normalization.
    Calendar(String),
}

impl TimeSpec {
    /// Normalize to an MJD float.
    ///
    /// # Errors
    /// `InvalidArg` for a calendar string that does not split into exactly
    /// six integer fields, or for a non-finite MJD.
    pub fn to_mjd(&self) -> Result<f64, FocusError> {
        match self {
            Self::Mjd(m) => {
                if m.is_finite() {
                    Ok(*m)
                } else {
                    Err(FocusError::InvalidArg(format!("non-finite MJD: {m}")))
                }
            }
            Self::Calendar(s) => {
                let instant = julian::parse_calendar(s)?;
                Ok(julian::calendar_to_mjd(&instant))
            }
        }
    }
}

impl From<f64> for TimeSpec {
    fn from(mjd: f64) -> Self {
        Self::Mjd(mjd)
    }
}

impl From<&str> for TimeSpec {
    fn from(s: &str) -> Self {
        Self::Calendar(s.to_string())
    }
}

impl From<String> for TimeSpec {
    fn from(s: String) -> Self {
        Self::Calendar(s)
    }
}

/// One model sample: an MJD timestamp and the modeled defocus in microns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocusSample {
    /// Sample timestamp as MJD.
    pub mjd: f64,
    /// Modeled focus value.
    pub value: f64,
}

/// An ordered, duplicate-free series of model samples.
///
/// Construction enforces strictly increasing timestamps; see
/// [`crate::timeseries::merge_samples`] for building one out of raw tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSeries(Vec<FocusSample>);

impl SampleSeries {
    /// Wrap a sample vector, enforcing the ordering invariant.
    ///
    /// # Errors
    /// `Data` if the vector is empty or timestamps are not strictly
    /// increasing.
    pub fn new(samples: Vec<FocusSample>) -> Result<Self, FocusError> {
        if samples.is_empty() {
            return Err(FocusError::Data("empty sample series".into()));
        }
        for pair in samples.windows(2) {
            if pair[1].mjd <= pair[0].mjd {
                return Err(FocusError::Data(format!(
                    "sample timestamps not strictly increasing at mjd {}",
                    pair[1].mjd
                )));
            }
        }
        Ok(Self(samples))
    }

    /// Samples in timestamp order.
    #[must_use]
    pub fn samples(&self) -> &[FocusSample] {
        &self.0
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; an empty series cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Timestamp of the first sample.
    #[must_use]
    pub fn first_mjd(&self) -> f64 {
        self.0[0].mjd
    }

    /// Timestamp of the last sample.
    #[must_use]
    pub fn last_mjd(&self) -> f64 {
        self.0[self.0.len() - 1].mjd
    }
}

/// A fetch request for one calendar date, at the remote tool's minute
/// granularity. The estimator issues one of these per date spanned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelTableRequest {
    /// Year of observation.
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
    /// Day of month, 1-31.
    pub day: u32,
    /// Start of the time range (inclusive).
    pub start: TimeOfDay,
    /// End of the time range (inclusive).
    pub stop: TimeOfDay,
    /// Camera whose model is queried.
    pub camera: Camera,
}

impl ModelTableRequest {
    /// `MM/DD` form of the date, as passed in the request form.
    #[must_use]
    pub fn date_param(&self) -> String {
        format!("{:02}/{:02}", self.month, self.day)
    }

    /// `MM.DD` form of the date, as embedded in generated file names.
    #[must_use]
    pub fn date_stamp(&self) -> String {
        format!("{:02}.{:02}", self.month, self.day)
    }

    /// Short human-readable label for errors and logs.
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "{} {}/{} {}-{}",
            self.camera,
            self.year,
            self.date_param(),
            self.start.param(),
            self.stop.param()
        )
    }
}

/// Result of one mean-focus estimation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocusEstimate {
    /// Continuous-time mean of the model over the requested span.
    pub mean: f64,
    /// Continuous-time variance, when requested.
    pub variance: Option<f64>,
}

/// Degree of the interpolant fitted through the model samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SplineOrder {
    /// Piecewise linear.
    Linear,
    /// Natural cubic spline.
    #[default]
    Cubic,
}

impl SplineOrder {
    /// Map a polynomial degree to an order.
    ///
    /// # Errors
    /// `InvalidArg` for degrees other than 1 and 3.
    pub fn from_degree(degree: u8) -> Result<Self, FocusError> {
        match degree {
            1 => Ok(Self::Linear),
            3 => Ok(Self::Cubic),
            other => Err(FocusError::InvalidArg(format!(
                "unsupported spline degree: {other} (expected 1 or 3)"
            ))),
        }
    }

    /// Polynomial degree of the segments.
    #[must_use]
    pub const fn degree(self) -> u8 {
        match self {
            Self::Linear => 1,
            Self::Cubic => 3,
        }
    }
}
