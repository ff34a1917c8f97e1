//! Bidirectional conversion between Modified Julian Date and calendar form.
//!
//! The arithmetic works on the Dublin Julian Date scale (epoch 1899 Dec 31.5)
//! used by the classic astronomical conversion formulas, shifted by a fixed
//! offset to the externally visible MJD scale. The numeric constants encode
//! real calendrical corrections (Gregorian reform, century leap rules) and
//! must not be "simplified".

use crate::FocusError;
use crate::types::CalendarInstant;

/// MJD of the Dublin Julian Date epoch, 1899 Dec 31 12:00.
pub const DUBLIN_EPOCH_MJD: f64 = 15_019.5;

/// Dublin day count of the Julian-to-Gregorian changeover (1582 Oct 15).
const GREGORIAN_CUTOVER: f64 = -115_860.0;

/// Convert an MJD to calendar form.
///
/// Works for any finite value, including dates before the Gregorian reform
/// and before 1 AD. Time-of-day fields are truncated, not rounded, so
/// sub-second remainders are discarded; round-tripping through
/// [`calendar_to_mjd`] reproduces the input to within one second.
#[must_use]
pub fn mjd_to_calendar(mjd: f64) -> CalendarInstant {
    let dublin = mjd - DUBLIN_EPOCH_MJD + 0.5;
    let mut day_count = dublin.floor();
    let mut day_frac = dublin - day_count;
    // An exact 1.0 fraction can survive the subtraction at the edge of f64
    // precision; carry it into the day so the fraction stays in [0, 1).
    if day_frac >= 1.0 {
        day_frac -= 1.0;
        day_count += 1.0;
    }

    if day_count > GREGORIAN_CUTOVER {
        // Gregorian leap rule: add back the days the reform skipped, less the
        // century years divisible by 400 that kept their leap day.
        let century_correction = ((day_count / 36_524.25) + 0.998_357_3).floor() + 14.0;
        day_count += 1.0 + century_correction - (century_correction / 4.0).floor();
    }

    // March-based year decomposition: month_index 3..=14 runs March..February
    // of the following calendar year.
    let march_year = ((day_count / 365.25) + 0.802_601).floor();
    let day_of_year = day_count - ((365.25 * march_year) + 0.750_001).floor() + 416.0;
    let month_index = (day_of_year / 30.600_1).floor();
    let day = day_of_year - (30.600_1 * month_index).floor();

    let month = if month_index > 13.5 {
        month_index - 13.0
    } else {
        month_index - 1.0
    };
    let mut year = if month < 2.5 {
        march_year + 1900.0
    } else {
        march_year + 1899.0
    };
    if year < 1.0 {
        // No year zero: 1 BC is year -1.
        year -= 1.0;
    }

    let hours = day_frac * 24.0;
    let hour = hours.trunc();
    let minutes = (hours - hour) * 60.0;
    let minute = minutes.trunc();
    let second = ((minutes - minute) * 60.0).trunc();

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    CalendarInstant::new(
        year as i32,
        month as u32,
        day as u32,
        hour as u32,
        minute as u32,
        second as u32,
    )
}

/// Convert a calendar instant to an MJD.
///
/// Inverse of [`mjd_to_calendar`] for any valid proleptic Julian (before
/// 1582 Oct 15) or Gregorian (from 1582 Oct 15 on) date; the time-of-day
/// contribution is exact division, no truncation.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn calendar_to_mjd(c: &CalendarInstant) -> f64 {
    let day_with_frac = f64::from(c.day)
        + (f64::from(c.hour) + (f64::from(c.minute) + f64::from(c.second) / 60.0) / 60.0) / 24.0;

    let mut month = i64::from(c.month);
    // No year zero: year -1 (1 BC) maps onto arithmetic year 0.
    let mut year = i64::from(c.year) + i64::from(c.year < 0);
    if month < 3 {
        // The decomposition is keyed to a March-based year.
        month += 12;
        year -= 1;
    }

    let before_reform =
        c.year < 1582 || (c.year == 1582 && (c.month < 10 || (c.month == 10 && c.day < 15)));
    let century_correction = if before_reform {
        0.0
    } else {
        let centuries = year / 100;
        (2 - centuries + centuries / 4) as f64
    };

    // The average-year scaling is not continuous across zero; negative years
    // take a distinct offset and truncate toward zero rather than flooring.
    let year_days = if year < 0 {
        (365.25 * year as f64 - 0.75).trunc()
    } else {
        (365.25 * year as f64).trunc()
    };
    let month_days = (30.600_1 * (month + 1) as f64).floor();

    let dublin = century_correction + year_days - 694_025.0 + month_days + day_with_frac - 0.5;
    dublin + DUBLIN_EPOCH_MJD
}

/// Parse a `"YYYY-MM-DD HH:MM:SS"` calendar string.
///
/// The six integer fields may be separated by any of `:`, `-`, `/`, or
/// space, in the fixed order year, month, day, hour, minute, second.
///
/// # Errors
/// `InvalidArg` if the string does not split into exactly six integer
/// fields, or a field is out of `u32` range. Malformed time inputs are a
/// programming error, not a transient condition, so there is no recovery.
pub fn parse_calendar(s: &str) -> Result<CalendarInstant, FocusError> {
    let fields: Vec<&str> = s
        .split([':', '-', '/', ' '])
        .filter(|tok| !tok.is_empty())
        .collect();
    if fields.len() != 6 {
        return Err(FocusError::InvalidArg(format!(
            "expected 6 calendar fields in {s:?}, got {}",
            fields.len()
        )));
    }

    let parse = |tok: &str| -> Result<i64, FocusError> {
        tok.parse().map_err(|_| {
            FocusError::InvalidArg(format!("non-integer calendar field {tok:?} in {s:?}"))
        })
    };
    let year = i32::try_from(parse(fields[0])?)
        .map_err(|_| FocusError::InvalidArg(format!("year out of range in {s:?}")))?;
    let mut rest = [0u32; 5];
    for (slot, tok) in rest.iter_mut().zip(&fields[1..]) {
        *slot = u32::try_from(parse(tok)?)
            .map_err(|_| FocusError::InvalidArg(format!("field {tok:?} out of range in {s:?}")))?;
    }

    Ok(CalendarInstant::new(
        year, rest[0], rest[1], rest[2], rest[3], rest[4],
    ))
}
