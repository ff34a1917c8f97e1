//! Parsing of the remote tool's plaintext model tables and merging of one or
//! more tables into a single ordered [`SampleSeries`].

use crate::FocusError;
use crate::types::{FocusSample, SampleSeries};

/// Offset between Julian Date (the table's first column) and MJD.
const JD_MINUS_MJD: f64 = 2_400_000.5;

/// Parse one plaintext model table into samples.
///
/// The table is fixed-width text whose columns are (JulianDate, Month, Day,
/// Year, Time, Model); the first non-blank line is a header and is
/// discarded. Timestamps are converted from JD to MJD.
///
/// # Errors
/// `Data` if a row has fewer than six columns or a numeric column does not
/// parse. Malformed tables propagate immediately; there is no partial
/// recovery.
pub fn parse_model_table(text: &str) -> Result<Vec<FocusSample>, FocusError> {
    let mut rows = text.lines().filter(|line| !line.trim().is_empty());
    // Header row with the column labels.
    let _ = rows.next();

    let mut samples = Vec::new();
    for row in rows {
        let cols: Vec<&str> = row.split_whitespace().collect();
        if cols.len() < 6 {
            return Err(FocusError::Data(format!(
                "model table row has {} columns, expected 6: {row:?}",
                cols.len()
            )));
        }
        let jd: f64 = cols[0]
            .parse()
            .map_err(|_| FocusError::Data(format!("bad Julian date {:?} in row {row:?}", cols[0])))?;
        let value: f64 = cols[5]
            .parse()
            .map_err(|_| FocusError::Data(format!("bad model value {:?} in row {row:?}", cols[5])))?;
        samples.push(FocusSample {
            mjd: jd - JD_MINUS_MJD,
            value,
        });
    }
    Ok(samples)
}

/// Merge sample tables in chronological order into one series.
///
/// Samples are keyed by timestamp; the first appearance wins for duplicates
/// (overlap at a day boundary yields identical rows, so this is lossless).
///
/// # Errors
/// `Data` if the merged series is empty.
pub fn merge_samples<I>(tables: I) -> Result<SampleSeries, FocusError>
where
    I: IntoIterator<Item = Vec<FocusSample>>,
{
    let mut all: Vec<FocusSample> = tables.into_iter().flatten().collect();
    all.sort_by(|a, b| a.mjd.total_cmp(&b.mjd));
    all.dedup_by(|next, kept| next.mjd == kept.mjd);
    SampleSeries::new(all)
}
