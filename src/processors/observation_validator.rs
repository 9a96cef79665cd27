use crate::error::{LoaderError, Result};
use crate::models::{Observation, ObservationSet};
use crate::readers::RawObservationTable;
use crate::utils::constants::{COLUMN_DATETIME, COLUMN_VALUE, DATETIME_FORMAT, DATETIME_LENGTH};
use chrono::NaiveDateTime;
use std::collections::HashSet;

/// Checks that a loaded table has the `datetime,value` shape and converts it
/// into typed observations.
pub struct ObservationValidator {
    datetime_format: &'static str,
}

impl ObservationValidator {
    pub fn new() -> Self {
        Self {
            datetime_format: DATETIME_FORMAT,
        }
    }

    /// Validate the table and return its observations in file order.
    ///
    /// Fails with [`LoaderError::ParseFailure`] when the column set is not
    /// exactly `{datetime, value}`, when a value is neither numeric nor empty,
    /// or when a datetime does not match `YYYY-MM-DDTHH:MM:SS` exactly.
    pub fn validate(&self, table: &RawObservationTable) -> Result<ObservationSet> {
        self.check_columns(&table.headers)?;

        let datetime_idx = table
            .column_index(COLUMN_DATETIME)
            .ok_or_else(|| LoaderError::ParseFailure("datetime column missing".to_string()))?;
        let value_idx = table
            .column_index(COLUMN_VALUE)
            .ok_or_else(|| LoaderError::ParseFailure("value column missing".to_string()))?;

        let mut observations = Vec::with_capacity(table.row_count());
        for (i, row) in table.rows.iter().enumerate() {
            let row_number = i + 1;
            let datetime = row.get(datetime_idx).map(String::as_str).unwrap_or("");
            let value = row.get(value_idx).map(String::as_str).unwrap_or("");

            let timestamp = self.parse_datetime(datetime).ok_or_else(|| {
                LoaderError::ParseFailure(format!(
                    "Row {}: invalid datetime '{}', expected {}",
                    row_number, datetime, self.datetime_format
                ))
            })?;

            let value = parse_value(value).map_err(|_| {
                LoaderError::ParseFailure(format!(
                    "Row {}: value '{}' is not numeric",
                    row_number, value
                ))
            })?;

            observations.push(Observation::new(timestamp, value));
        }

        Ok(ObservationSet::new(observations))
    }

    fn check_columns(&self, headers: &[String]) -> Result<()> {
        let expected: HashSet<&str> = [COLUMN_DATETIME, COLUMN_VALUE].into_iter().collect();
        let actual: HashSet<&str> = headers.iter().map(String::as_str).collect();

        if headers.len() != expected.len() || actual != expected {
            return Err(LoaderError::ParseFailure(format!(
                "Wrong column names or too many columns: found [{}], expected {}, {}",
                headers.join(", "),
                COLUMN_DATETIME,
                COLUMN_VALUE
            )));
        }

        Ok(())
    }

    /// Parse a datetime, requiring the full fixed-width format.
    ///
    /// chrono tolerates padding spaces and a signed year, so the parsed value
    /// must format back to the exact input.
    pub fn parse_datetime(&self, raw: &str) -> Option<NaiveDateTime> {
        if raw.len() != DATETIME_LENGTH {
            return None;
        }
        let timestamp = NaiveDateTime::parse_from_str(raw, self.datetime_format).ok()?;
        (timestamp.format(self.datetime_format).to_string() == raw).then_some(timestamp)
    }
}

impl Default for ObservationValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Empty or whitespace-only cells, and literal NaN, are nulls.
fn parse_value(raw: &str) -> std::result::Result<Option<f64>, std::num::ParseFloatError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let value = trimmed.parse::<f64>()?;
    Ok(if value.is_nan() { None } else { Some(value) })
}
