use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::utils::constants::{DATETIME_FORMAT, MISSING_VALUE_TOKEN};
use crate::writers::ResultEncoding;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: NaiveDateTime,
    pub value: Option<f64>,
}

impl Observation {
    pub fn new(timestamp: NaiveDateTime, value: Option<f64>) -> Self {
        Self { timestamp, value }
    }

    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(DATETIME_FORMAT).to_string()
    }

    pub fn formatted_value(&self) -> String {
        match self.value {
            Some(value) => value.to_string(),
            None => MISSING_VALUE_TOKEN.to_string(),
        }
    }

    /// Encode as a single `timestamp,value` result token pair.
    pub fn to_result_token(&self) -> String {
        ResultEncoding::default().encode_row(self)
    }
}

/// Ordered observations loaded from a single input file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationSet {
    observations: Vec<Observation>,
}

impl ObservationSet {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn as_slice(&self) -> &[Observation] {
        &self.observations
    }

    pub fn into_inner(self) -> Vec<Observation> {
        self.observations
    }

    pub fn null_count(&self) -> usize {
        self.observations.iter().filter(|o| o.value.is_none()).count()
    }
}

impl From<Vec<Observation>> for ObservationSet {
    fn from(observations: Vec<Observation>) -> Self {
        Self::new(observations)
    }
}
