use crate::error::Result;
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Header names and string cells of an observation file, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawObservationTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawObservationTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

pub struct ObservationReader;

impl ObservationReader {
    pub fn new() -> Self {
        Self
    }

    /// Read an observation file; the first row is the header.
    pub fn read_table(&self, path: &Path) -> Result<RawObservationTable> {
        let file = File::open(path)?;
        self.read_from(file)
    }

    pub fn read_from<R: Read>(&self, source: R) -> Result<RawObservationTable> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(source);

        let headers = reader
            .headers()?
            .iter()
            .map(|h| h.to_string())
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(|cell| cell.to_string()).collect());
        }

        Ok(RawObservationTable::new(headers, rows))
    }
}

impl Default for ObservationReader {
    fn default() -> Self {
        Self::new()
    }
}
