// Copyright 2018 Chris Pearce
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::MiningError;
use crate::incident::IncidentRecord;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;

// Columns the reader consumes. Any other columns in the file are ignored.
#[derive(Debug, Deserialize)]
struct IncidentRow {
    incident_date: Option<String>,
    incident_time: Option<String>,
    precinct_id: Option<String>,
    complaint_type: Option<String>,
}

/// Streams `IncidentRecord`s out of a CSV file with a header row.
///
/// Rows that are missing a field, have an unparseable date, or fail to
/// deserialize are skipped and counted; see `skipped()`. Only I/O failures
/// are returned as errors.
pub struct IncidentReader<R: Read> {
    rows: csv::DeserializeRecordsIntoIter<R, IncidentRow>,
    max_records: Option<usize>,
    read: usize,
    skipped: usize,
}

impl IncidentReader<File> {
    pub fn from_path(path: &str) -> Result<IncidentReader<File>, MiningError> {
        let file = File::open(path)?;
        Ok(IncidentReader::new(file))
    }
}

impl<R: Read> IncidentReader<R> {
    pub fn new(reader: R) -> IncidentReader<R> {
        let rows = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader)
            .into_deserialize();
        IncidentReader {
            rows,
            max_records: None,
            read: 0,
            skipped: 0,
        }
    }

    // Stop after yielding this many records.
    pub fn with_max_records(mut self, max_records: Option<usize>) -> IncidentReader<R> {
        self.max_records = max_records;
        self
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn read(&self) -> usize {
        self.read
    }
}

impl<R: Read> Iterator for IncidentReader<R> {
    type Item = Result<IncidentRecord, MiningError>;
    fn next(&mut self) -> Option<Result<IncidentRecord, MiningError>> {
        if let Some(max) = self.max_records {
            if self.read >= max {
                return None;
            }
        }
        loop {
            let row: IncidentRow = match self.rows.next()? {
                Ok(row) => row,
                Err(err) => {
                    if err.is_io_error() {
                        return Some(Err(MiningError::from(err)));
                    }
                    log::debug!("Skipping malformed row: {}", err);
                    self.skipped += 1;
                    continue;
                }
            };
            match to_record(row) {
                Some(record) => {
                    self.read += 1;
                    return Some(Ok(record));
                }
                None => self.skipped += 1,
            }
        }
    }
}

fn non_blank(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.trim().is_empty())
}

fn to_record(row: IncidentRow) -> Option<IncidentRecord> {
    let date = parse_date(&non_blank(row.incident_date)?)?;
    let time = non_blank(row.incident_time)?;
    let precinct = non_blank(row.precinct_id)?;
    let category = non_blank(row.complaint_type)?;
    Some(IncidentRecord::new(date, &time, &precinct, &category))
}

// Accepts plain dates and the open data portal's timestamp form.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    for format in &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(s, format) {
            return Some(datetime.date());
        }
    }
    None
}
