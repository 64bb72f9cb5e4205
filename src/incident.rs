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

use chrono::{NaiveDate, NaiveTime, Timelike};

/// One cleaned emergency call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncidentRecord {
    pub date: NaiveDate,
    /// Time of day, normally "HH:MM:SS".
    pub time: String,
    pub precinct: String,
    pub category: String,
}

impl IncidentRecord {
    pub fn new(date: NaiveDate, time: &str, precinct: &str, category: &str) -> IncidentRecord {
        IncidentRecord {
            date,
            time: time.trim().to_owned(),
            precinct: normalize_precinct(precinct),
            category: category.trim().to_owned(),
        }
    }

    // Hour of day in [0,23]. Falls back to the first two characters of
    // the time string when it doesn't parse as a time.
    pub fn hour(&self) -> Option<u32> {
        parse_hour(&self.time)
    }
}

pub fn parse_hour(time: &str) -> Option<u32> {
    let time = time.trim();
    for format in &["%H:%M:%S", "%H:%M:%S%.f", "%H:%M"] {
        if let Ok(t) = NaiveTime::parse_from_str(time, format) {
            return Some(t.hour());
        }
    }
    let prefix = time.get(..2)?;
    match prefix.trim_end_matches(':').parse::<u32>() {
        Ok(hour) if hour <= 23 => Some(hour),
        _ => None,
    }
}

// Precinct codes arrive as "14", "14.0" or free text. Integral numbers
// are normalized so the same precinct always forms the same basket key.
pub fn normalize_precinct(precinct: &str) -> String {
    let precinct = precinct.trim();
    match precinct.parse::<f64>() {
        Ok(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", n as i64),
        _ => precinct.to_owned(),
    }
}
