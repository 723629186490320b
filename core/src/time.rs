use std::fmt;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, TimeZone};

use crate::error::ParseError;

/// Renders whole seconds as `HH:MM:SS`. Hours are not wrapped at 24.
pub fn format_hms(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Inverse of [`format_hms`]: three colon-separated integers.
pub fn parse_hms(input: &str) -> std::result::Result<u64, ParseError> {
    let input = input.trim();
    let parts: Vec<&str> = input.split(':').collect();
    if parts.len() != 3 {
        return Err(ParseError::Duration(input.to_string()));
    }

    let mut values = [0u64; 3];
    for (slot, part) in values.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|_| ParseError::Duration(input.to_string()))?;
    }
    let [h, m, s] = values;
    h.checked_mul(3600)
        .and_then(|total| total.checked_add(m.checked_mul(60)?))
        .and_then(|total| total.checked_add(s))
        .ok_or_else(|| ParseError::Duration(input.to_string()))
}

/// Local midnight at the start of `date`. On a DST gap the earliest valid
/// instant is used.
pub fn start_of_day(date: NaiveDate) -> DateTime<Local> {
    let naive = date.and_time(chrono::NaiveTime::MIN);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| Local.from_utc_datetime(&naive))
}

/// Half-open `[start, end)` window of the local day containing `now`, as
/// fractional epoch seconds.
pub fn day_window(now: DateTime<Local>) -> (f64, f64) {
    let today = now.date_naive();
    let start = start_of_day(today);
    let end = start_of_day(today + Duration::days(1));
    (epoch_seconds(start), epoch_seconds(end))
}

pub fn epoch_seconds(at: DateTime<Local>) -> f64 {
    at.timestamp() as f64 + f64::from(at.timestamp_subsec_micros()) / 1_000_000.0
}

/// Calendar month used to select and name monthly summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(anyhow!("Invalid month: {}", month));
        }
        Ok(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// `YYYYMM`, as embedded in file names.
    pub fn stamp(self) -> String {
        format!("{:04}{:02}", self.year, self.month)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Accepts `today`, `yesterday`, `YYYY-MM-DD` or `YYYYMMDD`.
pub fn parse_report_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    match input.trim().to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "yesterday" | "yest" => return Ok(today - Duration::days(1)),
        _ => {}
    }

    let input = input.trim();
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(input, "%Y%m%d"))
        .map_err(|_| anyhow!("Could not parse date: {}", input))
}

/// Accepts `this`, `last`, `YYYY-MM` or `YYYYMM`.
pub fn parse_report_month(input: &str, today: NaiveDate) -> Result<YearMonth> {
    let current = YearMonth::of(today);
    match input.trim().to_lowercase().as_str() {
        "this" | "current" => return Ok(current),
        "last" | "prev" | "previous" => return Ok(current.previous()),
        _ => {}
    }

    let input = input.trim();
    let (year, month) = if let Some((y, m)) = input.split_once('-') {
        (y, m)
    } else if input.len() == 6 && input.is_char_boundary(4) {
        input.split_at(4)
    } else {
        return Err(anyhow!("Could not parse month: {}", input));
    };

    let year: i32 = year.parse().map_err(|_| anyhow!("Invalid year: {}", year))?;
    let month: u32 = month.parse().map_err(|_| anyhow!("Invalid month: {}", month))?;
    YearMonth::new(year, month)
}
