use std::collections::HashMap;

use uuid::Uuid;

use crate::error::ParseError;

/// One completed tracking interval. Never edited after it is written.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeEntry {
    pub project_id: Uuid,
    /// Fractional epoch seconds.
    pub start_timestamp: f64,
    pub duration_seconds: u64,
}

impl TimeEntry {
    pub fn new(project_id: Uuid, start_timestamp: f64, duration_seconds: u64) -> Self {
        Self {
            project_id,
            start_timestamp,
            duration_seconds,
        }
    }

    /// `project_id|start_timestamp|duration_seconds`
    pub fn to_row(&self) -> String {
        format!(
            "{}|{}|{}",
            self.project_id, self.start_timestamp, self.duration_seconds
        )
    }

    pub fn parse_row(line: &str) -> Result<Self, ParseError> {
        let fields: Vec<&str> = line.trim().split('|').collect();
        if fields.len() != 3 {
            return Err(ParseError::FieldCount {
                expected: 3,
                found: fields.len(),
            });
        }

        let project_id = Uuid::parse_str(fields[0]).map_err(|_| ParseError::Field {
            field: "project id",
            value: fields[0].to_string(),
        })?;
        let start_timestamp = parse_timestamp(fields[1])?;
        let duration_seconds = fields[2].parse().map_err(|_| ParseError::Field {
            field: "duration",
            value: fields[2].to_string(),
        })?;

        Ok(Self::new(project_id, start_timestamp, duration_seconds))
    }
}

/// Reads only the timestamp column. Used to decide whether a history row is
/// carried forward without needing the rest of it to be valid.
pub fn row_timestamp(line: &str) -> Result<f64, ParseError> {
    let mut fields = line.trim().split('|');
    match (fields.next(), fields.next()) {
        (Some(_), Some(ts)) => parse_timestamp(ts),
        _ => Err(ParseError::FieldCount { expected: 3, found: 1 }),
    }
}

fn parse_timestamp(raw: &str) -> Result<f64, ParseError> {
    match raw.trim().parse::<f64>() {
        Ok(ts) if ts.is_finite() => Ok(ts),
        _ => Err(ParseError::Field {
            field: "timestamp",
            value: raw.to_string(),
        }),
    }
}

/// Today's projection of the time records: project id to its entries, in
/// the order they were recorded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    entries: HashMap<Uuid, Vec<TimeEntry>>,
    day_start: f64,
}

impl Ledger {
    pub fn new(day_start: f64) -> Self {
        Self {
            entries: HashMap::new(),
            day_start,
        }
    }

    /// Start of the day this projection was loaded for, in epoch seconds.
    pub fn day_start(&self) -> f64 {
        self.day_start
    }

    pub fn append(&mut self, project_id: Uuid, start_timestamp: f64, duration_seconds: u64) {
        self.push(TimeEntry::new(project_id, start_timestamp, duration_seconds));
    }

    pub(crate) fn push(&mut self, entry: TimeEntry) {
        self.entries.entry(entry.project_id).or_default().push(entry);
    }

    pub fn entries_for(&self, project_id: &Uuid) -> &[TimeEntry] {
        self.entries.get(project_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimeEntry> {
        self.entries.values().flatten()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn total_for(&self, project_id: &Uuid) -> u64 {
        self.entries_for(project_id)
            .iter()
            .map(|e| e.duration_seconds)
            .sum()
    }

    /// Per-project totals, projects without entries omitted.
    pub fn totals(&self) -> HashMap<Uuid, u64> {
        self.entries
            .keys()
            .map(|id| (*id, self.total_for(id)))
            .filter(|(_, secs)| *secs > 0)
            .collect()
    }

    /// Same projects with the same entries, ignoring order within a project.
    pub fn equivalent(&self, other: &Ledger) -> bool {
        let keys = |l: &Ledger| {
            let mut k: Vec<Uuid> = l
                .entries
                .iter()
                .filter(|(_, v)| !v.is_empty())
                .map(|(id, _)| *id)
                .collect();
            k.sort();
            k
        };
        if keys(self) != keys(other) {
            return false;
        }

        self.entries.iter().all(|(id, mine)| {
            let mut a: Vec<String> = mine.iter().map(TimeEntry::to_row).collect();
            let mut b: Vec<String> = other.entries_for(id).iter().map(TimeEntry::to_row).collect();
            a.sort();
            b.sort();
            a == b
        })
    }
}
