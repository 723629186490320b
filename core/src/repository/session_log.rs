use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate};

use crate::time::format_hms;

pub const SESSION_PREFIX: &str = "session_";

/// Append-only log of one run-day. The file is named after the moment it was
/// opened and is only created by the first append.
#[derive(Debug, Clone)]
pub struct SessionLog {
    dir: PathBuf,
    path: PathBuf,
    started_on: NaiveDate,
}

impl SessionLog {
    pub fn new(sessions_dir: &Path, started_at: DateTime<Local>) -> Self {
        Self {
            dir: sessions_dir.to_path_buf(),
            path: sessions_dir.join(file_name(started_at)),
            started_on: started_at.date_naive(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Date stamped into the file name; daily summaries select logs by it.
    pub fn started_on(&self) -> NaiveDate {
        self.started_on
    }

    /// A fresh log in the same directory when `now` falls on a later day than
    /// this one is stamped with.
    pub fn roll_over(&self, now: DateTime<Local>) -> Option<SessionLog> {
        (now.date_naive() != self.started_on).then(|| SessionLog::new(&self.dir, now))
    }

    pub fn append(&self, timestamp: DateTime<Local>, project_name: &str, duration_seconds: u64) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("opening session log {}", self.path.display()))?;
        writeln!(file, "{}", format_line(timestamp, project_name, duration_seconds))?;
        Ok(())
    }
}

/// `YYYY-MM-DD HH:MM:SS - name: HH:MM:SS`
pub fn format_line(timestamp: DateTime<Local>, project_name: &str, duration_seconds: u64) -> String {
    format!(
        "{} - {}: {}",
        timestamp.format("%Y-%m-%d %H:%M:%S"),
        project_name,
        format_hms(duration_seconds)
    )
}

pub fn file_name(started_at: DateTime<Local>) -> String {
    format!("{}{}.txt", SESSION_PREFIX, started_at.format("%Y%m%d_%H%M%S"))
}

/// Prefix shared by every session log started on `date`.
pub fn date_prefix(date: NaiveDate) -> String {
    format!("{}{}_", SESSION_PREFIX, date.format("%Y%m%d"))
}
