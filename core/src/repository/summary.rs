use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::debug;

use crate::repository::session_log;
use crate::time::YearMonth;

pub const DAILY_PREFIX: &str = "daily_summary_";
pub const MONTHLY_PREFIX: &str = "monthly_summary_";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryKind {
    Daily(NaiveDate),
    Monthly(YearMonth),
}

impl SummaryKind {
    pub fn file_name(&self) -> String {
        match self {
            SummaryKind::Daily(date) => format!("{}{}.txt", DAILY_PREFIX, date.format("%Y%m%d")),
            SummaryKind::Monthly(month) => format!("{}{}.txt", MONTHLY_PREFIX, month.stamp()),
        }
    }
}

/// Locates session logs and reads/writes summary files.
#[derive(Clone)]
pub struct FileSummaryRepository {
    sessions_dir: PathBuf,
    reports_dir: PathBuf,
}

impl FileSummaryRepository {
    pub fn new(sessions_dir: &Path, reports_dir: &Path) -> Result<Self> {
        fs::create_dir_all(sessions_dir)?;
        fs::create_dir_all(reports_dir)?;
        Ok(Self {
            sessions_dir: sessions_dir.to_path_buf(),
            reports_dir: reports_dir.to_path_buf(),
        })
    }

    pub fn sessions_dir(&self) -> &Path {
        &self.sessions_dir
    }

    pub fn path_for(&self, kind: SummaryKind) -> PathBuf {
        self.reports_dir.join(kind.file_name())
    }

    /// Session logs started on `date`, in file-name order.
    pub fn session_logs_for(&self, date: NaiveDate) -> Result<Vec<PathBuf>> {
        let prefix = session_log::date_prefix(date);
        let files = list_matching(&self.sessions_dir, |name| {
            name.starts_with(&prefix) && name.ends_with(".txt")
        })?;
        debug!(%date, count = files.len(), "selected session logs");
        Ok(files)
    }

    /// Daily summaries whose embedded date falls in `month`.
    pub fn daily_summaries_for(&self, month: YearMonth) -> Result<Vec<PathBuf>> {
        let files = list_matching(&self.reports_dir, |name| {
            daily_summary_date(name).is_some_and(|d| month.contains(d))
        })?;
        debug!(%month, count = files.len(), "selected daily summaries");
        Ok(files)
    }

    pub fn read(&self, kind: SummaryKind) -> Result<Option<String>> {
        let path = self.path_for(kind);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    pub fn write(&self, kind: SummaryKind, content: &str) -> Result<PathBuf> {
        let path = self.path_for(kind);
        fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

/// Date embedded in a `daily_summary_YYYYMMDD.txt` file name.
pub fn daily_summary_date(file_name: &str) -> Option<NaiveDate> {
    let stamp = file_name.strip_prefix(DAILY_PREFIX)?.strip_suffix(".txt")?;
    NaiveDate::parse_from_str(stamp, "%Y%m%d").ok()
}

fn list_matching(dir: &Path, keep: impl Fn(&str) -> bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(files),
        Err(e) => return Err(e).with_context(|| format!("listing {}", dir.display())),
    };
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if path.file_name().and_then(|n| n.to_str()).is_some_and(&keep) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
