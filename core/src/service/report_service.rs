use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::ParseError;
use crate::model::project::has_hotkey_marker;
use crate::model::summary::Summary;
use crate::repository::{FileSummaryRepository, SummaryKind};
use crate::time::{parse_hms, YearMonth};

/// Rolls session logs up into daily summaries and daily summaries up into
/// monthly ones. Totals are recovered by parsing the formatted text, so the
/// summary files stay the only contract between the two levels.
#[derive(Clone)]
pub struct ReportAggregator {
    repo: FileSummaryRepository,
}

impl ReportAggregator {
    pub fn new(repo: FileSummaryRepository) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &FileSummaryRepository {
        &self.repo
    }

    /// Sums one session log or summary file. A missing file sums to nothing.
    pub fn sum_log(&self, path: &Path) -> Result<Summary> {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Summary::new()),
            Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
        };
        Ok(sum_lines(&content, &path.display().to_string()))
    }

    pub fn generate_daily(&self, date: NaiveDate) -> Result<Summary> {
        let logs = self.repo.session_logs_for(date)?;
        let summary = self.sum_all(&logs);
        let path = self.repo.write(SummaryKind::Daily(date), &summary.render())?;
        info!(%date, projects = summary.len(), path = %path.display(), "daily summary written");
        Ok(summary)
    }

    pub fn generate_monthly(&self, month: YearMonth) -> Result<Summary> {
        let dailies = self.repo.daily_summaries_for(month)?;
        let summary = self.sum_all(&dailies);
        let path = self.repo.write(SummaryKind::Monthly(month), &summary.render())?;
        info!(%month, days = dailies.len(), path = %path.display(), "monthly summary written");
        Ok(summary)
    }

    /// Parses a previously written summary, `None` if it was never generated.
    pub fn read_summary(&self, kind: SummaryKind) -> Result<Option<Summary>> {
        let path = self.repo.path_for(kind);
        Ok(self
            .repo
            .read(kind)?
            .map(|content| sum_lines(&content, &path.display().to_string())))
    }

    fn sum_all(&self, files: &[impl AsRef<Path>]) -> Summary {
        let mut total = Summary::new();
        for file in files {
            match self.sum_log(file.as_ref()) {
                Ok(s) => total.merge(&s),
                Err(e) => warn!("skipping {}: {:#}", file.as_ref().display(), e),
            }
        }
        total
    }
}

/// Sums every parseable line of a session log or summary; other lines are
/// logged and skipped.
pub fn sum_lines(content: &str, source: &str) -> Summary {
    let mut summary = Summary::new();
    for (n, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok((name, secs)) => summary.add(name, secs),
            Err(e) => warn!(source, line = n + 1, "skipping line: {}", e),
        }
    }
    summary
}

/// Accepts both `YYYY-MM-DD HH:MM:SS - name: HH:MM:SS` and `name: HH:MM:SS`.
pub fn parse_line(line: &str) -> Result<(&str, u64), ParseError> {
    let rest = match line.split_once(" - ") {
        Some((_, rest)) => rest,
        None => line,
    };
    let parts: Vec<&str> = rest.split(": ").collect();
    if parts.len() != 2 {
        return Err(ParseError::FieldCount {
            expected: 2,
            found: parts.len(),
        });
    }
    let secs = parse_hms(parts[1])?;
    Ok((strip_hotkey_marker(parts[0]), secs))
}

/// `"(3) Name"` -> `"Name"`. Displays that carry the hotkey marker leak it
/// into log lines; it must not split a project's totals.
pub fn strip_hotkey_marker(name: &str) -> &str {
    if has_hotkey_marker(name) {
        name[3..].trim_start()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::session_log;
    use crate::time::format_hms;
    use chrono::{Local, TimeZone};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn aggregator(dir: &Path) -> ReportAggregator {
        let repo = FileSummaryRepository::new(&dir.join("sessions"), &dir.join("reports")).unwrap();
        ReportAggregator::new(repo)
    }

    #[test]
    fn test_parse_line_shapes() {
        assert_eq!(parse_line("2026-10-18 09:00:00 - A: 00:02:05").unwrap(), ("A", 125));
        assert_eq!(parse_line("A: 01:00:00").unwrap(), ("A", 3600));
        assert_eq!(parse_line("2026-10-18 09:00:00 - (2) B: 00:00:10").unwrap(), ("B", 10));
        assert_eq!(parse_line("Ops - infra: 00:00:01").unwrap(), ("infra", 1));
        assert!(parse_line("no separator here").is_err());
        assert!(parse_line("A: b: 00:00:01").is_err());
        assert!(parse_line("A: 1:2").is_err());
        assert!(parse_line("A: xx:00:00").is_err());
    }

    #[test]
    fn test_sum_lines_skips_overflowing_durations() {
        let content = "2026-10-18 09:00:00 - A: 9999999999999999:00:00\nB: 00:00:01\nC: 18446744073709551615:00:00\n";
        let s = sum_lines(content, "test");
        assert_eq!(s.get("A"), None);
        assert_eq!(s.get("C"), None);
        assert_eq!(s.get("B"), Some(1));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_strip_hotkey_marker() {
        assert_eq!(strip_hotkey_marker("(1) Project 1"), "Project 1");
        assert_eq!(strip_hotkey_marker("(1)Project"), "Project");
        assert_eq!(strip_hotkey_marker("(10) Big"), "(10) Big");
        assert_eq!(strip_hotkey_marker("Plain"), "Plain");
        assert_eq!(strip_hotkey_marker("(é) x"), "(é) x");
    }

    #[test]
    fn test_sum_lines_skips_garbage() {
        let content = "\
2026-10-18 09:00:00 - A: 00:01:00
garbage line

2026-10-18 10:00:00 - B: 00:00:30
2026-10-18 11:00:00 - (1) A: 00:01:00
2026-10-18 12:00:00 - A: 00:aa:00
";
        let s = sum_lines(content, "test");
        assert_eq!(s.get("A"), Some(120));
        assert_eq!(s.get("B"), Some(30));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn test_formatter_and_parser_are_inverse_through_a_log_line() {
        let at = Local.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).single().unwrap();
        for s in (0..86_400u64).step_by(7).chain([86_399]) {
            let line = session_log::format_line(at, "P", s);
            assert_eq!(parse_line(&line).unwrap(), ("P", s));
            assert_eq!(parse_line(&format!("P: {}", format_hms(s))).unwrap().1, s);
        }
    }

    #[test]
    fn test_generate_daily_sums_all_logs_of_the_day() {
        let dir = tempfile::tempdir().unwrap();
        let agg = aggregator(dir.path());
        let sessions = agg.repository().sessions_dir().to_path_buf();
        fs::write(
            sessions.join("session_20261018_080000.txt"),
            "2026-10-18 08:10:00 - Beta: 00:10:00\n2026-10-18 08:20:00 - Alpha: 00:00:05\n",
        )
        .unwrap();
        fs::write(
            sessions.join("session_20261018_130000.txt"),
            "2026-10-18 13:30:00 - Alpha: 01:00:00\n",
        )
        .unwrap();
        fs::write(
            sessions.join("session_20261017_130000.txt"),
            "2026-10-17 13:30:00 - Alpha: 05:00:00\n",
        )
        .unwrap();

        let summary = agg.generate_daily(date(2026, 10, 18)).unwrap();
        assert_eq!(summary.get("Alpha"), Some(3605));

        let written = fs::read_to_string(agg.repository().path_for(SummaryKind::Daily(date(2026, 10, 18)))).unwrap();
        assert_eq!(written, "Alpha: 01:00:05\nBeta: 00:10:00\n");
    }

    #[test]
    fn test_generate_daily_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let agg = aggregator(dir.path());
        fs::write(
            agg.repository().sessions_dir().join("session_20261018_080000.txt"),
            "2026-10-18 08:10:00 - Z: 00:00:01\n2026-10-18 08:10:00 - A: 00:00:02\n",
        )
        .unwrap();
        let path = agg.repository().path_for(SummaryKind::Daily(date(2026, 10, 18)));

        agg.generate_daily(date(2026, 10, 18)).unwrap();
        let first = fs::read(&path).unwrap();
        agg.generate_daily(date(2026, 10, 18)).unwrap();
        assert_eq!(fs::read(&path).unwrap(), first);
    }

    #[test]
    fn test_generate_daily_without_logs_writes_empty_summary() {
        let dir = tempfile::tempdir().unwrap();
        let agg = aggregator(dir.path());
        let summary = agg.generate_daily(date(2026, 10, 18)).unwrap();
        assert!(summary.is_empty());
        let path = agg.repository().path_for(SummaryKind::Daily(date(2026, 10, 18)));
        assert_eq!(fs::read_to_string(path).unwrap(), "");
    }

    #[test]
    fn test_generate_monthly_adds_daily_summaries() {
        let dir = tempfile::tempdir().unwrap();
        let agg = aggregator(dir.path());
        let repo = agg.repository();
        repo.write(SummaryKind::Daily(date(2026, 10, 1)), "ProjectA: 00:01:00\n").unwrap();
        repo.write(SummaryKind::Daily(date(2026, 10, 2)), "ProjectA: 00:01:00\nProjectB: 00:00:30\n").unwrap();
        repo.write(SummaryKind::Daily(date(2026, 11, 1)), "ProjectA: 10:00:00\n").unwrap();

        let month = YearMonth::of(date(2026, 10, 15));
        let summary = agg.generate_monthly(month).unwrap();
        assert_eq!(summary.get("ProjectA"), Some(120));

        let written = repo.read(SummaryKind::Monthly(month)).unwrap().unwrap();
        assert_eq!(written, "ProjectA: 00:02:00\nProjectB: 00:00:30\n");
        assert_eq!(agg.read_summary(SummaryKind::Monthly(month)).unwrap(), Some(summary));
    }

    #[test]
    fn test_sum_log_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let agg = aggregator(dir.path());
        assert!(agg.sum_log(&dir.path().join("nope.txt")).unwrap().is_empty());
    }
}
