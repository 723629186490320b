use std::collections::HashSet;

use anyhow::Result;
use chrono::{DateTime, Local};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::model::entry::{row_timestamp, Ledger, TimeEntry};
use crate::repository::LedgerRepository;
use crate::time::day_window;

/// Loads the "today" projection of the time records and writes it back with
/// older history carried through untouched.
pub struct TimeLedger<R: LedgerRepository> {
    repo: R,
}

impl<R: LedgerRepository> TimeLedger<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Entries of known projects that started during the local day of `now`.
    /// Anything unreadable, orphaned or outside today stays on disk but is
    /// not part of the projection.
    pub fn load_today(&self, known_project_ids: &HashSet<Uuid>, now: DateTime<Local>) -> Ledger {
        let (day_start, day_end) = day_window(now);
        let mut ledger = Ledger::new(day_start);

        let rows = match self.repo.load_rows() {
            Ok(rows) => rows,
            Err(e) => {
                warn!("could not read time records: {:#}", e);
                return ledger;
            }
        };

        let mut skipped = 0usize;
        for row in &rows {
            let entry = match TimeEntry::parse_row(row) {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(row = %row, "skipping time record: {}", e);
                    continue;
                }
            };
            let today = entry.start_timestamp >= day_start && entry.start_timestamp < day_end;
            if today && known_project_ids.contains(&entry.project_id) {
                ledger.push(entry);
            } else {
                skipped += 1;
            }
        }
        debug!(loaded = ledger.len(), skipped, "loaded today's time records");
        ledger
    }

    /// Rewrites the store as every row older than the ledger's day, verbatim,
    /// followed by one row per ledger entry.
    pub fn save(&self, ledger: &Ledger) -> Result<()> {
        let mut rows: Vec<String> = self
            .repo
            .load_rows()?
            .into_iter()
            .filter(|row| match row_timestamp(row) {
                Ok(ts) => ts < ledger.day_start(),
                Err(e) => {
                    warn!(row = %row, "dropping unreadable time record: {}", e);
                    false
                }
            })
            .collect();
        let history = rows.len();

        let mut today: Vec<&TimeEntry> = ledger.iter().collect();
        today.sort_by(|a, b| a.start_timestamp.total_cmp(&b.start_timestamp));
        rows.extend(today.into_iter().map(TimeEntry::to_row));

        self.repo.store_rows(&rows)?;
        debug!(history, today = rows.len() - history, "saved time records");
        Ok(())
    }
}
