use std::borrow::Cow;
use std::collections::HashSet;

use chrono::{DateTime, Local};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{Result, TrackerError, ValidationError};
use crate::model::entry::{Ledger, TimeEntry};
use crate::model::timer::TimerState;
use crate::repository::{LedgerRepository, ProjectRepository, SessionLog};
use crate::service::ledger_service::TimeLedger;
use crate::service::project_service::ProjectRegistry;
use crate::service::report_service::ReportAggregator;
use crate::time::{day_window, epoch_seconds};

/// Idle/Running state machine of one run. Stopping fans out into the time
/// records, the session log of the current day and that day's summary. A run
/// that outlives midnight moves on to the new day's projection and log.
pub struct TimerSession<L: LedgerRepository> {
    state: TimerState,
    ledger: Ledger,
    store: TimeLedger<L>,
    log: SessionLog,
    reports: ReportAggregator,
}

impl<L: LedgerRepository> TimerSession<L> {
    pub fn new(
        store: TimeLedger<L>,
        log: SessionLog,
        reports: ReportAggregator,
        known_project_ids: &HashSet<Uuid>,
        now: DateTime<Local>,
    ) -> Self {
        let ledger = store.load_today(known_project_ids, now);
        Self {
            state: TimerState::Idle,
            ledger,
            store,
            log,
            reports,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn session_log(&self) -> &SessionLog {
        &self.log
    }

    /// Today's projection as of `now`. After midnight, until the next start
    /// or stop, it is read fresh instead of the one held in memory.
    pub fn projection(&self, known_project_ids: &HashSet<Uuid>, now: DateTime<Local>) -> Cow<'_, Ledger> {
        if self.is_current(now) {
            Cow::Borrowed(&self.ledger)
        } else {
            Cow::Owned(self.store.load_today(known_project_ids, now))
        }
    }

    fn is_current(&self, now: DateTime<Local>) -> bool {
        self.ledger.day_start() == day_window(now).0
    }

    fn roll_over(&mut self, known_project_ids: &HashSet<Uuid>, now: DateTime<Local>) {
        if !self.is_current(now) {
            self.ledger = self.store.load_today(known_project_ids, now);
            info!(day = %now.date_naive(), "moved on to a new day");
        }
        if let Some(log) = self.log.roll_over(now) {
            self.log = log;
        }
    }

    pub fn start<P: ProjectRepository>(
        &mut self,
        project_id: Uuid,
        registry: &ProjectRegistry<P>,
        now: DateTime<Local>,
    ) -> Result<()> {
        if self.state.is_running() {
            return Err(TrackerError::InvalidTransition("a project is already being tracked"));
        }
        let Some(name) = registry.find_by_id(&project_id) else {
            return Err(ValidationError::UnknownProject(project_id.to_string()).into());
        };
        self.roll_over(&registry.ids(), now);

        info!(project = name, "tracking started");
        self.state = TimerState::Running {
            project_id,
            started_at: now,
        };
        Ok(())
    }

    /// Records the running interval. Storage problems along the way are
    /// logged; the entry is still returned and the session goes idle.
    pub fn stop<P: ProjectRepository>(
        &mut self,
        registry: &ProjectRegistry<P>,
        now: DateTime<Local>,
    ) -> Result<TimeEntry> {
        let TimerState::Running {
            project_id,
            started_at,
        } = self.state
        else {
            return Err(TrackerError::InvalidTransition("nothing is being tracked"));
        };

        let duration = self.state.elapsed(now);
        let entry = TimeEntry::new(project_id, epoch_seconds(started_at), duration);

        // the ledger is still the one of the day the interval started on
        self.ledger.push(entry.clone());
        if let Err(e) = self.store.save(&self.ledger) {
            warn!("could not save time records: {:#}", e);
        }
        self.roll_over(&registry.ids(), now);

        let id_text = project_id.to_string();
        let name = registry.find_by_id(&project_id).unwrap_or(id_text.as_str());
        if let Err(e) = self.log.append(now, name, duration) {
            warn!("could not write session log: {:#}", e);
        }

        if let Err(e) = self.reports.generate_daily(now.date_naive()) {
            warn!("could not regenerate daily summary: {:#}", e);
        }

        info!(project = name, seconds = duration, "tracking stopped");
        self.state = TimerState::Idle;
        Ok(entry)
    }

    pub fn current_elapsed(&self, now: DateTime<Local>) -> u64 {
        self.state.elapsed(now)
    }
}
