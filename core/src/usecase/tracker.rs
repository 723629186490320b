use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::{Result, TrackerError, ValidationError};
use crate::model::entry::TimeEntry;
use crate::model::project::{Hotkey, Project};
use crate::model::summary::Summary;
use crate::model::timer::TimerState;
use crate::repository::{
    FileLedgerRepository, FileProjectRepository, FileSummaryRepository, LedgerRepository,
    ProjectRepository, SessionLog, SummaryKind,
};
use crate::service::ledger_service::TimeLedger;
use crate::service::project_service::ProjectRegistry;
use crate::service::report_service::ReportAggregator;
use crate::usecase::timer_session::TimerSession;
use crate::time::YearMonth;

/// The operation set a front end drives. Holds no UI state; the caller
/// only keeps a handle to it.
pub struct Tracker<P: ProjectRepository, L: LedgerRepository, C: Clock> {
    registry: ProjectRegistry<P>,
    session: TimerSession<L>,
    reports: ReportAggregator,
    clock: C,
}

pub type FileTracker = Tracker<FileProjectRepository, FileLedgerRepository, SystemClock>;

impl FileTracker {
    pub fn open(config: &Config) -> anyhow::Result<Self> {
        let paths = config.paths();
        let projects = FileProjectRepository::new(&paths.data_dir)?;
        let ledger = FileLedgerRepository::new(&paths.data_dir)?;
        let summaries = FileSummaryRepository::new(&paths.sessions_dir, &paths.reports_dir)?;
        let registry = ProjectRegistry::load(projects, &config.default_projects);
        Ok(Tracker::new(registry, ledger, summaries, SystemClock))
    }
}

impl<P: ProjectRepository, L: LedgerRepository, C: Clock> Tracker<P, L, C> {
    pub fn new(registry: ProjectRegistry<P>, ledger_repo: L, summaries: FileSummaryRepository, clock: C) -> Self {
        let now = clock.now();
        let reports = ReportAggregator::new(summaries);
        let log = SessionLog::new(reports.repository().sessions_dir(), now);
        let session = TimerSession::new(
            TimeLedger::new(ledger_repo),
            log,
            reports.clone(),
            &registry.ids(),
            now,
        );
        Self {
            registry,
            session,
            reports,
            clock,
        }
    }

    pub fn start(&mut self, project_name: &str) -> Result<Uuid> {
        let id = self
            .registry
            .find_by_name(project_name)
            .ok_or_else(|| ValidationError::UnknownProject(project_name.to_string()))?;
        self.session.start(id, &self.registry, self.clock.now())?;
        Ok(id)
    }

    pub fn stop(&mut self) -> Result<TimeEntry> {
        self.session.stop(&self.registry, self.clock.now())
    }

    /// Regenerates and returns the daily summary, today by default.
    pub fn request_daily_report(&self, date: Option<NaiveDate>) -> Result<Summary> {
        let date = date.unwrap_or_else(|| self.today());
        Ok(self.reports.generate_daily(date)?)
    }

    /// Regenerates and returns the monthly summary, this month by default.
    pub fn request_monthly_report(&self, month: Option<YearMonth>) -> Result<Summary> {
        let month = month.unwrap_or_else(|| YearMonth::of(self.today()));
        Ok(self.reports.generate_monthly(month)?)
    }

    pub fn read_summary(&self, kind: SummaryKind) -> Result<Option<Summary>> {
        Ok(self.reports.read_summary(kind)?)
    }

    pub fn add_project(&mut self, name: &str, hotkey: Option<&str>) -> Result<Uuid> {
        self.registry.add(name, hotkey)
    }

    /// A running project that is being removed is stopped first so its
    /// interval is recorded under its name.
    pub fn remove_projects(&mut self, ids: &[Uuid]) -> Result<usize> {
        if let Some(running) = self.session.state().project_id() {
            if ids.contains(&running) {
                self.stop()?;
            }
        }
        self.registry.remove(ids)
    }

    /// Starts the project bound to `digit`, stopping another running project
    /// first. Pressing the key of the project already running does nothing.
    pub fn hotkey_pressed(&mut self, digit: char) -> Result<Uuid> {
        let hotkey = Hotkey::from_char(digit)?;
        let id = self
            .registry
            .find_by_hotkey(hotkey)
            .ok_or(ValidationError::UnboundHotkey(hotkey))?;

        match self.session.state().project_id() {
            Some(running) if running == id => {
                return Err(TrackerError::InvalidTransition("project is already being tracked"));
            }
            Some(_) => {
                let stopped = self.stop()?;
                info!(seconds = stopped.duration_seconds, "switched project by hotkey");
            }
            None => {}
        }
        self.session.start(id, &self.registry, self.clock.now())?;
        Ok(id)
    }

    /// Stops a running session so nothing is lost on exit.
    pub fn shutdown(&mut self) -> Option<TimeEntry> {
        if self.session.state().is_running() {
            self.stop().ok()
        } else {
            None
        }
    }

    pub fn elapsed(&self) -> u64 {
        self.session.current_elapsed(self.clock.now())
    }

    pub fn state(&self) -> TimerState {
        self.session.state()
    }

    pub fn current_project(&self) -> Option<&Project> {
        self.session
            .state()
            .project_id()
            .and_then(|id| self.registry.get(&id))
    }

    /// Recorded time per project for today's projection, by name. Removed
    /// projects are left out. Stays correct across midnight.
    pub fn today_totals(&self) -> Summary {
        self.session
            .projection(&self.registry.ids(), self.clock.now())
            .totals()
            .into_iter()
            .filter_map(|(id, secs)| self.registry.find_by_id(&id).map(|name| (name.to_string(), secs)))
            .collect()
    }

    pub fn projects(&self) -> Vec<&Project> {
        self.registry.projects()
    }

    pub fn registry(&self) -> &ProjectRegistry<P> {
        &self.registry
    }

    pub fn session_log(&self) -> &SessionLog {
        self.session.session_log()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.now().date_naive()
    }
}
