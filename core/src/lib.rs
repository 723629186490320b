pub mod clock;
pub mod config;
pub mod error;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;
pub mod usecase;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Config, Paths};
pub use error::{ParseError, TrackerError, ValidationError};
pub use model::entry::{Ledger, TimeEntry};
pub use model::project::{Hotkey, Project};
pub use model::summary::Summary;
pub use model::timer::TimerState;
pub use repository::{FileLedgerRepository, FileProjectRepository, FileSummaryRepository, SummaryKind};
pub use service::ledger_service::TimeLedger;
pub use service::project_service::ProjectRegistry;
pub use service::report_service::ReportAggregator;
pub use time::{format_hms, parse_hms, parse_report_date, parse_report_month, YearMonth};
pub use usecase::tracker::{FileTracker, Tracker};
