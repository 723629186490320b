pub mod file;
pub mod ledger;
pub mod session_log;
pub mod summary;
pub mod traits;

// Re-export
pub use file::FileProjectRepository;
pub use ledger::FileLedgerRepository;
pub use session_log::SessionLog;
pub use summary::{FileSummaryRepository, SummaryKind};
pub use traits::{LedgerRepository, ProjectRepository};
