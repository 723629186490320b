pub mod ledger_service;
pub mod project_service;
pub mod report_service;
