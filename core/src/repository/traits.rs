use anyhow::Result;

use crate::model::project::Project;

pub trait ProjectRepository {
    /// All stored projects. A missing store is an empty list.
    fn load(&self) -> Result<Vec<Project>>;
    /// Replaces the whole table.
    fn save(&self, projects: &[Project]) -> Result<()>;
}

/// Raw line storage for time records. Lines are kept as text so history rows
/// can be carried forward byte for byte.
pub trait LedgerRepository {
    fn load_rows(&self) -> Result<Vec<String>>;
    fn store_rows(&self, rows: &[String]) -> Result<()>;
}
