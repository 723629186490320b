use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::repository::file::{read_lines, write_lines};
use crate::repository::traits::LedgerRepository;

pub const LEDGER_FILE_NAME: &str = "time_records.txt";

#[derive(Clone)]
pub struct FileLedgerRepository {
    file_path: PathBuf,
}

impl FileLedgerRepository {
    pub fn new(base_dir: &Path) -> Result<Self> {
        fs::create_dir_all(base_dir)
            .with_context(|| format!("creating data directory {}", base_dir.display()))?;
        Ok(Self {
            file_path: base_dir.join(LEDGER_FILE_NAME),
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl LedgerRepository for FileLedgerRepository {
    fn load_rows(&self) -> Result<Vec<String>> {
        Ok(read_lines(&self.file_path)?
            .into_iter()
            .filter(|l| !l.trim().is_empty())
            .collect())
    }

    fn store_rows(&self, rows: &[String]) -> Result<()> {
        write_lines(&self.file_path, rows)
    }
}
