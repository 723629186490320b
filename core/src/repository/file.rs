use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use crate::model::project::Project;
use crate::repository::traits::ProjectRepository;

pub const PROJECTS_FILE_NAME: &str = "projects.txt";

/// Projects table stored as `id|name|hotkey` lines.
#[derive(Clone)]
pub struct FileProjectRepository {
    file_path: PathBuf,
}

impl FileProjectRepository {
    pub fn new(base_dir: &Path) -> Result<Self> {
        fs::create_dir_all(base_dir)
            .with_context(|| format!("creating data directory {}", base_dir.display()))?;
        Ok(Self {
            file_path: base_dir.join(PROJECTS_FILE_NAME),
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl ProjectRepository for FileProjectRepository {
    fn load(&self) -> Result<Vec<Project>> {
        let mut projects = Vec::new();
        for (n, line) in read_lines(&self.file_path)?.iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match Project::parse_row(line) {
                Ok(p) => projects.push(p),
                Err(e) => warn!(file = %self.file_path.display(), line = n + 1, "skipping project row: {}", e),
            }
        }
        Ok(projects)
    }

    fn save(&self, projects: &[Project]) -> Result<()> {
        let rows: Vec<String> = projects.iter().map(Project::to_row).collect();
        write_lines(&self.file_path, &rows)
    }
}

/// Every line of `path`; a missing file reads as empty.
pub(crate) fn read_lines(path: &Path) -> Result<Vec<String>> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e).with_context(|| format!("opening {}", path.display())),
    };
    BufReader::new(file)
        .lines()
        .collect::<io::Result<Vec<_>>>()
        .with_context(|| format!("reading {}", path.display()))
}

/// Overwrites `path` with one line per row.
pub(crate) fn write_lines(path: &Path, rows: &[String]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for row in rows {
        writeln!(writer, "{}", row)?;
    }
    writer.flush()?;
    Ok(())
}
