use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::service::project_service::DEFAULT_PROJECTS;

pub const DATA_DIR_ENV: &str = "TIMETALLY_HOME";
pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Names seeded (with hotkeys 1, 2, 3...) when the project table is empty.
    pub default_projects: Vec<String>,
    /// Filter used when `RUST_LOG` is not set.
    pub log_level: String,
    #[serde(skip)]
    data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_projects: DEFAULT_PROJECTS.iter().map(|s| s.to_string()).collect(),
            log_level: "info".to_string(),
            data_dir: PathBuf::new(),
        }
    }
}

/// Where everything lives under the data directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Paths {
    pub data_dir: PathBuf,
    pub sessions_dir: PathBuf,
    pub reports_dir: PathBuf,
    pub logs_dir: PathBuf,
}

impl Config {
    /// Explicit directory, else `$TIMETALLY_HOME`, else `~/.timetally`.
    /// The directory is created if needed.
    pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
        let path = match explicit {
            Some(dir) => dir,
            None => match env::var_os(DATA_DIR_ENV) {
                Some(dir) if !dir.is_empty() => PathBuf::from(dir),
                _ => {
                    let home_dir = dirs::home_dir()
                        .ok_or_else(|| anyhow!("Could not determine home directory"))?;
                    home_dir.join(".timetally")
                }
            },
        };
        fs::create_dir_all(&path)
            .with_context(|| format!("creating data directory {}", path.display()))?;
        Ok(path)
    }

    /// Reads `config.json` from `data_dir`. `Ok(None)` when there is none,
    /// `Err` when it exists but is not valid.
    pub fn read(data_dir: &Path) -> Result<Option<Self>> {
        let path = data_dir.join(CONFIG_FILE_NAME);
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
        };
        let mut config: Config = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        config.data_dir = data_dir.to_path_buf();
        Ok(Some(config))
    }

    /// Like [`Config::read`] but a missing or broken file yields defaults.
    pub fn load(data_dir: &Path) -> Self {
        match Self::read(data_dir) {
            Ok(Some(config)) => config,
            Ok(None) => Self::defaults_for(data_dir),
            Err(e) => {
                warn!("ignoring config: {:#}", e);
                Self::defaults_for(data_dir)
            }
        }
    }

    pub fn defaults_for(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            ..Self::default()
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn paths(&self) -> Paths {
        Paths {
            data_dir: self.data_dir.clone(),
            sessions_dir: self.data_dir.join("sessions"),
            reports_dir: self.data_dir.join("reports"),
            logs_dir: self.data_dir.join("logs"),
        }
    }
}
