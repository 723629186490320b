use std::collections::HashSet;

use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{Result, TrackerError, ValidationError};
use crate::model::project::{validate_name, Hotkey, Project};
use crate::repository::ProjectRepository;

pub const DEFAULT_PROJECTS: [&str; 3] = ["Project 1", "Project 2", "Project 3"];

/// Live projects plus the table they persist to. Every mutation rewrites the
/// whole table.
pub struct ProjectRegistry<R: ProjectRepository> {
    repo: R,
    projects: Vec<Project>,
}

impl<R: ProjectRepository> ProjectRegistry<R> {
    /// Never fails: an unreadable or empty table is replaced by defaults
    /// bound to hotkeys 1, 2, 3...
    pub fn load(repo: R, default_names: &[String]) -> Self {
        let stored = match repo.load() {
            Ok(projects) => projects,
            Err(e) => {
                warn!("could not read project table, using defaults: {:#}", e);
                Vec::new()
            }
        };

        let projects = dedup(stored);
        let mut registry = Self { repo, projects };
        if registry.is_empty() {
            registry.projects = seed(default_names);
            info!(count = registry.len(), "initialized default projects");
            if let Err(e) = registry.repo.save(&registry.projects) {
                warn!("could not persist default projects: {:#}", e);
            }
        }
        registry
    }

    pub fn add(&mut self, name: &str, hotkey: Option<&str>) -> Result<Uuid> {
        let name = validate_name(name)?;
        if self.find_by_name(name).is_some() {
            return Err(ValidationError::DuplicateName(name.to_string()).into());
        }
        let hotkey = hotkey.map(str::parse::<Hotkey>).transpose()?;
        if let Some(key) = hotkey {
            if self.find_by_hotkey(key).is_some() {
                return Err(ValidationError::DuplicateHotkey(key).into());
            }
        }

        let project = Project::new(name.to_string(), hotkey);
        let id = project.id;
        self.projects.push(project);
        if let Err(e) = self.repo.save(&self.projects) {
            self.projects.pop();
            return Err(TrackerError::Storage(e));
        }
        info!(%id, name, "project added");
        Ok(id)
    }

    /// Removes the given ids and returns how many existed. Time records of
    /// removed projects are left alone.
    pub fn remove(&mut self, ids: &[Uuid]) -> Result<usize> {
        let before = self.projects.clone();
        self.projects.retain(|p| !ids.contains(&p.id));
        let removed = before.len() - self.projects.len();
        if removed == 0 {
            return Ok(0);
        }

        if let Err(e) = self.repo.save(&self.projects) {
            self.projects = before;
            return Err(TrackerError::Storage(e));
        }
        info!(removed, "projects removed");
        Ok(removed)
    }

    pub fn find_by_name(&self, name: &str) -> Option<Uuid> {
        self.projects.iter().find(|p| p.name == name).map(|p| p.id)
    }

    pub fn find_by_id(&self, id: &Uuid) -> Option<&str> {
        self.get(id).map(|p| p.name.as_str())
    }

    pub fn find_by_hotkey(&self, hotkey: Hotkey) -> Option<Uuid> {
        self.projects
            .iter()
            .find(|p| p.hotkey == Some(hotkey))
            .map(|p| p.id)
    }

    pub fn get(&self, id: &Uuid) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == *id)
    }

    pub fn ids(&self) -> HashSet<Uuid> {
        self.projects.iter().map(|p| p.id).collect()
    }

    /// Hotkey-bound projects first in digit order, then the rest by name.
    pub fn projects(&self) -> Vec<&Project> {
        let mut list: Vec<&Project> = self.projects.iter().collect();
        list.sort_by(|a, b| match (a.hotkey, b.hotkey) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.name.cmp(&b.name),
        });
        list
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

fn seed(default_names: &[String]) -> Vec<Project> {
    let names: Vec<String> = if default_names.is_empty() {
        DEFAULT_PROJECTS.iter().map(|s| s.to_string()).collect()
    } else {
        default_names.to_vec()
    };

    let mut projects: Vec<Project> = Vec::new();
    for name in names {
        let Ok(name) = validate_name(&name) else {
            warn!(name = %name, "ignoring invalid default project name");
            continue;
        };
        if projects.iter().any(|p| p.name == name) || projects.len() >= 9 {
            continue;
        }
        let hotkey = Hotkey::new(projects.len() as u8 + 1).ok();
        projects.push(Project::new(name.to_string(), hotkey));
    }
    projects
}

/// A hand-edited table may break uniqueness; first occurrence wins.
fn dedup(stored: Vec<Project>) -> Vec<Project> {
    let mut names = HashSet::new();
    let mut hotkeys = HashSet::new();
    let mut ids = HashSet::new();
    let mut projects = Vec::with_capacity(stored.len());

    for mut project in stored {
        if !ids.insert(project.id) || !names.insert(project.name.clone()) {
            warn!(name = %project.name, "dropping duplicate project row");
            continue;
        }
        if let Some(key) = project.hotkey {
            if !hotkeys.insert(key) {
                warn!(name = %project.name, hotkey = %key, "dropping duplicate hotkey");
                project.hotkey = None;
            }
        }
        projects.push(project);
    }
    projects
}
