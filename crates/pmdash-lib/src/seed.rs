//! Seed data for the entity stores.
//!
//! A seed document is a single JSON object holding every collection the
//! dashboard starts from. Only people, projects and issues are required;
//! the remaining collections default to empty.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DashError, Result};
use crate::model::{Issue, Notification, Person, Project, Release, Sprint};

const BUILTIN_SEED: &str = include_str!("../data/seed.json");

/// Every collection the stores are populated from at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seed {
    /// Person id the dashboard is rendered for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_user: Option<String>,
    pub people: Vec<Person>,
    pub projects: Vec<Project>,
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
    #[serde(default)]
    pub releases: Vec<Release>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprint: Option<Sprint>,
}

impl Seed {
    /// The seed set compiled into the library.
    ///
    /// # Panics
    ///
    /// Panics if the embedded document is malformed, which the unit tests
    /// rule out.
    #[must_use]
    pub fn builtin() -> Self {
        parse(BUILTIN_SEED).expect("embedded seed document is valid")
    }
}

/// Parse a seed document from a JSON string.
///
/// # Errors
///
/// Returns `SeedParse` with the failing line and column.
pub fn parse(json: &str) -> Result<Seed> {
    serde_json::from_str(json).map_err(|e| DashError::seed_parse(&e))
}

/// Load a seed document from disk.
///
/// # Errors
///
/// Returns `FileNotFound` if the path does not exist, `Io` if it cannot be
/// read, or `SeedParse` if the contents are not a valid seed document.
pub fn load(path: &Path) -> Result<Seed> {
    let contents = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DashError::FileNotFound(path.to_path_buf())
        } else {
            DashError::Io(e)
        }
    })?;
    let seed = parse(&contents)?;
    tracing::debug!(
        path = %path.display(),
        people = seed.people.len(),
        projects = seed.projects.len(),
        issues = seed.issues.len(),
        "Loaded seed file"
    );
    Ok(seed)
}
