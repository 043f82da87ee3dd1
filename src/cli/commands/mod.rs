//! Command implementations.
//!
//! Each command takes its parsed args and a [`CommandContext`] holding the
//! loaded store, output mode and reference time.

pub mod board;
pub mod dashboard;
pub mod issues;
pub mod notifications;
pub mod people;
pub mod profile;
pub mod projects;
pub mod releases;
pub mod search;
pub mod show;
pub mod sprint;
pub mod version;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use pmdash_lib::{InMemoryStore, Person};
use tracing::{debug, warn};

use crate::config::Config;
use crate::output::OutputContext;

/// Everything a command needs besides its own arguments.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub store: InMemoryStore,
    pub output: OutputContext,
    pub now: DateTime<Utc>,
    pub releases_per_page: usize,
}

impl CommandContext {
    #[must_use]
    pub fn new(store: InMemoryStore, output: OutputContext, now: DateTime<Utc>) -> Self {
        Self {
            store,
            output,
            now,
            releases_per_page: crate::config::DEFAULT_RELEASES_PER_PAGE,
        }
    }

    /// Load the store named by `config` and apply its current user.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed file cannot be read or parsed.
    pub fn open(config: &Config, output: OutputContext, now: DateTime<Utc>) -> Result<Self> {
        let mut store = match &config.seed_path {
            Some(path) => InMemoryStore::open(path)
                .with_context(|| format!("Failed to load seed {}", path.display()))?,
            None => InMemoryStore::builtin(),
        };

        if let Some(user) = &config.current_user {
            store.set_current_user(user.clone());
        }
        if store.current_user().is_none() {
            warn!(
                current_user = store.current_user_id(),
                "Current user is not in the people list"
            );
        }
        debug!(records = store.len(), now = %now, "Workspace loaded");

        Ok(Self {
            store,
            output,
            now,
            releases_per_page: config.releases_per_page,
        })
    }

    /// Resolve a person id, or the current user when `id` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error naming the id when no such person exists.
    pub fn person_or_current(&self, id: Option<&str>) -> Result<&Person> {
        let id = id.unwrap_or_else(|| self.store.current_user_id());
        self.store
            .get_person(id)
            .with_context(|| format!("Person not found: {id}"))
    }
}
