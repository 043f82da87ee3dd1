//! In-memory entity store.
//!
//! Holds the seeded collections in their original order and answers the
//! foreign-key lookups and groupings every screen needs. The store is
//! read-only; views that mutate work on their own copies.

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::model::{
    Issue, IssueStatus, Notification, Person, Priority, Project, ProjectStatus, Release, Sprint,
    Team,
};
use crate::query::{
    self, Facet, ISSUE_TEXT, IssueFilters, PERSON_TEXT, PROJECT_TEXT, PeopleFilters,
    ProjectFilters,
};
use crate::seed::{self, Seed};

/// Person the dashboard is rendered for when the seed names nobody.
pub const DEFAULT_CURRENT_USER: &str = "81c842a6-7c60-419f-b47a-cfef021bbeaa";

/// Read-only store of every seeded collection.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    people: Vec<Person>,
    projects: Vec<Project>,
    issues: Vec<Issue>,
    notifications: Vec<Notification>,
    releases: Vec<Release>,
    sprint: Option<Sprint>,
    current_user: String,
}

/// Global search hits grouped by entity kind.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults<'a> {
    pub projects: Vec<&'a Project>,
    pub issues: Vec<&'a Issue>,
    pub people: Vec<&'a Person>,
}

impl SearchResults<'_> {
    #[must_use]
    pub fn total(&self) -> usize {
        self.projects.len() + self.issues.len() + self.people.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            people: Vec::new(),
            projects: Vec::new(),
            issues: Vec::new(),
            notifications: Vec::new(),
            releases: Vec::new(),
            sprint: None,
            current_user: DEFAULT_CURRENT_USER.to_string(),
        }
    }

    #[must_use]
    pub fn from_seed(seed: Seed) -> Self {
        Self {
            people: seed.people,
            projects: seed.projects,
            issues: seed.issues,
            notifications: seed.notifications,
            releases: seed.releases,
            sprint: seed.sprint,
            current_user: seed
                .current_user
                .unwrap_or_else(|| DEFAULT_CURRENT_USER.to_string()),
        }
    }

    /// Store populated from the built-in seed set.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_seed(Seed::builtin())
    }

    /// Open and load a seed document from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        seed::load(path.as_ref()).map(Self::from_seed)
    }

    /// Render the dashboard for someone else.
    pub fn set_current_user(&mut self, person_id: impl Into<String>) {
        self.current_user = person_id.into();
    }

    #[must_use]
    pub fn current_user_id(&self) -> &str {
        &self.current_user
    }

    /// The current user, if the configured id resolves.
    #[must_use]
    pub fn current_user(&self) -> Option<&Person> {
        self.get_person(&self.current_user)
    }

    // ========================================================================
    // Collections
    // ========================================================================

    #[must_use]
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    #[must_use]
    pub fn releases(&self) -> &[Release] {
        &self.releases
    }

    #[must_use]
    pub const fn sprint(&self) -> Option<&Sprint> {
        self.sprint.as_ref()
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    #[must_use]
    pub fn get_issue(&self, id: &str) -> Option<&Issue> {
        let found = query::find_by_id(&self.issues, id);
        if found.is_none() {
            debug!(id, "Issue not found");
        }
        found
    }

    #[must_use]
    pub fn get_project(&self, id: &str) -> Option<&Project> {
        let found = query::find_by_id(&self.projects, id);
        if found.is_none() {
            debug!(id, "Project not found");
        }
        found
    }

    #[must_use]
    pub fn get_person(&self, id: &str) -> Option<&Person> {
        let found = query::find_by_id(&self.people, id);
        if found.is_none() {
            debug!(id, "Person not found");
        }
        found
    }

    /// Resolve an issue's assignee. `None` when unassigned or dangling.
    #[must_use]
    pub fn assignee_of(&self, issue: &Issue) -> Option<&Person> {
        issue
            .assignee_id
            .as_deref()
            .and_then(|id| self.get_person(id))
    }

    /// Resolve an issue's project. `None` when absent or dangling.
    #[must_use]
    pub fn project_of(&self, issue: &Issue) -> Option<&Project> {
        issue
            .project_id
            .as_deref()
            .and_then(|id| self.get_project(id))
    }

    /// Resolve a project's owner. `None` when absent or dangling.
    #[must_use]
    pub fn owner_of(&self, project: &Project) -> Option<&Person> {
        project
            .owner_id
            .as_deref()
            .and_then(|id| self.get_person(id))
    }

    // ========================================================================
    // Groupings
    // ========================================================================

    #[must_use]
    pub fn issues_by_project(&self, project_id: &str) -> Vec<&Issue> {
        self.issues
            .iter()
            .filter(|issue| issue.belongs_to(project_id))
            .collect()
    }

    #[must_use]
    pub fn issues_by_assignee(&self, person_id: &str) -> Vec<&Issue> {
        self.issues
            .iter()
            .filter(|issue| issue.is_assigned_to(person_id))
            .collect()
    }

    #[must_use]
    pub fn issues_by_status(&self, status: IssueStatus) -> Vec<&Issue> {
        query::filter_by_field(&self.issues, |issue| &issue.status, &Facet::Only(status))
    }

    #[must_use]
    pub fn issues_by_priority(&self, priority: Priority) -> Vec<&Issue> {
        query::filter_by_field(
            &self.issues,
            |issue| &issue.priority,
            &Facet::Only(priority),
        )
    }

    /// Issues assigned to the current user.
    #[must_use]
    pub fn my_issues(&self) -> Vec<&Issue> {
        self.issues_by_assignee(&self.current_user)
    }

    #[must_use]
    pub fn projects_by_team(&self, team: Team) -> Vec<&Project> {
        query::filter_by_field(&self.projects, |project| &project.team, &Facet::Only(team))
    }

    #[must_use]
    pub fn projects_by_status(&self, status: ProjectStatus) -> Vec<&Project> {
        query::filter_by_field(
            &self.projects,
            |project| &project.status,
            &Facet::Only(status),
        )
    }

    #[must_use]
    pub fn projects_by_owner(&self, person_id: &str) -> Vec<&Project> {
        query::filter_by_optional_field(
            &self.projects,
            |project| project.owner_id.as_deref(),
            &Facet::Only(person_id.to_string()),
        )
    }

    #[must_use]
    pub fn people_by_team(&self, team: Team) -> Vec<&Person> {
        query::filter_by_field(&self.people, |person| &person.team, &Facet::Only(team))
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[must_use]
    pub fn list_issues(&self, filters: &IssueFilters) -> Vec<&Issue> {
        filters.apply(&self.issues)
    }

    #[must_use]
    pub fn list_people(&self, filters: &PeopleFilters) -> Vec<&Person> {
        filters.apply(&self.people)
    }

    #[must_use]
    pub fn list_projects(&self, filters: &ProjectFilters) -> Vec<&Project> {
        filters.apply(&self.projects)
    }

    /// One search term across projects, issues and people.
    ///
    /// An empty term finds nothing here, unlike the per-screen search
    /// boxes: a blank global search has no results to show.
    #[must_use]
    pub fn search_all(&self, term: &str) -> SearchResults<'_> {
        let term = term.trim();
        if term.is_empty() {
            return SearchResults {
                projects: Vec::new(),
                issues: Vec::new(),
                people: Vec::new(),
            };
        }
        let results = SearchResults {
            projects: query::filter_by_substring(&self.projects, &PROJECT_TEXT, term),
            issues: query::filter_by_substring(&self.issues, &ISSUE_TEXT, term),
            people: query::filter_by_substring(&self.people, &PERSON_TEXT, term),
        };
        debug!(term, hits = results.total(), "Global search");
        results
    }

    /// Number of issues in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}
