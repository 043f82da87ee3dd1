//! Kanban board: four status columns and the drag-and-drop transition.
//!
//! A [`BoardSession`] owns a private copy of the issues. Picking a card up
//! captures its id; dropping it on a column applies that column's status
//! through [`apply_transition`]. The capture is cleared by every drop, so a
//! stale id can never leak into a later one.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::model::{Issue, IssueStatus};
use crate::query::{self, Facet, IssueFilters};
use crate::store::InMemoryStore;

/// One board column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Column {
    pub key: &'static str,
    pub title: &'static str,
    pub status: IssueStatus,
}

/// Board columns, left to right.
pub const COLUMNS: [Column; 4] = [
    Column {
        key: "todo",
        title: "To Do",
        status: IssueStatus::ToDo,
    },
    Column {
        key: "inprogress",
        title: "In Progress",
        status: IssueStatus::InProgress,
    },
    Column {
        key: "blocked",
        title: "Blocked",
        status: IssueStatus::Blocked,
    },
    Column {
        key: "done",
        title: "Done",
        status: IssueStatus::Done,
    },
];

impl Column {
    #[must_use]
    pub const fn for_status(status: IssueStatus) -> Self {
        match status {
            IssueStatus::ToDo => COLUMNS[0],
            IssueStatus::InProgress => COLUMNS[1],
            IssueStatus::Blocked => COLUMNS[2],
            IssueStatus::Done => COLUMNS[3],
        }
    }

    /// Look a column up by key ("inprogress") or status ("In Progress").
    #[must_use]
    pub fn find(name: &str) -> Option<Self> {
        COLUMNS
            .iter()
            .copied()
            .find(|column| column.key.eq_ignore_ascii_case(name.trim()))
            .or_else(|| name.parse().ok().map(Self::for_status))
    }

    #[must_use]
    pub fn empty_message(&self) -> String {
        format!("No issues in {}", self.title.to_lowercase())
    }
}

/// Move `issue` to `status`, returning the updated copy.
///
/// `updated_at` becomes `now`, or one millisecond past the previous stamp
/// when the clock has not moved forward, so it always strictly increases.
#[must_use]
pub fn apply_transition(issue: &Issue, status: IssueStatus, now: DateTime<Utc>) -> Issue {
    let updated_at = if now > issue.updated_at {
        now
    } else {
        issue.updated_at + Duration::milliseconds(1)
    };
    Issue {
        status,
        updated_at,
        ..issue.clone()
    }
}

/// What a drop did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DropOutcome {
    Moved {
        issue_id: String,
        from: IssueStatus,
        to: IssueStatus,
    },
    /// Nothing was picked up.
    NothingCaptured,
    /// The captured issue is no longer on the board.
    Vanished { issue_id: String },
}

/// A column with the visible issues in it.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnView<'a> {
    #[serde(flatten)]
    pub column: Column,
    pub issues: Vec<&'a Issue>,
}

impl ColumnView<'_> {
    #[must_use]
    pub fn count(&self) -> usize {
        self.issues.len()
    }
}

/// Per-screen board state.
#[derive(Debug, Clone, Default)]
pub struct BoardSession {
    issues: Vec<Issue>,
    filters: IssueFilters,
    dragged: Option<String>,
}

impl BoardSession {
    #[must_use]
    pub fn new(issues: Vec<Issue>) -> Self {
        Self {
            issues,
            filters: IssueFilters::default(),
            dragged: None,
        }
    }

    /// Board over a private copy of the store's issues.
    #[must_use]
    pub fn from_store(store: &InMemoryStore) -> Self {
        Self::new(store.issues().to_vec())
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filters.search = term.into();
    }

    /// Restrict the board to one project id.
    pub fn set_project(&mut self, project: Facet<String>) {
        self.filters.project = project;
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.filters.search
    }

    #[must_use]
    pub const fn project(&self) -> &Facet<String> {
        &self.filters.project
    }

    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    #[must_use]
    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Issues passing the search and project filters.
    #[must_use]
    pub fn visible(&self) -> Vec<&Issue> {
        self.filters.apply(&self.issues)
    }

    #[must_use]
    pub fn column(&self, status: IssueStatus) -> Vec<&Issue> {
        self.visible()
            .into_iter()
            .filter(|issue| issue.status == status)
            .collect()
    }

    #[must_use]
    pub fn columns(&self) -> Vec<ColumnView<'_>> {
        let visible = self.visible();
        COLUMNS
            .iter()
            .map(|column| ColumnView {
                column: *column,
                issues: visible
                    .iter()
                    .copied()
                    .filter(|issue| issue.status == column.status)
                    .collect(),
            })
            .collect()
    }

    /// Project ids present on the board, first-seen order.
    #[must_use]
    pub fn project_options(&self) -> Vec<&str> {
        query::distinct(
            self.issues
                .iter()
                .filter_map(|issue| issue.project_id.as_deref()),
        )
    }

    // ========================================================================
    // Drag and drop
    // ========================================================================

    /// Capture a visible card. Returns `false` and leaves any existing
    /// capture alone when the id is not on the board.
    pub fn pick_up(&mut self, issue_id: &str) -> bool {
        let on_board = self.visible().iter().any(|issue| issue.id == issue_id);
        if on_board {
            self.dragged = Some(issue_id.to_string());
        } else {
            debug!(issue_id, "Ignoring pick-up of issue not on the board");
        }
        on_board
    }

    #[must_use]
    pub fn dragged(&self) -> Option<&str> {
        self.dragged.as_deref()
    }

    pub fn cancel_drag(&mut self) {
        self.dragged = None;
    }

    /// Drop the captured card on the column for `status`.
    pub fn drop_on(&mut self, status: IssueStatus, now: DateTime<Utc>) -> DropOutcome {
        let Some(issue_id) = self.dragged.take() else {
            return DropOutcome::NothingCaptured;
        };
        let Some(slot) = self.issues.iter_mut().find(|issue| issue.id == issue_id) else {
            info!(issue_id = %issue_id, "Dropped issue is no longer on the board");
            return DropOutcome::Vanished { issue_id };
        };
        let from = slot.status;
        *slot = apply_transition(slot, status, now);
        info!(issue_id = %issue_id, from = %from, to = %status, "Moved issue");
        DropOutcome::Moved {
            issue_id,
            from,
            to: status,
        }
    }

    /// Pick up and drop in one step.
    pub fn move_issue(
        &mut self,
        issue_id: &str,
        status: IssueStatus,
        now: DateTime<Utc>,
    ) -> DropOutcome {
        if !self.pick_up(issue_id) {
            self.dragged = None;
            return DropOutcome::NothingCaptured;
        }
        self.drop_on(status, now)
    }

    /// Remove an issue from the board, e.g. when it is deleted mid-drag.
    pub fn remove(&mut self, issue_id: &str) -> Option<Issue> {
        let index = self.issues.iter().position(|issue| issue.id == issue_id)?;
        Some(self.issues.remove(index))
    }
}
