//! JSON output rows.
//!
//! Entities are flattened into the row and joined with the names a view
//! would resolve through foreign keys, so `--json` consumers never need a
//! second lookup.

use chrono::{DateTime, Utc};
use pmdash_lib::board::ColumnView;
use pmdash_lib::stats::{self, Countdown};
use pmdash_lib::{
    DropOutcome, InMemoryStore, Issue, Notification, NotificationFilter, Person, Project,
};
use serde::Serialize;

/// Issue with resolved assignee and project names for list views.
#[derive(Debug, Clone, Serialize)]
pub struct IssueRow<'a> {
    #[serde(flatten)]
    pub issue: &'a Issue,
    pub assignee_name: Option<&'a str>,
    pub project_name: Option<&'a str>,
}

impl<'a> IssueRow<'a> {
    #[must_use]
    pub fn new(store: &'a InMemoryStore, issue: &'a Issue) -> Self {
        Self {
            issue,
            assignee_name: store.assignee_of(issue).map(|p| p.name.as_str()),
            project_name: store.project_of(issue).map(|p| p.name.as_str()),
        }
    }

    #[must_use]
    pub fn rows(store: &'a InMemoryStore, issues: &[&'a Issue]) -> Vec<Self> {
        issues.iter().map(|&issue| Self::new(store, issue)).collect()
    }
}

/// Issue details with full relations for the show view.
#[derive(Debug, Clone, Serialize)]
pub struct IssueDetails<'a> {
    #[serde(flatten)]
    pub issue: &'a Issue,
    pub assignee: Option<&'a Person>,
    pub project: Option<&'a Project>,
}

/// Project with owner, issue count and progress for the projects list.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectRow<'a> {
    #[serde(flatten)]
    pub project: &'a Project,
    pub owner_name: Option<&'a str>,
    pub issue_count: usize,
    pub progress: u32,
    pub countdown: Countdown,
}

impl<'a> ProjectRow<'a> {
    #[must_use]
    pub fn new(store: &'a InMemoryStore, project: &'a Project, now: DateTime<Utc>) -> Self {
        let issues = store.issues_by_project(&project.id);
        Self {
            project,
            owner_name: store.owner_of(project).map(|p| p.name.as_str()),
            issue_count: issues.len(),
            progress: stats::completion_rate(issues),
            countdown: Countdown::until(project.end_date, now),
        }
    }
}

/// Board state after an optional move.
#[derive(Debug, Clone, Serialize)]
pub struct BoardOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<DropOutcome>,
    pub search: &'a str,
    pub project: String,
    pub projects: Vec<&'a str>,
    pub columns: Vec<ColumnView<'a>>,
}

/// Inbox state after any mutations requested on the command line.
#[derive(Debug, Clone, Serialize)]
pub struct InboxOutput<'a> {
    pub filter: NotificationFilter,
    pub unread: usize,
    pub total: usize,
    pub marked_read: usize,
    pub deleted: Vec<String>,
    pub notifications: Vec<&'a Notification>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::Value;

    const LOGIN_ISSUE: &str = "2bcc688e-cc79-4c95-81be-db7f3b437365";
    const INTERNAL_TOOLS: &str = "5a5fc0a6-5ec0-4340-818b-b8a3a42dd583";

    #[test]
    fn test_issue_row_flattens_and_joins() {
        let store = InMemoryStore::builtin();
        let issue = store.get_issue(LOGIN_ISSUE).unwrap();
        let value = serde_json::to_value(IssueRow::new(&store, issue)).unwrap();
        assert_eq!(value["id"], LOGIN_ISSUE);
        assert_eq!(value["status"], "To Do");
        assert_eq!(value["assignee_name"], "Lucy Pearl");
        assert_eq!(value["project_name"], "Team Management Suite");
    }

    #[test]
    fn test_issue_row_dangling_keys_are_null() {
        let store = InMemoryStore::builtin();
        let mut issue = store.get_issue(LOGIN_ISSUE).unwrap().clone();
        issue.assignee_id = Some("nobody".to_string());
        issue.project_id = None;
        let value = serde_json::to_value(IssueRow::new(&store, &issue)).unwrap();
        assert_eq!(value["assignee_name"], Value::Null);
        assert_eq!(value["project_name"], Value::Null);
    }

    #[test]
    fn test_project_row_progress_and_countdown() {
        let store = InMemoryStore::builtin();
        let project = store.get_project(INTERNAL_TOOLS).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 8, 1, 9, 30, 0).unwrap();
        let row = ProjectRow::new(&store, project, now);
        assert_eq!(row.owner_name, Some("Priya Raman"));
        assert_eq!(row.issue_count, 1);
        assert_eq!(row.progress, 100);
        assert_eq!(row.countdown, Countdown::DaysLeft(16));
    }
}
