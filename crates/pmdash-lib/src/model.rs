//! Core data types for pmdash-lib.
//!
//! Field names follow the dashboard's JSON seed format (camelCase,
//! `imageURL`), so seed documents deserialize without adapters.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DashError;

/// Normalize a user-supplied enum spelling: lowercase, no spaces,
/// dashes or underscores. "In Progress", "in_progress" and "inprogress"
/// all collapse to the same key.
fn enum_key(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Issue workflow status. Any status may move to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum IssueStatus {
    #[default]
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    Blocked,
    Done,
}

impl IssueStatus {
    /// Every status, in board column order.
    pub const ALL: [Self; 4] = [Self::ToDo, Self::InProgress, Self::Blocked, Self::Done];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::Blocked => "Blocked",
            Self::Done => "Done",
        }
    }

    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueStatus {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match enum_key(s).as_str() {
            "todo" => Ok(Self::ToDo),
            "inprogress" => Ok(Self::InProgress),
            "blocked" => Ok(Self::Blocked),
            "done" => Ok(Self::Done),
            _ => Err(DashError::InvalidStatus {
                status: s.to_string(),
            }),
        }
    }
}

/// Issue priority, ordered from least to most urgent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match enum_key(s).as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(DashError::InvalidPriority {
                priority: s.to_string(),
            }),
        }
    }
}

/// Team a person or project belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Dev,
    Design,
    Product,
    Qa,
    Marketing,
}

impl Team {
    pub const ALL: [Self; 5] = [
        Self::Dev,
        Self::Design,
        Self::Product,
        Self::Qa,
        Self::Marketing,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Design => "design",
            Self::Product => "product",
            Self::Qa => "qa",
            Self::Marketing => "marketing",
        }
    }

    /// Capitalized name used in filter menus ("Dev", "Qa").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dev => "Dev",
            Self::Design => "Design",
            Self::Product => "Product",
            Self::Qa => "Qa",
            Self::Marketing => "Marketing",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Team {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match enum_key(s).as_str() {
            "dev" => Ok(Self::Dev),
            "design" => Ok(Self::Design),
            "product" => Ok(Self::Product),
            "qa" => Ok(Self::Qa),
            "marketing" => Ok(Self::Marketing),
            _ => Err(DashError::InvalidTeam {
                team: s.to_string(),
            }),
        }
    }
}

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    Active,
    Planning,
    Archived,
}

impl ProjectStatus {
    pub const ALL: [Self; 3] = [Self::Active, Self::Planning, Self::Archived];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Planning => "Planning",
            Self::Archived => "Archived",
        }
    }

    /// Active and planned projects have deadlines worth tracking.
    #[must_use]
    pub const fn is_upcoming(self) -> bool {
        matches!(self, Self::Active | Self::Planning)
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match enum_key(s).as_str() {
            "active" => Ok(Self::Active),
            "planning" => Ok(Self::Planning),
            "archived" => Ok(Self::Archived),
            _ => Err(DashError::InvalidProjectStatus {
                status: s.to_string(),
            }),
        }
    }
}

/// Daily availability window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkingHours {
    pub start: String,
    pub end: String,
    pub timezone: String,
}

impl fmt::Display for WorkingHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} {}", self.start, self.end, self.timezone)
    }
}

/// A team member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub name: String,
    pub role: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    pub team: Team,
    #[serde(rename = "imageURL", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub bio: String,
    pub working_hours: WorkingHours,
}

impl Person {
    /// Avatar fallback: first letter of each name part.
    #[must_use]
    pub fn initials(&self) -> String {
        crate::util::initials(&self.name)
    }

    /// Given name used in greetings.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

/// A project grouping issues.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Owner person id. May not resolve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    pub status: ProjectStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(rename = "imageURL", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Accent colour (CSS hex) used for board stripes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub team: Team,
}

/// The primary issue entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: IssueStatus,
    #[serde(default)]
    pub priority: Priority,
    pub story_points: u32,
    /// Assignee person id. May be absent or dangling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    /// Owning project id. May be absent or dangling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(with = "crate::util::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::util::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Issue {
    #[must_use]
    pub fn is_assigned_to(&self, person_id: &str) -> bool {
        self.assignee_id.as_deref() == Some(person_id)
    }

    #[must_use]
    pub fn belongs_to(&self, project_id: &str) -> bool {
        self.project_id.as_deref() == Some(project_id)
    }
}

/// Notification urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match enum_key(s).as_str() {
            "critical" => Ok(Self::Critical),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(DashError::InvalidSeverity {
                severity: s.to_string(),
            }),
        }
    }
}

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationCategory {
    Project,
    Issue,
    Comment,
    System,
}

impl NotificationCategory {
    pub const ALL: [Self; 4] = [Self::Project, Self::Issue, Self::Comment, Self::System];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Issue => "issue",
            Self::Comment => "comment",
            Self::System => "system",
        }
    }
}

impl fmt::Display for NotificationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationCategory {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match enum_key(s).as_str() {
            "project" | "projects" => Ok(Self::Project),
            "issue" | "issues" => Ok(Self::Issue),
            "comment" | "comments" => Ok(Self::Comment),
            "system" => Ok(Self::System),
            _ => Err(DashError::InvalidCategory {
                category: s.to_string(),
            }),
        }
    }
}

/// An inbox entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub severity: Severity,
    #[serde(default)]
    pub read: bool,
    /// Relative time label ("2 hours ago").
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub category: NotificationCategory,
}

/// Release channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseStatus {
    Released,
    Beta,
    Alpha,
    Planned,
}

impl ReleaseStatus {
    pub const ALL: [Self; 4] = [Self::Released, Self::Beta, Self::Alpha, Self::Planned];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Released => "released",
            Self::Beta => "beta",
            Self::Alpha => "alpha",
            Self::Planned => "planned",
        }
    }
}

impl fmt::Display for ReleaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReleaseStatus {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match enum_key(s).as_str() {
            "released" => Ok(Self::Released),
            "beta" => Ok(Self::Beta),
            "alpha" => Ok(Self::Alpha),
            "planned" => Ok(Self::Planned),
            _ => Err(DashError::InvalidReleaseStatus {
                status: s.to_string(),
            }),
        }
    }
}

/// A shipped or scheduled product release.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    pub id: String,
    pub version: String,
    pub release_date: NaiveDate,
    pub status: ReleaseStatus,
    pub fixes: u32,
    pub bugs: u32,
    pub features: u32,
    pub downloads: u64,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changelog: Option<String>,
}

/// The sprint currently in flight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Completion percentage (0-100).
    pub progress: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_status_parses_display_and_aliases() {
        assert_eq!("To Do".parse::<IssueStatus>().unwrap(), IssueStatus::ToDo);
        assert_eq!("todo".parse::<IssueStatus>().unwrap(), IssueStatus::ToDo);
        assert_eq!(
            "in_progress".parse::<IssueStatus>().unwrap(),
            IssueStatus::InProgress
        );
        assert_eq!(
            "In Progress".parse::<IssueStatus>().unwrap(),
            IssueStatus::InProgress
        );
        assert_eq!("DONE".parse::<IssueStatus>().unwrap(), IssueStatus::Done);
        assert!(matches!(
            "Shipped".parse::<IssueStatus>(),
            Err(DashError::InvalidStatus { .. })
        ));
    }

    #[test]
    fn test_issue_status_serde_uses_display_strings() {
        let json = serde_json::to_string(&IssueStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
        let back: IssueStatus = serde_json::from_str("\"To Do\"").unwrap();
        assert_eq!(back, IssueStatus::ToDo);
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Critical > Priority::High);
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_team_roundtrip_and_label() {
        for team in Team::ALL {
            assert_eq!(team.as_str().parse::<Team>().unwrap(), team);
        }
        assert_eq!(Team::Qa.label(), "Qa");
        assert_eq!(serde_json::to_string(&Team::Marketing).unwrap(), "\"marketing\"");
    }

    #[test]
    fn test_notification_category_accepts_plural_menu_values() {
        assert_eq!(
            "Projects".parse::<NotificationCategory>().unwrap(),
            NotificationCategory::Project
        );
        assert_eq!(
            "comments".parse::<NotificationCategory>().unwrap(),
            NotificationCategory::Comment
        );
    }

    #[test]
    fn test_issue_deserializes_seed_shape() {
        let json = r#"{
            "id": "i-1",
            "title": "Fix broken login redirect flow",
            "description": "Investigate auth flow",
            "status": "To Do",
            "priority": "Medium",
            "storyPoints": 9,
            "assigneeId": "p-1",
            "projectId": "pr-1",
            "createdAt": "2025-02-05T10:32:51",
            "updatedAt": "2025-07-24T10:07:44"
        }"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.story_points, 9);
        assert!(issue.is_assigned_to("p-1"));
        assert!(issue.belongs_to("pr-1"));
        assert_eq!(issue.updated_at.to_rfc3339(), "2025-07-24T10:07:44+00:00");
    }

    #[test]
    fn test_person_first_name_and_initials() {
        let person = Person {
            id: "p".into(),
            name: "Lucy Pearl".into(),
            role: "Engineer".into(),
            email: "lucy@example.com".into(),
            phone: String::new(),
            location: String::new(),
            team: Team::Dev,
            image_url: None,
            bio: String::new(),
            working_hours: WorkingHours {
                start: "09:00".into(),
                end: "17:00".into(),
                timezone: "PST".into(),
            },
        };
        assert_eq!(person.first_name(), "Lucy");
        assert_eq!(person.initials(), "LP");
        assert_eq!(person.working_hours.to_string(), "09:00 - 17:00 PST");
    }
}
