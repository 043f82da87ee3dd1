//! Aggregates behind the dashboard, project, person, profile and sprint screens.
//!
//! All functions take `now` explicitly so results are reproducible.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::model::{Issue, IssueStatus, Person, Project, ProjectStatus, Sprint};
use crate::query;
use crate::store::InMemoryStore;
use crate::util::{midnight_utc, percentage};

const MS_PER_DAY: i64 = 86_400_000;

/// Issues shown in "recent" lists.
pub const RECENT_LIMIT: usize = 5;
/// Deadlines shown on the dashboard.
pub const DEADLINE_LIMIT: usize = 3;
/// Entries in the team activity feed.
pub const ACTIVITY_LIMIT: usize = 4;

pub const UNKNOWN_PERSON: &str = "Unknown";
pub const UNKNOWN_PROJECT: &str = "Unknown Project";

// ============================================================================
// Status counts
// ============================================================================

/// Issue count per status. Every status is always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    #[serde(rename = "To Do")]
    pub todo: usize,
    #[serde(rename = "In Progress")]
    pub in_progress: usize,
    #[serde(rename = "Blocked")]
    pub blocked: usize,
    #[serde(rename = "Done")]
    pub done: usize,
}

impl StatusCounts {
    #[must_use]
    pub const fn get(&self, status: IssueStatus) -> usize {
        match status {
            IssueStatus::ToDo => self.todo,
            IssueStatus::InProgress => self.in_progress,
            IssueStatus::Blocked => self.blocked,
            IssueStatus::Done => self.done,
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.todo + self.in_progress + self.blocked + self.done
    }

    /// `(status, count)` pairs in board column order.
    #[must_use]
    pub fn entries(&self) -> [(IssueStatus, usize); 4] {
        IssueStatus::ALL.map(|status| (status, self.get(status)))
    }

    /// Issues not yet done.
    #[must_use]
    pub const fn open(&self) -> usize {
        self.total() - self.done
    }

    #[must_use]
    pub fn completion_rate(&self) -> u32 {
        percentage(self.done, self.total())
    }

    /// One status as a percentage of all issues.
    #[must_use]
    pub fn share(&self, status: IssueStatus) -> u32 {
        percentage(self.get(status), self.total())
    }

    fn bump(&mut self, status: IssueStatus) {
        match status {
            IssueStatus::ToDo => self.todo += 1,
            IssueStatus::InProgress => self.in_progress += 1,
            IssueStatus::Blocked => self.blocked += 1,
            IssueStatus::Done => self.done += 1,
        }
    }
}

#[must_use]
pub fn count_by_status<'a>(issues: impl IntoIterator<Item = &'a Issue>) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for issue in issues {
        counts.bump(issue.status);
    }
    counts
}

/// Share of done issues, rounded to a whole percent. 0 for no issues.
#[must_use]
pub fn completion_rate<'a>(issues: impl IntoIterator<Item = &'a Issue>) -> u32 {
    count_by_status(issues).completion_rate()
}

/// Completion rate over the issues belonging to `project`.
#[must_use]
pub fn progress_for_project<'a>(
    project: &Project,
    issues: impl IntoIterator<Item = &'a Issue>,
) -> u32 {
    completion_rate(
        issues
            .into_iter()
            .filter(|issue| issue.belongs_to(&project.id)),
    )
}

// ============================================================================
// Deadlines
// ============================================================================

/// Whole days from `now` until midnight UTC of `target`, rounded up.
#[must_use]
pub fn days_until(target: NaiveDate, now: DateTime<Utc>) -> i64 {
    let millis = (midnight_utc(target) - now).num_milliseconds();
    let days = millis.div_euclid(MS_PER_DAY);
    if millis.rem_euclid(MS_PER_DAY) == 0 {
        days
    } else {
        days + 1
    }
}

/// Days left until a deadline. Zero or fewer days is `Overdue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Countdown {
    DaysLeft(i64),
    Overdue,
}

impl Countdown {
    #[must_use]
    pub const fn from_days(days: i64) -> Self {
        if days > 0 {
            Self::DaysLeft(days)
        } else {
            Self::Overdue
        }
    }

    #[must_use]
    pub fn until(target: NaiveDate, now: DateTime<Utc>) -> Self {
        Self::from_days(days_until(target, now))
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DaysLeft(1) => f.write_str("1 day left"),
            Self::DaysLeft(days) => write!(f, "{days} days left"),
            Self::Overdue => f.write_str("Overdue"),
        }
    }
}

/// How close a project deadline is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeadlineUrgency {
    Critical,
    Warning,
    Calm,
}

impl DeadlineUrgency {
    /// Under 30 days is critical, under 60 a warning.
    #[must_use]
    pub const fn from_days(days: i64) -> Self {
        if days < 30 {
            Self::Critical
        } else if days < 60 {
            Self::Warning
        } else {
            Self::Calm
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Calm => "calm",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Deadline<'a> {
    pub project: &'a Project,
    pub days_left: i64,
    pub countdown: Countdown,
    pub urgency: DeadlineUrgency,
}

/// Active and planned projects, nearest deadline first.
#[must_use]
pub fn upcoming_deadlines(
    projects: &[Project],
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<Deadline<'_>> {
    let mut deadlines: Vec<Deadline<'_>> = projects
        .iter()
        .filter(|project| project.status.is_upcoming())
        .map(|project| {
            let days_left = days_until(project.end_date, now);
            Deadline {
                project,
                days_left,
                countdown: Countdown::from_days(days_left),
                urgency: DeadlineUrgency::from_days(days_left),
            }
        })
        .collect();
    deadlines.sort_by_key(|deadline| deadline.days_left);
    deadlines.truncate(limit);
    deadlines
}

// ============================================================================
// Activity
// ============================================================================

/// One line of the team activity feed.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityEntry<'a> {
    pub issue: &'a Issue,
    pub assignee_name: &'a str,
    pub project_name: &'a str,
}

/// Most recently updated issues with their assignee and project names.
#[must_use]
pub fn team_activity(store: &InMemoryStore, limit: usize) -> Vec<ActivityEntry<'_>> {
    let mut recent: Vec<&Issue> = store.issues().iter().collect();
    recent.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    recent
        .into_iter()
        .take(limit)
        .map(|issue| ActivityEntry {
            issue,
            assignee_name: store
                .assignee_of(issue)
                .map_or(UNKNOWN_PERSON, |person| person.name.as_str()),
            project_name: store
                .project_of(issue)
                .map_or(UNKNOWN_PROJECT, |project| project.name.as_str()),
        })
        .collect()
}

// ============================================================================
// Screen summaries
// ============================================================================

/// Everything the home dashboard shows.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary<'a> {
    pub current_user: Option<&'a Person>,
    pub my_issues: usize,
    pub my_completed: usize,
    pub active_projects: usize,
    pub team_size: usize,
    pub total_issues: usize,
    pub status_counts: StatusCounts,
    pub completion_rate: u32,
    pub recent_issues: Vec<&'a Issue>,
    pub deadlines: Vec<Deadline<'a>>,
    pub activity: Vec<ActivityEntry<'a>>,
}

impl<'a> DashboardSummary<'a> {
    #[must_use]
    pub fn build(store: &'a InMemoryStore, now: DateTime<Utc>) -> Self {
        let mine = store.my_issues();
        let status_counts = count_by_status(store.issues());
        Self {
            current_user: store.current_user(),
            my_issues: mine.len(),
            my_completed: mine.iter().filter(|issue| issue.status.is_done()).count(),
            active_projects: store.projects_by_status(ProjectStatus::Active).len(),
            team_size: store.people().len(),
            total_issues: status_counts.total(),
            status_counts,
            completion_rate: status_counts.completion_rate(),
            recent_issues: mine.into_iter().take(RECENT_LIMIT).collect(),
            deadlines: upcoming_deadlines(store.projects(), now, DEADLINE_LIMIT),
            activity: team_activity(store, ACTIVITY_LIMIT),
        }
    }
}

/// Project detail screen.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary<'a> {
    pub project: &'a Project,
    pub owner: Option<&'a Person>,
    pub total_issues: usize,
    pub open_issues: usize,
    pub status_counts: StatusCounts,
    pub completion_rate: u32,
    /// Distinct resolvable assignees, first-seen order.
    pub members: Vec<&'a Person>,
    pub recent_issues: Vec<&'a Issue>,
    pub countdown: Countdown,
}

impl<'a> ProjectSummary<'a> {
    #[must_use]
    pub fn build(store: &'a InMemoryStore, project: &'a Project, now: DateTime<Utc>) -> Self {
        let issues = store.issues_by_project(&project.id);
        let status_counts = count_by_status(issues.iter().copied());
        let member_ids = query::distinct(issues.iter().filter_map(|i| i.assignee_id.as_deref()));
        Self {
            project,
            owner: store.owner_of(project),
            total_issues: status_counts.total(),
            open_issues: status_counts.open(),
            status_counts,
            completion_rate: status_counts.completion_rate(),
            members: member_ids
                .into_iter()
                .filter_map(|id| store.get_person(id))
                .collect(),
            recent_issues: issues.into_iter().take(RECENT_LIMIT).collect(),
            countdown: Countdown::until(project.end_date, now),
        }
    }
}

/// Person detail screen.
#[derive(Debug, Clone, Serialize)]
pub struct PersonSummary<'a> {
    pub person: &'a Person,
    pub assigned: usize,
    pub owned_projects: Vec<&'a Project>,
    pub stats: ProfileStats,
    pub recent_issues: Vec<&'a Issue>,
}

impl<'a> PersonSummary<'a> {
    #[must_use]
    pub fn build(store: &'a InMemoryStore, person: &'a Person) -> Self {
        let assigned = store.issues_by_assignee(&person.id);
        Self {
            person,
            assigned: assigned.len(),
            owned_projects: store.projects_by_owner(&person.id),
            stats: ProfileStats::from_issues(assigned.iter().copied()),
            recent_issues: assigned.into_iter().take(RECENT_LIMIT).collect(),
        }
    }
}

/// Workload numbers on the profile screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProfileStats {
    pub assigned: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub story_points: u32,
    pub completed_story_points: u32,
    pub completion_rate: u32,
}

impl ProfileStats {
    #[must_use]
    pub fn from_issues<'a>(issues: impl IntoIterator<Item = &'a Issue>) -> Self {
        let mut stats = Self::default();
        for issue in issues {
            stats.assigned += 1;
            stats.story_points += issue.story_points;
            match issue.status {
                IssueStatus::Done => {
                    stats.completed += 1;
                    stats.completed_story_points += issue.story_points;
                }
                IssueStatus::InProgress => stats.in_progress += 1,
                IssueStatus::ToDo | IssueStatus::Blocked => {}
            }
        }
        stats.completion_rate = percentage(stats.completed, stats.assigned);
        stats
    }
}

// ============================================================================
// Sprint
// ============================================================================

/// Time left in the sprint relative to its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SprintHealth {
    Good,
    Warning,
    Critical,
}

impl SprintHealth {
    /// More than half the sprint left is good, more than a quarter a warning.
    #[must_use]
    pub const fn from_days(remaining: i64, total: i64) -> Self {
        if remaining * 2 > total {
            Self::Good
        } else if remaining * 4 > total {
            Self::Warning
        } else {
            Self::Critical
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SprintProgress<'a> {
    pub sprint: &'a Sprint,
    pub days_total: i64,
    pub days_remaining: i64,
    pub health: SprintHealth,
    pub message: &'static str,
}

impl<'a> SprintProgress<'a> {
    #[must_use]
    pub fn build(sprint: &'a Sprint, now: DateTime<Utc>) -> Self {
        let days_total = (sprint.end_date - sprint.start_date).num_days();
        let days_remaining = days_until(sprint.end_date, now).max(0);
        Self {
            sprint,
            days_total,
            days_remaining,
            health: SprintHealth::from_days(days_remaining, days_total),
            message: encouragement(days_remaining),
        }
    }
}

fn encouragement(days_remaining: i64) -> &'static str {
    match days_remaining {
        d if d > 7 => "Great pace!",
        d if d > 3 => "Keep it up!",
        d if d > 1 => "Final push!",
        _ => "Last day!",
    }
}
