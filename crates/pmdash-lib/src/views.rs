//! Per-screen view state.
//!
//! Each session owns the filter bar of one screen and is handed the store
//! explicitly when it renders. Sessions that mutate (the notification
//! inbox) work on a private copy that is discarded with the session.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::info;

use crate::error::DashError;
use crate::model::{
    Issue, IssueStatus, Notification, NotificationCategory, Person, Priority, Project,
    ProjectStatus, Release, ReleaseStatus, Team,
};
use crate::query::{
    self, Facet, IssueFilters, NOTIFICATION_TEXT, PeopleFilters, ProjectFilters, RELEASE_TEXT,
    WILDCARD,
};
use crate::store::InMemoryStore;

/// Releases per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 5;

// ============================================================================
// Issue list
// ============================================================================

/// Issues screen: search box plus status, priority and assignee menus.
#[derive(Debug, Clone, Default)]
pub struct IssueListView {
    pub filters: IssueFilters,
}

impl IssueListView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.filters.search = term.into();
        self
    }

    #[must_use]
    pub fn with_status(mut self, raw: &str) -> Self {
        self.filters.status = Facet::parse(raw);
        self
    }

    #[must_use]
    pub fn with_priority(mut self, raw: &str) -> Self {
        self.filters.priority = Facet::parse(raw);
        self
    }

    #[must_use]
    pub fn with_assignee(mut self, raw: &str) -> Self {
        self.filters.assignee = Facet::parse(raw);
        self
    }

    #[must_use]
    pub fn with_project(mut self, raw: &str) -> Self {
        self.filters.project = Facet::parse(raw);
        self
    }

    #[must_use]
    pub fn results<'a>(&self, store: &'a InMemoryStore) -> Vec<&'a Issue> {
        store.list_issues(&self.filters)
    }

    /// Status menu entries, first-seen order.
    #[must_use]
    pub fn status_options(store: &InMemoryStore) -> Vec<IssueStatus> {
        query::distinct(store.issues().iter().map(|issue| issue.status))
    }

    #[must_use]
    pub fn priority_options(store: &InMemoryStore) -> Vec<Priority> {
        query::distinct(store.issues().iter().map(|issue| issue.priority))
    }

    #[must_use]
    pub fn assignee_options(store: &InMemoryStore) -> Vec<&str> {
        query::distinct(
            store
                .issues()
                .iter()
                .filter_map(|issue| issue.assignee_id.as_deref()),
        )
    }
}

// ============================================================================
// People and projects
// ============================================================================

/// People directory: search box plus team and role menus.
#[derive(Debug, Clone, Default)]
pub struct PeopleView {
    pub filters: PeopleFilters,
}

impl PeopleView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.filters.search = term.into();
        self
    }

    #[must_use]
    pub fn with_team(mut self, raw: &str) -> Self {
        self.filters.team = Facet::parse(raw);
        self
    }

    #[must_use]
    pub fn with_role(mut self, raw: &str) -> Self {
        self.filters.role = Facet::parse(raw);
        self
    }

    #[must_use]
    pub fn results<'a>(&self, store: &'a InMemoryStore) -> Vec<&'a Person> {
        store.list_people(&self.filters)
    }

    #[must_use]
    pub fn team_options(store: &InMemoryStore) -> Vec<Team> {
        query::distinct(store.people().iter().map(|person| person.team))
    }

    #[must_use]
    pub fn role_options(store: &InMemoryStore) -> Vec<&str> {
        query::distinct(store.people().iter().map(|person| person.role.as_str()))
    }
}

/// Projects screen: search box plus status and team menus.
#[derive(Debug, Clone, Default)]
pub struct ProjectListView {
    pub filters: ProjectFilters,
}

impl ProjectListView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.filters.search = term.into();
        self
    }

    #[must_use]
    pub fn with_status(mut self, raw: &str) -> Self {
        self.filters.status = Facet::<ProjectStatus>::parse(raw);
        self
    }

    #[must_use]
    pub fn with_team(mut self, raw: &str) -> Self {
        self.filters.team = Facet::parse(raw);
        self
    }

    #[must_use]
    pub fn results<'a>(&self, store: &'a InMemoryStore) -> Vec<&'a Project> {
        store.list_projects(&self.filters)
    }
}

// ============================================================================
// Notifications
// ============================================================================

/// Inbox filter tab.
///
/// `Unrecognized` keeps a tab name that is neither a state nor a category.
/// Like [`Facet::Unrecognized`] it matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NotificationFilter {
    #[default]
    All,
    Unread,
    Read,
    Category(NotificationCategory),
    Unrecognized(String),
}

impl NotificationFilter {
    /// Parse a tab name, keeping unknown input as `Unrecognized`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        raw.parse()
            .unwrap_or_else(|_| Self::Unrecognized(raw.trim().to_string()))
    }

    #[must_use]
    pub fn matches(&self, notification: &Notification) -> bool {
        match self {
            Self::All => true,
            Self::Unread => !notification.read,
            Self::Read => notification.read,
            Self::Category(category) => notification.category == *category,
            Self::Unrecognized(_) => false,
        }
    }
}

impl fmt::Display for NotificationFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(WILDCARD),
            Self::Unread => f.write_str("unread"),
            Self::Read => f.write_str("read"),
            Self::Category(category) => category.fmt(f),
            Self::Unrecognized(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for NotificationFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for NotificationFilter {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | WILDCARD => Ok(Self::All),
            "unread" => Ok(Self::Unread),
            "read" => Ok(Self::Read),
            other => other.parse().map(Self::Category),
        }
    }
}

/// Notification inbox over a private copy of the seeded notifications.
#[derive(Debug, Clone, Default)]
pub struct NotificationInbox {
    notifications: Vec<Notification>,
    pub filter: NotificationFilter,
    /// Matched against title and description.
    pub search: String,
}

impl NotificationInbox {
    #[must_use]
    pub fn new(notifications: Vec<Notification>) -> Self {
        Self {
            notifications,
            filter: NotificationFilter::All,
            search: String::new(),
        }
    }

    #[must_use]
    pub fn from_store(store: &InMemoryStore) -> Self {
        Self::new(store.notifications().to_vec())
    }

    #[must_use]
    pub fn all(&self) -> &[Notification] {
        &self.notifications
    }

    /// Notifications passing the current tab and search.
    #[must_use]
    pub fn visible(&self) -> Vec<&Notification> {
        self.notifications
            .iter()
            .filter(|n| self.filter.matches(n))
            .filter(|n| query::matches_substring(*n, &NOTIFICATION_TEXT, &self.search))
            .collect()
    }

    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    /// Mark one notification read. Returns `false` if the id is unknown.
    pub fn mark_read(&mut self, id: &str) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.read = true;
                info!(id, "Marked notification read");
                true
            }
            None => false,
        }
    }

    /// Mark everything read, returning how many changed.
    pub fn mark_all_read(&mut self) -> usize {
        let mut changed = 0;
        for notification in self.notifications.iter_mut().filter(|n| !n.read) {
            notification.read = true;
            changed += 1;
        }
        info!(changed, "Marked all notifications read");
        changed
    }

    /// Drop a notification from the inbox.
    pub fn delete(&mut self, id: &str) -> Option<Notification> {
        let index = self.notifications.iter().position(|n| n.id == id)?;
        info!(id, "Deleted notification");
        Some(self.notifications.remove(index))
    }
}

// ============================================================================
// Releases
// ============================================================================

/// One page of the release log.
#[derive(Debug, Clone, Serialize)]
pub struct ReleasePage<'a> {
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
    pub releases: Vec<&'a Release>,
}

/// Release history: search box, status menu and 1-based paging.
#[derive(Debug, Clone)]
pub struct ReleaseLog {
    search: String,
    status: Facet<ReleaseStatus>,
    page: usize,
    page_size: usize,
}

impl Default for ReleaseLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseLog {
    #[must_use]
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// A page size of zero is treated as one.
    #[must_use]
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            search: String::new(),
            status: Facet::All,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Change the search term. Paging restarts at the first page.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    /// Change the status menu. Paging restarts at the first page.
    pub fn set_status(&mut self, status: Facet<ReleaseStatus>) {
        self.status = status;
        self.page = 1;
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Releases matching search and status, in seed order.
    #[must_use]
    pub fn matches<'a>(&self, releases: &'a [Release]) -> Vec<&'a Release> {
        releases
            .iter()
            .filter(|release| self.status.matches(&release.status))
            .filter(|release| query::matches_substring(*release, &RELEASE_TEXT, &self.search))
            .collect()
    }

    /// `ceil(matches / page_size)`; zero when nothing matches.
    #[must_use]
    pub fn total_pages(&self, releases: &[Release]) -> usize {
        self.matches(releases).len().div_ceil(self.page_size)
    }

    /// Jump to `page`, clamped into `1..=total_pages`.
    pub fn go_to(&mut self, page: usize, releases: &[Release]) -> usize {
        let last = self.total_pages(releases).max(1);
        self.page = page.clamp(1, last);
        self.page
    }

    pub fn next(&mut self, releases: &[Release]) -> usize {
        self.go_to(self.page + 1, releases)
    }

    pub fn previous(&mut self, releases: &[Release]) -> usize {
        self.go_to(self.page.saturating_sub(1), releases)
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn current<'a>(&self, releases: &'a [Release]) -> ReleasePage<'a> {
        let matched = self.matches(releases);
        let total_matches = matched.len();
        let total_pages = total_matches.div_ceil(self.page_size);
        let start = (self.page - 1) * self.page_size;
        ReleasePage {
            page: self.page,
            total_pages,
            total_matches,
            releases: matched
                .into_iter()
                .skip(start)
                .take(self.page_size)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> InMemoryStore {
        InMemoryStore::builtin()
    }

    // === Issues, people, projects ===

    #[test]
    fn test_issue_list_view_facets() {
        let store = store();
        let view = IssueListView::new()
            .with_status("in progress")
            .with_priority("medium");
        let titles: Vec<&str> = view
            .results(&store)
            .iter()
            .map(|i| i.title.as_str())
            .collect();
        assert_eq!(
            titles,
            vec![
                "Implement drag-and-drop on Kanban",
                "Update user profile validation logic"
            ]
        );
    }

    #[test]
    fn test_issue_list_view_bad_menu_value_is_empty() {
        let store = store();
        let view = IssueListView::new().with_status("Shipped");
        assert!(view.results(&store).is_empty());
        let view = IssueListView::new().with_assignee("nobody");
        assert!(view.results(&store).is_empty());
    }

    #[test]
    fn test_issue_list_options() {
        let store = store();
        assert_eq!(IssueListView::status_options(&store).len(), 4);
        assert_eq!(
            IssueListView::priority_options(&store),
            vec![Priority::Medium, Priority::Critical, Priority::High, Priority::Low]
        );
        assert_eq!(IssueListView::assignee_options(&store).len(), 4);
    }

    #[test]
    fn test_people_view() {
        let store = store();
        let devs = PeopleView::new().with_team("dev").results(&store);
        assert_eq!(devs.len(), 2);
        let none = PeopleView::new().with_team("legal").results(&store);
        assert!(none.is_empty());
        assert_eq!(PeopleView::team_options(&store).len(), 5);
        assert_eq!(PeopleView::role_options(&store).len(), 7);
    }

    #[test]
    fn test_project_list_view() {
        let store = store();
        let view = ProjectListView::new().with_search("tools");
        let names: Vec<&str> = view
            .results(&store)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Team Management Suite", "Internal Tools Overhaul"]);

        let archived = ProjectListView::new().with_status("archived").results(&store);
        assert_eq!(archived.len(), 2);

        let product = ProjectListView::new().with_team("product").results(&store);
        assert_eq!(product.len(), 2);
        let archived_product = ProjectListView::new()
            .with_status("archived")
            .with_team("product")
            .results(&store);
        assert_eq!(archived_product.len(), 1);
        assert_eq!(archived_product[0].name, "Team Management Suite");
    }

    #[test]
    fn test_issue_list_view_project_facet() {
        let store = store();
        let view = IssueListView::new().with_project("68d76e16-21c3-43bd-9de3-e5d6ae49f993");
        assert_eq!(view.results(&store).len(), 4);
        let view = view.with_status("blocked");
        assert_eq!(view.results(&store).len(), 1);
        let view = IssueListView::new().with_project("ALL");
        assert_eq!(view.results(&store).len(), 9);
    }

    // === Notifications ===

    #[test]
    fn test_notification_filter_parse() {
        assert_eq!("all".parse::<NotificationFilter>().unwrap(), NotificationFilter::All);
        assert_eq!(
            "Unread".parse::<NotificationFilter>().unwrap(),
            NotificationFilter::Unread
        );
        assert_eq!(
            "projects".parse::<NotificationFilter>().unwrap(),
            NotificationFilter::Category(NotificationCategory::Project)
        );
        assert!("spam".parse::<NotificationFilter>().is_err());
        assert_eq!(NotificationFilter::Category(NotificationCategory::Issue).to_string(), "issue");
    }

    #[test]
    fn test_unknown_notification_tab_matches_nothing() {
        let filter = NotificationFilter::parse(" starred ");
        assert_eq!(filter, NotificationFilter::Unrecognized("starred".to_string()));
        assert_eq!(filter.to_string(), "starred");
        assert_eq!(NotificationFilter::parse("READ"), NotificationFilter::Read);

        let mut inbox = NotificationInbox::from_store(&store());
        inbox.filter = filter;
        assert!(inbox.visible().is_empty());
        assert_eq!(inbox.all().len(), 8);
        assert_eq!(inbox.unread_count(), 3);
    }

    #[test]
    fn test_inbox_filters_and_search() {
        let store = store();
        let mut inbox = NotificationInbox::from_store(&store);
        assert_eq!(inbox.visible().len(), 8);
        assert_eq!(inbox.unread_count(), 3);

        inbox.filter = NotificationFilter::Unread;
        assert_eq!(inbox.visible().len(), 3);

        inbox.filter = NotificationFilter::Category(NotificationCategory::System);
        assert_eq!(inbox.visible().len(), 3);

        inbox.search = "MAINTENANCE".to_string();
        let titles: Vec<&str> = inbox.visible().iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["System maintenance scheduled"]);
    }

    #[test]
    fn test_inbox_mutations_are_local() {
        let store = store();
        let mut inbox = NotificationInbox::from_store(&store);

        assert!(inbox.mark_read("1"));
        assert!(!inbox.mark_read("999"));
        assert_eq!(inbox.unread_count(), 2);

        assert_eq!(inbox.mark_all_read(), 2);
        assert_eq!(inbox.unread_count(), 0);
        assert_eq!(inbox.mark_all_read(), 0);

        assert_eq!(inbox.delete("8").unwrap().title, "New team member added");
        assert!(inbox.delete("8").is_none());
        assert_eq!(inbox.all().len(), 7);

        assert_eq!(store.notifications().len(), 8);
        assert!(!store.notifications()[0].read);
    }

    // === Releases ===

    #[test]
    fn test_release_paging() {
        let store = store();
        let releases = store.releases();
        let mut log = ReleaseLog::new();
        assert_eq!(log.total_pages(releases), 3);

        let first = log.current(releases);
        assert_eq!(first.page, 1);
        assert_eq!(first.releases.len(), 5);
        assert_eq!(first.releases[0].version, "v2.4.1");

        assert_eq!(log.go_to(3, releases), 3);
        let last = log.current(releases);
        assert_eq!(last.releases.len(), 1);
        assert_eq!(last.releases[0].version, "v2.6.0");

        assert_eq!(log.next(releases), 3);
        assert_eq!(log.go_to(0, releases), 1);
        assert_eq!(log.previous(releases), 1);
        assert_eq!(log.go_to(99, releases), 3);
    }

    #[test]
    fn test_release_filters_reset_paging() {
        let store = store();
        let releases = store.releases();
        let mut log = ReleaseLog::new();
        log.go_to(2, releases);

        log.set_status(Facet::Only(ReleaseStatus::Beta));
        assert_eq!(log.page(), 1);
        let page = log.current(releases);
        assert_eq!(page.total_matches, 1);
        assert_eq!(page.releases[0].version, "v2.5.0");

        log.set_status(Facet::All);
        log.set_search("kanban");
        assert_eq!(log.current(releases).releases[0].version, "v2.3.0");

        log.set_search("nothing like this");
        let empty = log.current(releases);
        assert_eq!(empty.total_pages, 0);
        assert!(empty.releases.is_empty());
        assert_eq!(log.go_to(4, releases), 1);
    }

    #[test]
    fn test_release_page_size() {
        let store = store();
        let releases = store.releases();
        let log = ReleaseLog::with_page_size(4);
        assert_eq!(log.total_pages(releases), 3);
        assert_eq!(ReleaseLog::with_page_size(0).page_size(), 1);
    }
}
