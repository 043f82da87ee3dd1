//! Lookup and filter primitives shared by every view.
//!
//! Everything here is pure: results borrow from the input collection and
//! keep its order. A lookup that misses is `None`; a filter that matches
//! nothing is an empty `Vec`.

use std::fmt;
use std::str::FromStr;

use crate::model::{
    Issue, IssueStatus, Notification, Person, Priority, Project, ProjectStatus, Release, Team,
};

/// Facet value that disables a filter.
pub const WILDCARD: &str = "all";

/// Anything addressable by an opaque string id.
pub trait Record {
    fn id(&self) -> &str;
}

impl Record for Person {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Project {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Issue {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Notification {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Release {
    fn id(&self) -> &str {
        &self.id
    }
}

// ============================================================================
// Facets
// ============================================================================

/// One filter-bar selection.
///
/// `Unrecognized` keeps the raw input of a value that is not a member of
/// `T`; it matches nothing, so a bad filter value yields an empty result
/// instead of an error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Facet<T> {
    #[default]
    All,
    Only(T),
    Unrecognized(String),
}

impl<T: FromStr> Facet<T> {
    /// Parse a filter value. Empty input and `"all"` (any case) mean no filter.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(WILDCARD) {
            return Self::All;
        }
        trimmed
            .parse()
            .map_or_else(|_| Self::Unrecognized(trimmed.to_string()), Self::Only)
    }

    /// Like [`Facet::parse`], treating an absent value as the wildcard.
    #[must_use]
    pub fn parse_opt(raw: Option<&str>) -> Self {
        raw.map_or(Self::All, Self::parse)
    }
}

impl<T> Facet<T> {
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    #[must_use]
    pub fn matches<U: ?Sized>(&self, value: &U) -> bool
    where
        T: PartialEq<U>,
    {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
            Self::Unrecognized(_) => false,
        }
    }

    /// Match against a nullable field. A missing value only passes the wildcard.
    #[must_use]
    pub fn matches_opt<U: ?Sized>(&self, value: Option<&U>) -> bool
    where
        T: PartialEq<U>,
    {
        match self {
            Self::All => true,
            Self::Only(expected) => value.is_some_and(|v| expected == v),
            Self::Unrecognized(_) => false,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Facet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(WILDCARD),
            Self::Only(value) => value.fmt(f),
            Self::Unrecognized(raw) => f.write_str(raw),
        }
    }
}

// ============================================================================
// Primitives
// ============================================================================

/// Linear scan for a record by id.
#[must_use]
pub fn find_by_id<'a, T: Record>(collection: &'a [T], id: &str) -> Option<&'a T> {
    collection.iter().find(|item| item.id() == id)
}

/// Keep records whose `field` equals the facet value.
#[must_use]
pub fn filter_by_field<'a, T, U, K>(
    collection: &'a [T],
    field: impl Fn(&'a T) -> &'a U,
    facet: &Facet<K>,
) -> Vec<&'a T>
where
    U: ?Sized + 'a,
    K: PartialEq<U>,
{
    collection
        .iter()
        .filter(|&item| facet.matches(field(item)))
        .collect()
}

/// Keep records whose nullable `field` equals the facet value.
#[must_use]
pub fn filter_by_optional_field<'a, T, U, K>(
    collection: &'a [T],
    field: impl Fn(&'a T) -> Option<&'a U>,
    facet: &Facet<K>,
) -> Vec<&'a T>
where
    U: ?Sized + 'a,
    K: PartialEq<U>,
{
    collection
        .iter()
        .filter(|&item| facet.matches_opt(field(item)))
        .collect()
}

/// Accessor for one searchable text field.
pub type TextField<T> = fn(&T) -> &str;

fn issue_title(issue: &Issue) -> &str {
    &issue.title
}

fn issue_description(issue: &Issue) -> &str {
    &issue.description
}

fn person_name(person: &Person) -> &str {
    &person.name
}

fn person_email(person: &Person) -> &str {
    &person.email
}

fn person_role(person: &Person) -> &str {
    &person.role
}

fn project_name(project: &Project) -> &str {
    &project.name
}

fn project_description(project: &Project) -> &str {
    &project.description
}

fn notification_title(notification: &Notification) -> &str {
    &notification.title
}

fn notification_description(notification: &Notification) -> &str {
    &notification.description
}

fn release_version(release: &Release) -> &str {
    &release.version
}

fn release_description(release: &Release) -> &str {
    &release.description
}

pub const ISSUE_TEXT: [TextField<Issue>; 2] = [issue_title, issue_description];
pub const PERSON_TEXT: [TextField<Person>; 3] = [person_name, person_email, person_role];
pub const PROJECT_TEXT: [TextField<Project>; 2] = [project_name, project_description];
pub const NOTIFICATION_TEXT: [TextField<Notification>; 2] =
    [notification_title, notification_description];
pub const RELEASE_TEXT: [TextField<Release>; 2] = [release_version, release_description];

/// Case-insensitive substring test across `fields`. An empty term matches.
#[must_use]
pub fn matches_substring<T>(item: &T, fields: &[TextField<T>], term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    fields
        .iter()
        .any(|field| field(item).to_lowercase().contains(&needle))
}

/// Keep records where any of `fields` contains `term`, ignoring case.
#[must_use]
pub fn filter_by_substring<'a, T>(
    collection: &'a [T],
    fields: &[TextField<T>],
    term: &str,
) -> Vec<&'a T> {
    collection
        .iter()
        .filter(|item| matches_substring(*item, fields, term))
        .collect()
}

/// A boxed record predicate.
pub type Predicate<'a, T> = Box<dyn Fn(&T) -> bool + 'a>;

/// Logical AND of `predicates`. Evaluation stops at the first `false`.
#[must_use]
pub fn compose_filters<'a, T: 'a>(predicates: Vec<Predicate<'a, T>>) -> Predicate<'a, T> {
    Box::new(move |item: &T| predicates.iter().all(|predicate| predicate(item)))
}

/// Apply a predicate, preserving input order.
#[must_use]
pub fn select<'a, T>(collection: &'a [T], predicate: &dyn Fn(&T) -> bool) -> Vec<&'a T> {
    let selected: Vec<&T> = collection.iter().filter(|item| predicate(item)).collect();
    tracing::trace!(
        total = collection.len(),
        matched = selected.len(),
        "Evaluated filter"
    );
    selected
}

/// Distinct values in first-seen order.
#[must_use]
pub fn distinct<K: PartialEq>(values: impl IntoIterator<Item = K>) -> Vec<K> {
    let mut seen = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

// ============================================================================
// Filter bars
// ============================================================================

/// Issue list filter bar: search plus status, priority, assignee and project facets.
#[derive(Debug, Clone, Default)]
pub struct IssueFilters {
    /// Matched against title and description.
    pub search: String,
    pub status: Facet<IssueStatus>,
    pub priority: Facet<Priority>,
    /// Assignee person id.
    pub assignee: Facet<String>,
    /// Owning project id.
    pub project: Facet<String>,
}

impl IssueFilters {
    #[must_use]
    pub fn predicate(&self) -> Predicate<'_, Issue> {
        let predicates: Vec<Predicate<'_, Issue>> = vec![
            Box::new(move |issue: &Issue| matches_substring(issue, &ISSUE_TEXT, &self.search)),
            Box::new(move |issue: &Issue| self.status.matches(&issue.status)),
            Box::new(move |issue: &Issue| self.priority.matches(&issue.priority)),
            Box::new(move |issue: &Issue| {
                self.assignee.matches_opt(issue.assignee_id.as_deref())
            }),
            Box::new(move |issue: &Issue| {
                self.project.matches_opt(issue.project_id.as_deref())
            }),
        ];
        compose_filters(predicates)
    }

    #[must_use]
    pub fn apply<'a>(&self, issues: &'a [Issue]) -> Vec<&'a Issue> {
        select(issues, &self.predicate())
    }

    /// True when no facet or search narrows the list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.status.is_all()
            && self.priority.is_all()
            && self.assignee.is_all()
            && self.project.is_all()
    }
}

/// People directory filter bar.
#[derive(Debug, Clone, Default)]
pub struct PeopleFilters {
    /// Matched against name, email and role.
    pub search: String,
    pub team: Facet<Team>,
    /// Exact role title.
    pub role: Facet<String>,
}

impl PeopleFilters {
    #[must_use]
    pub fn predicate(&self) -> Predicate<'_, Person> {
        let predicates: Vec<Predicate<'_, Person>> = vec![
            Box::new(move |person: &Person| {
                matches_substring(person, &PERSON_TEXT, &self.search)
            }),
            Box::new(move |person: &Person| self.team.matches(&person.team)),
            Box::new(move |person: &Person| self.role.matches(person.role.as_str())),
        ];
        compose_filters(predicates)
    }

    #[must_use]
    pub fn apply<'a>(&self, people: &'a [Person]) -> Vec<&'a Person> {
        select(people, &self.predicate())
    }
}

/// Project list filter bar.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilters {
    /// Matched against name and description.
    pub search: String,
    pub status: Facet<ProjectStatus>,
    pub team: Facet<Team>,
}

impl ProjectFilters {
    #[must_use]
    pub fn predicate(&self) -> Predicate<'_, Project> {
        let predicates: Vec<Predicate<'_, Project>> = vec![
            Box::new(move |project: &Project| {
                matches_substring(project, &PROJECT_TEXT, &self.search)
            }),
            Box::new(move |project: &Project| self.status.matches(&project.status)),
            Box::new(move |project: &Project| self.team.matches(&project.team)),
        ];
        compose_filters(predicates)
    }

    #[must_use]
    pub fn apply<'a>(&self, projects: &'a [Project]) -> Vec<&'a Project> {
        select(projects, &self.predicate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::Seed;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;
    use std::cell::Cell;

    fn make_issue(id: &str, status: IssueStatus, priority: Priority) -> Issue {
        let stamp = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        Issue {
            id: id.to_string(),
            title: format!("Issue {id}"),
            description: String::new(),
            status,
            priority,
            story_points: 1,
            assignee_id: None,
            project_id: None,
            created_at: stamp,
            updated_at: stamp,
        }
    }

    fn ids<T: Record>(records: &[&T]) -> Vec<String> {
        records.iter().map(|r| r.id().to_string()).collect()
    }

    #[test]
    fn test_find_by_id_round_trips_every_seed_issue() {
        let seed = Seed::builtin();
        for issue in &seed.issues {
            assert_eq!(find_by_id(&seed.issues, &issue.id), Some(issue));
        }
        assert!(find_by_id(&seed.issues, "missing").is_none());
        assert!(find_by_id(&seed.people, "").is_none());
    }

    #[test]
    fn test_facet_parse() {
        assert_eq!(Facet::<IssueStatus>::parse("all"), Facet::All);
        assert_eq!(Facet::<IssueStatus>::parse("ALL"), Facet::All);
        assert_eq!(Facet::<IssueStatus>::parse(""), Facet::All);
        assert_eq!(
            Facet::<IssueStatus>::parse("In Progress"),
            Facet::Only(IssueStatus::InProgress)
        );
        assert_eq!(
            Facet::<Priority>::parse("urgent"),
            Facet::Unrecognized("urgent".to_string())
        );
        assert_eq!(Facet::<String>::parse_opt(None), Facet::All);
        assert_eq!(
            Facet::<String>::parse_opt(Some("p-1")),
            Facet::Only("p-1".to_string())
        );
    }

    #[test]
    fn test_filter_by_field_status() {
        let seed = Seed::builtin();
        let blocked = filter_by_field(
            &seed.issues,
            |issue| &issue.status,
            &Facet::Only(IssueStatus::Blocked),
        );
        assert_eq!(ids(&blocked), vec!["088df4ed-91c7-470e-9e48-35cd37aae9c6"]);
    }

    #[test]
    fn test_unknown_enum_value_yields_empty_result() {
        let seed = Seed::builtin();
        let facet = Facet::<IssueStatus>::parse("Shipped");
        assert!(filter_by_field(&seed.issues, |issue| &issue.status, &facet).is_empty());

        let filters = IssueFilters {
            priority: Facet::parse("urgent"),
            ..Default::default()
        };
        assert!(filters.apply(&seed.issues).is_empty());
    }

    #[test]
    fn test_filter_by_optional_field_skips_unassigned() {
        let mut issues = vec![
            make_issue("a", IssueStatus::ToDo, Priority::Low),
            make_issue("b", IssueStatus::ToDo, Priority::Low),
        ];
        issues[0].assignee_id = Some("p-1".to_string());

        let facet = Facet::Only("p-1".to_string());
        let hits = filter_by_optional_field(&issues, |i| i.assignee_id.as_deref(), &facet);
        assert_eq!(ids(&hits), vec!["a"]);

        let wildcard = Facet::<String>::All;
        let all = filter_by_optional_field(&issues, |i| i.assignee_id.as_deref(), &wildcard);
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_and_description() {
        let seed = Seed::builtin();
        let hits = filter_by_substring(&seed.issues, &ISSUE_TEXT, "LOGIN");
        assert_eq!(ids(&hits), vec!["2bcc688e-cc79-4c95-81be-db7f3b437365"]);

        let by_description = filter_by_substring(&seed.issues, &ISSUE_TEXT, "websocket");
        assert_eq!(
            ids(&by_description),
            vec!["c8977171-75c0-4dad-8dba-25366a2e5b14"]
        );
    }

    #[test]
    fn test_people_search_covers_email_and_role() {
        let seed = Seed::builtin();
        let filters = PeopleFilters {
            search: "qa".to_string(),
            ..Default::default()
        };
        let names: Vec<&str> = filters
            .apply(&seed.people)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Tomas Herrera", "Hannah Cole"]);

        let by_email = filter_by_substring(&seed.people, &PERSON_TEXT, "aiko.tanaka@");
        assert_eq!(by_email.len(), 1);
    }

    #[test]
    fn test_people_role_facet_is_exact() {
        let seed = Seed::builtin();
        let filters = PeopleFilters {
            role: Facet::parse("QA Lead"),
            ..Default::default()
        };
        let hits = filters.apply(&seed.people);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Hannah Cole");
    }

    #[test]
    fn test_issue_filters_combine_facets() {
        let seed = Seed::builtin();
        let filters = IssueFilters {
            search: String::new(),
            status: Facet::Only(IssueStatus::Done),
            priority: Facet::All,
            assignee: Facet::Only("81c842a6-7c60-419f-b47a-cfef021bbeaa".to_string()),
            project: Facet::All,
        };
        let hits = filters.apply(&seed.issues);
        assert_eq!(
            ids(&hits),
            vec![
                "279ba878-5e3f-48a9-be12-b4cbf3a6f7b3",
                "d8977171-75c0-4dad-8dba-25366a2e5b15"
            ]
        );
        assert!(!filters.is_empty());
        assert!(IssueFilters::default().is_empty());
    }

    #[test]
    fn test_project_filters() {
        let seed = Seed::builtin();
        let filters = ProjectFilters {
            status: Facet::Only(ProjectStatus::Planning),
            ..Default::default()
        };
        let names: Vec<&str> = filters
            .apply(&seed.projects)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Customer Dashboard", "Marketing Site Redesign"]);
    }

    #[test]
    fn test_compose_filters_requires_all() {
        let issues = vec![
            make_issue("a", IssueStatus::Done, Priority::High),
            make_issue("b", IssueStatus::Done, Priority::Low),
            make_issue("c", IssueStatus::ToDo, Priority::High),
        ];
        let predicates: Vec<Predicate<'_, Issue>> = vec![
            Box::new(|i: &Issue| i.status == IssueStatus::Done),
            Box::new(|i: &Issue| i.priority == Priority::High),
        ];
        let both = compose_filters(predicates);
        assert_eq!(ids(&select(&issues, &both)), vec!["a"]);

        let none: Predicate<'_, Issue> = compose_filters(Vec::new());
        assert_eq!(select(&issues, &none).len(), 3);
    }

    #[test]
    fn test_compose_filters_stops_at_first_rejection() {
        let issues = vec![
            make_issue("a", IssueStatus::ToDo, Priority::High),
            make_issue("b", IssueStatus::Done, Priority::High),
        ];
        let later_calls = Cell::new(0);
        let predicates: Vec<Predicate<'_, Issue>> = vec![
            Box::new(|i: &Issue| i.status == IssueStatus::Done),
            Box::new(|_: &Issue| {
                later_calls.set(later_calls.get() + 1);
                true
            }),
        ];
        let composed = compose_filters(predicates);

        assert!(!composed(&issues[0]));
        assert_eq!(later_calls.get(), 0);

        assert!(composed(&issues[1]));
        assert_eq!(later_calls.get(), 1);
    }

    #[test]
    fn test_distinct_keeps_first_seen_order() {
        let seed = Seed::builtin();
        let statuses = distinct(seed.issues.iter().map(|i| i.status));
        assert_eq!(
            statuses,
            vec![
                IssueStatus::ToDo,
                IssueStatus::InProgress,
                IssueStatus::Done,
                IssueStatus::Blocked
            ]
        );
        let teams = distinct(seed.people.iter().map(|p| p.team));
        assert_eq!(
            teams,
            vec![Team::Dev, Team::Product, Team::Qa, Team::Marketing, Team::Design]
        );
    }

    #[test]
    fn test_facet_display() {
        assert_eq!(Facet::<Priority>::All.to_string(), "all");
        assert_eq!(Facet::Only(Priority::High).to_string(), "High");
        assert_eq!(Facet::<Priority>::Unrecognized("x".into()).to_string(), "x");
    }

    fn arb_issues() -> impl Strategy<Value = Vec<Issue>> {
        prop::collection::vec((0usize..4, 0usize..4), 0..40).prop_map(|pairs| {
            pairs
                .into_iter()
                .enumerate()
                .map(|(n, (s, p))| {
                    make_issue(&format!("i-{n}"), IssueStatus::ALL[s], Priority::ALL[p])
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_wildcard_returns_everything(issues in arb_issues()) {
            let facet = Facet::<IssueStatus>::parse(WILDCARD);
            let all = filter_by_field(&issues, |i| &i.status, &facet);
            prop_assert_eq!(all.len(), issues.len());
        }

        #[test]
        fn prop_filters_preserve_input_order(issues in arb_issues(), s in 0usize..4) {
            let facet = Facet::Only(IssueStatus::ALL[s]);
            let hits = filter_by_field(&issues, |i| &i.status, &facet);
            let positions: Vec<usize> = hits
                .iter()
                .map(|hit| issues.iter().position(|i| i.id == hit.id).unwrap())
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn prop_empty_search_matches_all(issues in arb_issues()) {
            prop_assert_eq!(filter_by_substring(&issues, &ISSUE_TEXT, "").len(), issues.len());
        }
    }
}
