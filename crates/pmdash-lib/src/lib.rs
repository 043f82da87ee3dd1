//! `pmdash-lib` — in-memory query layer for the pmdash project dashboard.
//!
//! Entity stores hold people, projects, issues, notifications, releases and
//! the current sprint. Query functions resolve foreign keys and filter by
//! facet; aggregation functions derive dashboard numbers; session types
//! own per-screen state such as the Kanban drag capture.
//!
//! # Quick Start
//!
//! ```
//! use chrono::Utc;
//! use pmdash_lib::{BoardSession, InMemoryStore, IssueListView, IssueStatus, stats};
//!
//! let store = InMemoryStore::builtin();
//!
//! // Filter bar
//! let blocked = IssueListView::new().with_status("blocked").results(&store);
//! assert_eq!(blocked.len(), 1);
//!
//! // Aggregates
//! let counts = stats::count_by_status(store.issues());
//! assert_eq!(counts.get(IssueStatus::Done), 2);
//!
//! // Drag and drop on a private copy
//! let mut board = BoardSession::from_store(&store);
//! board.pick_up(&blocked[0].id);
//! board.drop_on(IssueStatus::Done, Utc::now());
//! assert_eq!(board.column(IssueStatus::Done).len(), 3);
//! ```

pub mod board;
pub mod error;
pub mod model;
pub mod palette;
pub mod query;
pub mod seed;
pub mod stats;
pub mod store;
pub mod util;
pub mod views;

pub use board::{BoardSession, COLUMNS, Column, DropOutcome, apply_transition};
pub use error::{DashError, Result};
pub use model::{
    Issue, IssueStatus, Notification, NotificationCategory, Person, Priority, Project,
    ProjectStatus, Release, ReleaseStatus, Severity, Sprint, Team, WorkingHours,
};
pub use palette::{Tone, Toned};
pub use query::{Facet, IssueFilters, PeopleFilters, ProjectFilters, Record};
pub use seed::Seed;
pub use stats::{
    Countdown, DashboardSummary, PersonSummary, ProfileStats, ProjectSummary, SprintProgress,
    StatusCounts,
};
pub use store::{InMemoryStore, SearchResults};
pub use views::{
    IssueListView, NotificationFilter, NotificationInbox, PeopleView, ProjectListView, ReleaseLog,
};
