//! Output formatting for `pmdash`.
//!
//! Supports both human-readable text output and machine-parseable JSON.
//!
//! # JSON Output Types
//!
//! - [`IssueRow`] - Issue with assignee/project names (issues, board, search)
//! - [`IssueDetails`] - Issue with full relations (show issue)
//! - [`ProjectRow`] - Project with owner and progress (projects)
//! - [`BoardOutput`] - Columns plus the move outcome (board)
//! - [`InboxOutput`] - Notifications plus mutation results (notifications)

mod output;
mod text;

pub use output::{BoardOutput, InboxOutput, IssueDetails, IssueRow, ProjectRow};
pub use text::{
    column_width, format_issue_line, format_priority, format_status_icon, icons, pad, plural,
    progress_bar,
};
