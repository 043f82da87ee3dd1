//! Issues command implementation.
//!
//! Primary discovery interface: every filter is a facet, so "all" or an
//! omitted flag matches everything and an unknown value matches nothing.

use anyhow::Result;
use pmdash_lib::IssueListView;

use super::CommandContext;
use crate::cli::IssuesArgs;
use crate::format::{IssueRow, format_issue_line};

/// Execute the issues command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(args: &IssuesArgs, ctx: &CommandContext) -> Result<()> {
    let view = build_view(args, ctx.store.current_user_id());
    let issues = view.results(&ctx.store);

    if ctx.output.is_json() {
        return ctx.output.json(&IssueRow::rows(&ctx.store, &issues));
    }

    if issues.is_empty() {
        println!("No issues found.");
        return Ok(());
    }
    for issue in &issues {
        let assignee = ctx.store.assignee_of(issue).map(|p| p.name.as_str());
        println!("{}", format_issue_line(issue, assignee));
    }
    println!("\n{} issue(s)", issues.len());

    Ok(())
}

/// Convert CLI args to a filtered view.
fn build_view(args: &IssuesArgs, current_user: &str) -> IssueListView {
    let mut view = IssueListView::new();
    if let Some(search) = &args.search {
        view = view.with_search(search.as_str());
    }
    if let Some(status) = &args.status {
        view = view.with_status(status);
    }
    if let Some(priority) = &args.priority {
        view = view.with_priority(priority);
    }
    if args.mine {
        view = view.with_assignee(current_user);
    } else if let Some(assignee) = &args.assignee {
        view = view.with_assignee(assignee);
    }
    if let Some(project) = &args.project {
        view = view.with_project(project);
    }
    view
}
