//! Search command implementation.
//!
//! Global search across projects, issues and people. A blank term finds
//! nothing.

use anyhow::Result;
use pmdash_lib::Toned;
use serde::Serialize;

use super::CommandContext;
use crate::cli::SearchArgs;
use crate::format::{IssueRow, format_issue_line, pad};

#[derive(Serialize)]
struct SearchOutput<'a> {
    term: &'a str,
    total: usize,
    projects: Vec<&'a pmdash_lib::Project>,
    issues: Vec<IssueRow<'a>>,
    people: Vec<&'a pmdash_lib::Person>,
}

/// Execute the search command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(args: &SearchArgs, ctx: &CommandContext) -> Result<()> {
    let results = ctx.store.search_all(&args.term);

    if ctx.output.is_json() {
        let output = SearchOutput {
            term: &args.term,
            total: results.total(),
            issues: IssueRow::rows(&ctx.store, &results.issues),
            projects: results.projects,
            people: results.people,
        };
        return ctx.output.json(&output);
    }

    if results.is_empty() {
        println!("No results for '{}'", args.term);
        return Ok(());
    }

    let out = &ctx.output;
    if !results.projects.is_empty() {
        println!("{}", out.heading("Projects"));
        for project in &results.projects {
            println!(
                "  {} {}",
                pad(&project.name, 28),
                out.paint(project.status.as_str(), project.status.tone())
            );
        }
    }
    if !results.issues.is_empty() {
        println!("{}", out.heading("Issues"));
        for issue in &results.issues {
            let assignee = ctx.store.assignee_of(issue).map(|p| p.name.as_str());
            println!("  {}", format_issue_line(issue, assignee));
        }
    }
    if !results.people.is_empty() {
        println!("{}", out.heading("People"));
        for person in &results.people {
            println!("  {} {}", pad(&person.name, 20), person.role);
        }
    }
    println!("\n{} result(s)", results.total());

    Ok(())
}
