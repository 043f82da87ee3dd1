//! Profile command implementation.
//!
//! Work stats for one person: assigned and completed issues, story points
//! and the projects they own.

use anyhow::Result;
use pmdash_lib::Toned;
use pmdash_lib::stats::PersonSummary;

use super::CommandContext;
use crate::cli::ProfileArgs;
use crate::format::{format_issue_line, pad, progress_bar};

const LABEL_WIDTH: usize = 18;

/// Execute the profile command.
///
/// # Errors
///
/// Returns an error if the person is unknown or JSON serialization fails.
pub fn execute(args: &ProfileArgs, ctx: &CommandContext) -> Result<()> {
    let person = ctx.person_or_current(args.person.as_deref())?;
    let summary = PersonSummary::build(&ctx.store, person);

    if ctx.output.is_json() {
        return ctx.output.json(&summary);
    }

    let out = &ctx.output;
    let stats = &summary.stats;
    println!("{}", out.heading(&person.name));
    println!(
        "{} {}",
        person.role,
        out.paint(person.team.label(), person.team.tone())
    );
    println!();
    println!("  {}{}", pad("Assigned", LABEL_WIDTH), stats.assigned);
    println!("  {}{}", pad("In progress", LABEL_WIDTH), stats.in_progress);
    println!("  {}{}", pad("Completed", LABEL_WIDTH), stats.completed);
    println!(
        "  {}{} of {}",
        pad("Story points done", LABEL_WIDTH),
        stats.completed_story_points,
        stats.story_points
    );
    println!(
        "  {}{}% {}",
        pad("Completion", LABEL_WIDTH),
        stats.completion_rate,
        progress_bar(stats.completion_rate, 20)
    );

    if !summary.owned_projects.is_empty() {
        println!();
        println!("{}", out.heading("Projects owned"));
        for project in &summary.owned_projects {
            println!("  {}", project.name);
        }
    }

    println!();
    println!("{}", out.heading("Recent issues"));
    if summary.recent_issues.is_empty() {
        println!("  {}", out.dim("Nothing assigned."));
    }
    for issue in &summary.recent_issues {
        println!("  {}", format_issue_line(issue, None));
    }

    Ok(())
}
