//! Dashboard command implementation.

use anyhow::Result;
use pmdash_lib::stats::DashboardSummary;
use pmdash_lib::{IssueStatus, Toned};

use super::CommandContext;
use crate::format::{format_issue_line, pad, plural, progress_bar};

const BAR_WIDTH: usize = 20;
const LABEL_WIDTH: usize = 16;

/// Execute the dashboard command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let summary = DashboardSummary::build(&ctx.store, ctx.now);

    if ctx.output.is_json() {
        return ctx.output.json(&summary);
    }

    let out = &ctx.output;
    match summary.current_user {
        Some(person) => {
            let greeting = format!("Welcome back, {}!", person.first_name());
            println!("{}", out.heading(&greeting));
        }
        None => println!("{}", out.heading("Welcome back!")),
    }
    println!();
    println!(
        "  {}{} ({} completed)",
        pad("My issues", LABEL_WIDTH),
        summary.my_issues,
        summary.my_completed
    );
    println!("  {}{}", pad("Active projects", LABEL_WIDTH), summary.active_projects);
    println!("  {}{}", pad("Team members", LABEL_WIDTH), summary.team_size);
    println!(
        "  {}{}% {} ({} of {} done)",
        pad("Completion", LABEL_WIDTH),
        summary.completion_rate,
        progress_bar(summary.completion_rate, BAR_WIDTH),
        summary.status_counts.done,
        plural(summary.total_issues, "issue")
    );

    println!();
    println!("{}", out.heading("Issue status"));
    for status in IssueStatus::ALL {
        let share = summary.status_counts.share(status);
        println!(
            "  {} {:>3} {:>4}% {}",
            out.paint(&pad(status.as_str(), 12), status.tone()),
            summary.status_counts.get(status),
            share,
            progress_bar(share, BAR_WIDTH)
        );
    }

    println!();
    println!("{}", out.heading("Recent issues"));
    if summary.recent_issues.is_empty() {
        println!("  {}", out.dim("No issues yet."));
    }
    for issue in &summary.recent_issues {
        let assignee = ctx.store.assignee_of(issue).map(|p| p.name.as_str());
        println!("  {}", format_issue_line(issue, assignee));
    }

    println!();
    println!("{}", out.heading("Upcoming deadlines"));
    if summary.deadlines.is_empty() {
        println!("  {}", out.dim("No upcoming deadlines."));
    }
    for deadline in &summary.deadlines {
        println!(
            "  {} {} {}",
            pad(&deadline.project.name, 28),
            deadline.project.end_date,
            out.paint(&deadline.countdown.to_string(), deadline.urgency.tone())
        );
    }

    println!();
    println!("{}", out.heading("Team activity"));
    if summary.activity.is_empty() {
        println!("  {}", out.dim("No recent activity."));
    }
    for entry in &summary.activity {
        println!(
            "  {} {} {} {}",
            pad(entry.assignee_name, 16),
            pad(&entry.issue.title, 40),
            pad(entry.project_name, 24),
            out.paint(entry.issue.status.as_str(), entry.issue.status.tone())
        );
    }

    Ok(())
}
