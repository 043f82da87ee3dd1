//! Show command implementation.
//!
//! Resolves one id against the matching collection and renders its detail
//! screen. An unknown id is an error naming the id.

use anyhow::{Context, Result};
use pmdash_lib::stats::{PersonSummary, ProjectSummary};
use pmdash_lib::{Issue, Person, Project, Toned};

use super::CommandContext;
use crate::cli::ShowTarget;
use crate::format::{IssueDetails, format_issue_line, pad, plural, progress_bar};

const LABEL_WIDTH: usize = 12;

/// Execute the show command.
///
/// # Errors
///
/// Returns an error if the id is unknown or JSON serialization fails.
pub fn execute(target: &ShowTarget, ctx: &CommandContext) -> Result<()> {
    match target {
        ShowTarget::Issue { id } => {
            let issue = ctx
                .store
                .get_issue(id)
                .with_context(|| format!("Issue not found: {id}"))?;
            show_issue(issue, ctx)
        }
        ShowTarget::Project { id } => {
            let project = ctx
                .store
                .get_project(id)
                .with_context(|| format!("Project not found: {id}"))?;
            show_project(project, ctx)
        }
        ShowTarget::Person { id } => {
            let person = ctx
                .store
                .get_person(id)
                .with_context(|| format!("Person not found: {id}"))?;
            show_person(person, ctx)
        }
    }
}

fn field(label: &str, value: impl std::fmt::Display) {
    println!("  {}{value}", pad(label, LABEL_WIDTH));
}

fn show_issue(issue: &Issue, ctx: &CommandContext) -> Result<()> {
    let assignee = ctx.store.assignee_of(issue);
    let project = ctx.store.project_of(issue);

    if ctx.output.is_json() {
        return ctx.output.json(&IssueDetails {
            issue,
            assignee,
            project,
        });
    }

    let out = &ctx.output;
    println!("{}", out.heading(&issue.title));
    println!("{}", out.dim(&issue.id));
    println!();
    field("Status", out.paint(issue.status.as_str(), issue.status.tone()));
    field("Priority", out.paint(issue.priority.as_str(), issue.priority.tone()));
    field("Points", issue.story_points);
    field("Assignee", assignee.map_or("Unassigned", |p| p.name.as_str()));
    field("Project", project.map_or("No project", |p| p.name.as_str()));
    field("Created", issue.created_at.format("%Y-%m-%d %H:%M"));
    field("Updated", issue.updated_at.format("%Y-%m-%d %H:%M"));
    if !issue.description.is_empty() {
        println!();
        println!("{}", issue.description);
    }
    Ok(())
}

fn show_project(project: &Project, ctx: &CommandContext) -> Result<()> {
    let summary = ProjectSummary::build(&ctx.store, project, ctx.now);

    if ctx.output.is_json() {
        return ctx.output.json(&summary);
    }

    let out = &ctx.output;
    println!("{}", out.heading(&project.name));
    println!("{}", out.dim(&project.id));
    println!();
    field("Status", out.paint(project.status.as_str(), project.status.tone()));
    field("Team", out.paint(project.team.label(), project.team.tone()));
    field("Owner", summary.owner.map_or("Unassigned", |p| p.name.as_str()));
    field(
        "Timeline",
        format!("{} to {}", project.start_date, project.end_date),
    );
    field("Deadline", summary.countdown);
    field(
        "Progress",
        format!(
            "{}% {} ({} open of {})",
            summary.completion_rate,
            progress_bar(summary.completion_rate, 20),
            summary.open_issues,
            plural(summary.total_issues, "issue")
        ),
    );
    if !project.description.is_empty() {
        println!();
        println!("{}", project.description);
    }

    println!();
    println!("{}", out.heading("Members"));
    if summary.members.is_empty() {
        println!("  {}", out.dim("No members yet."));
    }
    for member in &summary.members {
        println!("  {} {}", pad(&member.name, 20), member.role);
    }

    print_issue_list(ctx, "Recent issues", &summary.recent_issues);
    Ok(())
}

fn show_person(person: &Person, ctx: &CommandContext) -> Result<()> {
    let summary = PersonSummary::build(&ctx.store, person);

    if ctx.output.is_json() {
        return ctx.output.json(&summary);
    }

    let out = &ctx.output;
    println!("{} ({})", out.heading(&person.name), person.initials());
    println!("{}", out.dim(&person.id));
    println!();
    field("Role", &person.role);
    field("Team", out.paint(person.team.label(), person.team.tone()));
    field("Email", &person.email);
    if !person.phone.is_empty() {
        field("Phone", &person.phone);
    }
    if !person.location.is_empty() {
        field("Location", &person.location);
    }
    field("Hours", &person.working_hours);
    field("Assigned", summary.assigned);
    field(
        "Completed",
        format!(
            "{} ({}%)",
            summary.stats.completed, summary.stats.completion_rate
        ),
    );
    if !person.bio.is_empty() {
        println!();
        println!("{}", person.bio);
    }

    if !summary.owned_projects.is_empty() {
        println!();
        println!("{}", out.heading("Owns"));
        for project in &summary.owned_projects {
            println!(
                "  {} {}",
                pad(&project.name, 28),
                out.paint(project.status.as_str(), project.status.tone())
            );
        }
    }

    print_issue_list(ctx, "Recent issues", &summary.recent_issues);
    Ok(())
}

fn print_issue_list(ctx: &CommandContext, title: &str, issues: &[&Issue]) {
    let out = &ctx.output;
    println!();
    println!("{}", out.heading(title));
    if issues.is_empty() {
        println!("  {}", out.dim("No issues."));
    }
    for issue in issues {
        let assignee = ctx.store.assignee_of(issue).map(|p| p.name.as_str());
        println!("  {}", format_issue_line(issue, assignee));
    }
}
