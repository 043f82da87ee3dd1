//! Projects command implementation.

use anyhow::Result;
use pmdash_lib::{ProjectListView, Toned};

use super::CommandContext;
use crate::cli::ProjectsArgs;
use crate::format::{ProjectRow, column_width, pad};

/// Execute the projects command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(args: &ProjectsArgs, ctx: &CommandContext) -> Result<()> {
    let mut view = ProjectListView::new();
    if let Some(search) = &args.search {
        view = view.with_search(search.as_str());
    }
    if let Some(status) = &args.status {
        view = view.with_status(status);
    }
    if let Some(team) = &args.team {
        view = view.with_team(team);
    }
    let rows: Vec<ProjectRow<'_>> = view
        .results(&ctx.store)
        .into_iter()
        .map(|project| ProjectRow::new(&ctx.store, project, ctx.now))
        .collect();

    if ctx.output.is_json() {
        return ctx.output.json(&rows);
    }

    if rows.is_empty() {
        println!("No projects found.");
        return Ok(());
    }

    let out = &ctx.output;
    let name_width = column_width(rows.iter().map(|row| row.project.name.as_str()));
    for row in &rows {
        let project = row.project;
        println!(
            "{} {} {} {:>4}% {} {}",
            pad(&project.name, name_width),
            out.paint(&pad(project.status.as_str(), 8), project.status.tone()),
            out.paint(&pad(project.team.label(), 11), project.team.tone()),
            row.progress,
            project.end_date,
            row.owner_name.unwrap_or("Unassigned")
        );
    }
    println!("\n{} project(s)", rows.len());

    Ok(())
}
