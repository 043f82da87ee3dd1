//! Board command implementation.
//!
//! Builds a Kanban session over the loaded issues, applies the search and
//! project filters, and optionally moves one card before rendering.

use anyhow::{Result, bail};
use pmdash_lib::query::Facet;
use pmdash_lib::{BoardSession, DropOutcome, Toned};

use super::CommandContext;
use crate::cli::BoardArgs;
use crate::format::{BoardOutput, format_issue_line, plural};

/// Execute the board command.
///
/// # Errors
///
/// Returns an error if the card to move is not on the (filtered) board or
/// JSON serialization fails.
pub fn execute(args: &BoardArgs, ctx: &CommandContext) -> Result<()> {
    let mut board = BoardSession::from_store(&ctx.store);
    if let Some(search) = &args.search {
        board.set_search(search.as_str());
    }
    board.set_project(Facet::parse_opt(args.project.as_deref()));

    let outcome = match (&args.move_issue, args.to) {
        (Some(issue_id), Some(status)) => {
            if !board.pick_up(issue_id) {
                bail!("Issue not on the board: {issue_id}");
            }
            Some(board.drop_on(status, ctx.now))
        }
        _ => None,
    };

    if ctx.output.is_json() {
        let output = BoardOutput {
            outcome,
            search: board.search(),
            project: board.project().to_string(),
            projects: board.project_options(),
            columns: board.columns(),
        };
        return ctx.output.json(&output);
    }

    let out = &ctx.output;
    if let Some(outcome) = &outcome {
        println!("{}", describe(outcome));
        println!();
    }

    for view in board.columns() {
        let title = format!("{} ({})", view.column.title, view.count());
        println!("{}", out.paint(&out.heading(&title), view.column.status.tone()));
        if view.issues.is_empty() {
            println!("  {}", out.dim(&view.column.empty_message()));
        }
        for issue in &view.issues {
            let assignee = ctx.store.assignee_of(issue).map(|p| p.name.as_str());
            println!("  {}", format_issue_line(issue, assignee));
        }
        println!();
    }
    println!("{} on the board", plural(board.visible().len(), "issue"));

    Ok(())
}

fn describe(outcome: &DropOutcome) -> String {
    match outcome {
        DropOutcome::Moved { issue_id, from, to } if from == to => {
            format!("{issue_id} stays in {to}")
        }
        DropOutcome::Moved { issue_id, from, to } => format!("Moved {issue_id}: {from} -> {to}"),
        DropOutcome::NothingCaptured => "Nothing to move".to_string(),
        DropOutcome::Vanished { issue_id } => format!("{issue_id} is no longer on the board"),
    }
}
