//! Sprint command implementation.

use anyhow::Result;
use pmdash_lib::Toned;
use pmdash_lib::stats::SprintProgress;

use super::CommandContext;
use crate::format::{pad, progress_bar};

/// Execute the sprint command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let progress = ctx
        .store
        .sprint()
        .map(|sprint| SprintProgress::build(sprint, ctx.now));

    if ctx.output.is_json() {
        return ctx.output.json(&progress);
    }

    let Some(progress) = progress else {
        println!("No active sprint.");
        return Ok(());
    };

    let out = &ctx.output;
    let sprint = progress.sprint;
    println!("{}", out.heading(&sprint.name));
    println!(
        "  {}{} to {} ({} days)",
        pad("Dates", 12),
        sprint.start_date,
        sprint.end_date,
        progress.days_total
    );
    println!(
        "  {}{}% {}",
        pad("Progress", 12),
        sprint.progress,
        progress_bar(u32::from(sprint.progress), 20)
    );
    println!(
        "  {}{}",
        pad("Remaining", 12),
        out.paint(
            &format!("{} days", progress.days_remaining),
            progress.health.tone()
        )
    );
    println!("  {}", progress.message);

    Ok(())
}
