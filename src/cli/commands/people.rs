//! People command implementation.

use anyhow::Result;
use pmdash_lib::{PeopleView, Toned};

use super::CommandContext;
use crate::cli::PeopleArgs;
use crate::format::{column_width, pad};

/// Execute the people command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(args: &PeopleArgs, ctx: &CommandContext) -> Result<()> {
    let mut view = PeopleView::new();
    if let Some(search) = &args.search {
        view = view.with_search(search.as_str());
    }
    if let Some(team) = &args.team {
        view = view.with_team(team);
    }
    if let Some(role) = &args.role {
        view = view.with_role(role);
    }
    let people = view.results(&ctx.store);

    if ctx.output.is_json() {
        return ctx.output.json(&people);
    }

    if people.is_empty() {
        println!("No people found.");
        return Ok(());
    }

    let out = &ctx.output;
    let name_width = column_width(people.iter().map(|p| p.name.as_str()));
    let role_width = column_width(people.iter().map(|p| p.role.as_str()));
    for person in &people {
        println!(
            "{} {} {} {} {}",
            pad(&person.initials(), 3),
            pad(&person.name, name_width),
            pad(&person.role, role_width),
            out.paint(&pad(person.team.label(), 11), person.team.tone()),
            person.email
        );
    }
    println!("\n{} of {} people", people.len(), ctx.store.people().len());

    Ok(())
}
