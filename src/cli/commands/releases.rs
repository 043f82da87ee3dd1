//! Releases command implementation.

use anyhow::Result;
use pmdash_lib::query::Facet;
use pmdash_lib::{ReleaseLog, Toned};

use super::CommandContext;
use crate::cli::ReleasesArgs;
use crate::format::pad;

/// Execute the releases command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(args: &ReleasesArgs, ctx: &CommandContext) -> Result<()> {
    let releases = ctx.store.releases();
    let mut log = ReleaseLog::with_page_size(ctx.releases_per_page);
    if let Some(search) = &args.search {
        log.set_search(search.as_str());
    }
    log.set_status(Facet::parse_opt(args.status.as_deref()));
    log.go_to(args.page, releases);
    let page = log.current(releases);

    if ctx.output.is_json() {
        return ctx.output.json(&page);
    }

    if page.releases.is_empty() {
        println!("No releases found.");
        return Ok(());
    }

    let out = &ctx.output;
    for release in &page.releases {
        println!(
            "{} {} {} {:>3} fixes {:>3} bugs {:>3} features {:>7} downloads",
            pad(&release.version, 8),
            release.release_date,
            out.paint(&pad(release.status.as_str(), 8), release.status.tone()),
            release.fixes,
            release.bugs,
            release.features,
            release.downloads
        );
        println!("    {}", release.description);
    }
    println!(
        "\nPage {} of {} ({} releases)",
        page.page, page.total_pages, page.total_matches
    );

    Ok(())
}
