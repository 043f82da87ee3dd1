//! Version command implementation.

use anyhow::Result;
use serde::Serialize;

use crate::cli::VersionArgs;
use crate::output::{OutputContext, OutputMode};

#[derive(Serialize)]
struct VersionOutput<'a> {
    version: &'a str,
    build: &'a str,
    library: &'a str,
}

const fn build_kind() -> &'static str {
    if cfg!(debug_assertions) {
        "dev"
    } else {
        "release"
    }
}

/// Execute the version command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(args: &VersionArgs, ctx: &OutputContext) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");

    if args.short {
        println!("{version}");
        return Ok(());
    }

    let build = build_kind();
    if ctx.is_json() {
        return ctx.json(&VersionOutput {
            version,
            build,
            library: "pmdash-lib",
        });
    }

    let line = format!("pmd version {version} ({build})");
    if matches!(ctx.mode(), OutputMode::Rich) {
        println!("{}", ctx.heading(&line));
    } else {
        println!("{line}");
    }
    Ok(())
}
