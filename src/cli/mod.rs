//! Command-line interface for `pmdash`.
//!
//! This module provides the CLI parsing and command routing using clap.

pub mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use pmdash_lib::IssueStatus;

use crate::config::{CliOverrides, Config};
use crate::logging;
use crate::output::OutputContext;
use commands::CommandContext;

/// `pmdash` (pmd) - project dashboard in the terminal.
#[derive(Parser, Debug)]
#[command(name = "pmd")]
#[command(
    author,
    version,
    about = "Project dashboard: issues, board, people, projects, inbox and releases",
    long_about = None,
    after_help = "Every run works on a private copy of the workspace. Changes are not saved."
)]
pub struct Cli {
    /// Output format: text (default) or json
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Seed document to load instead of the built-in workspace
    #[arg(long, global = true, value_name = "PATH")]
    pub seed: Option<PathBuf>,

    /// Config file applied on top of the user config
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Act as this person (id) instead of the configured current user
    #[arg(long = "as", global = true, value_name = "PERSON_ID")]
    pub as_user: Option<String>,

    /// Reference time for countdowns and sprint progress (RFC 3339)
    #[arg(long, global = true, env = "PMDASH_NOW", hide = true)]
    pub now: Option<DateTime<Utc>>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Personal overview: counts, status breakdown, deadlines, activity
    #[command(alias = "home")]
    Dashboard,

    /// Kanban board, optionally moving one card
    Board(BoardArgs),

    /// List issues with filters
    #[command(alias = "list")]
    Issues(IssuesArgs),

    /// Show one issue, project or person
    Show(ShowArgs),

    /// Team directory
    People(PeopleArgs),

    /// List projects
    Projects(ProjectsArgs),

    /// Notification inbox (alias: inbox)
    #[command(alias = "inbox")]
    Notifications(NotificationsArgs),

    /// Release history
    Releases(ReleasesArgs),

    /// Search projects, issues and people
    Search(SearchArgs),

    /// Current sprint progress
    Sprint,

    /// Profile and work stats for the current user or another person
    Profile(ProfileArgs),

    /// Show version information
    Version(VersionArgs),
}

#[derive(Args, Debug, Default, Clone)]
pub struct BoardArgs {
    /// Only cards whose title or description contains this text
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Only cards in this project (id, or "all")
    #[arg(long, short = 'p')]
    pub project: Option<String>,

    /// Card to move (issue id)
    #[arg(long = "move", value_name = "ISSUE_ID", requires = "to")]
    pub move_issue: Option<String>,

    /// Column to drop the card on (todo, inprogress, blocked, done)
    #[arg(long, value_name = "STATUS", requires = "move_issue")]
    pub to: Option<IssueStatus>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct IssuesArgs {
    /// Title or description contains this text (case-insensitive)
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Status ("all" for any)
    #[arg(long)]
    pub status: Option<String>,

    /// Priority ("all" for any)
    #[arg(long, short = 'p')]
    pub priority: Option<String>,

    /// Assignee person id ("all" for any)
    #[arg(long, short = 'a')]
    pub assignee: Option<String>,

    /// Project id ("all" for any)
    #[arg(long)]
    pub project: Option<String>,

    /// Only issues assigned to the current user
    #[arg(long, conflicts_with = "assignee")]
    pub mine: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(subcommand)]
    pub target: ShowTarget,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ShowTarget {
    /// Issue details
    Issue { id: String },
    /// Project overview with members and progress
    Project { id: String },
    /// Person profile with assigned work
    Person { id: String },
}

#[derive(Args, Debug, Default, Clone)]
pub struct PeopleArgs {
    /// Name, role, email or location contains this text
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Team ("all" for any)
    #[arg(long, short = 't')]
    pub team: Option<String>,

    /// Exact role ("all" for any)
    #[arg(long, short = 'r')]
    pub role: Option<String>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct ProjectsArgs {
    /// Name or description contains this text
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Status: active, planning, archived ("all" for any)
    #[arg(long)]
    pub status: Option<String>,

    /// Team ("all" for any)
    #[arg(long, short = 't')]
    pub team: Option<String>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct NotificationsArgs {
    /// all, unread, read, or a category (project, issue, comment, system)
    #[arg(long, short = 'f', default_value = "all")]
    pub filter: String,

    /// Title or description contains this text
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Mark these notifications read
    #[arg(long, value_name = "ID", num_args = 1..)]
    pub mark_read: Vec<String>,

    /// Mark every notification read
    #[arg(long)]
    pub mark_all_read: bool,

    /// Delete these notifications
    #[arg(long, value_name = "ID", num_args = 1..)]
    pub delete: Vec<String>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct ReleasesArgs {
    /// Version or description contains this text
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Status: released, beta, alpha, planned ("all" for any)
    #[arg(long)]
    pub status: Option<String>,

    /// Page number (1-based, clamped to the last page)
    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Text to look for
    pub term: String,
}

#[derive(Args, Debug, Default, Clone)]
pub struct ProfileArgs {
    /// Person id; defaults to the current user
    pub person: Option<String>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct VersionArgs {
    /// Print only the version number
    #[arg(long)]
    pub short: bool,
}

impl Cli {
    #[must_use]
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            config_path: self.config.clone(),
            seed_path: self.seed.clone(),
            current_user: self.as_user.clone(),
        }
    }
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if configuration or the seed cannot be loaded, or the
/// command fails.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli.overrides())?;
    logging::init_logging(cli.verbose, cli.quiet, config.log_file.as_deref())?;

    let output = OutputContext::new(cli.json, config.color);
    let Some(command) = cli.command else {
        println!("pmd - project dashboard. Use --help for usage.");
        return Ok(());
    };

    if let Commands::Version(args) = &command {
        return commands::version::execute(args, &output);
    }

    let now = cli.now.unwrap_or_else(Utc::now);
    let ctx = CommandContext::open(&config, output, now)
        .context("Failed to load workspace")?;
    dispatch(command, &ctx)
}

/// Route a parsed command to its implementation.
///
/// # Errors
///
/// Returns whatever the command returns.
pub fn dispatch(command: Commands, ctx: &CommandContext) -> Result<()> {
    match command {
        Commands::Dashboard => commands::dashboard::execute(ctx),
        Commands::Board(args) => commands::board::execute(&args, ctx),
        Commands::Issues(args) => commands::issues::execute(&args, ctx),
        Commands::Show(args) => commands::show::execute(&args.target, ctx),
        Commands::People(args) => commands::people::execute(&args, ctx),
        Commands::Projects(args) => commands::projects::execute(&args, ctx),
        Commands::Notifications(args) => commands::notifications::execute(&args, ctx),
        Commands::Releases(args) => commands::releases::execute(&args, ctx),
        Commands::Search(args) => commands::search::execute(&args, ctx),
        Commands::Sprint => commands::sprint::execute(ctx),
        Commands::Profile(args) => commands::profile::execute(&args, ctx),
        Commands::Version(args) => commands::version::execute(&args, &ctx.output),
    }
}

impl Commands {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Board(_) => "board",
            Self::Issues(_) => "issues",
            Self::Show(show) => match show.target {
                ShowTarget::Issue { .. } => "show issue",
                ShowTarget::Project { .. } => "show project",
                ShowTarget::Person { .. } => "show person",
            },
            Self::People(_) => "people",
            Self::Projects(_) => "projects",
            Self::Notifications(_) => "notifications",
            Self::Releases(_) => "releases",
            Self::Search(_) => "search",
            Self::Sprint => "sprint",
            Self::Profile(_) => "profile",
            Self::Version(_) => "version",
        }
    }
}
