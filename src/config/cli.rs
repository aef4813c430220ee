use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "repo-chores")]
#[command(about = "Small chores for a directory of git checkouts and the stats task")]
pub struct CliConfig {
    /// Path to TOML configuration file (defaults to ./repo-chores.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List child repositories with commits inside the recency window
    Recent(RecentArgs),
    /// List branches of every child repository
    Branches(BranchesArgs),
    /// Register (or replace) the daily traffic-statistics task
    Schedule(ScheduleArgs),
}

#[derive(Debug, Clone, Args)]
pub struct RecentArgs {
    /// Directory whose immediate children are scanned
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Recency window in hours
    #[arg(long)]
    pub hours: Option<u32>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct BranchesArgs {
    /// Directory whose immediate children are listed
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ScheduleArgs {
    /// Start the task right after registering it
    #[arg(long)]
    pub start: bool,

    /// Never ask whether to start the task
    #[arg(long)]
    pub no_prompt: bool,

    /// Print the registration script without touching the scheduler
    #[arg(long)]
    pub dry_run: bool,
}
