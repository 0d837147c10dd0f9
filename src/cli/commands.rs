use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::model::{Importance, Recurrence, ThemeMode};
use crate::ops::view::StatusFilter;

#[derive(Parser)]
#[command(name = "tl", about = concat!("tasklet v", env!("CARGO_PKG_VERSION"), " - todos in the terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different data directory (default: TASKLET_DIR or the platform data dir)
    #[arg(short = 'd', long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,

    /// More log output on stderr (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks
    List(ListArgs),
    /// Add a task at the top of the list
    Add(AddArgs),
    /// Flip a task between open and done
    Toggle(IdArg),
    /// Change fields of a task
    Edit(EditArgs),
    /// Delete a task
    Rm(IdArg),
    /// Delete every completed task
    ClearCompleted,
    /// Mark every task done
    DoneAll,
    /// Write all tasks to a timestamped JSON file
    Export(ExportArgs),
    /// Add tasks from a JSON file
    Import(ImportArgs),
    /// Show the colour theme, or set it
    Theme(ThemeArgs),
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Completion filter (all, active, done)
    #[arg(long, default_value = "all")]
    pub filter: StatusFilter,
    /// Order by due date, undated last
    #[arg(long)]
    pub sort_due: bool,
    /// Case-insensitive title search
    #[arg(long)]
    pub search: Option<String>,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct IdArg {
    /// Task id (a unique prefix is enough)
    pub id: String,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// urgent, planned, optional, or focus
    #[arg(long)]
    pub importance: Option<Importance>,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,
    #[arg(long, default_value = "")]
    pub notes: String,
    /// Project (default from config.toml)
    #[arg(long)]
    pub project: Option<String>,
    /// Tag (repeatable)
    #[arg(long = "tag", action = ArgAction::Append)]
    pub tags: Vec<String>,
    /// none, daily, weekly, or custom
    #[arg(long)]
    pub recurrence: Option<Recurrence>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task id (a unique prefix is enough)
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    /// New due date (YYYY-MM-DD)
    #[arg(long, conflicts_with = "no_due")]
    pub due: Option<String>,
    /// Remove the due date
    #[arg(long)]
    pub no_due: bool,
    #[arg(long)]
    pub notes: Option<String>,
    #[arg(long)]
    pub importance: Option<Importance>,
    #[arg(long)]
    pub project: Option<String>,
    /// Replace the tags (repeatable)
    #[arg(long = "tag", action = ArgAction::Append)]
    pub tags: Vec<String>,
    #[arg(long)]
    pub recurrence: Option<Recurrence>,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Directory for the export file (default: [export] dir in config.toml, then .)
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct ImportArgs {
    /// JSON file holding an array of tasks
    pub file: PathBuf,
}

#[derive(Args)]
pub struct ThemeArgs {
    /// dark or light; omit to print the current theme
    pub mode: Option<ThemeMode>,
}
