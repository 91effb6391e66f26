//! Command-line interface for ht
//!
//! This module defines the CLI structure using clap derive macros.
//! Structured task commands live in `task`; the interpreter passthrough
//! and REPL live in `exec`.

use clap::{Parser, Subcommand};

use crate::error::Result;

mod exec;
mod task;

/// ht - terminal task manager
///
/// Tasks with a priority and optional deadline, stored in a local JSON
/// file, driven either by structured subcommands or by the embedded
/// command interpreter (`exec`, `shell`, and the `ui` command bar).
#[derive(Parser, Debug)]
#[command(name = "ht")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the task store file (defaults to the platform data dir)
    #[arg(long, global = true, env = "HT_STORE")]
    pub store: Option<std::path::PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a task
    Add {
        /// Task description
        text: String,

        /// Priority: high, medium, low
        #[arg(short, long)]
        priority: Option<String>,

        /// Deadline as YYYY-MM-DD
        #[arg(short, long)]
        deadline: Option<String>,
    },

    /// List tasks
    List {
        /// Only completed tasks
        #[arg(long, conflicts_with = "pending")]
        completed: bool,

        /// Only pending tasks
        #[arg(long)]
        pending: bool,

        /// Filter by priority
        #[arg(short, long)]
        priority: Option<String>,
    },

    /// Toggle completion of a task
    Done {
        /// Task id or unique id prefix
        id: String,
    },

    /// Delete a task
    Delete {
        /// Task id or unique id prefix
        id: String,
    },

    /// Edit a task in place
    Edit {
        /// Task id or unique id prefix
        id: String,

        /// New description
        #[arg(long)]
        text: Option<String>,

        /// New priority
        #[arg(long)]
        priority: Option<String>,

        /// New deadline as YYYY-MM-DD
        #[arg(long, conflicts_with = "no_deadline")]
        deadline: Option<String>,

        /// Remove the deadline
        #[arg(long)]
        no_deadline: bool,
    },

    /// Show aggregate counts
    Stats,

    /// Run one interpreter command line
    Exec {
        /// The command line, e.g. 'add "ship release" high 2025-12-01'
        line: String,
    },

    /// Interactive interpreter session
    Shell,

    /// Full-screen terminal UI
    Ui,
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Add {
                text,
                priority,
                deadline,
            } => task::run_add(task::AddOptions {
                text,
                priority,
                deadline,
                store: self.store,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::List {
                completed,
                pending,
                priority,
            } => task::run_list(task::ListOptions {
                completed,
                pending,
                priority,
                store: self.store,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Done { id } => task::run_done(task::DoneOptions {
                id,
                store: self.store,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Delete { id } => task::run_delete(task::DeleteOptions {
                id,
                store: self.store,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Edit {
                id,
                text,
                priority,
                deadline,
                no_deadline,
            } => task::run_edit(task::EditOptions {
                id,
                text,
                priority,
                deadline,
                no_deadline,
                store: self.store,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Stats => task::run_stats(task::StatsOptions {
                store: self.store,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Exec { line } => exec::run_exec(exec::ExecOptions {
                line,
                store: self.store,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Shell => exec::run_shell(exec::ShellOptions { store: self.store }),
            Commands::Ui => crate::ui::run(self.store),
        }
    }
}
