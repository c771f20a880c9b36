use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Parser, Subcommand};
use taskboard_core::filter::StatusFilter;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "taskboard",
    version,
    about = "Taskboard: terminal client for the task REST backend"
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Config file, overriding $TASKBOARD_CONFIG and the default location.
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overriding $TASKBOARD_BACKEND_URL and the config file.
    #[arg(long = "backend-url", global = true)]
    pub backend_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List tasks matching the filter and search, followed by the counts.
    List {
        #[arg(long, default_value_t = StatusFilter::All)]
        status: StatusFilter,

        #[arg(long, default_value = "")]
        search: String,
    },

    /// Show one task with its comments.
    Show { id: String },

    /// Create a task.
    Add {
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,
    },

    /// Update a task; omitted fields keep their current value.
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long, action = ArgAction::Set)]
        completed: Option<bool>,
    },

    /// Flip the completion of a task.
    Toggle { id: String },

    /// Delete a task.
    Delete { id: String },

    /// Delete every completed task, one request at a time.
    ClearCompleted {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },

    /// Manage the comments of a task.
    Comment {
        #[command(subcommand)]
        action: CommentCommand,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum CommentCommand {
    Add { task_id: String, content: String },
    Edit {
        task_id: String,
        comment_id: String,
        content: String,
    },
    Delete { task_id: String, comment_id: String },
}

/// Default filter when `RUST_LOG` is unset. `-v` and `-q` offset each
/// other; above `warn` only this workspace's crates get louder, so the
/// HTTP stack stays quiet.
fn log_filter(verbose: u8, quiet: u8) -> String {
    let level = match i16::from(verbose) - i16::from(quiet) {
        ..=-2 => "off",
        -1 => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    match level {
        "off" | "error" | "warn" => level.to_string(),
        _ => format!("warn,taskboard_core={level},taskboard_cli={level}"),
    }
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(log_filter(verbose, quiet))
            .map_err(|e| anyhow!("invalid log filter: {e}"))?,
    };

    let stderr = std::io::stderr();
    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(stderr.is_terminal())
        .without_time()
        .try_init();

    if let Err(err) = installed {
        debug!(error = %err, "tracing subscriber already set");
    }

    Ok(())
}
