//! Command-line arguments.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Nodex - markdown knowledge vault tools
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the vault directory
    #[arg(short, long, global = true, env = "NODEX_VAULT_PATH")]
    pub vault: Option<PathBuf>,

    /// Configuration file (YAML or TOML); defaults to ./nodex.{yaml,toml} when present
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Configuration profile (development, production, minimal)
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Human)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Default)]
pub enum LogFormat {
    /// Plain lines on stderr
    #[default]
    Human,
    /// One JSON object per event on stderr
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the link graph as JSON
    Graph(GraphArgs),
    /// Print graph statistics
    Stats {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Forward links and backlinks of one note
    Links {
        /// Vault-relative note path
        path: String,
    },
    /// Title, type, tags, links and summary of one note
    Summary {
        /// Vault-relative note path
        path: String,
    },
    /// Print the vault folder structure
    Tree,
    /// Create a note from the standard template
    Note(NoteArgs),
    /// Manage saved graph views
    #[command(subcommand)]
    Views(ViewsCommand),
    /// Ask the librarian assistant
    Ask(AskArgs),
    /// Interactive session with the assistant, one message per line.
    /// Proposed file operations are applied as they arrive.
    Chat {
        #[arg(long)]
        framework: Option<String>,
    },
}

#[derive(Args, Debug, Default)]
pub struct GraphArgs {
    /// Drop notes without any links
    #[arg(long)]
    pub hide_orphans: bool,

    /// Apply a saved view's filters
    #[arg(long, value_name = "VIEW_ID")]
    pub view: Option<String>,
}

#[derive(Args, Debug)]
pub struct NoteArgs {
    /// Note title, also the file name
    pub title: String,

    /// Frontmatter `type`
    #[arg(long = "type", default_value = "note")]
    pub note_type: String,

    /// Body text below the heading
    #[arg(long, default_value = "")]
    pub body: String,

    /// Vault-relative folder to create the note in
    #[arg(long, default_value = "")]
    pub dir: String,

    /// Print the rendered note instead of writing it
    #[arg(long)]
    pub print: bool,
}

#[derive(Subcommand, Debug)]
pub enum ViewsCommand {
    /// List saved views
    List,
    /// Save a new view
    Create {
        name: String,
        #[arg(long)]
        hide_orphans: bool,
        #[arg(long, default_value_t = 1.0)]
        zoom: f64,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        pan_x: f64,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        pan_y: f64,
    },
    /// Delete a view; unknown ids are ignored
    Delete { id: String },
    /// Show one view's details
    Select { id: String },
    /// Print the graph rendered under a view
    Apply { id: String },
    /// Delete every saved view
    Clear,
    /// Print the stored views as JSON
    Show,
}

#[derive(Args, Debug)]
pub struct AskArgs {
    /// Question or instruction
    pub message: String,

    /// Assistant mode; defaults to the configured framework
    #[arg(long)]
    pub framework: Option<String>,

    /// Vault-relative path of the note to include as context
    #[arg(long)]
    pub file: Option<String>,

    /// Apply create/edit directives from the reply
    #[arg(long)]
    pub apply: bool,
}
