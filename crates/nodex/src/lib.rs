//! # Nodex CLI
//!
//! Command-line front end over the Nodex crates: configuration loading,
//! logger setup and command execution.
//!
//! ```no_run
//! use nodex::{App, Command, load_config};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = load_config(None, Some(std::path::Path::new("/path/to/vault")), None)?;
//! let app = App::new(config)?;
//! app.run(Command::Stats { json: false }, &mut std::io::stdout()).await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod logging;
pub mod settings;

pub use cli::{Cli, Command, LogFormat, ViewsCommand};
pub use commands::App;
pub use logging::init_logging;
pub use settings::{level_filter, load_config};

pub use nodex_core::prelude::*;
