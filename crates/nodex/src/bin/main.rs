//! Nodex CLI

use anyhow::Context;
use clap::Parser;
use nodex::{App, Cli, ConfigProfile, init_logging, level_filter, load_config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let profile = cli
        .profile
        .as_deref()
        .map(str::parse::<ConfigProfile>)
        .transpose()?;

    let config = load_config(cli.config.as_deref(), cli.vault.as_deref(), profile)
        .context("Failed to load configuration")?;

    let level = profile.map_or_else(|| level_filter(&config), ConfigProfile::level_filter);
    init_logging(cli.log_format, level)?;

    log::info!("Nodex v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Profile: {} | Log format: {:?}", config.profile, cli.log_format);

    let app = App::new(config)?;
    let mut stdout = std::io::stdout().lock();
    app.run(cli.command, &mut stdout).await
}
