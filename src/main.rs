mod art;
mod cli;
mod commands;
mod config;
mod tui;
mod ui;
mod zendesk;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::CredentialArgs;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<()> {
    // Log to stderr so the TUI and plain output stay clean
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ztv=warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    let args = CredentialArgs {
        subdomain: cli.subdomain,
        email: cli.email,
        password: cli.password,
    };

    match cli.command {
        Some(Commands::List { page_limit }) => {
            commands::list(args, page_limit).await?;
        }
        Some(Commands::Show { id }) => {
            commands::show(args, id).await?;
        }
        Some(Commands::Config { show }) => {
            if show {
                commands::config_show(&args)?;
            } else {
                commands::config_init()?;
            }
        }
        None => {
            // Default: launch interactive TUI
            commands::interactive(args).await?;
        }
    }

    Ok(())
}
