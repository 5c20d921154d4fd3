use crate::config::{Config, CredentialArgs, Credentials, PasswordSource};
use crate::tui::{App, run_app};
use crate::ui::output;
use crate::zendesk::ZendeskClient;
use anyhow::{Context, Result, bail};
use tracing::debug;

/// Default command: browse tickets in the interactive TUI.
pub async fn interactive(args: CredentialArgs) -> Result<()> {
    let credentials = Credentials::resolve(&args)?;
    let client = ZendeskClient::new(&credentials)?;

    let app = App::new(credentials.subdomain.clone());
    run_app(app, client).await?;

    Ok(())
}

/// `ztv list`: print one line per ticket to stdout.
pub async fn list(args: CredentialArgs, page_limit: Option<u32>) -> Result<()> {
    let credentials = Credentials::resolve(&args)?;
    let client = ZendeskClient::new(&credentials)?;

    let tickets = client
        .fetch_all_tickets(page_limit)
        .await
        .context("Failed to fetch tickets")?;

    debug!(count = tickets.len(), "tickets fetched");
    output::render_ticket_list(&tickets, &mut std::io::stdout())?;

    Ok(())
}

/// `ztv show <id>`: print a single ticket in detail.
pub async fn show(args: CredentialArgs, id: u64) -> Result<()> {
    let credentials = Credentials::resolve(&args)?;
    let client = ZendeskClient::new(&credentials)?;

    let ticket = client.get_ticket(id).await?;
    output::render_ticket(&ticket)?;

    Ok(())
}

pub fn config_show(args: &CredentialArgs) -> Result<()> {
    let config_path = Config::config_path()?;

    if !config_path.exists() {
        bail!(
            "Configuration file not found at {}\n\nRun 'ztv config' to create a default configuration.",
            config_path.display()
        );
    }

    println!("# {}", config_path.display());
    println!();

    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

    // Never echo the password itself
    for line in content.lines() {
        if line.trim_start().starts_with("password") {
            println!("password = \"********\"");
        } else {
            println!("{}", line);
        }
    }

    let config = Config::load()?;
    let password_status = match config.password_source(args) {
        PasswordSource::Cli => "flag (--password)",
        PasswordSource::Env => "env (ZENDESK_PASSWORD)",
        PasswordSource::Config => "config ([zendesk].password)",
        PasswordSource::Missing => "missing",
        PasswordSource::InvalidCliWhitespace => "invalid: --password is whitespace-only",
        PasswordSource::InvalidEnvWhitespace => "invalid: ZENDESK_PASSWORD is whitespace-only",
        PasswordSource::InvalidConfigWhitespace => {
            "invalid: [zendesk].password is whitespace-only"
        }
    };

    println!();
    println!("# password source: {}", password_status);
    Ok(())
}

pub fn config_init() -> Result<()> {
    use std::io::{self, Write};

    let config_path = Config::config_path()?;

    if config_path.exists() {
        print!(
            "Config already exists at {}. Overwrite? [y/N] ",
            config_path.display()
        );
        io::stdout().flush()?;

        let mut response = String::new();
        io::stdin().read_line(&mut response)?;
        let response = response.trim().to_lowercase();

        if response != "y" && response != "yes" {
            println!("Aborted.");
            return Ok(());
        }
    }

    let config = Config::default();
    config.save()?;

    println!("Configuration initialized with defaults!");
    println!();
    println!("Config location: {}", config_path.display());
    println!();
    println!("Edit the config file to set:");
    println!("  - Zendesk subdomain");
    println!("  - Account email");
    if std::env::var("ZENDESK_PASSWORD").is_err() {
        println!();
        println!("Don't forget to set your password:");
        println!("  export ZENDESK_PASSWORD=\"your-password\"");
    }

    Ok(())
}
