use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ztv")]
#[command(
    author,
    version,
    about = "Browse Zendesk support tickets from the terminal",
    before_help = crate::art::LOGO
)]
pub struct Cli {
    /// Zendesk subdomain (the tenant part of <subdomain>.zendesk.com)
    #[arg(long, global = true, env = "ZENDESK_SUBDOMAIN")]
    pub subdomain: Option<String>,

    /// Email address of the Zendesk account
    #[arg(long, global = true, env = "ZENDESK_EMAIL")]
    pub email: Option<String>,

    /// Account password (prefer ZENDESK_PASSWORD or the config file over this flag)
    #[arg(long, global = true)]
    pub password: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print one line per ticket to stdout
    List {
        /// Stop after fetching this many pages
        #[arg(long)]
        page_limit: Option<u32>,
    },

    /// Show a single ticket in detail
    Show {
        /// Ticket number
        id: u64,
    },

    /// Configure ztv settings
    Config {
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_credential_flags() {
        let cli = Cli::parse_from([
            "ztv",
            "--subdomain",
            "acme",
            "--email",
            "agent@example.com",
            "--password",
            "hunter2",
            "list",
        ]);

        assert_eq!(cli.subdomain.as_deref(), Some("acme"));
        assert_eq!(cli.email.as_deref(), Some("agent@example.com"));
        assert_eq!(cli.password.as_deref(), Some("hunter2"));
        assert!(matches!(
            cli.command,
            Some(Commands::List { page_limit: None })
        ));
    }

    #[test]
    fn test_parse_defaults_to_interactive() {
        let cli = Cli::parse_from(["ztv"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_show_takes_ticket_id() {
        let cli = Cli::parse_from(["ztv", "show", "42"]);
        assert!(matches!(cli.command, Some(Commands::Show { id: 42 })));
    }
}
