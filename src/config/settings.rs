use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Placeholder written by `ztv config` until the user edits the file.
pub const PLACEHOLDER_SUBDOMAIN: &str = "your-subdomain";
pub const PLACEHOLDER_EMAIL: &str = "agent@example.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordSource {
    Cli,
    Env,
    Config,
    Missing,
    InvalidCliWhitespace,
    InvalidEnvWhitespace,
    InvalidConfigWhitespace,
}

enum PasswordResolution {
    Valid {
        source: PasswordSource,
        password: String,
    },
    Missing,
    InvalidCliWhitespace,
    InvalidEnvWhitespace,
    InvalidConfigWhitespace,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub zendesk: ZendeskConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZendeskConfig {
    pub subdomain: String,
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
}

impl Default for ZendeskConfig {
    fn default() -> Self {
        Self {
            subdomain: PLACEHOLDER_SUBDOMAIN.to_string(),
            email: PLACEHOLDER_EMAIL.to_string(),
            password: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            zendesk: ZendeskConfig::default(),
        }
    }
}

/// Credentials passed on the command line (or through the `ZENDESK_SUBDOMAIN`
/// / `ZENDESK_EMAIL` variables, which clap merges into the same flags).
/// `ZENDESK_PASSWORD` is resolved separately so its source can be reported.
#[derive(Debug, Default, Clone)]
pub struct CredentialArgs {
    pub subdomain: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Fully resolved connection credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub subdomain: String,
    pub email: String,
    pub password: String,
}

impl Config {
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "ztv").context("Failed to determine config directory")?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            bail!(
                "Configuration file not found at {}\n\nRun 'ztv config' to create a default configuration.",
                config_path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        Ok(config)
    }

    /// Like `load`, but a missing file is not an error. Credentials can come
    /// entirely from flags and environment variables.
    pub fn load_if_exists() -> Result<Option<Self>> {
        if Self::config_path()?.exists() {
            Ok(Some(Self::load()?))
        } else {
            Ok(None)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        // Create parent directories if they don't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(())
    }

    pub fn password_source(&self, args: &CredentialArgs) -> PasswordSource {
        self.resolve_password_source(args.password.clone(), std::env::var("ZENDESK_PASSWORD").ok())
    }

    /// Helper for status display and tests.
    fn resolve_password_source(
        &self,
        cli_password: Option<String>,
        env_password: Option<String>,
    ) -> PasswordSource {
        match self.resolve_password_resolution(cli_password, env_password) {
            PasswordResolution::Valid { source, .. } => source,
            PasswordResolution::Missing => PasswordSource::Missing,
            PasswordResolution::InvalidCliWhitespace => PasswordSource::InvalidCliWhitespace,
            PasswordResolution::InvalidEnvWhitespace => PasswordSource::InvalidEnvWhitespace,
            PasswordResolution::InvalidConfigWhitespace => PasswordSource::InvalidConfigWhitespace,
        }
    }

    fn resolve_password_resolution(
        &self,
        cli_password: Option<String>,
        env_password: Option<String>,
    ) -> PasswordResolution {
        if let Some(password) = cli_password {
            let trimmed = password.trim();
            if trimmed.is_empty() {
                return PasswordResolution::InvalidCliWhitespace;
            }
            return PasswordResolution::Valid {
                source: PasswordSource::Cli,
                password: trimmed.to_string(),
            };
        }

        if let Some(password) = env_password {
            let trimmed = password.trim();
            if trimmed.is_empty() {
                return PasswordResolution::InvalidEnvWhitespace;
            }
            return PasswordResolution::Valid {
                source: PasswordSource::Env,
                password: trimmed.to_string(),
            };
        }

        if let Some(password) = &self.zendesk.password {
            let trimmed = password.trim();
            if trimmed.is_empty() {
                return PasswordResolution::InvalidConfigWhitespace;
            }
            return PasswordResolution::Valid {
                source: PasswordSource::Config,
                password: trimmed.to_string(),
            };
        }

        PasswordResolution::Missing
    }
}

impl Credentials {
    /// Resolve the full credential set: flags (with env merged in by clap for
    /// subdomain and email) take precedence, then `ZENDESK_PASSWORD`, then the
    /// config file.
    pub fn resolve(args: &CredentialArgs) -> Result<Self> {
        let config = Config::load_if_exists()?;
        Self::resolve_with(
            args,
            config.as_ref(),
            std::env::var("ZENDESK_PASSWORD").ok(),
        )
    }

    fn resolve_with(
        args: &CredentialArgs,
        config: Option<&Config>,
        env_password: Option<String>,
    ) -> Result<Self> {
        let subdomain = Self::resolve_field(
            args.subdomain.as_deref(),
            config.map(|c| c.zendesk.subdomain.as_str()),
            PLACEHOLDER_SUBDOMAIN,
            "subdomain",
            "ZENDESK_SUBDOMAIN",
        )?;

        let email = Self::resolve_field(
            args.email.as_deref(),
            config.map(|c| c.zendesk.email.as_str()),
            PLACEHOLDER_EMAIL,
            "email",
            "ZENDESK_EMAIL",
        )?;

        let resolution = config
            .cloned()
            .unwrap_or_default()
            .resolve_password_resolution(args.password.clone(), env_password);

        let password = match resolution {
            PasswordResolution::Valid { password, .. } => password,
            PasswordResolution::InvalidCliWhitespace => {
                bail!("--password is whitespace-only. Pass a real password or drop the flag.")
            }
            PasswordResolution::InvalidEnvWhitespace => {
                bail!(
                    "ZENDESK_PASSWORD is set but empty/whitespace. Set a valid password or unset it to use the config value."
                )
            }
            PasswordResolution::InvalidConfigWhitespace => {
                bail!(
                    "Config value [zendesk].password is empty/whitespace. Set a valid password or remove the field."
                )
            }
            PasswordResolution::Missing => bail!(
                "Zendesk password not found.\n\n\
                You can set it in three ways (checked in order):\n\
                1. Command line: --password \"your-password\"\n\
                2. Environment variable: export ZENDESK_PASSWORD=\"your-password\"\n\
                3. Config file: Add 'password = \"your-password\"' under [zendesk] in config.toml"
            ),
        };

        Ok(Self {
            subdomain,
            email,
            password,
        })
    }

    fn resolve_field(
        arg: Option<&str>,
        config_value: Option<&str>,
        placeholder: &str,
        name: &str,
        env_var: &str,
    ) -> Result<String> {
        if let Some(value) = arg {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                bail!("--{name} (or {env_var}) is whitespace-only. Set a real value.");
            }
            return Ok(trimmed.to_string());
        }

        if let Some(value) = config_value {
            let trimmed = value.trim();
            if !trimmed.is_empty() && trimmed != placeholder {
                return Ok(trimmed.to_string());
            }
        }

        bail!(
            "Zendesk {name} not found.\n\n\
            Pass --{name}, set {env_var}, or set '{name}' under [zendesk] in config.toml \
            (run 'ztv config' to create it)."
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_password(password: Option<&str>) -> Config {
        Config {
            zendesk: ZendeskConfig {
                subdomain: "acme".to_string(),
                email: "agent@acme.test".to_string(),
                password: password.map(|s| s.to_string()),
            },
        }
    }

    #[test]
    fn test_password_precedence() {
        let config = config_with_password(Some("config-pass"));
        let args = CredentialArgs {
            password: Some("cli-pass".to_string()),
            ..Default::default()
        };

        // Case 1: CLI flag wins over env and config
        let creds =
            Credentials::resolve_with(&args, Some(&config), Some("env-pass".to_string())).unwrap();
        assert_eq!(creds.password, "cli-pass");

        // Case 2: env wins over config
        let creds = Credentials::resolve_with(
            &CredentialArgs::default(),
            Some(&config),
            Some("env-pass".to_string()),
        )
        .unwrap();
        assert_eq!(creds.password, "env-pass");

        // Case 3: config is the last resort
        let creds =
            Credentials::resolve_with(&CredentialArgs::default(), Some(&config), None).unwrap();
        assert_eq!(creds.password, "config-pass");
    }

    #[test]
    fn test_password_rejects_whitespace_sources() {
        let config = config_with_password(Some("config-pass"));

        // Whitespace env is treated as invalid (no fallback to config)
        assert!(
            Credentials::resolve_with(
                &CredentialArgs::default(),
                Some(&config),
                Some("   \t\n".to_string()),
            )
            .is_err()
        );

        let whitespace_config = config_with_password(Some("   "));
        assert!(
            Credentials::resolve_with(&CredentialArgs::default(), Some(&whitespace_config), None)
                .is_err()
        );
    }

    #[test]
    fn test_password_source_resolution() {
        let config = config_with_password(Some("config-pass"));

        assert_eq!(
            config.resolve_password_source(Some("cli-pass".to_string()), None),
            PasswordSource::Cli
        );
        assert_eq!(
            config.resolve_password_source(None, Some("env-pass".to_string())),
            PasswordSource::Env
        );
        assert_eq!(
            config.resolve_password_source(None, Some("   ".to_string())),
            PasswordSource::InvalidEnvWhitespace
        );
        assert_eq!(
            config.resolve_password_source(None, None),
            PasswordSource::Config
        );

        let no_password = config_with_password(None);
        assert_eq!(
            no_password.resolve_password_source(None, None),
            PasswordSource::Missing
        );

        let whitespace = config_with_password(Some("   "));
        assert_eq!(
            whitespace.resolve_password_source(None, None),
            PasswordSource::InvalidConfigWhitespace
        );
    }

    #[test]
    fn test_subdomain_and_email_prefer_flags() {
        let config = config_with_password(Some("config-pass"));
        let args = CredentialArgs {
            subdomain: Some("other".to_string()),
            email: Some("boss@other.test".to_string()),
            password: None,
        };

        let creds = Credentials::resolve_with(&args, Some(&config), None).unwrap();
        assert_eq!(creds.subdomain, "other");
        assert_eq!(creds.email, "boss@other.test");
    }

    #[test]
    fn test_placeholder_config_values_do_not_count() {
        let config = Config::default();
        let args = CredentialArgs {
            password: Some("cli-pass".to_string()),
            ..Default::default()
        };

        // Default config still carries placeholders; resolution must fail
        // rather than send "your-subdomain" to the network.
        assert!(Credentials::resolve_with(&args, Some(&config), None).is_err());
    }

    #[test]
    fn test_resolve_without_config_file() {
        let args = CredentialArgs {
            subdomain: Some("acme".to_string()),
            email: Some("agent@acme.test".to_string()),
            password: Some("cli-pass".to_string()),
        };

        let creds = Credentials::resolve_with(&args, None, None).unwrap();
        assert_eq!(creds.subdomain, "acme");
        assert_eq!(creds.email, "agent@acme.test");
        assert_eq!(creds.password, "cli-pass");
    }

    #[test]
    fn test_missing_password_is_an_error() {
        let args = CredentialArgs {
            subdomain: Some("acme".to_string()),
            email: Some("agent@acme.test".to_string()),
            password: None,
        };

        assert!(Credentials::resolve_with(&args, None, None).is_err());
    }
}
