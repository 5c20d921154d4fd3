mod settings;

pub use settings::{Config, CredentialArgs, Credentials, PasswordSource, ZendeskConfig};
