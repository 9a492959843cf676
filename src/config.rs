//! Configuration loading and management.
//!
//! Loads configuration from embedded config.toml with environment variable overrides.
//! Tenant credentials come from the environment only.

use serde::Deserialize;
use std::env;
use url::Url;

use crate::auth::secret::SecretString;
use crate::error::ConfigError;

/// Embedded configuration file content.
const CONFIG_TOML: &str = include_str!("../config.toml");

/// Environment variable holding the tenant (directory) identifier.
pub const TENANT_ID_VAR: &str = "TENANT_ID";
/// Environment variable holding the app registration's client identifier.
pub const CLIENT_ID_VAR: &str = "CLIENT_ID";
/// Environment variable holding the app registration's client secret.
pub const CLIENT_SECRET_VAR: &str = "CLIENT_SECRET";

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub api: ApiConfig,
    pub images: ImagesConfig,
    pub news: NewsConfig,
    pub mail: MailConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub graph_base_url: String,
    pub graph_scope: String,
    pub login_base_url: String,
    pub github_api_base_url: String,
}

/// Public repository holding the sample images, and where they land in the drive.
#[derive(Debug, Clone, Deserialize)]
pub struct ImagesConfig {
    pub repo_owner: String,
    pub repo_name: String,
    pub repo_folder: String,
    pub drive_folder: String,
    pub max_per_user: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewsConfig {
    pub feed_url: String,
    pub item_count: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    pub subject: String,
    pub min_recipients: usize,
    pub max_recipients: usize,
    pub chat_folder: String,
    pub report_folder: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Config {
    /// Load configuration from embedded config.toml with environment variable overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::embedded()?;

        if let Ok(url) = env::var("GRAPH_BASE_URL") {
            config.api.graph_base_url = url;
        }

        if let Ok(url) = env::var("LOGIN_BASE_URL") {
            config.api.login_base_url = url;
        }

        if let Ok(log_level) = env::var("RUST_LOG") {
            config.logging.level = log_level;
        }

        config.validate()?;

        Ok(config)
    }

    /// Parse the embedded config.toml without overrides or validation.
    pub fn embedded() -> Result<Self, ConfigError> {
        toml::from_str(CONFIG_TOML).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validate endpoints and limits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("api.graph_base_url", &self.api.graph_base_url),
            ("api.login_base_url", &self.api.login_base_url),
            ("api.github_api_base_url", &self.api.github_api_base_url),
            ("news.feed_url", &self.news.feed_url),
        ] {
            Url::parse(value)
                .map_err(|e| ConfigError::Invalid(format!("{} is not a valid URL: {}", name, e)))?;
        }

        if self.mail.min_recipients == 0 || self.mail.min_recipients > self.mail.max_recipients {
            return Err(ConfigError::Invalid(format!(
                "mail recipient bounds must satisfy 0 < min <= max, got {}..={}",
                self.mail.min_recipients, self.mail.max_recipients
            )));
        }

        Ok(())
    }

    /// Get the client-credentials token URL for a tenant.
    pub fn token_url(&self, tenant_id: &str) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.api.login_base_url.trim_end_matches('/'),
            tenant_id
        )
    }

    /// Get the repository contents URL listing the sample images.
    pub fn image_listing_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api.github_api_base_url.trim_end_matches('/'),
            self.images.repo_owner,
            self.images.repo_name,
            self.images.repo_folder
        )
    }
}

/// App registration credentials for the client-credentials grant.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: SecretString,
}

impl Credentials {
    /// Build credentials, rejecting empty values.
    pub fn new(
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let tenant_id = non_empty(TENANT_ID_VAR, Some(tenant_id.into()))?;
        let client_id = non_empty(CLIENT_ID_VAR, Some(client_id.into()))?;
        let client_secret = non_empty(CLIENT_SECRET_VAR, Some(client_secret.into()))?;

        Ok(Self {
            tenant_id,
            client_id,
            client_secret: SecretString::new(client_secret),
        })
    }

    /// Read TENANT_ID, CLIENT_ID and CLIENT_SECRET from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read credentials through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let tenant_id = non_empty(TENANT_ID_VAR, lookup(TENANT_ID_VAR))?;
        let client_id = non_empty(CLIENT_ID_VAR, lookup(CLIENT_ID_VAR))?;
        let client_secret = non_empty(CLIENT_SECRET_VAR, lookup(CLIENT_SECRET_VAR))?;

        Self::new(tenant_id, client_id, client_secret)
    }
}

fn non_empty(name: &'static str, value: Option<String>) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingCredential(name)),
    }
}
