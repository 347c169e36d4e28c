use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::client::DEFAULT_API_BASE_URL;
use crate::oauth::provider::{OAuthProviderConfig, AUTH_URL};

/// Complete connector configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HubSpotConfig {
    /// Client ID of the HubSpot application
    pub client_id: String,
    /// Portal the application is installed in
    pub hub_id: String,
    /// Space-separated OAuth scopes
    #[serde(default = "default_scope")]
    pub scope: String,
    #[serde(default = "default_callback_url")]
    pub callback_url: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Where credentials are kept between runs
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// SQLite file for encrypted credentials; in-memory storage when unset
    #[serde(default)]
    pub credentials_db: Option<String>,
}

fn default_scope() -> String {
    "contacts-rw offline".to_string()
}

fn default_callback_url() -> String {
    "http://localhost:8080/hubspot/callback".to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_auth_url() -> String {
    AUTH_URL.to_string()
}

impl HubSpotConfig {
    /// Load config from environment variables.
    ///
    /// `HUBSPOT_CLIENT_ID` and `HUBSPOT_HUB_ID` are required; `HUBSPOT_SCOPE`,
    /// `HUBSPOT_CALLBACK_URL`, `HUBSPOT_API_BASE_URL` and
    /// `HUBSPOT_CREDENTIALS_DB` fall back to defaults.
    pub fn from_env() -> Result<Self> {
        let client_id =
            std::env::var("HUBSPOT_CLIENT_ID").context("HUBSPOT_CLIENT_ID not set")?;
        let hub_id = std::env::var("HUBSPOT_HUB_ID").context("HUBSPOT_HUB_ID not set")?;

        let config = Self {
            client_id,
            hub_id,
            scope: std::env::var("HUBSPOT_SCOPE").unwrap_or_else(|_| default_scope()),
            callback_url: std::env::var("HUBSPOT_CALLBACK_URL")
                .unwrap_or_else(|_| default_callback_url()),
            api_base_url: std::env::var("HUBSPOT_API_BASE_URL")
                .unwrap_or_else(|_| default_api_base_url()),
            auth_url: default_auth_url(),
            storage: StorageConfig {
                credentials_db: std::env::var("HUBSPOT_CREDENTIALS_DB").ok(),
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations that cannot produce a usable authorization URL.
    pub fn validate(&self) -> Result<()> {
        if self.client_id.trim().is_empty() {
            return Err(anyhow!("client_id can not be empty"));
        }
        if self.hub_id.trim().is_empty() {
            return Err(anyhow!("hub_id can not be empty"));
        }
        Ok(())
    }

    /// Returns the OAuth provider configuration for this application.
    pub fn oauth_provider(&self) -> OAuthProviderConfig {
        OAuthProviderConfig {
            auth_url: self.auth_url.clone(),
            client_id: self.client_id.clone(),
            hub_id: self.hub_id.clone(),
            scopes: self.scope.split_whitespace().map(|s| s.to_string()).collect(),
            callback_url: self.callback_url.clone(),
        }
    }
}

/// Load configuration from TOML file
pub fn load_config(path: &str) -> Result<HubSpotConfig> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
    let config: HubSpotConfig =
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path))?;
    config.validate()?;
    Ok(config)
}
