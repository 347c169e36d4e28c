use std::sync::Arc;

use hubspot::client::classify;
use hubspot::config::HubSpotConfig;
use hubspot::credentials::{CredentialStore, MemoryCredentialStore, OAuthCredentials};
use hubspot::oauth::refresh::refresh_access_token;
use hubspot::{Endpoint, HubSpotClient, HubSpotError, Method, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// User id credentials are filed under when the redirect carries none.
pub const DEFAULT_USER_ID: &str = "default";

/// Key the credentials are stored under.
pub fn stored_user_id(credentials: &OAuthCredentials) -> &str {
    credentials.user_id.as_deref().unwrap_or(DEFAULT_USER_ID)
}

/// HubSpot CRM connector.
///
/// Holds the application configuration, one HTTP client and the credential
/// store. Resource operations take the caller's user id first and
/// authenticate with the access token stored for it.
pub struct HubSpotConnector {
    config: HubSpotConfig,
    client: HubSpotClient,
    credentials: Arc<dyn CredentialStore>,
}

impl HubSpotConnector {
    pub fn new(config: HubSpotConfig, credentials: Arc<dyn CredentialStore>) -> Self {
        let client = HubSpotClient::with_base_url(config.api_base_url.clone());
        Self {
            config,
            client,
            credentials,
        }
    }

    /// Connector that forgets credentials when dropped.
    pub fn in_memory(config: HubSpotConfig) -> Self {
        Self::new(config, Arc::new(MemoryCredentialStore::new()))
    }

    pub fn config(&self) -> &HubSpotConfig {
        &self.config
    }

    /// Authorization URL the user has to visit to grant access.
    pub fn authenticate(&self, user_id: &str) -> String {
        self.config.oauth_provider().build_auth_url(user_id)
    }

    /// Parse the redirect HubSpot sent back and store the credentials.
    pub fn authenticate_response(&self, input: &str) -> Result<OAuthCredentials> {
        let credentials = hubspot::authenticate_response(input)?;
        let user_id = stored_user_id(&credentials);
        self.credentials.store(user_id, &credentials)?;
        info!(user_id = %user_id, "Stored HubSpot credentials");
        Ok(credentials)
    }

    /// Trade the stored refresh token for a new access token.
    pub async fn refresh_token(&self, user_id: &str) -> Result<OAuthCredentials> {
        let current = self.stored_credentials(user_id)?;
        let refreshed =
            refresh_access_token(&self.client, &self.config.client_id, user_id, &current).await?;
        self.credentials.store(user_id, &refreshed)?;
        info!(user_id = %user_id, "Refreshed HubSpot credentials");
        Ok(refreshed)
    }

    pub fn has_user_access_token(&self, user_id: &str) -> Result<bool> {
        Ok(self.credentials.get(user_id)?.is_some())
    }

    /// Drop the stored credentials. Returns whether any existed.
    pub fn forget_user(&self, user_id: &str) -> Result<bool> {
        self.credentials.delete(user_id)
    }

    fn stored_credentials(&self, user_id: &str) -> Result<OAuthCredentials> {
        self.credentials.get(user_id)?.ok_or_else(|| {
            HubSpotError::NoAccessToken(format!("no access token for user {}", user_id))
        })
    }

    /// Send one authenticated request and return the raw body.
    pub(crate) async fn send(
        &self,
        user_id: &str,
        method: Method,
        endpoint: Endpoint,
        body: Option<String>,
    ) -> Result<Option<String>> {
        let credentials = self.stored_credentials(user_id)?;
        let endpoint = endpoint.access_token(&credentials.access_token);
        debug!(user_id = %user_id, path = %endpoint.path(), "Dispatching HubSpot operation");
        self.client.call_raw(method, &endpoint, user_id, body).await
    }

    /// Send one authenticated request and decode the answer (`None` on 204).
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        user_id: &str,
        method: Method,
        endpoint: Endpoint,
        body: Option<String>,
    ) -> Result<Option<T>> {
        match self.send(user_id, method, endpoint, body).await? {
            Some(body) => classify::decode(&body).map(Some),
            None => Ok(None),
        }
    }

    /// Like [`fetch`](Self::fetch) for calls whose answer is not needed.
    pub(crate) async fn execute(
        &self,
        user_id: &str,
        method: Method,
        endpoint: Endpoint,
        body: Option<String>,
    ) -> Result<()> {
        self.send(user_id, method, endpoint, body).await?;
        Ok(())
    }
}

/// Percent-encode a value used as a path segment.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
