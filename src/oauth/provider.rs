//! HubSpot OAuth provider configuration.

use serde::{Deserialize, Serialize};

/// HubSpot authorization endpoint.
pub const AUTH_URL: &str = "https://app.hubspot.com/auth/authenticate";

/// Token refresh path, relative to the API base URL.
pub const REFRESH_PATH: &str = "/auth/v1/refresh";

/// OAuth provider configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OAuthProviderConfig {
    /// OAuth authorization endpoint URL
    pub auth_url: String,

    /// Client ID of the HubSpot application
    pub client_id: String,

    /// Portal (hub) the application is installed in
    pub hub_id: String,

    /// Requested scopes (e.g. `contacts-rw`, `offline`)
    pub scopes: Vec<String>,

    /// Where HubSpot redirects after the user grants access
    pub callback_url: String,
}

impl OAuthProviderConfig {
    /// Build the authorization URL for a user.
    ///
    /// The user id rides on the callback URL so that the redirect echoes it
    /// back as `userid`.
    pub fn build_auth_url(&self, user_id: &str) -> String {
        let separator = if self.callback_url.contains('?') { '&' } else { '?' };
        let redirect_uri = format!(
            "{}{}userid={}",
            self.callback_url,
            separator,
            urlencoding::encode(user_id)
        );
        let scopes = self.scopes.join(" ");
        format!(
            "{}?client_id={}&portalId={}&redirect_uri={}&scope={}",
            self.auth_url,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.hub_id),
            urlencoding::encode(&redirect_uri),
            urlencoding::encode(&scopes)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(callback_url: &str) -> OAuthProviderConfig {
        OAuthProviderConfig {
            auth_url: AUTH_URL.to_string(),
            client_id: "client-123".to_string(),
            hub_id: "237093".to_string(),
            scopes: vec!["contacts-rw".to_string(), "offline".to_string()],
            callback_url: callback_url.to_string(),
        }
    }

    #[test]
    fn test_build_auth_url() {
        let url = config("http://localhost:8080/callback").build_auth_url("1");

        assert!(url.starts_with("https://app.hubspot.com/auth/authenticate?"));
        assert!(url.contains("client_id=client-123"));
        assert!(url.contains("portalId=237093"));
        assert!(url.contains(
            "redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Fcallback%3Fuserid%3D1"
        ));
        assert!(url.contains("scope=contacts-rw%20offline"));
    }

    #[test]
    fn test_callback_with_existing_query() {
        let url = config("http://localhost/cb?app=crm").build_auth_url("u 1");
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%2Fcb%3Fapp%3Dcrm%26userid%3Du%25201"));
    }
}
