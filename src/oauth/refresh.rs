//! OAuth token refresh.
//!
//! Trades a refresh token for a new access token with a form-encoded POST.

use serde::{Deserialize, Serialize};

use super::provider::REFRESH_PATH;
use crate::client::{Endpoint, HubSpotClient, Method};
use crate::credentials::OAuthCredentials;
use crate::error::{HubSpotError, Result};

/// OAuth refresh request (form fields)
#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
    client_id: &'a str,
    grant_type: &'static str,
}

/// HubSpot refresh response
#[derive(Deserialize, Debug)]
struct RefreshResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    portal_id: Option<u64>,
}

/// Exchange the refresh token in `credentials` for a new access token.
///
/// # Returns
/// * `Ok(OAuthCredentials)` - new snapshot; user id is carried over and the
///   old refresh token is kept if HubSpot does not rotate it
/// * `Err(NoAccessToken)` - no refresh token to trade, or HubSpot answered
///   without a token
/// * `Err` - any HTTP or JSON failure
pub async fn refresh_access_token(
    client: &HubSpotClient,
    client_id: &str,
    user_id: &str,
    credentials: &OAuthCredentials,
) -> Result<OAuthCredentials> {
    let refresh_token = credentials.refresh_token.as_deref().ok_or_else(|| {
        HubSpotError::NoAccessToken(format!(
            "There is no refresh token stored for the user {}",
            user_id
        ))
    })?;

    let form = serde_urlencoded::to_string(RefreshRequest {
        refresh_token,
        client_id,
        grant_type: "refresh_token",
    })
    .map_err(|e| HubSpotError::Configuration(format!("Cannot encode refresh request: {}", e)))?;

    tracing::debug!(user_id = %user_id, "Refreshing HubSpot access token");

    let response: RefreshResponse = client
        .call_json(Method::Refresh, &Endpoint::new(REFRESH_PATH), user_id, Some(form))
        .await?
        .ok_or_else(|| {
            HubSpotError::NoAccessToken(format!(
                "The refresh response for the user {} does not have an access token",
                user_id
            ))
        })?;

    tracing::debug!(
        user_id = %user_id,
        portal_id = ?response.portal_id,
        rotated_refresh_token = response.refresh_token.is_some(),
        "Token refresh successful"
    );

    Ok(OAuthCredentials {
        user_id: credentials.user_id.clone(),
        access_token: response.access_token,
        refresh_token: response
            .refresh_token
            .or_else(|| credentials.refresh_token.clone()),
        expires_at: response.expires_in.map(|seconds| seconds.to_string()),
    })
}
