//! HubSpot OAuth 2.0 flow.
//!
//! 1. [`provider::OAuthProviderConfig::build_auth_url`] produces the URL the
//!    user opens to grant access
//! 2. HubSpot redirects back with `access_token=..&refresh_token=..&expires_in=..&userid=..`
//! 3. [`authenticate_response`] turns that string into [`OAuthCredentials`]
//! 4. When the token expires, [`refresh::refresh_access_token`] trades the
//!    refresh token for a new one

pub mod provider;
pub mod refresh;

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, error};

use crate::credentials::OAuthCredentials;
use crate::error::{HubSpotError, Result};

static PATTERN_ERROR: LazyLock<Regex> = LazyLock::new(|| param_pattern("error"));
static PATTERN_USERID: LazyLock<Regex> = LazyLock::new(|| param_pattern("userid"));
static PATTERN_ACCESS_TOKEN: LazyLock<Regex> = LazyLock::new(|| param_pattern("access_token"));
static PATTERN_EXPIRES_IN: LazyLock<Regex> = LazyLock::new(|| param_pattern("expires_in"));
static PATTERN_REFRESH_TOKEN: LazyLock<Regex> = LazyLock::new(|| param_pattern("refresh_token"));

/// `name=` followed by everything up to the next `&` (or the end).
fn param_pattern(name: &str) -> Regex {
    Regex::new(&format!("{name}=([^&]+)&?")).expect("parameter pattern is valid")
}

fn capture(pattern: &Regex, input: &str) -> Option<String> {
    pattern
        .captures(input)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Parse the URL-encoded string HubSpot sends back after authorization.
///
/// An `error` parameter wins over everything else. Without one, `userid`,
/// `access_token`, `expires_in` and `refresh_token` are picked up when
/// present; only the access token is mandatory.
pub fn authenticate_response(input: &str) -> Result<OAuthCredentials> {
    if input.is_empty() {
        return Err(HubSpotError::Configuration(
            "The parameter inputRequest can not be empty".to_string(),
        ));
    }

    if let Some(description) = capture(&PATTERN_ERROR, input) {
        return Err(if description == "invalid_scope" {
            HubSpotError::InvalidScope
        } else {
            HubSpotError::Service(description)
        });
    }

    let user_id = capture(&PATTERN_USERID, input);
    let access_token = capture(&PATTERN_ACCESS_TOKEN, input);
    let expires_at = capture(&PATTERN_EXPIRES_IN, input);
    let refresh_token = capture(&PATTERN_REFRESH_TOKEN, input);

    let Some(access_token) = access_token else {
        error!("Cannot find the access_token in the response: {}", input);
        return Err(HubSpotError::NoAccessToken(format!(
            "The response of the authentication process does not have an access token. Url:{}",
            input
        )));
    };

    debug!(user_id = ?user_id, "Received credentials for user");

    Ok(OAuthCredentials {
        user_id,
        access_token,
        refresh_token,
        expires_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_full_response() {
        let creds = authenticate_response(
            "http://localhost:8080/callback?access_token=XYZ&refresh_token=R1&expires_in=21600&userid=7",
        )
        .unwrap();

        assert_eq!(creds.access_token, "XYZ");
        assert_eq!(creds.refresh_token.as_deref(), Some("R1"));
        assert_eq!(creds.expires_at.as_deref(), Some("21600"));
        assert_eq!(creds.user_id.as_deref(), Some("7"));
    }

    #[test]
    fn test_missing_optional_fields_stay_unset() {
        let creds = authenticate_response("access_token=XYZ&userid=1&expires_in=600").unwrap();

        assert_eq!(creds.access_token, "XYZ");
        assert_eq!(creds.user_id.as_deref(), Some("1"));
        assert_eq!(creds.expires_at.as_deref(), Some("600"));
        assert!(creds.refresh_token.is_none());
    }

    #[test]
    fn test_field_order_does_not_matter() {
        let creds = authenticate_response("expires_in=600&userid=1&access_token=XYZ").unwrap();
        assert_eq!(creds.access_token, "XYZ");
        assert_eq!(creds.user_id.as_deref(), Some("1"));
    }

    #[test]
    fn test_empty_input() {
        let err = authenticate_response("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("can not be empty"));
    }

    #[test]
    fn test_invalid_scope_wins() {
        let err =
            authenticate_response("access_token=XYZ&error=invalid_scope&userid=1").unwrap_err();
        assert!(matches!(err, HubSpotError::InvalidScope));
        assert!(err.to_string().contains("scope"));
    }

    #[test]
    fn test_other_service_error() {
        let err = authenticate_response("error=access_denied&access_token=XYZ").unwrap_err();
        match err {
            HubSpotError::Service(description) => assert_eq!(description, "access_denied"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_access_token() {
        let input = "userid=1&expires_in=600&refresh_token=R";
        let err = authenticate_response(input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoAccessToken);
        assert!(err.to_string().contains(input));
    }

    #[test]
    fn test_empty_access_token_value_is_missing() {
        let err = authenticate_response("access_token=&userid=1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoAccessToken);
    }

    #[test]
    fn test_values_are_not_decoded() {
        let creds = authenticate_response("access_token=a%2Bb").unwrap();
        assert_eq!(creds.access_token, "a%2Bb");
    }
}
