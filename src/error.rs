//! Error taxonomy for the HubSpot connector.
//!
//! Every failure surfaces as a [`HubSpotError`]. Callers that only care about
//! the broad outcome (re-authenticate, fix configuration, report) can match on
//! [`HubSpotError::kind`] instead of individual variants.

use thiserror::Error;

/// Broad categories of connector failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Empty or invalid input supplied by the caller or configuration.
    Configuration,
    /// The authentication response (or the credential store) has no access token.
    NoAccessToken,
    /// HubSpot answered 401; the user must re-authenticate.
    AccessTokenExpired,
    /// Any other HTTP, JSON, or storage failure.
    Connector,
}

/// Errors raised by the HubSpot connector.
#[derive(Debug, Error)]
pub enum HubSpotError {
    #[error("{0}")]
    Configuration(String),

    #[error("The configuration is requesting a scope that the service application does not have available.")]
    InvalidScope,

    #[error("{0}")]
    NoAccessToken(String),

    #[error("The access token for the userId {user_id} has expired")]
    AccessTokenExpired { user_id: String },

    #[error("The service has responded with an error message: {0}")]
    Service(String),

    #[error("ERROR - statusCode: {status} - message: {message}")]
    Api { status: u16, message: String },

    #[error("ERROR - Error Parsing the JSON")]
    Parse(#[source] serde_json::Error),

    #[error("ERROR - Error Mapping the JSON")]
    Mapping(#[source] serde_json::Error),

    #[error("Cannot generate the Json from object")]
    Serialize(#[source] serde_json::Error),

    #[error("HTTP request to HubSpot failed")]
    Http(#[from] reqwest::Error),

    #[error("Credential storage failed: {0:#}")]
    Storage(anyhow::Error),
}

impl HubSpotError {
    /// Get the broad category for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) | Self::InvalidScope => ErrorKind::Configuration,
            Self::NoAccessToken(_) => ErrorKind::NoAccessToken,
            Self::AccessTokenExpired { .. } => ErrorKind::AccessTokenExpired,
            Self::Service(_)
            | Self::Api { .. }
            | Self::Parse(_)
            | Self::Mapping(_)
            | Self::Serialize(_)
            | Self::Http(_)
            | Self::Storage(_) => ErrorKind::Connector,
        }
    }

    /// True when the caller should run the authentication flow again.
    pub fn is_token_expired(&self) -> bool {
        self.kind() == ErrorKind::AccessTokenExpired
    }

    /// Classify a JSON decoding failure.
    ///
    /// Syntax and truncation errors mean the payload is not JSON at all;
    /// data errors mean it is JSON of an unexpected shape.
    pub fn from_json_decode(err: serde_json::Error) -> Self {
        use serde_json::error::Category;
        match err.classify() {
            Category::Data => Self::Mapping(err),
            Category::Syntax | Category::Eof | Category::Io => Self::Parse(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, HubSpotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            HubSpotError::Configuration("empty".to_string()).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(HubSpotError::InvalidScope.kind(), ErrorKind::Configuration);
        assert_eq!(
            HubSpotError::NoAccessToken("x".to_string()).kind(),
            ErrorKind::NoAccessToken
        );
        assert_eq!(
            HubSpotError::Api {
                status: 500,
                message: String::new()
            }
            .kind(),
            ErrorKind::Connector
        );
    }

    #[test]
    fn test_token_expired_message() {
        let err = HubSpotError::AccessTokenExpired {
            user_id: "42".to_string(),
        };
        assert!(err.is_token_expired());
        assert_eq!(err.to_string(), "The access token for the userId 42 has expired");
    }

    #[test]
    fn test_api_error_message() {
        let err = HubSpotError::Api {
            status: 404,
            message: "not found".to_string(),
        };
        assert_eq!(err.to_string(), "ERROR - statusCode: 404 - message: not found");
        assert!(!err.is_token_expired());
    }

    #[test]
    fn test_json_decode_classification() {
        let syntax = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert!(matches!(
            HubSpotError::from_json_decode(syntax),
            HubSpotError::Parse(_)
        ));

        let truncated = serde_json::from_str::<serde_json::Value>("{\"a\": ").unwrap_err();
        assert!(matches!(
            HubSpotError::from_json_decode(truncated),
            HubSpotError::Parse(_)
        ));

        let shape = serde_json::from_str::<Vec<u64>>("{\"a\": 1}").unwrap_err();
        assert!(matches!(
            HubSpotError::from_json_decode(shape),
            HubSpotError::Mapping(_)
        ));
    }
}
