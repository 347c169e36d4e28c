//! Classification of HubSpot responses.
//!
//! - 204 → success with no result
//! - other 2xx → success with the body
//! - 401 → access token expired for the user
//! - anything else → generic API error carrying the status and body text

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{HubSpotError, Result};

/// What a status code means for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Content,
    NoContent,
    Failure,
}

pub fn outcome(status: StatusCode) -> Outcome {
    if status == StatusCode::NO_CONTENT {
        Outcome::NoContent
    } else if status.is_success() {
        Outcome::Content
    } else {
        Outcome::Failure
    }
}

/// Map a failed status into the error the caller sees.
pub fn failure(status: StatusCode, user_id: &str, message: String) -> HubSpotError {
    if status == StatusCode::UNAUTHORIZED {
        tracing::warn!(user_id = %user_id, "HubSpot rejected the access token");
        HubSpotError::AccessTokenExpired {
            user_id: user_id.to_string(),
        }
    } else {
        tracing::debug!(status = status.as_u16(), "HubSpot call failed");
        HubSpotError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

/// Consume a response and return its body, `None` for 204.
///
/// On failure the body is read best-effort: if that read fails too, the
/// message is empty and the status error is still reported.
pub async fn read_body(response: Response, user_id: &str) -> Result<Option<String>> {
    let status = response.status();
    match outcome(status) {
        Outcome::NoContent => Ok(None),
        Outcome::Content => Ok(Some(response.text().await?)),
        Outcome::Failure => {
            let message = response.text().await.unwrap_or_default();
            Err(failure(status, user_id, message))
        }
    }
}

/// Decode a JSON payload into `T`, splitting syntax from shape errors.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(HubSpotError::from_json_decode)
}

/// Encode a request payload.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(HubSpotError::Serialize)
}
