// Error taxonomy
pub mod error;

// OAuth redirect parsing, authorization URL, token refresh
pub mod oauth;

// HTTP dispatch and response classification
pub mod client;

// CRM data types
pub mod model;

// Credential stores
pub mod credentials;

// Connector configuration
pub mod config;

pub use client::{Endpoint, HubSpotClient, Method};
pub use credentials::{CredentialStore, OAuthCredentials};
pub use error::{ErrorKind, HubSpotError, Result};
pub use oauth::authenticate_response;
