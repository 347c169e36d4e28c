//! HubSpot CRM connector.
//!
//! Wraps the `hubspot` client crate into a facade keyed by the caller's user
//! id: the OAuth flow stores credentials per user, and every resource
//! operation looks them up before issuing a single request.
//!
//! # Architecture
//!
//! ```text
//! authenticate(user_id) ──► authorization URL (user visits it)
//!          ↓
//! authenticate_response(redirect) ──► CredentialStore
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │       HubSpotConnector                   │
//! │  - contacts, lists, properties, email    │
//! │  - one request per operation             │
//! └─────────────────────────────────────────┘
//!          ↓
//!     HubSpot REST API (v1)
//! ```
//!
//! Operations that read a record return `Ok(None)` when HubSpot answers 204.
//! A 401 surfaces as [`HubSpotError::AccessTokenExpired`]; the caller decides
//! whether to call [`HubSpotConnector::refresh_token`] or re-authenticate.
//!
//! # Example
//!
//! ```no_run
//! use hubspot::config::HubSpotConfig;
//! use hubspot_connector::HubSpotConnector;
//!
//! # async fn run(config: HubSpotConfig) -> hubspot::Result<()> {
//! let connector = HubSpotConnector::in_memory(config);
//!
//! println!("visit {}", connector.authenticate("42"));
//! connector.authenticate_response("http://localhost/cb?userid=42&access_token=XYZ&expires_in=600")?;
//!
//! if let Some(stats) = connector.get_contact_statistics("42").await? {
//!     println!("{:?}", stats.contacts);
//! }
//! # Ok(())
//! # }
//! ```

mod connector;
mod contacts;
mod email;
mod lists;
mod properties;

pub use connector::{stored_user_id, HubSpotConnector, DEFAULT_USER_ID};

pub use hubspot::{HubSpotError, Result};
