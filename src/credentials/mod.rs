//! OAuth credentials and the stores that keep them between calls.
//!
//! The connector never owns persistence: whoever embeds it hands over a
//! [`CredentialStore`]. Two implementations ship with the crate:
//!
//! - [`MemoryCredentialStore`] - process-local map, lost on restart
//! - [`SqliteCredentialStore`] - SQLite file with tokens encrypted by AES-256-GCM
//!
//! # Usage
//!
//! ```no_run
//! use hubspot::credentials::{CredentialStore, OAuthCredentials, SqliteCredentialStore};
//!
//! # fn main() -> hubspot::Result<()> {
//! let encryption_key = std::env::var("HUBSPOT_ENCRYPTION_KEY").unwrap_or_default();
//! let store = SqliteCredentialStore::new("credentials.db", &encryption_key)?;
//!
//! let creds = OAuthCredentials {
//!     user_id: Some("1".to_string()),
//!     access_token: "access".to_string(),
//!     refresh_token: Some("refresh".to_string()),
//!     expires_at: Some("21600".to_string()),
//! };
//! store.store("1", &creds)?;
//!
//! if let Some(creds) = store.get("1")? {
//!     println!("Expires in: {:?}", creds.expires_at);
//! }
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::Result;

mod encryption;
mod storage;

pub use encryption::TokenCipher;
pub use storage::SqliteCredentialStore;

/// Credentials obtained from the HubSpot OAuth redirect.
///
/// An immutable snapshot: a new authentication or refresh cycle produces a
/// fresh value that replaces this one in the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthCredentials {
    /// HubSpot user the tokens were issued for (`userid` in the redirect)
    pub user_id: Option<String>,

    /// OAuth access token, never empty
    pub access_token: String,

    /// OAuth refresh token (used to obtain new access tokens)
    pub refresh_token: Option<String>,

    /// Raw `expires_in` value as HubSpot sent it (seconds)
    pub expires_at: Option<String>,
}

/// Pluggable storage for credentials, keyed by the caller's user id.
pub trait CredentialStore: Send + Sync {
    /// Stores credentials for a user, replacing any previous entry.
    fn store(&self, user_id: &str, credentials: &OAuthCredentials) -> Result<()>;

    /// Retrieves credentials for a user, `None` when never stored.
    fn get(&self, user_id: &str) -> Result<Option<OAuthCredentials>>;

    /// Deletes credentials for a user. Returns whether anything was removed.
    fn delete(&self, user_id: &str) -> Result<bool>;

    /// Lists every user id with stored credentials, sorted.
    fn list_users(&self) -> Result<Vec<String>>;
}

/// In-memory credential store.
#[derive(Default)]
pub struct MemoryCredentialStore {
    entries: Mutex<HashMap<String, OAuthCredentials>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn store(&self, user_id: &str, credentials: &OAuthCredentials) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(user_id.to_string(), credentials.clone());
        Ok(())
    }

    fn get(&self, user_id: &str) -> Result<Option<OAuthCredentials>> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.get(user_id).cloned())
    }

    fn delete(&self, user_id: &str) -> Result<bool> {
        let mut entries = self.entries.lock().unwrap();
        Ok(entries.remove(user_id).is_some())
    }

    fn list_users(&self) -> Result<Vec<String>> {
        let entries = self.entries.lock().unwrap();
        let mut users: Vec<String> = entries.keys().cloned().collect();
        users.sort();
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(token: &str) -> OAuthCredentials {
        OAuthCredentials {
            user_id: Some("1".to_string()),
            access_token: token.to_string(),
            refresh_token: None,
            expires_at: Some("600".to_string()),
        }
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryCredentialStore::new();
        store.store("1", &creds("abc")).unwrap();

        let retrieved = store.get("1").unwrap().unwrap();
        assert_eq!(retrieved, creds("abc"));
        assert!(store.get("2").unwrap().is_none());
    }

    #[test]
    fn test_memory_store_replaces() {
        let store = MemoryCredentialStore::new();
        store.store("1", &creds("old")).unwrap();
        store.store("1", &creds("new")).unwrap();

        assert_eq!(store.get("1").unwrap().unwrap().access_token, "new");
        assert_eq!(store.list_users().unwrap(), vec!["1".to_string()]);
    }

    #[test]
    fn test_memory_store_delete_and_list() {
        let store = MemoryCredentialStore::new();
        store.store("b", &creds("x")).unwrap();
        store.store("a", &creds("y")).unwrap();
        assert_eq!(store.list_users().unwrap(), vec!["a", "b"]);

        assert!(store.delete("a").unwrap());
        assert!(!store.delete("a").unwrap());
        assert_eq!(store.list_users().unwrap(), vec!["b"]);
    }

    #[test]
    fn test_credentials_serde_roundtrip() {
        let original = OAuthCredentials {
            user_id: Some("7".to_string()),
            access_token: "tok".to_string(),
            refresh_token: Some("ref".to_string()),
            expires_at: None,
        };
        let json = serde_json::to_string(&original).unwrap();
        let decoded: OAuthCredentials = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, original);
    }
}
