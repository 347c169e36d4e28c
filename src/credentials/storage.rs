//! Encrypted credential storage using SQLite.

use super::{CredentialStore, OAuthCredentials, TokenCipher};
use crate::error::{HubSpotError, Result};
use anyhow::Context;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

/// Credential storage backed by SQLite, tokens encrypted at rest.
///
/// # Schema
/// ```sql
/// CREATE TABLE hubspot_credentials (
///     user_id TEXT PRIMARY KEY,
///     hubspot_user_id TEXT,             -- `userid` from the redirect
///     access_token TEXT NOT NULL,       -- Encrypted
///     access_token_nonce TEXT NOT NULL,
///     refresh_token TEXT,               -- Encrypted (optional)
///     refresh_token_nonce TEXT,
///     expires_in TEXT,                  -- Raw value from HubSpot
///     updated_at TEXT NOT NULL          -- ISO 8601 timestamp
/// );
/// ```
///
/// The connection is wrapped in a `Mutex`; every call holds it for one statement.
pub struct SqliteCredentialStore {
    conn: Mutex<Connection>,
    cipher: TokenCipher,
}

impl SqliteCredentialStore {
    /// Creates or opens a credential store.
    ///
    /// # Arguments
    /// * `db_path` - Path to SQLite database file (`:memory:` for tests)
    /// * `encryption_key` - Base64-encoded 32-byte master key
    pub fn new<P: AsRef<Path>>(db_path: P, encryption_key: &str) -> Result<Self> {
        Self::open(db_path.as_ref(), encryption_key).map_err(HubSpotError::Storage)
    }

    fn open(db_path: &Path, encryption_key: &str) -> anyhow::Result<Self> {
        let cipher =
            TokenCipher::from_base64_key(encryption_key).context("Invalid encryption key")?;

        let conn = Connection::open(db_path).context("Failed to open database")?;
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS hubspot_credentials (
                user_id TEXT PRIMARY KEY,
                hubspot_user_id TEXT,
                access_token TEXT NOT NULL,
                access_token_nonce TEXT NOT NULL,
                refresh_token TEXT,
                refresh_token_nonce TEXT,
                expires_in TEXT,
                updated_at TEXT NOT NULL
            )
            "#,
            [],
        )
        .context("Failed to create credentials table")?;

        Ok(Self {
            conn: Mutex::new(conn),
            cipher,
        })
    }

    fn upsert(&self, user_id: &str, credentials: &OAuthCredentials) -> anyhow::Result<()> {
        let (access_token, access_token_nonce) = self
            .cipher
            .seal(&credentials.access_token)
            .context("Failed to encrypt access token")?;

        let (refresh_token, refresh_token_nonce) = match &credentials.refresh_token {
            Some(token) => {
                let (sealed, nonce) = self
                    .cipher
                    .seal(token)
                    .context("Failed to encrypt refresh token")?;
                (Some(sealed), Some(nonce))
            }
            None => (None, None),
        };

        self.conn
            .lock()
            .unwrap()
            .execute(
                r#"
                INSERT INTO hubspot_credentials (
                    user_id, hubspot_user_id,
                    access_token, access_token_nonce,
                    refresh_token, refresh_token_nonce,
                    expires_in, updated_at
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                ON CONFLICT(user_id) DO UPDATE SET
                    hubspot_user_id = excluded.hubspot_user_id,
                    access_token = excluded.access_token,
                    access_token_nonce = excluded.access_token_nonce,
                    refresh_token = excluded.refresh_token,
                    refresh_token_nonce = excluded.refresh_token_nonce,
                    expires_in = excluded.expires_in,
                    updated_at = excluded.updated_at
                "#,
                params![
                    user_id,
                    credentials.user_id,
                    access_token,
                    access_token_nonce,
                    refresh_token,
                    refresh_token_nonce,
                    credentials.expires_at,
                    Utc::now().to_rfc3339(),
                ],
            )
            .context("Failed to store credentials")?;

        Ok(())
    }

    fn select(&self, user_id: &str) -> anyhow::Result<Option<OAuthCredentials>> {
        type Row = (
            Option<String>,
            String,
            String,
            Option<String>,
            Option<String>,
            Option<String>,
        );

        let row: Option<Row> = self
            .conn
            .lock()
            .unwrap()
            .query_row(
                r#"
                SELECT hubspot_user_id,
                       access_token, access_token_nonce,
                       refresh_token, refresh_token_nonce,
                       expires_in
                FROM hubspot_credentials
                WHERE user_id = ?1
                "#,
                params![user_id],
                |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                        row.get(5)?,
                    ))
                },
            )
            .optional()
            .context("Failed to query credentials")?;

        let Some((hubspot_user_id, access, access_nonce, refresh, refresh_nonce, expires_in)) = row
        else {
            return Ok(None);
        };

        let access_token = self
            .cipher
            .open(&access, &access_nonce)
            .context("Failed to decrypt access token")?;

        let refresh_token = match (refresh, refresh_nonce) {
            (Some(sealed), Some(nonce)) => Some(
                self.cipher
                    .open(&sealed, &nonce)
                    .context("Failed to decrypt refresh token")?,
            ),
            _ => None,
        };

        Ok(Some(OAuthCredentials {
            user_id: hubspot_user_id,
            access_token,
            refresh_token,
            expires_at: expires_in,
        }))
    }

    fn remove(&self, user_id: &str) -> anyhow::Result<bool> {
        let rows_affected = self
            .conn
            .lock()
            .unwrap()
            .execute(
                "DELETE FROM hubspot_credentials WHERE user_id = ?1",
                params![user_id],
            )
            .context("Failed to delete credentials")?;

        Ok(rows_affected > 0)
    }

    fn users(&self) -> anyhow::Result<Vec<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare("SELECT user_id FROM hubspot_credentials ORDER BY user_id")
            .context("Failed to prepare query")?;

        let users = stmt
            .query_map([], |row| row.get(0))
            .context("Failed to execute query")?
            .collect::<std::result::Result<Vec<String>, _>>()
            .context("Failed to read results")?;

        Ok(users)
    }
}

impl CredentialStore for SqliteCredentialStore {
    fn store(&self, user_id: &str, credentials: &OAuthCredentials) -> Result<()> {
        self.upsert(user_id, credentials)
            .map_err(HubSpotError::Storage)
    }

    fn get(&self, user_id: &str) -> Result<Option<OAuthCredentials>> {
        self.select(user_id).map_err(HubSpotError::Storage)
    }

    fn delete(&self, user_id: &str) -> Result<bool> {
        self.remove(user_id).map_err(HubSpotError::Storage)
    }

    fn list_users(&self) -> Result<Vec<String>> {
        self.users().map_err(HubSpotError::Storage)
    }
}
