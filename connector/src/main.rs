use anyhow::{Context, Result};
use hubspot::config::{load_config, HubSpotConfig};
use hubspot::credentials::{CredentialStore, MemoryCredentialStore, SqliteCredentialStore};
use hubspot_connector::{stored_user_id, HubSpotConnector};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hubspot_connector=info,hubspot=info".into()),
        )
        .init();

    info!("HubSpot connector starting...");

    // Read configuration from a TOML file or the environment
    let config = match std::env::var("HUBSPOT_CONFIG") {
        Ok(path) => load_config(&path)?,
        Err(_) => HubSpotConfig::from_env()?,
    };

    let mut user_id = std::env::var("HUBSPOT_USER_ID").unwrap_or_else(|_| "1".to_string());

    info!(
        hub_id = %config.hub_id,
        api_base_url = %config.api_base_url,
        user_id = %user_id,
        "Configuration loaded"
    );

    let credential_store: Arc<dyn CredentialStore> = match &config.storage.credentials_db {
        Some(db) => {
            let encryption_key = std::env::var("HUBSPOT_ENCRYPTION_KEY")
                .context("HUBSPOT_ENCRYPTION_KEY is required (base64-encoded 32-byte key)")?;
            let store = SqliteCredentialStore::new(db, &encryption_key)
                .context("Failed to initialize credential store")?;
            info!(credentials_db = %db, "Credential store initialized");
            Arc::new(store)
        }
        None => Arc::new(MemoryCredentialStore::new()),
    };

    let connector = HubSpotConnector::new(config, credential_store);

    if !connector.has_user_access_token(&user_id)? {
        match std::env::var("HUBSPOT_AUTH_RESULT") {
            Ok(redirect) => {
                let credentials = connector
                    .authenticate_response(&redirect)
                    .context("Failed to read the authentication result")?;
                // The redirect decides which user the credentials belong to.
                user_id = stored_user_id(&credentials).to_string();
            }
            Err(_) => {
                println!(
                    "Authorize the application, then rerun with HUBSPOT_AUTH_RESULT set to the redirect URL:\n{}",
                    connector.authenticate(&user_id)
                );
                return Ok(());
            }
        }
    }

    let statistics = match connector.get_contact_statistics(&user_id).await {
        Ok(statistics) => statistics,
        Err(e) if e.is_token_expired() => {
            warn!(user_id = %user_id, "Access token expired, refreshing");
            connector
                .refresh_token(&user_id)
                .await
                .context("Failed to refresh the access token")?;
            connector.get_contact_statistics(&user_id).await?
        }
        Err(e) => return Err(e.into()),
    };

    match statistics {
        Some(statistics) => println!("{}", serde_json::to_string_pretty(&statistics)?),
        None => println!("HubSpot returned no contact statistics"),
    }
    info!("HubSpot connector finished");

    Ok(())
}
