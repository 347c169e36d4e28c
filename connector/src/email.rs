use hubspot::client::classify;
use hubspot::model::email::EmailUnsubscribeAll;
use hubspot::model::{EmailSubscription, EmailSubscriptionStatus};
use hubspot::{Endpoint, Method, Result};

use crate::connector::{segment, HubSpotConnector};

impl HubSpotConnector {
    /// Subscription types of a portal, the configured hub when `hub_id` is `None`.
    pub async fn get_email_subscriptions(
        &self,
        user_id: &str,
        hub_id: Option<&str>,
    ) -> Result<Option<EmailSubscription>> {
        let portal_id = hub_id.unwrap_or(&self.config().hub_id);
        let endpoint = Endpoint::new("/email/public/v1/subscriptions").query("portalId", portal_id);
        self.fetch(user_id, Method::Get, endpoint, None).await
    }

    pub async fn get_email_subscription_status(
        &self,
        user_id: &str,
        email: &str,
    ) -> Result<Option<EmailSubscriptionStatus>> {
        self.fetch(
            user_id,
            Method::Get,
            Endpoint::new(format!("/email/public/v1/subscriptions/{}", segment(email))),
            None,
        )
        .await
    }

    /// Opt an address out of every subscription type.
    pub async fn unsubscribe_from_all(&self, user_id: &str, email: &str) -> Result<()> {
        let body = classify::encode(&EmailUnsubscribeAll {
            unsubscribe_from_all: true,
        })?;
        self.execute(
            user_id,
            Method::Put,
            Endpoint::new(format!("/email/public/v1/subscriptions/{}", segment(email))),
            Some(body),
        )
        .await
    }
}
