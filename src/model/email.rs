//! Email subscription types.

use serde::{Deserialize, Serialize};

/// A subscription type defined in the portal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailSubscriptionDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portal_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal: Option<bool>,
}

/// Subscription types of a portal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailSubscription {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subscription_definitions: Vec<EmailSubscriptionDefinition>,
}

/// Opt-in state of one address for one subscription type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailSubscriptionStatusEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscribed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opt_state: Option<String>,
}

/// Subscription status of an email address.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailSubscriptionStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscribed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marked_as_spam: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounced: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subscription_statuses: Vec<EmailSubscriptionStatusEntry>,
}

/// Body of an unsubscribe-from-everything request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailUnsubscribeAll {
    pub unsubscribe_from_all: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_definitions() {
        let subscriptions: EmailSubscription = serde_json::from_str(
            r#"{"subscriptionDefinitions": [
                {"active": true, "portalId": 237093, "description": "Newsletter", "id": 7, "name": "Blog", "internal": false},
                {"active": false, "id": 8, "name": "Promotions"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(subscriptions.subscription_definitions.len(), 2);
        assert_eq!(subscriptions.subscription_definitions[0].name.as_deref(), Some("Blog"));
        assert_eq!(subscriptions.subscription_definitions[1].active, Some(false));
    }

    #[test]
    fn test_status() {
        let status: EmailSubscriptionStatus = serde_json::from_str(
            r#"{"subscribed": true, "markedAsSpam": false, "bounced": false, "status": "subscribed",
                "subscriptionStatuses": [{"id": 7, "subscribed": true, "optState": "OPT_IN"}]}"#,
        )
        .unwrap();
        assert_eq!(status.subscribed, Some(true));
        assert_eq!(status.subscription_statuses[0].opt_state.as_deref(), Some("OPT_IN"));
    }

    #[test]
    fn test_unsubscribe_body() {
        let body = serde_json::to_string(&EmailUnsubscribeAll {
            unsubscribe_from_all: true,
        })
        .unwrap();
        assert_eq!(body, r#"{"unsubscribeFromAll":true}"#);
    }
}
