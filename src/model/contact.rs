//! Contacts and the wrappers the contacts API returns them in.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::error::{HubSpotError, Result};

/// Lifecycle stage of a contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactPropertiesLifecycleStage {
    Subscriber,
    Lead,
    MarketingQualifiedLead,
    SalesQualifiedLead,
    Opportunity,
    Customer,
    Evangelist,
    Other,
}

/// Employee-count bucket of a contact's company.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactPropertiesNumberOfEmployees {
    #[serde(rename = "1-5")]
    From1To5,
    #[serde(rename = "5-25")]
    From5To25,
    #[serde(rename = "25-50")]
    From25To50,
    #[serde(rename = "50-100")]
    From50To100,
    #[serde(rename = "100-500")]
    From100To500,
    #[serde(rename = "500-1000")]
    From500To1000,
    #[serde(rename = "1000+")]
    Over1000,
}

/// Named property values of a contact.
///
/// Well-known properties get their own field; anything else (including
/// custom properties created through the properties API) lands in `custom`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitterhandle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numemployees: Option<ContactPropertiesNumberOfEmployees>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifecyclestage: Option<ContactPropertiesLifecycleStage>,
    /// Other properties by name. Keys naming a dedicated field above are
    /// ignored by [`to_update`](Self::to_update).
    #[serde(flatten)]
    pub custom: BTreeMap<String, String>,
}

/// Properties with a dedicated field in [`ContactProperties`].
const NAMED_PROPERTIES: &[&str] = &[
    "email",
    "firstname",
    "lastname",
    "website",
    "company",
    "phone",
    "address",
    "city",
    "state",
    "zip",
    "jobtitle",
    "twitterhandle",
    "message",
    "numemployees",
    "lifecyclestage",
];

/// One `{"property": .., "value": ..}` entry of a contact write.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPropertyValue {
    pub property: String,
    pub value: String,
}

/// Body of a create/update contact request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPropertiesUpdate {
    pub properties: Vec<ContactPropertyValue>,
}

impl ContactProperties {
    /// Flatten into the list form HubSpot expects on writes.
    pub fn to_update(&self) -> Result<ContactPropertiesUpdate> {
        let named = Self {
            custom: BTreeMap::new(),
            ..self.clone()
        };
        let value = serde_json::to_value(&named).map_err(HubSpotError::Serialize)?;
        let mut properties: Vec<ContactPropertyValue> = match value {
            Value::Object(map) => map
                .into_iter()
                .filter_map(|(property, value)| match value {
                    Value::String(value) => Some(ContactPropertyValue { property, value }),
                    Value::Null => None,
                    other => Some(ContactPropertyValue {
                        property,
                        value: other.to_string(),
                    }),
                })
                .collect(),
            _ => Vec::new(),
        };
        properties.extend(
            self.custom
                .iter()
                .filter(|(property, _)| !NAMED_PROPERTIES.contains(&property.as_str()))
                .map(|(property, value)| ContactPropertyValue {
                    property: property.clone(),
                    value: value.clone(),
                }),
        );
        Ok(ContactPropertiesUpdate { properties })
    }
}

/// A version entry in a contact property's history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ContactPropertyVersion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

/// A property value as returned on reads.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPropertyProfileValue {
    pub value: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub versions: Vec<ContactPropertyVersion>,
}

/// A HubSpot contact record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vid: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_vid: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portal_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_contact: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, ContactPropertyProfileValue>,
}

impl Contact {
    /// Current values of the contact's properties.
    ///
    /// Fails with a mapping error when a well-known property holds a value
    /// outside its enumeration.
    pub fn contact_properties(&self) -> Result<ContactProperties> {
        let values: Map<String, Value> = self
            .properties
            .iter()
            .map(|(name, v)| (name.clone(), Value::String(v.value.clone())))
            .collect();
        serde_json::from_value(Value::Object(values)).map_err(HubSpotError::from_json_decode)
    }
}

/// Page of contacts from the "all" and "recent" listings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ContactList {
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vid_offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_offset: Option<i64>,
}

/// Result of a full-text contact search.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ContactQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

/// Portal-wide contact counters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactStatistics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacts: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_new_contact_at: Option<i64>,
}

/// Response to a contact deletion.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDeleted {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vid: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE: &str = r#"{
        "vid": 61574,
        "canonical-vid": 61574,
        "portal-id": 237093,
        "is-contact": true,
        "profile-token": "AO_T-mN",
        "profile-url": "https://app.hubspot.com/contacts/237093/lists/public/contact/_AO_T-mN/",
        "properties": {
            "firstname": {"value": "theFirstName", "versions": [{"value": "theFirstName", "source-type": "API", "timestamp": 1357000000000}]},
            "lastname": {"value": "theLastName"},
            "numemployees": {"value": "25-50"},
            "lifecyclestage": {"value": "lead"},
            "city": {"value": "beautifulCity"},
            "favorite_color": {"value": "teal"}
        },
        "form-submissions": [],
        "identity-profiles": []
    }"#;

    #[test]
    fn test_contact_profile_deserialization() {
        let contact: Contact = serde_json::from_str(PROFILE).unwrap();
        assert_eq!(contact.vid, Some(61574));
        assert_eq!(contact.portal_id, Some(237093));
        assert_eq!(contact.is_contact, Some(true));

        let props = contact.contact_properties().unwrap();
        assert_eq!(props.firstname.as_deref(), Some("theFirstName"));
        assert_eq!(props.lastname.as_deref(), Some("theLastName"));
        assert_eq!(
            props.numemployees,
            Some(ContactPropertiesNumberOfEmployees::From25To50)
        );
        assert_eq!(
            props.lifecyclestage,
            Some(ContactPropertiesLifecycleStage::Lead)
        );
        assert_eq!(props.city.as_deref(), Some("beautifulCity"));
        assert_eq!(props.custom.get("favorite_color").map(String::as_str), Some("teal"));
        assert!(props.email.is_none());
    }

    #[test]
    fn test_unknown_enum_value_is_mapping_error() {
        let contact: Contact =
            serde_json::from_str(r#"{"vid": 1, "properties": {"lifecyclestage": {"value": "alien"}}}"#)
                .unwrap();
        assert!(matches!(
            contact.contact_properties(),
            Err(HubSpotError::Mapping(_))
        ));
    }

    #[test]
    fn test_to_update() {
        let props = ContactProperties {
            email: Some("a@b.com".to_string()),
            numemployees: Some(ContactPropertiesNumberOfEmployees::Over1000),
            lifecyclestage: Some(ContactPropertiesLifecycleStage::MarketingQualifiedLead),
            custom: BTreeMap::from([("favorite_color".to_string(), "teal".to_string())]),
            ..Default::default()
        };

        let update = props.to_update().unwrap();
        let json = serde_json::to_value(&update).unwrap();
        let entries = json["properties"].as_array().unwrap();
        assert_eq!(entries.len(), 4);
        assert!(entries.contains(&serde_json::json!({"property": "email", "value": "a@b.com"})));
        assert!(entries.contains(&serde_json::json!({"property": "numemployees", "value": "1000+"})));
        assert!(entries.contains(
            &serde_json::json!({"property": "lifecyclestage", "value": "marketingqualifiedlead"})
        ));
        assert!(entries.contains(
            &serde_json::json!({"property": "favorite_color", "value": "teal"})
        ));
    }

    #[test]
    fn test_to_update_ignores_custom_keys_for_named_fields() {
        let props = ContactProperties {
            email: Some("a@b.com".to_string()),
            custom: BTreeMap::from([
                ("email".to_string(), "other@b.com".to_string()),
                ("city".to_string(), "Nowhere".to_string()),
                ("favorite_color".to_string(), "teal".to_string()),
            ]),
            ..Default::default()
        };

        let update = props.to_update().unwrap();
        assert_eq!(
            update.properties,
            vec![
                ContactPropertyValue {
                    property: "email".to_string(),
                    value: "a@b.com".to_string(),
                },
                ContactPropertyValue {
                    property: "favorite_color".to_string(),
                    value: "teal".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_named_properties_match_fields() {
        let all = ContactProperties {
            email: Some(String::new()),
            firstname: Some(String::new()),
            lastname: Some(String::new()),
            website: Some(String::new()),
            company: Some(String::new()),
            phone: Some(String::new()),
            address: Some(String::new()),
            city: Some(String::new()),
            state: Some(String::new()),
            zip: Some(String::new()),
            jobtitle: Some(String::new()),
            twitterhandle: Some(String::new()),
            message: Some(String::new()),
            numemployees: Some(ContactPropertiesNumberOfEmployees::From1To5),
            lifecyclestage: Some(ContactPropertiesLifecycleStage::Other),
            custom: BTreeMap::new(),
        };
        let value = serde_json::to_value(&all).unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        let mut named = NAMED_PROPERTIES.to_vec();
        keys.sort_unstable();
        named.sort_unstable();
        assert_eq!(keys, named);
    }

    #[test]
    fn test_contact_properties_roundtrip() {
        let props = ContactProperties {
            firstname: Some("Ada".to_string()),
            numemployees: Some(ContactPropertiesNumberOfEmployees::From5To25),
            lifecyclestage: Some(ContactPropertiesLifecycleStage::Customer),
            custom: BTreeMap::from([("twitterfollowers".to_string(), "12".to_string())]),
            ..Default::default()
        };
        let json = serde_json::to_string(&props).unwrap();
        assert!(!json.contains("null"));
        let decoded: ContactProperties = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, props);
    }

    #[test]
    fn test_contact_roundtrip() {
        let contact: Contact = serde_json::from_str(PROFILE).unwrap();
        let json = serde_json::to_string(&contact).unwrap();
        let decoded: Contact = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, contact);
    }

    #[test]
    fn test_contact_list_and_query() {
        let list: ContactList = serde_json::from_str(
            r#"{"contacts": [{"vid": 1, "properties": {}}], "has-more": true, "vid-offset": 1}"#,
        )
        .unwrap();
        assert_eq!(list.contacts.len(), 1);
        assert_eq!(list.has_more, Some(true));
        assert_eq!(list.vid_offset, Some(1));

        let query: ContactQuery = serde_json::from_str(
            r#"{"query": "mule", "offset": 0, "has-more": false, "total": 0, "contacts": []}"#,
        )
        .unwrap();
        assert_eq!(query.query.as_deref(), Some("mule"));
        assert_eq!(query.total, Some(0));
    }

    #[test]
    fn test_statistics_and_deleted() {
        let stats: ContactStatistics =
            serde_json::from_str(r#"{"contacts": 14, "lastNewContactAt": 1357000000000}"#).unwrap();
        assert_eq!(stats.contacts, Some(14));
        assert_eq!(stats.last_new_contact_at, Some(1357000000000));

        let deleted: ContactDeleted =
            serde_json::from_str(r#"{"vid": 61574, "deleted": true, "reason": "OK"}"#).unwrap();
        assert_eq!(deleted.vid, Some(61574));
        assert_eq!(deleted.deleted, Some(true));
    }
}
