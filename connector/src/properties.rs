use hubspot::client::classify;
use hubspot::model::{CustomContactProperty, CustomContactPropertyGroup};
use hubspot::{Endpoint, HubSpotError, Method, Result};

use crate::connector::{segment, HubSpotConnector};

fn property_path(name: &str) -> String {
    format!("/contacts/v1/properties/{}", segment(name))
}

fn group_path(name: &str) -> String {
    format!("/contacts/v1/groups/{}", segment(name))
}

fn required_name<'a>(name: Option<&'a str>, what: &str) -> Result<&'a str> {
    match name {
        Some(name) if !name.trim().is_empty() => Ok(name),
        _ => Err(HubSpotError::Configuration(format!(
            "The {} name can not be empty",
            what
        ))),
    }
}

impl HubSpotConnector {
    pub async fn get_all_custom_properties(
        &self,
        user_id: &str,
    ) -> Result<Option<Vec<CustomContactProperty>>> {
        self.fetch(
            user_id,
            Method::Get,
            Endpoint::new("/contacts/v1/properties"),
            None,
        )
        .await
    }

    /// Create a property. Its `name` becomes the path segment.
    pub async fn create_custom_property(
        &self,
        user_id: &str,
        property: &CustomContactProperty,
    ) -> Result<Option<CustomContactProperty>> {
        let name = required_name(property.name.as_deref(), "property")?;
        let body = classify::encode(property)?;
        self.fetch(user_id, Method::Put, Endpoint::new(property_path(name)), Some(body))
            .await
    }

    pub async fn update_custom_property(
        &self,
        user_id: &str,
        name: &str,
        property: &CustomContactProperty,
    ) -> Result<Option<CustomContactProperty>> {
        let name = required_name(Some(name), "property")?;
        let body = classify::encode(property)?;
        self.fetch(user_id, Method::Post, Endpoint::new(property_path(name)), Some(body))
            .await
    }

    pub async fn delete_custom_property(&self, user_id: &str, name: &str) -> Result<()> {
        let name = required_name(Some(name), "property")?;
        self.execute(user_id, Method::Delete, Endpoint::new(property_path(name)), None)
            .await
    }

    pub async fn get_custom_property_group(
        &self,
        user_id: &str,
        name: &str,
    ) -> Result<Option<CustomContactPropertyGroup>> {
        let name = required_name(Some(name), "group")?;
        self.fetch(user_id, Method::Get, Endpoint::new(group_path(name)), None)
            .await
    }

    /// Create a property group. Its `name` becomes the path segment.
    pub async fn create_custom_property_group(
        &self,
        user_id: &str,
        group: &CustomContactPropertyGroup,
    ) -> Result<Option<CustomContactPropertyGroup>> {
        let name = required_name(group.name.as_deref(), "group")?;
        let body = classify::encode(group)?;
        self.fetch(user_id, Method::Put, Endpoint::new(group_path(name)), Some(body))
            .await
    }

    pub async fn update_custom_property_group(
        &self,
        user_id: &str,
        name: &str,
        group: &CustomContactPropertyGroup,
    ) -> Result<Option<CustomContactPropertyGroup>> {
        let name = required_name(Some(name), "group")?;
        let body = classify::encode(group)?;
        self.fetch(user_id, Method::Post, Endpoint::new(group_path(name)), Some(body))
            .await
    }

    pub async fn delete_custom_property_group(&self, user_id: &str, name: &str) -> Result<()> {
        let name = required_name(Some(name), "group")?;
        self.execute(user_id, Method::Delete, Endpoint::new(group_path(name)), None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_encode_names() {
        assert_eq!(property_path("custom_prop"), "/contacts/v1/properties/custom_prop");
        assert_eq!(group_path("my group"), "/contacts/v1/groups/my%20group");
    }

    #[test]
    fn test_required_name() {
        assert_eq!(required_name(Some("x"), "property").unwrap(), "x");
        let err = required_name(None, "group").unwrap_err();
        assert_eq!(err.to_string(), "The group name can not be empty");
        assert!(required_name(Some("  "), "property").is_err());
    }
}
