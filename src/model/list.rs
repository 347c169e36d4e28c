//! Contact lists, static and dynamic.

use serde::{Deserialize, Serialize};

/// A single membership criterion of a dynamic list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubSpotListFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    /// Comparison, e.g. `EQ`, `NEQ`, `CONTAINS`, `SET_ANY`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Value type, e.g. `string`, `number`, `enumeration`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub filter_type: Option<String>,
}

/// Filters that must all match (AND). A list's groups are OR'ed together.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HubSpotListFilters {
    pub filters: Vec<HubSpotListFilter>,
}

/// Size and processing state of a list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubSpotListMetaData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_processing_state_change_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_size_change_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A contact list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubSpotList {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portal_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleteable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_data: Option<HubSpotListMetaData>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<HubSpotListFilters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

/// Fields supplied when creating a list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubSpotNewList {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portal_id: Option<String>,
}

/// Body of a create-list request: the new list plus its filter groups.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HubSpotNewListRequest<'a> {
    #[serde(flatten)]
    pub list: &'a HubSpotNewList,
    pub filters: &'a [HubSpotListFilters],
}

/// Page of lists.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HubSpotListLists {
    #[serde(default)]
    pub lists: Vec<HubSpotList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
}

/// Body of an add-to-list request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubSpotListAddContacts {
    pub vids: Vec<u64>,
}

/// Outcome of adding contacts to a static list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubSpotListAddContactToListResponse {
    #[serde(default)]
    pub updated: Vec<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub discarded: Vec<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub invalid_vids: Vec<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub invalid_emails: Vec<String>,
}
