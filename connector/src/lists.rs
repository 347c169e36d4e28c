use hubspot::client::classify;
use hubspot::model::list::{HubSpotListAddContacts, HubSpotNewListRequest};
use hubspot::model::{
    ContactList, HubSpotList, HubSpotListAddContactToListResponse, HubSpotListFilters,
    HubSpotListLists, HubSpotNewList,
};
use hubspot::{Endpoint, Method, Result};

use crate::connector::HubSpotConnector;

impl HubSpotConnector {
    pub async fn get_contacts_lists(
        &self,
        user_id: &str,
        count: Option<u32>,
        offset: Option<u64>,
    ) -> Result<Option<HubSpotListLists>> {
        let endpoint = Endpoint::new("/contacts/v1/lists")
            .query_opt("count", count)
            .query_opt("offset", offset);
        self.fetch(user_id, Method::Get, endpoint, None).await
    }

    pub async fn get_contact_list_by_id(
        &self,
        user_id: &str,
        list_id: u64,
    ) -> Result<Option<HubSpotList>> {
        self.fetch(
            user_id,
            Method::Get,
            Endpoint::new(format!("/contacts/v1/lists/{}", list_id)),
            None,
        )
        .await
    }

    /// Lists whose membership HubSpot computes from filters.
    pub async fn get_dynamic_contact_lists(
        &self,
        user_id: &str,
        count: Option<u32>,
        offset: Option<u64>,
    ) -> Result<Option<HubSpotListLists>> {
        let endpoint = Endpoint::new("/contacts/v1/lists/dynamic")
            .query_opt("count", count)
            .query_opt("offset", offset);
        self.fetch(user_id, Method::Get, endpoint, None).await
    }

    /// One page of a list's members.
    ///
    /// `property` restricts the properties returned for each contact.
    pub async fn get_contacts_in_a_list(
        &self,
        user_id: &str,
        list_id: u64,
        count: Option<u32>,
        property: Option<&str>,
        vid_offset: Option<u64>,
    ) -> Result<Option<ContactList>> {
        let endpoint = Endpoint::new(format!("/contacts/v1/lists/{}/contacts/all", list_id))
            .query_opt("count", count)
            .query_opt("property", property)
            .query_opt("vidOffset", vid_offset);
        self.fetch(user_id, Method::Get, endpoint, None).await
    }

    /// Create a list. Filters only apply to dynamic lists.
    pub async fn create_contact_list(
        &self,
        user_id: &str,
        list: &HubSpotNewList,
        filters: &[HubSpotListFilters],
    ) -> Result<Option<HubSpotList>> {
        let body = classify::encode(&HubSpotNewListRequest { list, filters })?;
        self.fetch(
            user_id,
            Method::Post,
            Endpoint::new("/contacts/v1/lists"),
            Some(body),
        )
        .await
    }

    /// Add one contact to a static list.
    pub async fn add_existing_contact_in_a_list(
        &self,
        user_id: &str,
        list_id: u64,
        vid: u64,
    ) -> Result<Option<HubSpotListAddContactToListResponse>> {
        let body = classify::encode(&HubSpotListAddContacts { vids: vec![vid] })?;
        self.fetch(
            user_id,
            Method::Post,
            Endpoint::new(format!("/contacts/v1/lists/{}/add", list_id)),
            Some(body),
        )
        .await
    }
}
