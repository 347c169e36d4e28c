use hubspot::client::classify;
use hubspot::model::{
    Contact, ContactDeleted, ContactList, ContactProperties, ContactQuery, ContactStatistics,
};
use hubspot::{Endpoint, Method, Result};

use crate::connector::{segment, HubSpotConnector};

impl HubSpotConnector {
    /// Create a contact from the given properties.
    pub async fn create_contact(
        &self,
        user_id: &str,
        properties: &ContactProperties,
    ) -> Result<Option<Contact>> {
        let body = classify::encode(&properties.to_update()?)?;
        self.fetch(
            user_id,
            Method::Post,
            Endpoint::new("/contacts/v1/contact"),
            Some(body),
        )
        .await
    }

    /// Overwrite the given properties of an existing contact.
    pub async fn update_contact(
        &self,
        user_id: &str,
        vid: u64,
        properties: &ContactProperties,
    ) -> Result<()> {
        let body = classify::encode(&properties.to_update()?)?;
        self.execute(
            user_id,
            Method::Post,
            Endpoint::new(format!("/contacts/v1/contact/vid/{}/profile", vid)),
            Some(body),
        )
        .await
    }

    pub async fn get_contact_by_id(&self, user_id: &str, vid: u64) -> Result<Option<Contact>> {
        self.fetch(
            user_id,
            Method::Get,
            Endpoint::new(format!("/contacts/v1/contact/vid/{}/profile", vid)),
            None,
        )
        .await
    }

    pub async fn get_contact_by_email(
        &self,
        user_id: &str,
        email: &str,
    ) -> Result<Option<Contact>> {
        self.fetch(
            user_id,
            Method::Get,
            Endpoint::new(format!(
                "/contacts/v1/contact/email/{}/profile",
                segment(email)
            )),
            None,
        )
        .await
    }

    /// Look a contact up by the `hubspotutk` cookie value.
    pub async fn get_contact_by_user_token(
        &self,
        user_id: &str,
        token: &str,
    ) -> Result<Option<Contact>> {
        self.fetch(
            user_id,
            Method::Get,
            Endpoint::new(format!("/contacts/v1/contact/utk/{}/profile", segment(token))),
            None,
        )
        .await
    }

    pub async fn delete_contact(&self, user_id: &str, vid: u64) -> Result<Option<ContactDeleted>> {
        self.fetch(
            user_id,
            Method::Delete,
            Endpoint::new(format!("/contacts/v1/contact/vid/{}", vid)),
            None,
        )
        .await
    }

    /// One page of every contact in the portal.
    ///
    /// Pass the previous page's `vid_offset` to continue.
    pub async fn get_all_contacts(
        &self,
        user_id: &str,
        count: Option<u32>,
        vid_offset: Option<u64>,
    ) -> Result<Option<ContactList>> {
        let endpoint = Endpoint::new("/contacts/v1/lists/all/contacts/all")
            .query_opt("count", count)
            .query_opt("vidOffset", vid_offset);
        self.fetch(user_id, Method::Get, endpoint, None).await
    }

    /// Recently updated contacts, newest first.
    pub async fn get_recent_contacts(
        &self,
        user_id: &str,
        count: Option<u32>,
        time_offset: Option<i64>,
        vid_offset: Option<u64>,
    ) -> Result<Option<ContactList>> {
        let endpoint = Endpoint::new("/contacts/v1/lists/recently_updated/contacts/recent")
            .query_opt("count", count)
            .query_opt("timeOffset", time_offset)
            .query_opt("vidOffset", vid_offset);
        self.fetch(user_id, Method::Get, endpoint, None).await
    }

    /// Full-text search over names, emails, phone numbers and companies.
    pub async fn get_contacts_by_query(
        &self,
        user_id: &str,
        query: &str,
        count: Option<u32>,
    ) -> Result<Option<ContactQuery>> {
        let endpoint = Endpoint::new("/contacts/v1/search/query")
            .query("q", query)
            .query_opt("count", count);
        self.fetch(user_id, Method::Get, endpoint, None).await
    }

    pub async fn get_contact_statistics(&self, user_id: &str) -> Result<Option<ContactStatistics>> {
        self.fetch(
            user_id,
            Method::Get,
            Endpoint::new("/contacts/v1/contacts/statistics"),
            None,
        )
        .await
    }
}
