//! HubSpot CRM data types.
//!
//! Plain values mirroring the JSON the API exchanges: unset fields are left
//! out when serializing and unknown fields are ignored when deserializing.

pub mod contact;
pub mod email;
pub mod list;
pub mod property;

pub use contact::{
    Contact, ContactDeleted, ContactList, ContactProperties, ContactPropertiesLifecycleStage,
    ContactPropertiesNumberOfEmployees, ContactPropertiesUpdate, ContactQuery, ContactStatistics,
};
pub use email::{EmailSubscription, EmailSubscriptionDefinition, EmailSubscriptionStatus};
pub use list::{
    HubSpotList, HubSpotListAddContactToListResponse, HubSpotListFilter, HubSpotListFilters,
    HubSpotListLists, HubSpotNewList,
};
pub use property::{
    CustomContactProperty, CustomContactPropertyFieldType, CustomContactPropertyGroup,
    CustomContactPropertyType,
};
