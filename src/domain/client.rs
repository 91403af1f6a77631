use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::document::{AccessPolicy, AccessType};
use crate::domain::types::{ClientId, CompanyId, CompanyName, FullName, Inn, Note, UserId};

/// Counterparty record kept by a company. Unrelated to the user's own [`Company`].
///
/// [`Company`]: crate::domain::company::Company
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: ClientId,
    pub company_name: String,
    pub inn: Inn,
    pub director_name: String,
    #[serde(default)]
    pub note: Option<String>,
    pub access_type: AccessType,
    #[serde(default)]
    pub access_user_ids: Vec<UserId>,
    pub owner_id: UserId,
    pub company_id: CompanyId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Client {
    pub fn access_policy(&self) -> AccessPolicy {
        AccessPolicy::from_wire(self.access_type, self.access_user_ids.clone())
    }
}

/// Payload used for both creating and updating a client.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    pub company_name: CompanyName,
    pub inn: Inn,
    pub director_name: FullName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Note>,
    #[serde(flatten)]
    pub access: AccessPolicy,
}
