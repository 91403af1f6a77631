use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{CompanyId, Inn, Note, PartnershipId};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PartnershipStatus {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Partnership {
    pub id: PartnershipId,
    pub requesting_company_id: CompanyId,
    pub target_company_id: CompanyId,
    #[serde(default)]
    pub note: Option<String>,
    pub status: PartnershipStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Partnership {
    /// The company on the other side of the relationship from `own`.
    pub fn counterpart(&self, own: CompanyId) -> CompanyId {
        if self.requesting_company_id == own {
            self.target_company_id
        } else {
            self.requesting_company_id
        }
    }

    /// Only the receiving company may answer a pending request.
    pub fn can_answer(&self, own: CompanyId) -> bool {
        self.status == PartnershipStatus::Pending && self.target_company_id == own
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PartnershipRequest {
    pub target_company_inn: Inn,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Note>,
}
