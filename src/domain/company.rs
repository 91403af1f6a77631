use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{CompanyId, CompanyName, Inn, UserId};
use crate::domain::user::ActivityType;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub inn: Inn,
    pub activity_type: ActivityType,
    #[serde(default)]
    pub is_blocked: bool,
    #[serde(default)]
    pub director_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload used by a director to register their firm.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewCompany {
    pub name: CompanyName,
    pub inn: Inn,
}
