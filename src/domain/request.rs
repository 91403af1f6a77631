use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{CompanyId, RequestId, TypeConstraintError, UserId};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    CompanyRegistration,
    EmployeeJoin,
    Partnership,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

/// Inbox item awaiting a director's or an administrator's decision.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id: RequestId,
    #[serde(rename = "type")]
    pub request_type: RequestType,
    pub status: RequestStatus,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub company_id: Option<CompanyId>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub target_company_id: Option<CompanyId>,
    #[serde(default)]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Request {
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}

/// Tabs of the request inbox. Directors see `all/join/partnership`,
/// administrators `all/company/user`.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RequestTab {
    #[default]
    All,
    Join,
    Partnership,
    Company,
    User,
}

impl RequestTab {
    pub const DIRECTOR: [RequestTab; 3] = [RequestTab::All, RequestTab::Join, RequestTab::Partnership];
    pub const ADMIN: [RequestTab; 3] = [RequestTab::All, RequestTab::Company, RequestTab::User];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestTab::All => "all",
            RequestTab::Join => "join",
            RequestTab::Partnership => "partnership",
            RequestTab::Company => "company",
            RequestTab::User => "user",
        }
    }

    pub fn matches(&self, request: &Request) -> bool {
        match self {
            RequestTab::All => true,
            RequestTab::Join | RequestTab::User => {
                request.request_type == RequestType::EmployeeJoin
            }
            RequestTab::Partnership => request.request_type == RequestType::Partnership,
            RequestTab::Company => request.request_type == RequestType::CompanyRegistration,
        }
    }

    /// Keeps only the requests shown under this tab.
    pub fn filter(&self, requests: Vec<Request>) -> Vec<Request> {
        requests.into_iter().filter(|r| self.matches(r)).collect()
    }
}

impl FromStr for RequestTab {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(RequestTab::All),
            "join" => Ok(RequestTab::Join),
            "partnership" => Ok(RequestTab::Partnership),
            "company" => Ok(RequestTab::Company),
            "user" => Ok(RequestTab::User),
            other => Err(TypeConstraintError::InvalidValue(format!("unknown tab `{other}`"))),
        }
    }
}
