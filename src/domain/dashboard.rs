use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub active_tasks: u64,
    pub completed_tasks: u64,
    pub overdue_tasks: u64,
    /// Only reported for declarant companies.
    #[serde(default)]
    pub sent_declarations: Option<u64>,
    pub active_certificates: u64,
    pub completed_certificates: u64,
    pub overdue_certificates: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPoint {
    pub date: NaiveDate,
    pub companies: u64,
    pub users: u64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_companies: u64,
    pub total_users: u64,
    pub active_requests: u64,
    #[serde(default)]
    pub growth_data: Vec<GrowthPoint>,
}

/// Inclusive date range for dashboard statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Period {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl Period {
    /// Builds a period, swapping the bounds when given in reverse order.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        if from <= to {
            Self { from, to }
        } else {
            Self { from: to, to: from }
        }
    }
}
