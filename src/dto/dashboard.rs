use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::dashboard::DashboardStats;
use crate::dto::SelectOption;
use crate::dto::certificates::CertificateRow;
use crate::dto::declarations::DeclarationRow;

/// Number of records shown in the "recent" widgets.
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Default, Clone, Deserialize)]
pub struct DashboardQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub employee_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DashboardPageData {
    pub stats: DashboardStats,
    pub recent_declarations: Vec<DeclarationRow>,
    pub recent_certificates: Vec<CertificateRow>,
    pub show_declarations: bool,
    pub employees: Vec<SelectOption>,
    pub selected_employee: Option<String>,
    pub period_from: Option<NaiveDate>,
    pub period_to: Option<NaiveDate>,
}
