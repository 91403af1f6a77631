use serde::{Deserialize, Serialize};

use crate::domain::company::Company;
use crate::domain::dashboard::AdminStats;
use crate::domain::user::UserWithRole;
use crate::dto::requests::{RequestRow, TabView};
use crate::pagination::Paginated;

#[derive(Debug, Default, Clone, Deserialize)]
pub struct AdminListQuery {
    pub page: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct AdminDashboardData {
    pub stats: AdminStats,
}

#[derive(Debug, Serialize)]
pub struct AdminCompaniesData {
    pub companies: Paginated<Company>,
}

#[derive(Debug, Serialize)]
pub struct AdminUsersData {
    pub users: Paginated<UserWithRole>,
}

#[derive(Debug, Serialize)]
pub struct AdminRequestsData {
    pub requests: Vec<RequestRow>,
    pub tabs: Vec<TabView>,
}
