//! List queries sent as query strings to paginated endpoints.
//!
//! Every filter is optional and only serialized when set, after `page` and
//! `pageSize`.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::certificate::CertificateStatus;
use crate::domain::declaration::{DeclarationMode, VehicleType};
use crate::domain::task::{TaskPriority, TaskStatus};
use crate::domain::types::{ClientId, CompanyId, FolderId, UserId};

pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// `page` and `pageSize` pairs in the order the backend expects them.
    pub fn as_query(&self) -> [(&'static str, String); 2] {
        [
            ("page", self.page.max(1).to_string()),
            ("pageSize", self.per_page.to_string()),
        ]
    }
}

/// Whose records a list shows.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OwnerScope {
    #[default]
    Mine,
    All,
    Employee,
}

impl OwnerScope {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "mine" => Some(OwnerScope::Mine),
            "all" => Some(OwnerScope::All),
            "employee" => Some(OwnerScope::Employee),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declaration_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<DeclarationMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<VehicleType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_type: Option<OwnerScope>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeclarationListQuery {
    pub filters: DeclarationFilters,
    pub pagination: Pagination,
}

impl DeclarationListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.filters.search = Some(term.into());
        self
    }

    pub fn owner(mut self, scope: OwnerScope, owner_id: Option<UserId>) -> Self {
        self.filters.owner_type = Some(scope);
        self.filters.owner_id = owner_id;
        self
    }

    pub fn client(mut self, client_id: ClientId) -> Self {
        self.filters.client_id = Some(client_id);
        self
    }

    pub fn mode(mut self, mode: DeclarationMode) -> Self {
        self.filters.mode = Some(mode);
        self
    }

    pub fn vehicle_type(mut self, vehicle_type: VehicleType) -> Self {
        self.filters.vehicle_type = Some(vehicle_type);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Pagination { page, per_page };
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CertificateFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certifier_company_id: Option<CompanyId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CertificateStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_type: Option<OwnerScope>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CertificateListQuery {
    pub filters: CertificateFilters,
    pub pagination: Pagination,
}

impl CertificateListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.filters.search = Some(term.into());
        self
    }

    pub fn status(mut self, status: CertificateStatus) -> Self {
        self.filters.status = Some(status);
        self
    }

    pub fn owner(mut self, scope: OwnerScope, owner_id: Option<UserId>) -> Self {
        self.filters.owner_type = Some(scope);
        self.filters.owner_id = owner_id;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Pagination { page, per_page };
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_employee_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_type: Option<OwnerScope>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskListQuery {
    pub filters: TaskFilters,
    pub pagination: Pagination,
}

impl TaskListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.filters.search = Some(term.into());
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.filters.status = Some(status);
        self
    }

    pub fn priority(mut self, priority: TaskPriority) -> Self {
        self.filters.priority = Some(priority);
        self
    }

    pub fn owner(mut self, scope: OwnerScope, employee: Option<UserId>) -> Self {
        self.filters.owner_type = Some(scope);
        self.filters.target_employee_id = employee;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Pagination { page, per_page };
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<FolderId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<UserId>,
}

impl DocumentListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn folder(mut self, folder_id: Option<FolderId>) -> Self {
        self.folder_id = folder_id;
        self
    }

    pub fn client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_set_filters_are_serialized() {
        let query = DeclarationListQuery::new()
            .search("26001")
            .owner(OwnerScope::Mine, None)
            .paginate(2, 20);

        let encoded = serde_html_form::to_string(&query.filters).unwrap();
        assert_eq!(encoded, "search=26001&ownerType=mine");
        assert_eq!(
            query.pagination.as_query(),
            [("page", "2".to_string()), ("pageSize", "20".to_string())]
        );
    }

    #[test]
    fn enum_filters_use_backend_literals() {
        let query = CertificateListQuery::new().status(CertificateStatus::AwaitingPayment);
        let encoded = serde_html_form::to_string(&query.filters).unwrap();
        assert_eq!(encoded, "status=awaiting_payment");

        let tasks = TaskListQuery::new().priority(TaskPriority::Urgent);
        assert_eq!(
            serde_html_form::to_string(&tasks.filters).unwrap(),
            "priority=urgent"
        );
    }

    #[test]
    fn zero_page_is_clamped() {
        let pagination = Pagination { page: 0, per_page: 20 };
        assert_eq!(pagination.as_query()[0].1, "1");
    }
}
