//! Platform administration console. Every call requires the admin role.

use crate::api::query::Pagination;
use crate::api::{AdminApi, CompanyApi, RequestApi, UserApi};
use crate::domain::request::{Request, RequestTab};
use crate::domain::types::{CompanyId, Note, RequestId, UserId};
use crate::domain::user::UserWithRole;
use crate::dto::admin::{
    AdminCompaniesData, AdminDashboardData, AdminListQuery, AdminRequestsData, AdminUsersData,
};
use crate::dto::requests::{RequestRow, RequestsQuery, tab_views};
use crate::forms::admin::{AdminMessageForm, AdminMessagePayload};
use crate::forms::employees::MessageForm;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::services::requests::pick_tab;
use crate::services::{ServiceResult, ensure_admin};

fn pagination(query: &AdminListQuery) -> Pagination {
    Pagination {
        page: query.page.unwrap_or(1).max(1),
        per_page: DEFAULT_ITEMS_PER_PAGE,
    }
}

pub async fn load_admin_dashboard<A>(api: &A, admin: &UserWithRole) -> ServiceResult<AdminDashboardData>
where
    A: AdminApi,
{
    ensure_admin(admin)?;

    let stats = api.admin_stats().await.map_err(|err| {
        log::error!("Failed to load admin stats: {err}");
        err
    })?;

    Ok(AdminDashboardData { stats })
}

pub async fn load_admin_companies<A>(
    api: &A,
    admin: &UserWithRole,
    query: AdminListQuery,
) -> ServiceResult<AdminCompaniesData>
where
    A: CompanyApi,
{
    ensure_admin(admin)?;

    let companies = api
        .list_companies(pagination(&query))
        .await
        .map_err(|err| {
            log::error!("Failed to list companies: {err}");
            err
        })?;

    Ok(AdminCompaniesData {
        companies: Paginated::from(companies),
    })
}

pub async fn block_company<A>(api: &A, admin: &UserWithRole, id: CompanyId) -> ServiceResult<()>
where
    A: CompanyApi,
{
    ensure_admin(admin)?;

    api.block_company(id).await.map(|_| ()).map_err(|err| {
        log::error!("Failed to block company {id}: {err}");
        err.into()
    })
}

pub async fn unblock_company<A>(api: &A, admin: &UserWithRole, id: CompanyId) -> ServiceResult<()>
where
    A: CompanyApi,
{
    ensure_admin(admin)?;

    api.unblock_company(id).await.map(|_| ()).map_err(|err| {
        log::error!("Failed to unblock company {id}: {err}");
        err.into()
    })
}

pub async fn delete_company<A>(api: &A, admin: &UserWithRole, id: CompanyId) -> ServiceResult<()>
where
    A: CompanyApi,
{
    ensure_admin(admin)?;

    api.delete_company(id).await.map_err(|err| {
        log::error!("Failed to delete company {id}: {err}");
        err.into()
    })
}

pub async fn message_company<A>(
    api: &A,
    admin: &UserWithRole,
    id: CompanyId,
    form: MessageForm,
) -> ServiceResult<()>
where
    A: CompanyApi,
{
    ensure_admin(admin)?;

    let message = Note::try_from(form)?;

    api.message_company(id, &message).await.map_err(|err| {
        log::error!("Failed to message company {id}: {err}");
        err.into()
    })
}

pub async fn load_admin_users<A>(
    api: &A,
    admin: &UserWithRole,
    query: AdminListQuery,
) -> ServiceResult<AdminUsersData>
where
    A: UserApi,
{
    ensure_admin(admin)?;

    let users = api.list_users(pagination(&query)).await.map_err(|err| {
        log::error!("Failed to list users: {err}");
        err
    })?;

    Ok(AdminUsersData {
        users: Paginated::from(users),
    })
}

pub async fn block_user<A>(api: &A, admin: &UserWithRole, id: UserId) -> ServiceResult<()>
where
    A: UserApi,
{
    ensure_admin(admin)?;

    api.block_user(id).await.map(|_| ()).map_err(|err| {
        log::error!("Failed to block user {id}: {err}");
        err.into()
    })
}

pub async fn unblock_user<A>(api: &A, admin: &UserWithRole, id: UserId) -> ServiceResult<()>
where
    A: UserApi,
{
    ensure_admin(admin)?;

    api.unblock_user(id).await.map(|_| ()).map_err(|err| {
        log::error!("Failed to unblock user {id}: {err}");
        err.into()
    })
}

/// Sends a direct message from the administrator to one user.
pub async fn message_user<A>(
    api: &A,
    admin: &UserWithRole,
    form: AdminMessageForm,
) -> ServiceResult<()>
where
    A: AdminApi,
{
    ensure_admin(admin)?;

    let payload = AdminMessagePayload::try_from(form)?;
    let user_id = payload.user_id;

    api.admin_message(user_id, &payload.message)
        .await
        .map_err(|err| {
            log::error!("Failed to message user {user_id}: {err}");
            err.into()
        })
}

pub async fn load_admin_requests<A>(
    api: &A,
    admin: &UserWithRole,
    query: RequestsQuery,
) -> ServiceResult<AdminRequestsData>
where
    A: AdminApi,
{
    ensure_admin(admin)?;

    let tab = pick_tab(query.tab, &RequestTab::ADMIN);
    let requests = api.admin_requests().await.map_err(|err| {
        log::error!("Failed to list admin requests: {err}");
        err
    })?;

    Ok(AdminRequestsData {
        requests: tab.filter(requests).into_iter().map(RequestRow::from).collect(),
        tabs: tab_views(&RequestTab::ADMIN, tab),
    })
}

pub async fn accept_request<A>(api: &A, admin: &UserWithRole, id: RequestId) -> ServiceResult<Request>
where
    A: RequestApi,
{
    ensure_admin(admin)?;

    api.accept_request(id).await.map_err(|err| {
        log::error!("Failed to accept request {id}: {err}");
        err.into()
    })
}

pub async fn reject_request<A>(api: &A, admin: &UserWithRole, id: RequestId) -> ServiceResult<Request>
where
    A: RequestApi,
{
    ensure_admin(admin)?;

    api.reject_request(id).await.map_err(|err| {
        log::error!("Failed to reject request {id}: {err}");
        err.into()
    })
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::api::PaginatedResponse;
    use crate::api::mock::MockApi;
    use crate::services::ServiceError;
    use crate::services::fixtures::*;

    fn admin() -> UserWithRole {
        user(DIRECTOR, "admin", "declarant")
    }

    fn request(kind: &str) -> Request {
        serde_json::from_value(json!({
            "id": "55555555-5555-4555-8555-555555555555",
            "type": kind,
            "status": "pending",
            "companyName": "ООО \"Новая\"",
            "createdAt": "2025-12-01T09:00:00Z",
            "updatedAt": "2025-12-01T09:00:00Z"
        }))
        .unwrap()
    }

    #[actix_web::test]
    async fn company_members_are_refused() {
        let mut api = MockApi::new();
        api.expect_admin_stats().never();

        let director = user(DIRECTOR, "director", "declarant");
        let result = load_admin_dashboard(&api, &director).await;
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[actix_web::test]
    async fn companies_are_paged_by_the_backend() {
        let mut api = MockApi::new();
        api.expect_list_companies()
            .withf(|p| p.page == 2)
            .returning(|_| {
                Ok(PaginatedResponse {
                    data: vec![company("declarant")],
                    total: 21,
                    page: 2,
                    page_size: 20,
                    total_pages: 2,
                })
            });

        let query = AdminListQuery { page: Some(2) };
        let data = load_admin_companies(&api, &admin(), query).await.unwrap();
        assert_eq!(data.companies.page, 2);
        assert_eq!(data.companies.items.len(), 1);
    }

    #[actix_web::test]
    async fn company_tab_hides_join_requests() {
        let mut api = MockApi::new();
        api.expect_admin_requests().returning(|| {
            Ok(vec![
                request("company_registration"),
                request("employee_join"),
            ])
        });

        let query = RequestsQuery {
            tab: Some("company".to_string()),
        };
        let data = load_admin_requests(&api, &admin(), query).await.unwrap();
        assert_eq!(data.requests.len(), 1);
        assert_eq!(data.requests[0].type_label, "Регистрация компании");
    }

    #[actix_web::test]
    async fn empty_message_never_reaches_the_backend() {
        let mut api = MockApi::new();
        api.expect_admin_message().never();

        let form = AdminMessageForm {
            user_id: EMPLOYEE.to_string(),
            message: "   ".to_string(),
        };
        let result = message_user(&api, &admin(), form).await;
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
