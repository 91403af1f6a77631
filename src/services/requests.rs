//! Incoming requests of the director: employees asking to join and
//! partnership proposals.

use crate::api::RequestApi;
use crate::domain::request::{Request, RequestTab};
use crate::domain::types::RequestId;
use crate::domain::user::Role;
use crate::dto::requests::{RequestRow, RequestsPageData, RequestsQuery, tab_views};
use crate::services::{Member, ServiceResult, ensure_role, non_blank};

const DIRECTOR: &[Role] = &[Role::Director];

/// Reads a tab from the query, falling back to `all` for anything outside `allowed`.
pub(crate) fn pick_tab(value: Option<String>, allowed: &[RequestTab]) -> RequestTab {
    non_blank(value)
        .and_then(|v| v.parse::<RequestTab>().ok())
        .filter(|tab| allowed.contains(tab))
        .unwrap_or(RequestTab::All)
}

pub async fn load_requests_page<A>(
    api: &A,
    member: &Member,
    query: RequestsQuery,
) -> ServiceResult<RequestsPageData>
where
    A: RequestApi,
{
    ensure_role(member, DIRECTOR)?;

    let tab = pick_tab(query.tab, &RequestTab::DIRECTOR);
    let requests = api.list_requests().await.map_err(|err| {
        log::error!("Failed to list requests: {err}");
        err
    })?;

    let pending_count = requests.iter().filter(|r| r.is_pending()).count();
    let requests = tab.filter(requests).into_iter().map(RequestRow::from).collect();

    Ok(RequestsPageData {
        requests,
        tabs: tab_views(&RequestTab::DIRECTOR, tab),
        pending_count,
    })
}

pub async fn accept_request<A>(api: &A, member: &Member, id: RequestId) -> ServiceResult<Request>
where
    A: RequestApi,
{
    ensure_role(member, DIRECTOR)?;

    api.accept_request(id).await.map_err(|err| {
        log::error!("Failed to accept request {id}: {err}");
        err.into()
    })
}

pub async fn reject_request<A>(api: &A, member: &Member, id: RequestId) -> ServiceResult<Request>
where
    A: RequestApi,
{
    ensure_role(member, DIRECTOR)?;

    api.reject_request(id).await.map_err(|err| {
        log::error!("Failed to reject request {id}: {err}");
        err.into()
    })
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::api::mock::MockApi;
    use crate::services::ServiceError;
    use crate::services::fixtures::*;

    fn request(id: &str, kind: &str, status: &str) -> Request {
        serde_json::from_value(json!({
            "id": id,
            "type": kind,
            "status": status,
            "userName": "Test employee",
            "createdAt": "2025-12-01T09:00:00Z",
            "updatedAt": "2025-12-01T09:00:00Z"
        }))
        .unwrap()
    }

    fn inbox() -> Vec<Request> {
        vec![
            request("55555555-5555-4555-8555-555555555551", "employee_join", "pending"),
            request("55555555-5555-4555-8555-555555555552", "partnership", "pending"),
            request("55555555-5555-4555-8555-555555555553", "employee_join", "accepted"),
        ]
    }

    #[test]
    fn admin_tabs_are_not_offered_to_directors() {
        assert_eq!(
            pick_tab(Some("company".to_string()), &RequestTab::DIRECTOR),
            RequestTab::All
        );
        assert_eq!(
            pick_tab(Some(" join ".to_string()), &RequestTab::DIRECTOR),
            RequestTab::Join
        );
        assert_eq!(pick_tab(None, &RequestTab::ADMIN), RequestTab::All);
    }

    #[actix_web::test]
    async fn join_tab_keeps_join_requests() {
        let mut api = MockApi::new();
        api.expect_list_requests().returning(|| Ok(inbox()));

        let query = RequestsQuery {
            tab: Some("join".to_string()),
        };
        let data = load_requests_page(&api, &declarant("director"), query)
            .await
            .unwrap();

        assert_eq!(data.requests.len(), 2);
        assert_eq!(data.requests[0].type_label, "Вступление сотрудника");
        assert_eq!(data.pending_count, 2);
        assert!(data.tabs.iter().any(|t| t.key == "join" && t.active));
    }

    #[actix_web::test]
    async fn seniors_cannot_answer_requests() {
        let mut api = MockApi::new();
        api.expect_accept_request().never();

        let id = "55555555-5555-4555-8555-555555555551".parse().unwrap();
        let result = accept_request(&api, &declarant("senior"), id).await;
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }
}
