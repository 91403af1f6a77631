//! Counterparty directory of the member's company.

use crate::api::{ClientApi, UserApi};
use crate::domain::client::{Client, NewClient};
use crate::domain::types::ClientId;
use crate::dto::clients::{ClientRow, ClientsPageData, ClientsQuery};
use crate::dto::employee_options;
use crate::forms::clients::ClientForm;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::services::{Member, ServiceResult, non_blank};

/// The backend returns every matching client at once, so pages are cut locally.
pub async fn load_clients_page<A>(
    api: &A,
    member: &Member,
    query: ClientsQuery,
) -> ServiceResult<ClientsPageData>
where
    A: ClientApi + UserApi,
{
    let search_query = non_blank(query.search);

    let clients = api.list_clients(search_query.clone()).await.map_err(|err| {
        log::error!("Failed to list clients: {err}");
        err
    })?;
    let employees = api.list_company_users(member.company_id()).await?;

    let rows = clients.into_iter().map(ClientRow::from).collect();

    Ok(ClientsPageData {
        clients: Paginated::from_all(rows, query.page.unwrap_or(1), DEFAULT_ITEMS_PER_PAGE),
        employees: employee_options(&employees),
        search_query,
    })
}

pub async fn create_client<A>(api: &A, form: ClientForm) -> ServiceResult<Client>
where
    A: ClientApi,
{
    let client = NewClient::try_from(form)?;

    api.create_client(&client).await.map_err(|err| {
        log::error!("Failed to create client: {err}");
        err.into()
    })
}

pub async fn update_client<A>(api: &A, id: ClientId, form: ClientForm) -> ServiceResult<Client>
where
    A: ClientApi,
{
    let client = NewClient::try_from(form)?;

    api.update_client(id, &client).await.map_err(|err| {
        log::error!("Failed to update client {id}: {err}");
        err.into()
    })
}

pub async fn delete_client<A>(api: &A, id: ClientId) -> ServiceResult<()>
where
    A: ClientApi,
{
    api.delete_client(id).await.map_err(|err| {
        log::error!("Failed to delete client {id}: {err}");
        err.into()
    })
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::domain::document::AccessPolicy;
    use crate::services::ServiceError;
    use crate::services::fixtures::*;

    fn form(access_type: &str, users: Vec<String>) -> ClientForm {
        ClientForm {
            company_name: "ООО \"Импорт\"".to_string(),
            inn: "987654321".to_string(),
            director_name: "Каримов Азиз".to_string(),
            access_type: access_type.to_string(),
            access_user_ids: users,
            ..Default::default()
        }
    }

    #[actix_web::test]
    async fn search_is_forwarded_trimmed() {
        let mut api = MockApi::new();
        api.expect_list_clients()
            .withf(|search| search.as_deref() == Some("Импорт"))
            .returning(|_| Ok(vec![client()]));
        api.expect_list_company_users().returning(|_| Ok(Vec::new()));

        let query = ClientsQuery {
            search: Some("  Импорт ".to_string()),
            page: None,
        };
        let data = load_clients_page(&api, &declarant("employee"), query)
            .await
            .unwrap();
        assert_eq!(data.clients.items.len(), 1);
        assert_eq!(data.clients.items[0].access_label, "Вся компания");
        assert_eq!(data.search_query.as_deref(), Some("Импорт"));
    }

    #[actix_web::test]
    async fn selected_access_carries_users() {
        let mut api = MockApi::new();
        api.expect_create_client()
            .withf(|c| matches!(&c.access, AccessPolicy::Selected(ids) if ids.len() == 1))
            .returning(|_| Ok(client()));

        let result = create_client(&api, form("selected", vec![EMPLOYEE.to_string()])).await;
        assert!(result.is_ok());
    }

    #[actix_web::test]
    async fn selected_access_without_users_is_refused() {
        let mut api = MockApi::new();
        api.expect_create_client().never();

        let result = create_client(&api, form("selected", Vec::new())).await;
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
