use super::HttpApi;
use crate::api::token::TokenStore;
use crate::api::{ApiResult, ClientApi};
use crate::domain::client::{Client, NewClient};
use crate::domain::types::ClientId;

impl<S: TokenStore> ClientApi for HttpApi<S> {
    async fn create_client(&self, client: &NewClient) -> ApiResult<Client> {
        self.post_json("/clients", client).await
    }

    async fn update_client(&self, id: ClientId, client: &NewClient) -> ApiResult<Client> {
        self.put_json(&format!("/clients/{id}"), client).await
    }

    async fn delete_client(&self, id: ClientId) -> ApiResult<()> {
        self.delete(&format!("/clients/{id}")).await
    }

    async fn get_client(&self, id: ClientId) -> ApiResult<Client> {
        self.get(&format!("/clients/{id}")).await
    }

    async fn list_clients(&self, search: Option<String>) -> ApiResult<Vec<Client>> {
        match search.filter(|term| !term.trim().is_empty()) {
            Some(term) => self.get_with("/clients", &[("search", term)]).await,
            None => self.get("/clients").await,
        }
    }
}
