use serde_json::json;

use super::{HttpApi, NoFilters};
use crate::api::query::Pagination;
use crate::api::token::TokenStore;
use crate::api::{ApiResult, CompanyApi, PaginatedResponse};
use crate::domain::company::{Company, NewCompany};
use crate::domain::types::{CompanyId, Inn, Note};

impl<S: TokenStore> CompanyApi for HttpApi<S> {
    async fn register_company(&self, company: &NewCompany) -> ApiResult<Company> {
        self.post_json("/companies/register", company).await
    }

    async fn join_company(&self, inn: &Inn) -> ApiResult<Company> {
        self.post_json("/companies/join", &json!({ "inn": inn })).await
    }

    async fn find_company_by_inn(&self, inn: &Inn) -> ApiResult<Option<Company>> {
        self.get_with("/companies/find", &[("inn", inn.as_str())])
            .await
    }

    async fn get_company(&self, id: CompanyId) -> ApiResult<Company> {
        self.get(&format!("/companies/{id}")).await
    }

    async fn list_companies(
        &self,
        pagination: Pagination,
    ) -> ApiResult<PaginatedResponse<Company>> {
        self.get_page("/companies", pagination, &NoFilters {}).await
    }

    async fn block_company(&self, id: CompanyId) -> ApiResult<Company> {
        self.post(&format!("/companies/{id}/block")).await
    }

    async fn unblock_company(&self, id: CompanyId) -> ApiResult<Company> {
        self.post(&format!("/companies/{id}/unblock")).await
    }

    async fn delete_company(&self, id: CompanyId) -> ApiResult<()> {
        self.delete(&format!("/companies/{id}")).await
    }

    async fn message_company(&self, id: CompanyId, message: &Note) -> ApiResult<()> {
        self.post_json_unit(
            &format!("/companies/{id}/message"),
            &json!({ "message": message }),
        )
        .await
    }
}
