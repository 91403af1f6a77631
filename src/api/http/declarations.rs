use serde_json::json;

use super::HttpApi;
use crate::api::query::DeclarationListQuery;
use crate::api::token::TokenStore;
use crate::api::{ApiResult, DeclarationApi, PaginatedResponse};
use crate::domain::declaration::{
    Declaration, DeclarationGroup, NewDeclaration, NewDeclarationGroup, UpdateDeclaration,
};
use crate::domain::types::{DeclarationId, GroupId, UserId};

impl<S: TokenStore> DeclarationApi for HttpApi<S> {
    async fn create_declaration(&self, declaration: &NewDeclaration) -> ApiResult<Declaration> {
        self.post_json("/declarations", declaration).await
    }

    async fn update_declaration(
        &self,
        id: DeclarationId,
        update: &UpdateDeclaration,
    ) -> ApiResult<Declaration> {
        self.put_json(&format!("/declarations/{id}"), update).await
    }

    async fn delete_declaration(&self, id: DeclarationId) -> ApiResult<()> {
        self.delete(&format!("/declarations/{id}")).await
    }

    async fn get_declaration(&self, id: DeclarationId) -> ApiResult<Declaration> {
        self.get(&format!("/declarations/{id}")).await
    }

    async fn list_declarations(
        &self,
        query: &DeclarationListQuery,
    ) -> ApiResult<PaginatedResponse<Declaration>> {
        self.get_page("/declarations", query.pagination, &query.filters)
            .await
    }

    async fn redirect_declaration(
        &self,
        id: DeclarationId,
        to_user: UserId,
    ) -> ApiResult<Declaration> {
        self.post_json(
            &format!("/declarations/{id}/redirect"),
            &json!({ "toUserId": to_user }),
        )
        .await
    }

    async fn create_group(&self, group: &NewDeclarationGroup) -> ApiResult<DeclarationGroup> {
        self.post_json("/declarations/groups", group).await
    }

    async fn add_to_group(
        &self,
        group_id: GroupId,
        declaration_ids: Vec<DeclarationId>,
    ) -> ApiResult<DeclarationGroup> {
        self.post_json(
            &format!("/declarations/groups/{group_id}/add"),
            &json!({ "declarationIds": declaration_ids }),
        )
        .await
    }

    async fn remove_from_group(
        &self,
        group_id: GroupId,
        declaration_ids: Vec<DeclarationId>,
    ) -> ApiResult<DeclarationGroup> {
        self.post_json(
            &format!("/declarations/groups/{group_id}/remove"),
            &json!({ "declarationIds": declaration_ids }),
        )
        .await
    }

    async fn list_groups(&self) -> ApiResult<Vec<DeclarationGroup>> {
        self.get("/declarations/groups").await
    }
}
