use reqwest::multipart;
use serde::Deserialize;
use serde_json::json;

use super::{HttpApi, NoFilters, file_part};
use crate::api::query::Pagination;
use crate::api::token::TokenStore;
use crate::api::{ApiResult, PaginatedResponse, UserApi};
use crate::domain::document::Upload;
use crate::domain::types::{CompanyId, Note, UserId};
use crate::domain::user::{Role, UpdateUser, User, UserWithRole};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AvatarUploaded {
    avatar_url: String,
}

impl<S: TokenStore> UserApi for HttpApi<S> {
    async fn get_user(&self, id: UserId) -> ApiResult<UserWithRole> {
        self.get(&format!("/users/{id}")).await
    }

    async fn list_company_users(&self, company_id: CompanyId) -> ApiResult<Vec<UserWithRole>> {
        self.get(&format!("/users/company/{company_id}")).await
    }

    async fn list_users(
        &self,
        pagination: Pagination,
    ) -> ApiResult<PaginatedResponse<UserWithRole>> {
        self.get_page("/users", pagination, &NoFilters {}).await
    }

    async fn update_user(&self, id: UserId, update: &UpdateUser) -> ApiResult<User> {
        self.put_json(&format!("/users/{id}"), update).await
    }

    async fn upload_avatar(&self, id: UserId, avatar: Upload) -> ApiResult<String> {
        let form = multipart::Form::new().part("avatar", file_part(avatar)?);
        let uploaded: AvatarUploaded = self
            .post_multipart(&format!("/users/{id}/avatar"), form)
            .await?;
        Ok(uploaded.avatar_url)
    }

    async fn block_user(&self, id: UserId) -> ApiResult<User> {
        self.post(&format!("/users/{id}/block")).await
    }

    async fn unblock_user(&self, id: UserId) -> ApiResult<User> {
        self.post(&format!("/users/{id}/unblock")).await
    }

    async fn remove_user(&self, id: UserId, reassign_to: UserId) -> ApiResult<()> {
        self.post_json_unit(
            &format!("/users/{id}/remove"),
            &json!({ "reassignToId": reassign_to }),
        )
        .await
    }

    async fn assign_role(&self, id: UserId, role: Role) -> ApiResult<UserWithRole> {
        self.post_json(&format!("/users/{id}/role"), &json!({ "role": role }))
            .await
    }

    async fn message_user(&self, id: UserId, message: &Note) -> ApiResult<()> {
        self.post_json_unit(&format!("/users/{id}/message"), &json!({ "message": message }))
            .await
    }
}
