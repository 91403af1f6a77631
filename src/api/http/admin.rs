use serde_json::json;

use super::HttpApi;
use crate::api::token::TokenStore;
use crate::api::{AdminApi, ApiResult};
use crate::domain::dashboard::AdminStats;
use crate::domain::request::Request;
use crate::domain::types::{Note, UserId};

impl<S: TokenStore> AdminApi for HttpApi<S> {
    async fn admin_stats(&self) -> ApiResult<AdminStats> {
        self.get("/admin/stats").await
    }

    async fn admin_requests(&self) -> ApiResult<Vec<Request>> {
        self.get("/admin/requests").await
    }

    async fn admin_message(&self, user_id: UserId, message: &Note) -> ApiResult<()> {
        self.post_json_unit(
            "/admin/message",
            &json!({ "userId": user_id, "message": message }),
        )
        .await
    }
}
