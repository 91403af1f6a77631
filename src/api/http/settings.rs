use serde_json::json;

use super::HttpApi;
use crate::api::token::TokenStore;
use crate::api::{ApiResult, SettingsApi};
use crate::domain::user::{UpdateUser, User};

impl<S: TokenStore> SettingsApi for HttpApi<S> {
    async fn update_profile(&self, update: &UpdateUser) -> ApiResult<User> {
        self.put_json("/settings/profile", update).await
    }

    async fn change_password(&self, old_password: &str, new_password: &str) -> ApiResult<()> {
        let body = json!({ "oldPassword": old_password, "newPassword": new_password });
        self.send_unit(
            self.request(reqwest::Method::PUT, "/settings/password")
                .json(&body),
        )
        .await
    }

    async fn verify_telegram_code(&self, code: &str) -> ApiResult<()> {
        self.post_json_unit("/settings/verify-telegram", &json!({ "code": code }))
            .await
    }
}
