use serde_json::json;

use super::HttpApi;
use crate::api::token::TokenStore;
use crate::api::{ApiResult, AuthApi};
use crate::domain::types::{Email, TwoFactorCode};
use crate::domain::user::{AuthGrant, NewUser, TokenGrant, User, UserWithRole};

impl<S: TokenStore> AuthApi for HttpApi<S> {
    async fn login(&self, email: &Email, password: &str) -> ApiResult<AuthGrant<UserWithRole>> {
        self.post_json(
            "/auth/login",
            &json!({ "email": email.as_str(), "password": password }),
        )
        .await
    }

    async fn register(&self, new_user: &NewUser) -> ApiResult<AuthGrant<User>> {
        self.post_json("/auth/register", new_user).await
    }

    async fn logout(&self) -> ApiResult<()> {
        self.post_unit("/auth/logout").await
    }

    async fn me(&self) -> ApiResult<UserWithRole> {
        self.get("/auth/me").await
    }

    async fn forgot_password(&self, email: &Email) -> ApiResult<()> {
        self.post_json_unit("/auth/forgot-password", &json!({ "email": email.as_str() }))
            .await
    }

    async fn reset_password(&self, token: &str, password: &str) -> ApiResult<()> {
        self.post_json_unit(
            "/auth/reset-password",
            &json!({ "token": token, "password": password }),
        )
        .await
    }

    async fn admin_login(
        &self,
        login: &str,
        password: &str,
        code: &TwoFactorCode,
    ) -> ApiResult<TokenGrant> {
        self.post_json(
            "/auth/admin/login",
            &json!({ "login": login, "password": password, "code": code.as_str() }),
        )
        .await
    }
}
