use super::HttpApi;
use crate::api::token::TokenStore;
use crate::api::{ApiResult, NotificationApi};
use crate::domain::notification::Notification;
use crate::domain::types::NotificationId;

impl<S: TokenStore> NotificationApi for HttpApi<S> {
    async fn list_notifications(&self) -> ApiResult<Vec<Notification>> {
        self.get("/notifications").await
    }

    async fn mark_notification_read(&self, id: NotificationId) -> ApiResult<Notification> {
        self.post(&format!("/notifications/{id}/read")).await
    }

    async fn mark_all_notifications_read(&self) -> ApiResult<()> {
        self.post_unit("/notifications/read-all").await
    }
}
