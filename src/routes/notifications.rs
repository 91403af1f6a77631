//! Notification bell actions. Each one returns to the page it was triggered from.

use actix_session::Session as CookieSession;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, Responder, post, web};
use actix_web_flash_messages::FlashMessage;

use crate::domain::types::NotificationId;
use crate::models::auth::{MemberContext, SOUND_KEY};
use crate::routes::redirect;
use crate::services::notifications as notifications_service;

/// Only same-site paths are followed back.
fn back(req: &HttpRequest) -> HttpResponse {
    let location = req
        .headers()
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .and_then(|referer| {
            let host = req.connection_info().host().to_string();
            referer
                .split_once(&host)
                .map(|(_, path)| path.to_string())
                .filter(|path| path.starts_with('/') && !path.starts_with("//"))
        })
        .unwrap_or_else(|| "/dashboard".to_string());
    redirect(&location)
}

#[post("/notifications/{notification_id}/read")]
pub async fn mark_read(
    req: HttpRequest,
    ctx: MemberContext,
    notification_id: web::Path<NotificationId>,
) -> impl Responder {
    let id = notification_id.into_inner();
    if let Err(err) = notifications_service::mark_read(&ctx.api, &ctx.notifications, id).await {
        FlashMessage::error(format!("Не удалось отметить уведомление: {err}")).send();
    }
    back(&req)
}

#[post("/notifications/read-all")]
pub async fn mark_all_read(req: HttpRequest, ctx: MemberContext) -> impl Responder {
    if let Err(err) = notifications_service::mark_all_read(&ctx.api, &ctx.notifications).await {
        FlashMessage::error(format!("Не удалось отметить уведомления: {err}")).send();
    }
    back(&req)
}

#[post("/notifications/sound")]
pub async fn toggle_sound(
    req: HttpRequest,
    ctx: MemberContext,
    session: CookieSession,
) -> impl Responder {
    let enabled = notifications_service::toggle_sound(&ctx.notifications);
    if let Err(err) = session.insert(SOUND_KEY, enabled) {
        log::error!("Failed to store notification sound preference: {err}");
    }
    back(&req)
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;

    #[test]
    fn returns_to_the_referring_page() {
        let req = TestRequest::default()
            .insert_header((header::HOST, "portal.local"))
            .insert_header((header::REFERER, "http://portal.local/tasks?status=new"))
            .to_http_request();
        let response = back(&req);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/tasks?status=new"
        );
    }

    #[test]
    fn foreign_referer_falls_back_to_dashboard() {
        let req = TestRequest::default()
            .insert_header((header::HOST, "portal.local"))
            .insert_header((header::REFERER, "https://elsewhere.example/phish"))
            .to_http_request();
        let response = back(&req);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/dashboard"
        );
    }
}
