use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::types::RequestId;
use crate::dto::requests::RequestsQuery;
use crate::models::auth::MemberContext;
use crate::routes::{finish, member_context, page_error, render_template};
use crate::services::requests as requests_service;

#[get("/requests")]
pub async fn show_requests(
    ctx: MemberContext,
    query: web::Query<RequestsQuery>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match requests_service::load_requests_page(&ctx.api, &ctx.member, query.into_inner()).await {
        Ok(data) => {
            let mut context = member_context(&ctx, &flash_messages, "/requests");
            context.insert("requests", &data.requests);
            context.insert("tabs", &data.tabs);
            context.insert("pending_count", &data.pending_count);

            render_template(&tera, "requests/index.html", &context)
        }
        Err(err) => page_error(err, "/dashboard"),
    }
}

#[post("/requests/{request_id}/accept")]
pub async fn accept_request(ctx: MemberContext, request_id: web::Path<RequestId>) -> impl Responder {
    let result =
        requests_service::accept_request(&ctx.api, &ctx.member, request_id.into_inner()).await;
    finish(
        result,
        "Заявка принята.",
        "Ошибка при обработке заявки",
        "/requests",
    )
}

#[post("/requests/{request_id}/reject")]
pub async fn reject_request(ctx: MemberContext, request_id: web::Path<RequestId>) -> impl Responder {
    let result =
        requests_service::reject_request(&ctx.api, &ctx.member, request_id.into_inner()).await;
    finish(
        result,
        "Заявка отклонена.",
        "Ошибка при обработке заявки",
        "/requests",
    )
}
