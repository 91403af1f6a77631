use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use serde::Deserialize;
use tera::Tera;

use crate::domain::types::PartnershipId;
use crate::forms::partners::PartnershipRequestForm;
use crate::models::auth::MemberContext;
use crate::routes::{finish, member_context, page_error, render_template};
use crate::services::partners as partners_service;

#[derive(Deserialize)]
struct LookupQuery {
    inn: Option<String>,
}

#[get("/partners")]
pub async fn show_partners(
    ctx: MemberContext,
    query: web::Query<LookupQuery>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let lookup = query.into_inner().inn;
    match partners_service::load_partners_page(&ctx.api, &ctx.member, lookup).await {
        Ok(data) => {
            let mut context = member_context(&ctx, &flash_messages, "/partners");
            context.insert("partnerships", &data.partnerships);
            context.insert("found", &data.found);
            context.insert("lookup_inn", &data.lookup_inn);

            render_template(&tera, "partners/index.html", &context)
        }
        Err(err) => page_error(err, "/dashboard"),
    }
}

#[post("/partners/request")]
pub async fn request_partnership(
    ctx: MemberContext,
    web::Form(form): web::Form<PartnershipRequestForm>,
) -> impl Responder {
    let result = partners_service::request_partnership(&ctx.api, &ctx.member, form).await;
    finish(
        result,
        "Запрос на партнёрство отправлен.",
        "Ошибка при отправке запроса",
        "/partners",
    )
}

#[post("/partners/{partnership_id}/accept")]
pub async fn accept_partnership(
    ctx: MemberContext,
    partnership_id: web::Path<PartnershipId>,
) -> impl Responder {
    let result =
        partners_service::accept_partnership(&ctx.api, &ctx.member, partnership_id.into_inner())
            .await;
    finish(
        result,
        "Партнёрство подтверждено.",
        "Ошибка при подтверждении партнёрства",
        "/partners",
    )
}

#[post("/partners/{partnership_id}/reject")]
pub async fn reject_partnership(
    ctx: MemberContext,
    partnership_id: web::Path<PartnershipId>,
) -> impl Responder {
    let result =
        partners_service::reject_partnership(&ctx.api, &ctx.member, partnership_id.into_inner())
            .await;
    finish(
        result,
        "Запрос отклонён.",
        "Ошибка при отклонении запроса",
        "/partners",
    )
}

#[post("/partners/{partnership_id}/remove")]
pub async fn remove_partnership(
    ctx: MemberContext,
    partnership_id: web::Path<PartnershipId>,
) -> impl Responder {
    let result =
        partners_service::remove_partnership(&ctx.api, &ctx.member, partnership_id.into_inner())
            .await;
    finish(
        result,
        "Партнёрство прекращено.",
        "Ошибка при удалении партнёрства",
        "/partners",
    )
}
