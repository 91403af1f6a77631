//! Platform administration. Mounted under the `/admin` scope.

use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::types::{CompanyId, RequestId, UserId};
use crate::dto::admin::AdminListQuery;
use crate::dto::requests::RequestsQuery;
use crate::forms::admin::AdminMessageForm;
use crate::forms::employees::MessageForm;
use crate::models::auth::AdminContext;
use crate::routes::{admin_context, finish, page_error, render_template};
use crate::services::admin as admin_service;

const COMPANIES: &str = "/admin/companies";
const USERS: &str = "/admin/users";
const REQUESTS: &str = "/admin/requests";

#[get("/dashboard")]
pub async fn show_dashboard(
    ctx: AdminContext,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match admin_service::load_admin_dashboard(&ctx.api, &ctx.admin).await {
        Ok(data) => {
            let mut context = admin_context(&ctx, &flash_messages, "/admin/dashboard");
            context.insert("stats", &data.stats);
            render_template(&tera, "admin/dashboard.html", &context)
        }
        Err(err) => page_error(err, "/admin/login"),
    }
}

#[get("/companies")]
pub async fn show_companies(
    ctx: AdminContext,
    query: web::Query<AdminListQuery>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match admin_service::load_admin_companies(&ctx.api, &ctx.admin, query.into_inner()).await {
        Ok(data) => {
            let mut context = admin_context(&ctx, &flash_messages, COMPANIES);
            context.insert("companies", &data.companies);
            render_template(&tera, "admin/companies.html", &context)
        }
        Err(err) => page_error(err, "/admin/dashboard"),
    }
}

#[post("/companies/{company_id}/block")]
pub async fn block_company(ctx: AdminContext, company_id: web::Path<CompanyId>) -> impl Responder {
    let result = admin_service::block_company(&ctx.api, &ctx.admin, company_id.into_inner()).await;
    finish(
        result,
        "Компания заблокирована.",
        "Ошибка при блокировке компании",
        COMPANIES,
    )
}

#[post("/companies/{company_id}/unblock")]
pub async fn unblock_company(
    ctx: AdminContext,
    company_id: web::Path<CompanyId>,
) -> impl Responder {
    let result =
        admin_service::unblock_company(&ctx.api, &ctx.admin, company_id.into_inner()).await;
    finish(
        result,
        "Компания разблокирована.",
        "Ошибка при разблокировке компании",
        COMPANIES,
    )
}

#[post("/companies/{company_id}/delete")]
pub async fn delete_company(
    ctx: AdminContext,
    company_id: web::Path<CompanyId>,
) -> impl Responder {
    let result = admin_service::delete_company(&ctx.api, &ctx.admin, company_id.into_inner()).await;
    finish(
        result,
        "Компания удалена.",
        "Ошибка при удалении компании",
        COMPANIES,
    )
}

#[post("/companies/{company_id}/message")]
pub async fn message_company(
    ctx: AdminContext,
    company_id: web::Path<CompanyId>,
    web::Form(form): web::Form<MessageForm>,
) -> impl Responder {
    let result =
        admin_service::message_company(&ctx.api, &ctx.admin, company_id.into_inner(), form).await;
    finish(
        result,
        "Сообщение отправлено директору компании.",
        "Ошибка при отправке сообщения",
        COMPANIES,
    )
}

#[get("/users")]
pub async fn show_users(
    ctx: AdminContext,
    query: web::Query<AdminListQuery>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match admin_service::load_admin_users(&ctx.api, &ctx.admin, query.into_inner()).await {
        Ok(data) => {
            let mut context = admin_context(&ctx, &flash_messages, USERS);
            context.insert("users", &data.users);
            render_template(&tera, "admin/users.html", &context)
        }
        Err(err) => page_error(err, "/admin/dashboard"),
    }
}

#[post("/users/{user_id}/block")]
pub async fn block_user(ctx: AdminContext, user_id: web::Path<UserId>) -> impl Responder {
    let result = admin_service::block_user(&ctx.api, &ctx.admin, user_id.into_inner()).await;
    finish(
        result,
        "Пользователь заблокирован.",
        "Ошибка при блокировке пользователя",
        USERS,
    )
}

#[post("/users/{user_id}/unblock")]
pub async fn unblock_user(ctx: AdminContext, user_id: web::Path<UserId>) -> impl Responder {
    let result = admin_service::unblock_user(&ctx.api, &ctx.admin, user_id.into_inner()).await;
    finish(
        result,
        "Пользователь разблокирован.",
        "Ошибка при разблокировке пользователя",
        USERS,
    )
}

#[post("/users/message")]
pub async fn message_user(
    ctx: AdminContext,
    web::Form(form): web::Form<AdminMessageForm>,
) -> impl Responder {
    let result = admin_service::message_user(&ctx.api, &ctx.admin, form).await;
    finish(
        result,
        "Сообщение отправлено.",
        "Ошибка при отправке сообщения",
        USERS,
    )
}

#[get("/requests")]
pub async fn show_requests(
    ctx: AdminContext,
    query: web::Query<RequestsQuery>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match admin_service::load_admin_requests(&ctx.api, &ctx.admin, query.into_inner()).await {
        Ok(data) => {
            let mut context = admin_context(&ctx, &flash_messages, REQUESTS);
            context.insert("requests", &data.requests);
            context.insert("tabs", &data.tabs);
            render_template(&tera, "admin/requests.html", &context)
        }
        Err(err) => page_error(err, "/admin/dashboard"),
    }
}

#[post("/requests/{request_id}/accept")]
pub async fn accept_request(ctx: AdminContext, request_id: web::Path<RequestId>) -> impl Responder {
    let result = admin_service::accept_request(&ctx.api, &ctx.admin, request_id.into_inner()).await;
    finish(
        result,
        "Заявка одобрена.",
        "Ошибка при обработке заявки",
        REQUESTS,
    )
}

#[post("/requests/{request_id}/reject")]
pub async fn reject_request(ctx: AdminContext, request_id: web::Path<RequestId>) -> impl Responder {
    let result = admin_service::reject_request(&ctx.api, &ctx.admin, request_id.into_inner()).await;
    finish(
        result,
        "Заявка отклонена.",
        "Ошибка при обработке заявки",
        REQUESTS,
    )
}
