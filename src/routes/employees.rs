use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::types::UserId;
use crate::forms::employees::{AssignRoleForm, MessageForm, RemoveEmployeeForm};
use crate::models::auth::MemberContext;
use crate::routes::{finish, member_context, page_error, render_template};
use crate::services::employees as employees_service;

const BACK: &str = "/employees";

#[get("/employees")]
pub async fn show_employees(
    ctx: MemberContext,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match employees_service::load_employees_page(&ctx.api, &ctx.member).await {
        Ok(data) => {
            let mut context = member_context(&ctx, &flash_messages, BACK);
            context.insert("employees", &data.employees);
            context.insert("roles", &data.roles);
            context.insert("reassign_targets", &data.reassign_targets);
            context.insert("can_manage_roles", &data.can_manage_roles);

            render_template(&tera, "employees/index.html", &context)
        }
        Err(err) => page_error(err, "/dashboard"),
    }
}

#[post("/employees/{user_id}/role")]
pub async fn assign_role(
    ctx: MemberContext,
    user_id: web::Path<UserId>,
    web::Form(form): web::Form<AssignRoleForm>,
) -> impl Responder {
    let result =
        employees_service::assign_role(&ctx.api, &ctx.member, user_id.into_inner(), form).await;
    finish(
        result,
        "Роль сотрудника изменена.",
        "Ошибка при изменении роли",
        BACK,
    )
}

#[post("/employees/{user_id}/block")]
pub async fn block_employee(ctx: MemberContext, user_id: web::Path<UserId>) -> impl Responder {
    let result =
        employees_service::block_employee(&ctx.api, &ctx.member, user_id.into_inner()).await;
    finish(
        result,
        "Сотрудник заблокирован.",
        "Ошибка при блокировке сотрудника",
        BACK,
    )
}

#[post("/employees/{user_id}/unblock")]
pub async fn unblock_employee(ctx: MemberContext, user_id: web::Path<UserId>) -> impl Responder {
    let result =
        employees_service::unblock_employee(&ctx.api, &ctx.member, user_id.into_inner()).await;
    finish(
        result,
        "Сотрудник разблокирован.",
        "Ошибка при разблокировке сотрудника",
        BACK,
    )
}

#[post("/employees/{user_id}/remove")]
pub async fn remove_employee(
    ctx: MemberContext,
    user_id: web::Path<UserId>,
    web::Form(form): web::Form<RemoveEmployeeForm>,
) -> impl Responder {
    let result =
        employees_service::remove_employee(&ctx.api, &ctx.member, user_id.into_inner(), form)
            .await;
    finish(
        result,
        "Сотрудник удалён из компании.",
        "Ошибка при удалении сотрудника",
        BACK,
    )
}

#[post("/employees/{user_id}/message")]
pub async fn message_employee(
    ctx: MemberContext,
    user_id: web::Path<UserId>,
    web::Form(form): web::Form<MessageForm>,
) -> impl Responder {
    let result =
        employees_service::message_employee(&ctx.api, &ctx.member, user_id.into_inner(), form)
            .await;
    finish(
        result,
        "Сообщение отправлено.",
        "Ошибка при отправке сообщения",
        BACK,
    )
}
