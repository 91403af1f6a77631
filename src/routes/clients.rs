use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::types::ClientId;
use crate::dto::clients::ClientsQuery;
use crate::forms::clients::ClientForm;
use crate::models::auth::MemberContext;
use crate::routes::{finish, member_context, page_error, parse_form, render_template};
use crate::services::clients as clients_service;

#[get("/clients")]
pub async fn show_clients(
    ctx: MemberContext,
    query: web::Query<ClientsQuery>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match clients_service::load_clients_page(&ctx.api, &ctx.member, query.into_inner()).await {
        Ok(data) => {
            let mut context = member_context(&ctx, &flash_messages, "/clients");
            context.insert("clients", &data.clients);
            context.insert("employees", &data.employees);
            context.insert("search_query", &data.search_query);

            render_template(&tera, "clients/index.html", &context)
        }
        Err(err) => page_error(err, "/dashboard"),
    }
}

#[post("/clients/add")]
pub async fn add_client(ctx: MemberContext, body: web::Bytes) -> impl Responder {
    let result = match parse_form::<ClientForm>(&body) {
        Ok(form) => clients_service::create_client(&ctx.api, form).await,
        Err(err) => Err(err),
    };
    finish(
        result,
        "Клиент добавлен.",
        "Ошибка при добавлении клиента",
        "/clients",
    )
}

#[post("/clients/{client_id}/update")]
pub async fn update_client(
    ctx: MemberContext,
    client_id: web::Path<ClientId>,
    body: web::Bytes,
) -> impl Responder {
    let result = match parse_form::<ClientForm>(&body) {
        Ok(form) => clients_service::update_client(&ctx.api, client_id.into_inner(), form).await,
        Err(err) => Err(err),
    };
    finish(
        result,
        "Клиент обновлён.",
        "Ошибка при обновлении клиента",
        "/clients",
    )
}

#[post("/clients/{client_id}/delete")]
pub async fn delete_client(ctx: MemberContext, client_id: web::Path<ClientId>) -> impl Responder {
    let result = clients_service::delete_client(&ctx.api, client_id.into_inner()).await;
    finish(
        result,
        "Клиент удалён.",
        "Ошибка при удалении клиента",
        "/clients",
    )
}
