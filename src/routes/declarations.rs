use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::api::sequencer::{ListSequencers, tab_token};
use crate::domain::types::{DeclarationId, GroupId};
use crate::dto::declarations::DeclarationsQuery;
use crate::forms::declarations::{AddDeclarationForm, GroupForm, GroupMembersForm, RedirectForm};
use crate::models::auth::MemberContext;
use crate::routes::{
    finish, member_context, page_error, page_link_suffix, parse_form, render_template,
};
use crate::services::declarations as declarations_service;

#[get("/declarations")]
pub async fn show_declarations(
    ctx: MemberContext,
    query: web::Query<DeclarationsQuery>,
    sequencers: web::Data<ListSequencers>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut filters = query.into_inner();
    let tab = tab_token(filters.tab.as_deref());
    filters.tab = Some(tab.to_string());
    let sequencer = sequencers.for_view(ctx.member.id(), "declarations", tab);

    match declarations_service::load_declarations_page(
        &ctx.api,
        &ctx.member,
        filters.clone(),
        &sequencer,
    )
    .await
    {
        Ok(Some(data)) => {
            let mut context = member_context(&ctx, &flash_messages, "/declarations");
            context.insert("declarations", &data.declarations);
            context.insert("groups", &data.groups);
            context.insert("clients", &data.clients);
            context.insert("employees", &data.employees);
            context.insert("modes", &data.modes);
            context.insert("vehicle_types", &data.vehicle_types);
            context.insert("can_filter_by_employee", &data.can_filter_by_employee);
            context.insert("search_query", &data.search_query);
            context.insert("owner", &data.owner);
            context.insert("tab", &tab);
            context.insert(
                "query_suffix",
                &page_link_suffix(&DeclarationsQuery {
                    page: None,
                    ..filters.clone()
                }),
            );
            context.insert("filters", &filters);

            render_template(&tera, "declarations/index.html", &context)
        }
        // A newer load of the same list is already in flight.
        Ok(None) => HttpResponse::NoContent().finish(),
        Err(err) => page_error(err, "/dashboard"),
    }
}

#[post("/declarations/add")]
pub async fn add_declaration(ctx: MemberContext, body: web::Bytes) -> impl Responder {
    let result = match parse_form::<AddDeclarationForm>(&body) {
        Ok(form) => declarations_service::create_declaration(&ctx.api, &ctx.member, form).await,
        Err(err) => Err(err),
    };
    finish(
        result,
        "Декларация добавлена.",
        "Ошибка при добавлении декларации",
        "/declarations",
    )
}

#[post("/declarations/{declaration_id}/delete")]
pub async fn delete_declaration(
    ctx: MemberContext,
    declaration_id: web::Path<DeclarationId>,
) -> impl Responder {
    let result = declarations_service::delete_declaration(
        &ctx.api,
        &ctx.member,
        declaration_id.into_inner(),
    )
    .await;
    finish(
        result,
        "Декларация удалена.",
        "Ошибка при удалении декларации",
        "/declarations",
    )
}

#[post("/declarations/{declaration_id}/redirect")]
pub async fn redirect_declaration(
    ctx: MemberContext,
    declaration_id: web::Path<DeclarationId>,
    web::Form(form): web::Form<RedirectForm>,
) -> impl Responder {
    let result = declarations_service::redirect_declaration(
        &ctx.api,
        &ctx.member,
        declaration_id.into_inner(),
        form,
    )
    .await;
    finish(
        result,
        "Декларация передана сотруднику.",
        "Ошибка при передаче декларации",
        "/declarations",
    )
}

#[post("/declarations/groups/add")]
pub async fn add_group(ctx: MemberContext, body: web::Bytes) -> impl Responder {
    let result = match parse_form::<GroupForm>(&body) {
        Ok(form) => declarations_service::create_group(&ctx.api, &ctx.member, form).await,
        Err(err) => Err(err),
    };
    finish(
        result,
        "Группа создана.",
        "Ошибка при создании группы",
        "/declarations",
    )
}

#[post("/declarations/groups/{group_id}/add")]
pub async fn add_to_group(
    ctx: MemberContext,
    group_id: web::Path<GroupId>,
    body: web::Bytes,
) -> impl Responder {
    let result = match parse_form::<GroupMembersForm>(&body) {
        Ok(form) => {
            declarations_service::add_to_group(&ctx.api, &ctx.member, group_id.into_inner(), form)
                .await
        }
        Err(err) => Err(err),
    };
    finish(
        result,
        "Декларации добавлены в группу.",
        "Ошибка при изменении группы",
        "/declarations",
    )
}

#[post("/declarations/groups/{group_id}/remove")]
pub async fn remove_from_group(
    ctx: MemberContext,
    group_id: web::Path<GroupId>,
    body: web::Bytes,
) -> impl Responder {
    let result = match parse_form::<GroupMembersForm>(&body) {
        Ok(form) => {
            declarations_service::remove_from_group(
                &ctx.api,
                &ctx.member,
                group_id.into_inner(),
                form,
            )
            .await
        }
        Err(err) => Err(err),
    };
    finish(
        result,
        "Декларации исключены из группы.",
        "Ошибка при изменении группы",
        "/declarations",
    )
}
