use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::api::sequencer::{ListSequencers, tab_token};
use crate::domain::types::TaskId;
use crate::dto::tasks::TasksQuery;
use crate::forms::tasks::{AddTaskForm, TaskStatusForm};
use crate::models::auth::MemberContext;
use crate::routes::{
    finish, member_context, page_error, page_link_suffix, parse_form, render_template,
};
use crate::services::tasks as tasks_service;

#[get("/tasks")]
pub async fn show_tasks(
    ctx: MemberContext,
    query: web::Query<TasksQuery>,
    sequencers: web::Data<ListSequencers>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut filters = query.into_inner();
    let tab = tab_token(filters.tab.as_deref());
    filters.tab = Some(tab.to_string());
    let sequencer = sequencers.for_view(ctx.member.id(), "tasks", tab);
    let suffix = page_link_suffix(&TasksQuery {
        page: None,
        ..filters.clone()
    });

    match tasks_service::load_tasks_page(&ctx.api, &ctx.member, filters, &sequencer).await {
        Ok(Some(data)) => {
            let mut context = member_context(&ctx, &flash_messages, "/tasks");
            context.insert("tasks", &data.tasks);
            context.insert("statuses", &data.statuses);
            context.insert("priorities", &data.priorities);
            context.insert("companies", &data.companies);
            context.insert("employees", &data.employees);
            context.insert("can_filter_by_employee", &data.can_filter_by_employee);
            context.insert("search_query", &data.search_query);
            context.insert("status", &data.status);
            context.insert("priority", &data.priority);
            context.insert("owner", &data.owner);
            context.insert("tab", &tab);
            context.insert("query_suffix", &suffix);

            render_template(&tera, "tasks/index.html", &context)
        }
        Ok(None) => HttpResponse::NoContent().finish(),
        Err(err) => page_error(err, "/dashboard"),
    }
}

#[post("/tasks/add")]
pub async fn add_task(ctx: MemberContext, body: web::Bytes) -> impl Responder {
    let result = match parse_form::<AddTaskForm>(&body) {
        Ok(form) => tasks_service::create_task(&ctx.api, &ctx.member, form).await,
        Err(err) => Err(err),
    };
    finish(
        result,
        "Задача создана.",
        "Ошибка при создании задачи",
        "/tasks",
    )
}

#[post("/tasks/{task_id}/status")]
pub async fn change_task_status(
    ctx: MemberContext,
    task_id: web::Path<TaskId>,
    web::Form(form): web::Form<TaskStatusForm>,
) -> impl Responder {
    let result = tasks_service::change_task_status(&ctx.api, task_id.into_inner(), form).await;
    finish(
        result,
        "Статус задачи изменён.",
        "Ошибка при изменении статуса задачи",
        "/tasks",
    )
}

#[post("/tasks/{task_id}/delete")]
pub async fn delete_task(ctx: MemberContext, task_id: web::Path<TaskId>) -> impl Responder {
    let result = tasks_service::delete_task(&ctx.api, &ctx.member, task_id.into_inner()).await;
    finish(
        result,
        "Задача удалена.",
        "Ошибка при удалении задачи",
        "/tasks",
    )
}
