use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::dto::dashboard::DashboardQuery;
use crate::models::auth::MemberContext;
use crate::routes::{member_context, page_error, render_template};
use crate::services::dashboard as dashboard_service;

#[get("/dashboard")]
pub async fn show_dashboard(
    ctx: MemberContext,
    query: web::Query<DashboardQuery>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match dashboard_service::load_dashboard(&ctx.api, &ctx.member, query.into_inner()).await {
        Ok(data) => {
            let mut context = member_context(&ctx, &flash_messages, "/dashboard");
            context.insert("stats", &data.stats);
            context.insert("recent_declarations", &data.recent_declarations);
            context.insert("recent_certificates", &data.recent_certificates);
            context.insert("show_declarations", &data.show_declarations);
            context.insert("employees", &data.employees);
            context.insert("selected_employee", &data.selected_employee);
            context.insert("period_from", &data.period_from);
            context.insert("period_to", &data.period_to);

            render_template(&tera, "dashboard/index.html", &context)
        }
        Err(err) => page_error(err, "/settings"),
    }
}
