//! HTTP handlers and the helpers they share.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tera::{Context, Tera};

use crate::models::auth::{AdminContext, MemberContext, session_language};
use crate::navigation::menu::{admin_menu, menu_entries};
use crate::navigation::{Language, visible_menu};
use crate::services::{ServiceError, ServiceResult};

pub mod admin;
pub mod auth;
pub mod certificates;
pub mod clients;
pub mod dashboard;
pub mod declarations;
pub mod documents;
pub mod employees;
pub mod notifications;
pub mod partners;
pub mod requests;
pub mod settings;
pub mod tasks;

pub const FORBIDDEN_MESSAGE: &str = "Недостаточно прав.";

/// Maps flash message levels onto Bootstrap alert classes.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn alerts(flash_messages: &IncomingFlashMessages) -> Vec<(String, &'static str)> {
    flash_messages
        .iter()
        .map(|f| (f.content().to_string(), alert_level_to_str(&f.level())))
        .collect()
}

/// Context of the public pages (sign-in, registration, onboarding).
pub fn public_context(flash_messages: &IncomingFlashMessages, language: Language) -> Context {
    let mut context = Context::new();
    context.insert("alerts", &alerts(flash_messages));
    context.insert("language", &language);
    context
}

/// Context of the sidebar layout: current user, menu and the notification bell.
pub fn member_context(
    ctx: &MemberContext,
    flash_messages: &IncomingFlashMessages,
    current_path: &str,
) -> Context {
    let mut context = public_context(flash_messages, ctx.language);
    let menu = visible_menu(&ctx.member.user);
    let notifications = ctx.notifications.menu();

    context.insert("current_user", &ctx.member.user);
    context.insert("company", &ctx.member.company);
    context.insert("current_path", current_path);
    context.insert("menu", &menu_entries(&menu, current_path, ctx.language));
    context.insert("notifications", &notifications);
    context
}

pub fn admin_context(
    ctx: &AdminContext,
    flash_messages: &IncomingFlashMessages,
    current_path: &str,
) -> Context {
    let mut context = public_context(flash_messages, ctx.language);
    context.insert("current_user", &ctx.admin);
    context.insert("current_path", current_path);
    context.insert(
        "menu",
        &menu_entries(admin_menu(), current_path, ctx.language),
    );
    context
}

/// Decodes an urlencoded body with repeated keys (`ids=a&ids=b`).
pub fn parse_form<T: DeserializeOwned>(body: &web::Bytes) -> Result<T, ServiceError> {
    serde_html_form::from_bytes(body).map_err(|err| {
        log::warn!("Failed to parse form body: {err}");
        ServiceError::Form("Некорректные данные формы".to_string())
    })
}

/// Filters of a list page as the tail of its page links (`&search=..&tab=..`).
pub fn page_link_suffix<T: Serialize>(filters: &T) -> String {
    match serde_html_form::to_string(filters) {
        Ok(query) if query.is_empty() => String::new(),
        Ok(query) => format!("&{query}"),
        Err(err) => {
            log::warn!("Failed to encode list filters: {err}");
            String::new()
        }
    }
}

/// Response of a page that failed to load.
pub fn page_error(err: ServiceError, fallback: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            FlashMessage::error(FORBIDDEN_MESSAGE).send();
            redirect(fallback)
        }
        ServiceError::NotFound => {
            FlashMessage::error("Запись не найдена.").send();
            redirect(fallback)
        }
        ServiceError::Form(message) | ServiceError::Api(message) => {
            FlashMessage::error(message).send();
            redirect(fallback)
        }
        err => {
            log::error!("Failed to load page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Flashes the outcome of a mutation and redirects back to `back`.
pub fn finish<T>(result: ServiceResult<T>, success: &str, failure: &str, back: &str) -> HttpResponse {
    match result {
        Ok(_) => {
            FlashMessage::success(success).send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error(FORBIDDEN_MESSAGE).send();
        }
        Err(ServiceError::Form(message)) | Err(ServiceError::Api(message)) => {
            FlashMessage::error(message).send();
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Запись не найдена.").send();
        }
        Err(err) => {
            log::error!("{failure}: {err}");
            FlashMessage::error(failure).send();
        }
    }
    redirect(back)
}

/// Fallback for paths no handler claims.
pub async fn not_found(
    req: HttpRequest,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> HttpResponse {
    log::debug!("No route for {}", req.path());
    let mut context = public_context(&flash_messages, session_language(&req));
    context.insert("path", req.path());
    match tera.render("not_found.html", &context) {
        Ok(body) => HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template 'not_found.html': {err}");
            HttpResponse::NotFound().finish()
        }
    }
}
