use actix_multipart::form::MultipartForm;
use actix_session::Session as CookieSession;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::document::Upload;
use crate::forms::settings::{
    AvatarForm, ChangePasswordForm, EmailForm, LanguageForm, ProfileForm, TelegramCodeForm,
};
use crate::models::auth::{LANGUAGE_KEY, MemberContext};
use crate::routes::{finish, member_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::settings as settings_service;

const BACK: &str = "/settings";

#[get("/settings")]
pub async fn show_settings(
    ctx: MemberContext,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data =
        settings_service::load_settings_page(&ctx.member.user, ctx.language, ctx.notification_sound);

    let mut context = member_context(&ctx, &flash_messages, BACK);
    context.insert("user", &data.user);
    context.insert("initials", &data.initials);
    context.insert("languages", &data.languages);
    context.insert("notification_sound", &data.notification_sound);

    render_template(&tera, "settings/index.html", &context)
}

#[post("/settings/profile")]
pub async fn update_profile(
    ctx: MemberContext,
    web::Form(form): web::Form<ProfileForm>,
) -> impl Responder {
    let result = settings_service::update_profile(&ctx.api, form).await;
    finish(
        result,
        "Профиль обновлён.",
        "Ошибка при обновлении профиля",
        BACK,
    )
}

#[post("/settings/email")]
pub async fn update_email(
    ctx: MemberContext,
    web::Form(form): web::Form<EmailForm>,
) -> impl Responder {
    let result = settings_service::update_email(&ctx.api, form).await;
    finish(
        result,
        "Адрес электронной почты изменён.",
        "Ошибка при изменении почты",
        BACK,
    )
}

#[post("/settings/avatar")]
pub async fn upload_avatar(
    ctx: MemberContext,
    MultipartForm(form): MultipartForm<AvatarForm>,
) -> impl Responder {
    let result = match Upload::try_from(form) {
        Ok(avatar) => settings_service::upload_avatar(&ctx.api, &ctx.member.user, avatar).await,
        Err(err) => Err(ServiceError::from(err)),
    };
    finish(
        result,
        "Фотография профиля обновлена.",
        "Ошибка при загрузке фотографии",
        BACK,
    )
}

#[post("/settings/password")]
pub async fn change_password(
    ctx: MemberContext,
    web::Form(form): web::Form<ChangePasswordForm>,
) -> impl Responder {
    let result = settings_service::change_password(&ctx.api, form).await;
    finish(
        result,
        "Пароль изменён.",
        "Ошибка при изменении пароля",
        BACK,
    )
}

#[post("/settings/telegram")]
pub async fn verify_telegram_code(
    ctx: MemberContext,
    web::Form(form): web::Form<TelegramCodeForm>,
) -> impl Responder {
    let result = settings_service::verify_telegram_code(&ctx.api, form).await;
    finish(
        result,
        "Telegram подключён.",
        "Ошибка при подключении Telegram",
        BACK,
    )
}

#[post("/settings/language")]
pub async fn change_language(
    session: CookieSession,
    web::Form(form): web::Form<LanguageForm>,
) -> impl Responder {
    match settings_service::change_language(form) {
        Ok(language) => {
            if let Err(err) = session.insert(LANGUAGE_KEY, language) {
                log::error!("Failed to store language in session: {err}");
                FlashMessage::error("Не удалось сохранить язык.").send();
            }
        }
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
        }
    }
    redirect(BACK)
}
