//! Sign-in, registration, company onboarding and password recovery.

use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::api::{AuthApi, CompanyApi};
use crate::domain::company::NewCompany;
use crate::domain::types::{Email, Inn};
use crate::domain::user::{NewUser, Role};
use crate::forms::FormError;
use crate::forms::auth::{
    AdminLoginForm, AdminLoginPayload, ForgotPasswordForm, LoginForm, LoginPayload, RegisterForm,
    ResetPasswordForm, ResetPasswordPayload,
};
use crate::forms::company::{JoinCompanyForm, RegisterCompanyForm};
use crate::models::auth::{PortalApi, drop_inbox, restore_state, session_language};
use crate::navigation::{AppRoute, LayoutDecision, main_layout};
use crate::routes::{public_context, redirect, render_template};
use crate::session::{Session, SessionState};

/// Where a freshly signed-in user lands.
fn landing(state: &SessionState) -> &'static str {
    match main_layout(state) {
        LayoutDecision::Redirect(route) => route.path(),
        _ => AppRoute::Dashboard.path(),
    }
}

const ADMIN_LOGIN_FAILED: &str = "Не удалось войти. Попробуйте ещё раз.";
const NOT_AN_ADMIN: &str = "Учётная запись не является администратором.";

/// Why an admin sign-in with an accepted token still has to be refused.
fn admin_rejection(state: &SessionState) -> Option<&'static str> {
    match state {
        SessionState::Authenticated { user, .. } if user.role == Role::Admin => None,
        SessionState::Authenticated { .. } => Some(NOT_AN_ADMIN),
        _ => Some(ADMIN_LOGIN_FAILED),
    }
}

/// Form page of a reset token, with the token percent-encoded.
fn reset_password_path(token: &str) -> String {
    match serde_html_form::to_string(&[("token", token)]) {
        Ok(query) => format!("/reset-password?{query}"),
        Err(err) => {
            log::warn!("Failed to encode reset token: {err}");
            "/reset-password".to_string()
        }
    }
}

fn form_failed(err: FormError, back: &str) -> actix_web::HttpResponse {
    FlashMessage::error(err.to_string()).send();
    redirect(back)
}

#[get("/")]
pub async fn root() -> impl Responder {
    redirect(AppRoute::Login.path())
}

#[get("/login")]
pub async fn show_login(
    req: HttpRequest,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = public_context(&flash_messages, session_language(&req));
    render_template(&tera, "auth/login.html", &context)
}

#[post("/login")]
pub async fn login(
    req: HttpRequest,
    api: PortalApi,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    let payload = match LoginPayload::try_from(form) {
        Ok(payload) => payload,
        Err(err) => return form_failed(err, "/login"),
    };

    let mut session = Session::new(&api);
    match session.login(&payload.email, &payload.password).await {
        Ok(()) => {
            drop_inbox(&req);
            redirect(landing(session.state()))
        }
        Err(err) => {
            log::warn!("Login failed for {}: {err}", payload.email);
            FlashMessage::error(err.user_message()).send();
            redirect("/login")
        }
    }
}

#[get("/register")]
pub async fn show_register(
    req: HttpRequest,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = public_context(&flash_messages, session_language(&req));
    render_template(&tera, "auth/register.html", &context)
}

#[post("/register")]
pub async fn register(api: PortalApi, web::Form(form): web::Form<RegisterForm>) -> impl Responder {
    let new_user = match NewUser::try_from(form) {
        Ok(new_user) => new_user,
        Err(err) => return form_failed(err, "/register"),
    };

    let mut session = Session::new(&api);
    match session.register(&new_user).await {
        Ok(()) => {
            FlashMessage::success("Регистрация завершена.").send();
            redirect(landing(session.state()))
        }
        Err(err) => {
            log::warn!("Registration failed: {err}");
            FlashMessage::error(err.user_message()).send();
            redirect("/register")
        }
    }
}

#[get("/company-setup")]
pub async fn show_company_setup(
    req: HttpRequest,
    api: PortalApi,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let state = restore_state(&api).await;
    match &state {
        SessionState::Authenticated {
            user,
            company: None,
        } => {
            let mut context = public_context(&flash_messages, session_language(&req));
            context.insert("current_user", user);
            render_template(&tera, "auth/company_setup.html", &context)
        }
        SessionState::Authenticated { .. } => redirect(landing(&state)),
        _ => redirect("/login"),
    }
}

#[post("/company-setup/register")]
pub async fn register_company(
    api: PortalApi,
    web::Form(form): web::Form<RegisterCompanyForm>,
) -> impl Responder {
    let company = match NewCompany::try_from(form) {
        Ok(company) => company,
        Err(err) => return form_failed(err, "/company-setup"),
    };

    let mut session = Session::new(&api);
    session.restore().await;
    if !session.is_authenticated() {
        return redirect("/login");
    }

    match session.register_company(&company).await {
        Ok(company) => {
            log::info!("Company {} registered", company.id);
            FlashMessage::success("Компания зарегистрирована.").send();
            redirect(landing(session.state()))
        }
        Err(err) => {
            log::warn!("Company registration failed: {err}");
            FlashMessage::error(err.user_message()).send();
            redirect("/company-setup")
        }
    }
}

#[post("/company-setup/join")]
pub async fn join_company(
    api: PortalApi,
    web::Form(form): web::Form<JoinCompanyForm>,
) -> impl Responder {
    let inn = match Inn::try_from(form) {
        Ok(inn) => inn,
        Err(err) => return form_failed(err, "/company-setup"),
    };

    let mut session = Session::new(&api);
    session.restore().await;
    if !session.is_authenticated() {
        return redirect("/login");
    }

    let Some(company) = session.join_company(&inn).await else {
        FlashMessage::error("Компания с таким ИНН не найдена.").send();
        return redirect("/company-setup");
    };

    match api.join_company(&inn).await {
        Ok(_) => {
            FlashMessage::info(format!("Заявка на вступление в «{}» отправлена.", company.name))
                .send();
            redirect(AppRoute::PendingApproval.path())
        }
        Err(err) => {
            log::warn!("Failed to request joining company {}: {err}", company.id);
            FlashMessage::error(err.user_message()).send();
            redirect("/company-setup")
        }
    }
}

#[get("/pending-approval")]
pub async fn pending_approval(
    req: HttpRequest,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = public_context(&flash_messages, session_language(&req));
    render_template(&tera, "auth/pending_approval.html", &context)
}

#[get("/admin/login")]
pub async fn show_admin_login(
    req: HttpRequest,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = public_context(&flash_messages, session_language(&req));
    render_template(&tera, "auth/admin_login.html", &context)
}

#[post("/admin/login")]
pub async fn admin_login(
    api: PortalApi,
    web::Form(form): web::Form<AdminLoginForm>,
) -> impl Responder {
    let payload = match AdminLoginPayload::try_from(form) {
        Ok(payload) => payload,
        Err(err) => return form_failed(err, "/admin/login"),
    };

    let mut session = Session::new(&api);
    let result = session
        .admin_login(&payload.login, &payload.password, &payload.code)
        .await;
    match result {
        Ok(()) => match admin_rejection(session.state()) {
            None => redirect(AppRoute::AdminDashboard.path()),
            Some(message) => {
                if session.is_authenticated() {
                    session.logout().await;
                }
                FlashMessage::error(message).send();
                redirect("/admin/login")
            }
        },
        Err(err) => {
            log::warn!("Admin login failed for {}: {err}", payload.login);
            FlashMessage::error(err.user_message()).send();
            redirect("/admin/login")
        }
    }
}

#[post("/forgot-password")]
pub async fn forgot_password(
    api: PortalApi,
    web::Form(form): web::Form<ForgotPasswordForm>,
) -> impl Responder {
    let email = match Email::try_from(form) {
        Ok(email) => email,
        Err(err) => return form_failed(err, "/login"),
    };

    if let Err(err) = api.forgot_password(&email).await {
        log::warn!("Password recovery failed for {email}: {err}");
    }
    // Same answer whether the address is known or not.
    FlashMessage::info("Если адрес зарегистрирован, на него отправлено письмо.").send();
    redirect("/login")
}

#[derive(Deserialize)]
struct ResetQuery {
    token: Option<String>,
}

#[get("/reset-password")]
pub async fn show_reset_password(
    req: HttpRequest,
    query: web::Query<ResetQuery>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = public_context(&flash_messages, session_language(&req));
    context.insert("token", &query.token.clone().unwrap_or_default());
    render_template(&tera, "auth/reset_password.html", &context)
}

#[post("/reset-password")]
pub async fn reset_password(
    api: PortalApi,
    web::Form(form): web::Form<ResetPasswordForm>,
) -> impl Responder {
    let back = reset_password_path(&form.token);
    let payload = match ResetPasswordPayload::try_from(form) {
        Ok(payload) => payload,
        Err(err) => return form_failed(err, &back),
    };

    match api.reset_password(&payload.token, &payload.password).await {
        Ok(()) => {
            FlashMessage::success("Пароль изменён, войдите с новым паролем.").send();
            redirect("/login")
        }
        Err(err) => {
            log::warn!("Password reset failed: {err}");
            FlashMessage::error(err.user_message()).send();
            redirect(&back)
        }
    }
}

#[post("/logout")]
pub async fn logout(req: HttpRequest, api: PortalApi) -> impl Responder {
    let mut session = Session::new(&api);
    session.logout().await;
    drop_inbox(&req);
    redirect("/login")
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::domain::types::UserId;
    use crate::domain::user::{ActivityType, User, UserWithRole};

    fn signed_in(role: Role) -> SessionState {
        SessionState::Authenticated {
            user: Box::new(UserWithRole {
                user: User {
                    id: UserId::from_uuid(Uuid::new_v4()),
                    email: "root@example.com".to_string(),
                    full_name: "Platform Admin".to_string(),
                    phone: "+998900000000".to_string(),
                    activity_type: ActivityType::Declarant,
                    avatar_url: None,
                    company_id: None,
                    is_blocked: false,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                },
                role,
            }),
            company: None,
        }
    }

    #[test]
    fn admins_are_let_in() {
        assert_eq!(admin_rejection(&signed_in(Role::Admin)), None);
    }

    #[test]
    fn members_are_told_they_are_not_admins() {
        assert_eq!(
            admin_rejection(&signed_in(Role::Director)),
            Some(NOT_AN_ADMIN)
        );
    }

    #[test]
    fn lost_identity_is_a_plain_login_failure() {
        assert_eq!(
            admin_rejection(&SessionState::Unauthenticated),
            Some(ADMIN_LOGIN_FAILED)
        );
        assert_eq!(
            admin_rejection(&SessionState::Loading),
            Some(ADMIN_LOGIN_FAILED)
        );
    }

    #[test]
    fn reset_token_is_percent_encoded() {
        assert_eq!(
            reset_password_path("a&b#c d"),
            "/reset-password?token=a%26b%23c+d"
        );
        assert_eq!(reset_password_path("plain"), "/reset-password?token=plain");
    }
}
