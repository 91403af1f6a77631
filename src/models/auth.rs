//! Request extractors resolving the visitor's identity through the backend.
//!
//! The bearer token lives in the cookie session. Each extractor opens an
//! [`HttpApi`] bound to that session, restores the identity and applies the
//! layout gate of its shell.

use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::sync::Arc;

use actix_session::{Session as CookieSession, SessionExt};
use actix_web::dev::Payload;
use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, web};
use thiserror::Error;
use uuid::Uuid;

use crate::api::http::{ApiConnection, HttpApi};
use crate::api::token::TokenStore;
use crate::domain::user::UserWithRole;
use crate::models::config::ServerConfig;
use crate::navigation::{AppRoute, Language, LayoutDecision, admin_layout, main_layout};
use crate::services::Member;
use crate::services::notifications::{Inbox, Inboxes, open_inbox};
use crate::session::{Session, SessionState};

pub const TOKEN_KEY: &str = "token";
pub const LANGUAGE_KEY: &str = "language";
pub const SOUND_KEY: &str = "notification_sound";
pub const INBOX_KEY: &str = "inbox";

/// Keeps the bearer token in the signed session cookie.
pub struct SessionTokenStore {
    session: CookieSession,
}

impl SessionTokenStore {
    pub fn new(session: CookieSession) -> Self {
        Self { session }
    }
}

impl TokenStore for SessionTokenStore {
    fn load(&self) -> Option<String> {
        self.session.get::<String>(TOKEN_KEY).unwrap_or_else(|err| {
            log::warn!("Failed to read token from session: {err}");
            None
        })
    }

    fn save(&self, token: Option<&str>) {
        match token {
            Some(token) => {
                if let Err(err) = self.session.insert(TOKEN_KEY, token) {
                    log::error!("Failed to store token in session: {err}");
                }
            }
            None => {
                self.session.remove(TOKEN_KEY);
            }
        }
    }
}

/// Backend client of the current visitor.
pub type PortalApi = HttpApi<SessionTokenStore>;

#[derive(Debug, Error)]
pub enum GateError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("redirect to {}", .0.path())]
    Redirect(AppRoute),

    #[error("backend connection is not configured")]
    Misconfigured,
}

impl ResponseError for GateError {
    fn status_code(&self) -> StatusCode {
        match self {
            GateError::Unauthenticated => StatusCode::UNAUTHORIZED,
            GateError::Redirect(_) => StatusCode::SEE_OTHER,
            GateError::Misconfigured => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            GateError::Redirect(route) => HttpResponse::SeeOther()
                .insert_header((header::LOCATION, route.path()))
                .finish(),
            other => HttpResponse::build(other.status_code()).finish(),
        }
    }
}

/// Maps a gate decision onto the extractor outcome. Sign-in redirects become
/// 401 so the scope's [`crate::middleware::RedirectUnauthorized`] picks the
/// login page.
fn gate(decision: LayoutDecision) -> Result<(), GateError> {
    match decision {
        LayoutDecision::Render => Ok(()),
        LayoutDecision::Spinner => Err(GateError::Unauthenticated),
        LayoutDecision::Redirect(AppRoute::Login | AppRoute::AdminLogin) => {
            Err(GateError::Unauthenticated)
        }
        LayoutDecision::Redirect(route) => Err(GateError::Redirect(route)),
    }
}

pub fn open_api(req: &HttpRequest) -> Result<PortalApi, GateError> {
    let connection = req
        .app_data::<web::Data<ApiConnection>>()
        .ok_or(GateError::Misconfigured)?;
    Ok(connection.open(SessionTokenStore::new(req.get_session())))
}

/// Language picked in settings, or the configured default.
pub fn session_language(req: &HttpRequest) -> Language {
    let fallback = req
        .app_data::<web::Data<ServerConfig>>()
        .map(|config| config.default_language)
        .unwrap_or_default();
    req.get_session()
        .get::<Language>(LANGUAGE_KEY)
        .ok()
        .flatten()
        .unwrap_or(fallback)
}

/// Notification sound is on until switched off.
pub fn session_sound(req: &HttpRequest) -> bool {
    req.get_session()
        .get::<bool>(SOUND_KEY)
        .ok()
        .flatten()
        .unwrap_or(true)
}

/// Id of this session's notification inbox, created on first use.
fn session_inbox_id(req: &HttpRequest) -> Uuid {
    let session = req.get_session();
    if let Some(id) = session.get::<Uuid>(INBOX_KEY).ok().flatten() {
        return id;
    }
    let id = Uuid::new_v4();
    if let Err(err) = session.insert(INBOX_KEY, id) {
        log::error!("Failed to store inbox id in session: {err}");
    }
    id
}

/// Notification inbox of the session, filled from the backend when new.
async fn session_inbox(req: &HttpRequest, api: &PortalApi) -> Result<Arc<Inbox>, GateError> {
    let inboxes = req
        .app_data::<web::Data<Inboxes>>()
        .ok_or(GateError::Misconfigured)?;
    let (inbox, created) = inboxes.get_or_create(session_inbox_id(req));
    let sound = session_sound(req);
    if created {
        open_inbox(api, &inbox, sound).await;
    } else {
        inbox.set_sound(sound);
    }
    Ok(inbox)
}

/// Forgets the session's inbox; the next sign-in starts a fresh one.
pub fn drop_inbox(req: &HttpRequest) {
    let session = req.get_session();
    if let Some(id) = session.get::<Uuid>(INBOX_KEY).ok().flatten() {
        if let Some(inboxes) = req.app_data::<web::Data<Inboxes>>() {
            inboxes.remove(&id);
        }
        session.remove(INBOX_KEY);
    }
}

pub async fn restore_state(api: &PortalApi) -> SessionState {
    let mut session = Session::new(api);
    session.restore().await;
    session.state().clone()
}

impl FromRequest for PortalApi {
    type Error = GateError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(open_api(req))
    }
}

/// Company member admitted by the main layout.
pub struct MemberContext {
    pub api: PortalApi,
    pub member: Member,
    pub language: Language,
    pub notification_sound: bool,
    pub notifications: Arc<Inbox>,
}

impl FromRequest for MemberContext {
    type Error = GateError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let api = open_api(&req)?;
            let state = restore_state(&api).await;
            gate(main_layout(&state))?;
            let member = Member::from_state(&state).ok_or(GateError::Unauthenticated)?;
            let notifications = session_inbox(&req, &api).await?;

            Ok(MemberContext {
                api,
                member,
                language: session_language(&req),
                notification_sound: session_sound(&req),
                notifications,
            })
        })
    }
}

/// Platform administrator admitted by the admin layout.
pub struct AdminContext {
    pub api: PortalApi,
    pub admin: UserWithRole,
    pub language: Language,
}

impl FromRequest for AdminContext {
    type Error = GateError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let api = open_api(&req)?;
            let state = restore_state(&api).await;
            gate(admin_layout(&state))?;
            let admin = match state {
                SessionState::Authenticated { user, .. } => *user,
                _ => return Err(GateError::Unauthenticated),
            };

            Ok(AdminContext {
                api,
                admin,
                language: session_language(&req),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_in_redirects_become_unauthorized() {
        assert!(matches!(
            gate(LayoutDecision::Redirect(AppRoute::Login)),
            Err(GateError::Unauthenticated)
        ));
        assert!(matches!(
            gate(LayoutDecision::Redirect(AppRoute::CompanySetup)),
            Err(GateError::Redirect(AppRoute::CompanySetup))
        ));
        assert!(gate(LayoutDecision::Render).is_ok());
    }

    #[test]
    fn redirect_error_points_to_the_route() {
        let response = GateError::Redirect(AppRoute::AdminDashboard).error_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/admin/dashboard"
        );
    }
}
