//! Authenticated session of one visitor.
//!
//! A [`Session`] starts in [`SessionState::Loading`] and settles on
//! `Authenticated` or `Unauthenticated` once [`Session::restore`] has asked
//! the backend who the cached token belongs to. Role predicates are derived
//! from the stored user on every call and never cached.

use crate::api::errors::GENERIC_FAILURE;
use crate::api::{ApiError, ApiResult, AuthApi, BearerAuth, CompanyApi};
use crate::domain::company::{Company, NewCompany};
use crate::domain::types::{Email, Inn, TwoFactorCode};
use crate::domain::user::{NewUser, Role, UserWithRole};

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";
pub const COMPANY_REGISTRATION_FAILED: &str = "Company registration failed";

#[derive(Clone, Debug, PartialEq)]
pub enum SessionState {
    Loading,
    Authenticated {
        user: Box<UserWithRole>,
        company: Option<Company>,
    },
    Unauthenticated,
}

pub struct Session<'a, A> {
    api: &'a A,
    state: SessionState,
}

/// Replaces the generic envelope fallback with an operation specific one.
fn rejected_with(err: ApiError, fallback: &str) -> ApiError {
    match err {
        ApiError::Rejected(message) if message == GENERIC_FAILURE => {
            ApiError::Rejected(fallback.to_string())
        }
        other => other,
    }
}

impl<'a, A> Session<'a, A>
where
    A: BearerAuth + AuthApi + CompanyApi,
{
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            state: SessionState::Loading,
        }
    }

    /// Builds a session from an already known identity.
    pub fn authenticated(api: &'a A, user: UserWithRole, company: Option<Company>) -> Self {
        Self {
            api,
            state: SessionState::Authenticated {
                user: Box::new(user),
                company,
            },
        }
    }

    pub fn api(&self) -> &'a A {
        self.api
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Resolves the cached token into a user and company.
    ///
    /// Without a token the session becomes unauthenticated right away. Any
    /// backend failure demotes it silently and clears the token.
    pub async fn restore(&mut self) {
        if self.api.token().is_none() {
            self.state = SessionState::Unauthenticated;
            return;
        }
        self.refresh_user().await;
    }

    pub async fn refresh_user(&mut self) {
        match self.api.me().await {
            Ok(user) => {
                let company = self.fetch_company(&user).await;
                self.state = SessionState::Authenticated {
                    user: Box::new(user),
                    company,
                };
            }
            Err(err) => {
                log::warn!("Failed to refresh user: {err}");
                self.api.set_token(None);
                self.state = SessionState::Unauthenticated;
            }
        }
    }

    async fn fetch_company(&self, user: &UserWithRole) -> Option<Company> {
        let company_id = user.user.company_id?;
        match self.api.get_company(company_id).await {
            Ok(company) => Some(company),
            Err(err) => {
                log::warn!("Failed to fetch company {company_id}: {err}");
                None
            }
        }
    }

    pub async fn login(&mut self, email: &Email, password: &str) -> ApiResult<()> {
        let grant = self
            .api
            .login(email, password)
            .await
            .map_err(|err| rejected_with(err, LOGIN_FAILED))?;
        self.api.set_token(Some(grant.token));
        let company = self.fetch_company(&grant.user).await;
        self.state = SessionState::Authenticated {
            user: Box::new(grant.user),
            company,
        };
        Ok(())
    }

    /// Creates the account and logs in with the issued token.
    pub async fn register(&mut self, new_user: &NewUser) -> ApiResult<()> {
        let grant = self
            .api
            .register(new_user)
            .await
            .map_err(|err| rejected_with(err, REGISTRATION_FAILED))?;
        self.api.set_token(Some(grant.token));
        self.refresh_user().await;
        Ok(())
    }

    /// Exchanges admin credentials and a 2FA code for a token.
    pub async fn admin_login(
        &mut self,
        login: &str,
        password: &str,
        code: &TwoFactorCode,
    ) -> ApiResult<()> {
        let grant = self
            .api
            .admin_login(login, password, code)
            .await
            .map_err(|err| rejected_with(err, LOGIN_FAILED))?;
        self.api.set_token(Some(grant.token));
        self.refresh_user().await;
        Ok(())
    }

    /// Best effort: the local token is dropped whatever the backend says.
    pub async fn logout(&mut self) {
        if let Err(err) = self.api.logout().await {
            log::warn!("Failed to log out on the backend: {err}");
        }
        self.api.set_token(None);
        self.state = SessionState::Unauthenticated;
    }

    pub async fn register_company(&mut self, company: &NewCompany) -> ApiResult<Company> {
        let company = self
            .api
            .register_company(company)
            .await
            .map_err(|err| rejected_with(err, COMPANY_REGISTRATION_FAILED))?;
        self.set_company(Some(company.clone()));
        self.refresh_user().await;
        Ok(company)
    }

    /// Looks a company up by INN; `None` when nothing is registered under it.
    pub async fn join_company(&self, inn: &Inn) -> Option<Company> {
        match self.api.find_company_by_inn(inn).await {
            Ok(company) => company,
            Err(err) => {
                log::warn!("Failed to find company by INN {inn}: {err}");
                None
            }
        }
    }

    pub fn set_company(&mut self, company: Option<Company>) {
        if let SessionState::Authenticated { company: current, .. } = &mut self.state {
            *current = company;
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Loading)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated { .. })
    }

    pub fn user(&self) -> Option<&UserWithRole> {
        match &self.state {
            SessionState::Authenticated { user, .. } => Some(user.as_ref()),
            _ => None,
        }
    }

    pub fn company(&self) -> Option<&Company> {
        match &self.state {
            SessionState::Authenticated { company, .. } => company.as_ref(),
            _ => None,
        }
    }

    pub fn has_role(&self, roles: &[Role]) -> bool {
        self.user().is_some_and(|user| roles.contains(&user.role))
    }

    pub fn is_director_or_senior(&self) -> bool {
        self.has_role(&[Role::Director, Role::Senior])
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(&[Role::Admin])
    }
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::domain::company::Company;
    use crate::domain::types::{CompanyId, UserId};
    use crate::domain::user::{ActivityType, AuthGrant, User};
    use chrono::Utc;
    use mockall::predicate::eq;
    use uuid::Uuid;

    fn sample_user(role: Role, company_id: Option<CompanyId>) -> UserWithRole {
        UserWithRole {
            user: User {
                id: UserId::from_uuid(Uuid::new_v4()),
                email: "user@example.com".to_string(),
                full_name: "Dilnoza Yusupova".to_string(),
                phone: "+998901234567".to_string(),
                activity_type: ActivityType::Declarant,
                avatar_url: None,
                company_id,
                is_blocked: false,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            role,
        }
    }

    fn sample_company(id: CompanyId) -> Company {
        Company {
            id,
            name: "Tashkent Broker".to_string(),
            inn: Inn::new("123456789").unwrap(),
            activity_type: ActivityType::Declarant,
            is_blocked: false,
            director_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[actix_web::test]
    async fn restore_without_token_is_unauthenticated() {
        let mut api = MockApi::new();
        api.expect_token().return_const(None::<String>);
        api.expect_me().times(0);

        let mut session = Session::new(&api);
        assert!(session.is_loading());
        session.restore().await;

        assert!(!session.is_loading());
        assert!(!session.is_authenticated());
    }

    #[actix_web::test]
    async fn restore_fetches_user_and_company() {
        let company_id = CompanyId::from_uuid(Uuid::new_v4());
        let user = sample_user(Role::Director, Some(company_id));
        let company = sample_company(company_id);

        let mut api = MockApi::new();
        api.expect_token().return_const(Some("token".to_string()));
        api.expect_me().times(1).return_once(move || Ok(user));
        api.expect_get_company()
            .with(eq(company_id))
            .times(1)
            .return_once(move |_| Ok(company));

        let mut session = Session::new(&api);
        session.restore().await;

        assert!(session.is_authenticated());
        assert_eq!(session.company().map(|c| c.id), Some(company_id));
        assert!(session.is_director_or_senior());
        assert!(!session.is_admin());
    }

    #[actix_web::test]
    async fn failed_refresh_clears_token() {
        let mut api = MockApi::new();
        api.expect_token().return_const(Some("expired".to_string()));
        api.expect_me()
            .times(1)
            .return_once(|| Err(ApiError::Unauthorized));
        api.expect_set_token()
            .with(eq(None::<String>))
            .times(1)
            .return_const(());

        let mut session = Session::new(&api);
        session.restore().await;

        assert_eq!(session.state(), &SessionState::Unauthenticated);
    }

    #[actix_web::test]
    async fn login_stores_token_and_company() {
        let company_id = CompanyId::from_uuid(Uuid::new_v4());
        let user = sample_user(Role::Employee, Some(company_id));
        let company = sample_company(company_id);

        let mut api = MockApi::new();
        api.expect_login().times(1).return_once(move |_, _| {
            Ok(AuthGrant {
                user,
                token: "fresh".to_string(),
            })
        });
        api.expect_set_token()
            .with(eq(Some("fresh".to_string())))
            .times(1)
            .return_const(());
        api.expect_get_company()
            .times(1)
            .return_once(move |_| Ok(company));

        let mut session = Session::new(&api);
        let email = Email::new("user@example.com").unwrap();
        session.login(&email, "secret").await.unwrap();

        assert!(session.is_authenticated());
        assert!(session.company().is_some());
        assert!(session.has_role(&[Role::Employee]));
        assert_eq!(
            crate::navigation::main_layout(session.state()),
            crate::navigation::LayoutDecision::Render
        );
    }

    #[actix_web::test]
    async fn rejected_login_uses_login_fallback() {
        let mut api = MockApi::new();
        api.expect_login()
            .times(1)
            .return_once(|_, _| Err(ApiError::Rejected(GENERIC_FAILURE.to_string())));
        api.expect_set_token().times(0);

        let mut session = Session::new(&api);
        let email = Email::new("user@example.com").unwrap();
        let err = session.login(&email, "wrong").await.unwrap_err();

        assert_eq!(err, ApiError::Rejected(LOGIN_FAILED.to_string()));
    }

    #[actix_web::test]
    async fn logout_clears_token_even_when_backend_fails() {
        let mut api = MockApi::new();
        api.expect_logout()
            .times(1)
            .return_once(|| Err(ApiError::Transport("connection reset".into())));
        api.expect_set_token()
            .with(eq(None::<String>))
            .times(1)
            .return_const(());

        let mut session = Session::authenticated(&api, sample_user(Role::Senior, None), None);
        session.logout().await;

        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
    }
}
