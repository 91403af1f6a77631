use crate::domain::user::Role;
use crate::navigation::routes::{AppRoute, Shell};
use crate::session::SessionState;

/// Outcome of a layout gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutDecision {
    /// Identity is still being resolved.
    Spinner,
    Redirect(AppRoute),
    Render,
}

/// Gate of the sidebar layout.
///
/// Checks run in order: loading, authentication, administrators, company
/// membership.
pub fn main_layout(state: &SessionState) -> LayoutDecision {
    match state {
        SessionState::Loading => LayoutDecision::Spinner,
        SessionState::Unauthenticated => LayoutDecision::Redirect(AppRoute::Login),
        SessionState::Authenticated { user, .. } if user.role == Role::Admin => {
            LayoutDecision::Redirect(AppRoute::AdminDashboard)
        }
        SessionState::Authenticated { company: None, .. } => {
            LayoutDecision::Redirect(AppRoute::CompanySetup)
        }
        SessionState::Authenticated { .. } => LayoutDecision::Render,
    }
}

/// Gate of the admin console.
pub fn admin_layout(state: &SessionState) -> LayoutDecision {
    match state {
        SessionState::Loading => LayoutDecision::Spinner,
        SessionState::Authenticated { user, .. } if user.role == Role::Admin => {
            LayoutDecision::Render
        }
        _ => LayoutDecision::Redirect(AppRoute::AdminLogin),
    }
}

/// Applies the gate of the shell `path` belongs to.
pub fn resolve(path: &str, state: &SessionState) -> LayoutDecision {
    match AppRoute::from_path(path) {
        AppRoute::Root => LayoutDecision::Redirect(AppRoute::Login),
        route => match route.shell() {
            Shell::Public => LayoutDecision::Render,
            Shell::Main => main_layout(state),
            Shell::Admin => admin_layout(state),
        },
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::domain::company::Company;
    use crate::domain::types::{CompanyId, Inn, UserId};
    use crate::domain::user::{ActivityType, User, UserWithRole};

    fn member(role: Role, company: Option<Company>) -> SessionState {
        SessionState::Authenticated {
            user: Box::new(UserWithRole {
                user: User {
                    id: UserId::from_uuid(Uuid::new_v4()),
                    email: "member@example.com".to_string(),
                    full_name: "Aziz Karimov".to_string(),
                    phone: "+998901112233".to_string(),
                    activity_type: ActivityType::Declarant,
                    avatar_url: None,
                    company_id: company.as_ref().map(|c| c.id),
                    is_blocked: false,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                },
                role,
            }),
            company,
        }
    }

    fn company() -> Company {
        Company {
            id: CompanyId::from_uuid(Uuid::new_v4()),
            name: "Samarkand Logistics".to_string(),
            inn: Inn::new("987654321").unwrap(),
            activity_type: ActivityType::Declarant,
            is_blocked: false,
            director_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn admin_on_dashboard_goes_to_console() {
        let state = member(Role::Admin, None);
        assert_eq!(
            resolve("/dashboard", &state),
            LayoutDecision::Redirect(AppRoute::AdminDashboard)
        );
    }

    #[test]
    fn member_without_company_goes_to_setup() {
        let state = member(Role::Employee, None);
        assert_eq!(
            main_layout(&state),
            LayoutDecision::Redirect(AppRoute::CompanySetup)
        );
    }

    #[test]
    fn loading_shows_spinner() {
        assert_eq!(main_layout(&SessionState::Loading), LayoutDecision::Spinner);
        assert_eq!(admin_layout(&SessionState::Loading), LayoutDecision::Spinner);
    }

    #[test]
    fn anonymous_visitor_goes_to_login() {
        assert_eq!(
            resolve("/tasks", &SessionState::Unauthenticated),
            LayoutDecision::Redirect(AppRoute::Login)
        );
        assert_eq!(
            resolve("/login", &SessionState::Unauthenticated),
            LayoutDecision::Render
        );
    }

    #[test]
    fn non_admin_is_kept_out_of_console() {
        let state = member(Role::Director, Some(company()));
        assert_eq!(
            resolve("/admin/users", &state),
            LayoutDecision::Redirect(AppRoute::AdminLogin)
        );
        assert_eq!(resolve("/declarations", &state), LayoutDecision::Render);
    }

    #[test]
    fn admin_renders_console() {
        let state = member(Role::Admin, None);
        assert_eq!(resolve("/admin/users", &state), LayoutDecision::Render);
    }

    #[test]
    fn root_points_to_login() {
        let state = member(Role::Employee, Some(company()));
        assert_eq!(
            resolve("/", &state),
            LayoutDecision::Redirect(AppRoute::Login)
        );
    }
}
