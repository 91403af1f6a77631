//! Page services: fetch through the API traits, shape page data, enforce the
//! presentation-level role rules.

use chrono::{Local, NaiveDate};
use thiserror::Error;

use crate::api::UserApi;
use crate::api::query::OwnerScope;
use crate::domain::company::Company;
use crate::domain::types::{CompanyId, UserId};
use crate::domain::user::{ActivityType, Role, UserWithRole};
use crate::forms::parse_date;
use crate::session::SessionState;

pub mod admin;
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

/// Errors that can occur in the service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    /// Local validation failure; the message is shown to the user as is.
    #[error("{0}")]
    Form(String),

    /// The backend refused or failed the call; the message is user-facing.
    #[error("{0}")]
    Api(String),

    #[error("type constraint violation: {0}")]
    TypeConstraint(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Authenticated company member, as admitted by the main layout gate.
#[derive(Clone, Debug, PartialEq)]
pub struct Member {
    pub user: UserWithRole,
    pub company: Company,
}

impl Member {
    /// Extracts the member from a resolved session; `None` unless the user
    /// belongs to a company and is not an administrator.
    pub fn from_state(state: &SessionState) -> Option<Self> {
        match state {
            SessionState::Authenticated {
                user,
                company: Some(company),
            } if user.role != Role::Admin => Some(Self {
                user: user.as_ref().clone(),
                company: company.clone(),
            }),
            _ => None,
        }
    }

    pub fn id(&self) -> UserId {
        self.user.user.id
    }

    pub fn company_id(&self) -> CompanyId {
        self.company.id
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn activity(&self) -> ActivityType {
        self.company.activity_type
    }

    pub fn is_declarant(&self) -> bool {
        self.activity() == ActivityType::Declarant
    }

    pub fn is_director_or_senior(&self) -> bool {
        matches!(self.role(), Role::Director | Role::Senior)
    }
}

/// Rejects members whose role is not in `roles`.
pub fn ensure_role(member: &Member, roles: &[Role]) -> ServiceResult<()> {
    if roles.contains(&member.role()) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Rejects members of certification companies.
pub fn ensure_declarant(member: &Member) -> ServiceResult<()> {
    if member.is_declarant() {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Rejects anyone but the platform administrator.
pub fn ensure_admin(user: &UserWithRole) -> ServiceResult<()> {
    if user.role == Role::Admin {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Trims a free-text filter, treating blank input as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Owner filter of the declaration, certificate and task lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct OwnerFilter {
    pub scope: OwnerScope,
    pub owner_id: Option<UserId>,
}

impl OwnerFilter {
    /// Reads `all`, `mine` or an employee id. Only directors and seniors may
    /// pick an employee; anything unknown falls back to `all`.
    pub fn parse(member: &Member, value: Option<&str>) -> Self {
        let value = value.map(str::trim).unwrap_or_default();
        if value == "mine" {
            return Self {
                scope: OwnerScope::Mine,
                owner_id: Some(member.id()),
            };
        }
        if member.is_director_or_senior()
            && let Ok(employee) = value.parse::<UserId>()
        {
            return Self {
                scope: OwnerScope::Employee,
                owner_id: Some(employee),
            };
        }
        Self {
            scope: OwnerScope::All,
            owner_id: None,
        }
    }

    /// Value echoed back into the filter `<select>`.
    pub fn as_param(&self) -> String {
        match (self.scope, self.owner_id) {
            (OwnerScope::Mine, _) => "mine".to_string(),
            (OwnerScope::Employee, Some(id)) => id.to_string(),
            _ => "all".to_string(),
        }
    }
}

/// Parses an `<input type="date">` filter, ignoring blank or malformed input.
pub(crate) fn optional_date(value: &Option<String>) -> Option<NaiveDate> {
    non_blank(value.clone()).and_then(|d| parse_date(&d).ok())
}

/// Rejects hand-overs to users outside the member's company.
pub(crate) async fn ensure_colleague<A>(
    api: &A,
    member: &Member,
    user_id: UserId,
) -> ServiceResult<()>
where
    A: UserApi,
{
    let employees = api.list_company_users(member.company_id()).await?;
    if employees
        .iter()
        .any(|e| e.user.id == user_id && !e.user.is_blocked)
    {
        Ok(())
    } else {
        Err(ServiceError::Form("Сотрудник не найден".to_string()))
    }
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Backend records shared by the service tests.

    use serde_json::json;

    use crate::api::PaginatedResponse;
    use crate::domain::certificate::Certificate;
    use crate::domain::client::Client;
    use crate::domain::company::Company;
    use crate::domain::declaration::Declaration;
    use crate::domain::partnership::Partnership;
    use crate::domain::task::Task;
    use crate::domain::user::UserWithRole;
    use crate::services::Member;

    pub const COMPANY: &str = "44444444-4444-4444-8444-444444444444";
    pub const DIRECTOR: &str = "11111111-1111-4111-8111-111111111111";
    pub const EMPLOYEE: &str = "33333333-3333-4333-8333-333333333333";
    pub const CLIENT: &str = "22222222-2222-4222-8222-222222222222";

    pub fn user(id: &str, role: &str, activity: &str) -> UserWithRole {
        serde_json::from_value(json!({
            "id": id,
            "email": format!("{role}@example.com"),
            "fullName": format!("Test {role}"),
            "phone": "+998901234567",
            "activityType": activity,
            "companyId": COMPANY,
            "createdAt": "2025-01-10T08:00:00Z",
            "updatedAt": "2025-01-10T08:00:00Z",
            "role": role
        }))
        .unwrap()
    }

    pub fn company(activity: &str) -> Company {
        serde_json::from_value(json!({
            "id": COMPANY,
            "name": "ООО \"Декларант\"",
            "inn": "123456789",
            "activityType": activity,
            "createdAt": "2025-01-10T08:00:00Z",
            "updatedAt": "2025-01-10T08:00:00Z"
        }))
        .unwrap()
    }

    pub fn member(role: &str, activity: &str) -> Member {
        let id = if role == "director" { DIRECTOR } else { EMPLOYEE };
        Member {
            user: user(id, role, activity),
            company: company(activity),
        }
    }

    pub fn declarant(role: &str) -> Member {
        member(role, "declarant")
    }

    pub fn certifier(role: &str) -> Member {
        member(role, "certification")
    }

    pub fn page<T>(data: Vec<T>) -> PaginatedResponse<T> {
        PaginatedResponse {
            total: data.len(),
            data,
            page: 1,
            page_size: 20,
            total_pages: 1,
        }
    }

    pub fn client() -> Client {
        serde_json::from_value(json!({
            "id": CLIENT,
            "companyName": "ООО \"Импорт\"",
            "inn": "987654321",
            "directorName": "Каримов Азиз",
            "accessType": "public",
            "ownerId": DIRECTOR,
            "companyId": COMPANY,
            "createdAt": "2025-01-10T08:00:00Z",
            "updatedAt": "2025-01-10T08:00:00Z"
        }))
        .unwrap()
    }

    pub fn declaration(id: &str) -> Declaration {
        serde_json::from_value(json!({
            "id": id,
            "postNumber": "26001",
            "date": "2025-12-22",
            "declarationNumber": "0010722",
            "clientId": CLIENT,
            "mode": "ИМ/40",
            "vehicles": [{ "number": "01A123BC", "type": "30" }],
            "ownerId": EMPLOYEE,
            "companyId": COMPANY,
            "createdAt": "2025-12-22T09:00:00Z",
            "updatedAt": "2025-12-22T09:00:00Z"
        }))
        .unwrap()
    }

    pub fn certificate(id: &str, status: &str) -> Certificate {
        serde_json::from_value(json!({
            "id": id,
            "type": "Сертификат соответствия",
            "deadline": "2025-12-30",
            "numberToBeFilledByCertifier": true,
            "clientId": CLIENT,
            "sentDate": "2025-12-20T09:00:00Z",
            "status": status,
            "ownerId": EMPLOYEE,
            "companyId": COMPANY,
            "createdAt": "2025-12-20T09:00:00Z",
            "updatedAt": "2025-12-20T09:00:00Z"
        }))
        .unwrap()
    }

    pub fn task(id: &str, status: &str) -> Task {
        serde_json::from_value(json!({
            "id": id,
            "targetCompanyId": COMPANY,
            "targetEmployeeId": EMPLOYEE,
            "name": "Проверить документы",
            "priority": "normal",
            "status": status,
            "deadline": "2025-12-30",
            "createdByUserId": DIRECTOR,
            "createdByCompanyId": COMPANY,
            "createdAt": "2025-12-20T09:00:00Z",
            "updatedAt": "2025-12-20T09:00:00Z"
        }))
        .unwrap()
    }

    pub fn partnership(id: &str, requesting: &str, target: &str, status: &str) -> Partnership {
        serde_json::from_value(json!({
            "id": id,
            "requestingCompanyId": requesting,
            "targetCompanyId": target,
            "status": status,
            "createdAt": "2025-12-20T09:00:00Z",
            "updatedAt": "2025-12-20T09:00:00Z"
        }))
        .unwrap()
    }

    pub fn other_company(id: &str, activity: &str) -> Company {
        serde_json::from_value(json!({
            "id": id,
            "name": format!("Партнёр {activity}"),
            "inn": "111222333",
            "activityType": activity,
            "createdAt": "2025-01-10T08:00:00Z",
            "updatedAt": "2025-01-10T08:00:00Z"
        }))
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn admins_and_company_less_users_are_not_members() {
        let admin = user(DIRECTOR, "admin", "declarant");
        let state = SessionState::Authenticated {
            user: Box::new(admin),
            company: Some(company("declarant")),
        };
        assert!(Member::from_state(&state).is_none());

        let state = SessionState::Authenticated {
            user: Box::new(user(EMPLOYEE, "employee", "declarant")),
            company: None,
        };
        assert!(Member::from_state(&state).is_none());
    }

    #[test]
    fn employee_filter_needs_a_senior_role() {
        let employee = declarant("employee");
        let filter = OwnerFilter::parse(&employee, Some(DIRECTOR));
        assert_eq!(filter.scope, OwnerScope::All);
        assert_eq!(filter.as_param(), "all");

        let director = declarant("director");
        let filter = OwnerFilter::parse(&director, Some(EMPLOYEE));
        assert_eq!(filter.scope, OwnerScope::Employee);
        assert_eq!(filter.as_param(), EMPLOYEE);

        let mine = OwnerFilter::parse(&employee, Some("mine"));
        assert_eq!(mine.owner_id, Some(employee.id()));
    }

    #[test]
    fn role_check_accepts_listed_roles_only() {
        let senior = declarant("senior");
        assert!(ensure_role(&senior, &[Role::Director, Role::Senior]).is_ok());
        assert!(matches!(
            ensure_role(&senior, &[Role::Director]),
            Err(ServiceError::Unauthorized)
        ));
    }
}
