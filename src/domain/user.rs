use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{CompanyId, Email, FullName, PhoneNumber, TypeConstraintError, UserId};

/// Role hierarchy inside a company plus the platform administrator.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Director,
    Senior,
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Director => "director",
            Role::Senior => "senior",
            Role::Employee => "employee",
        }
    }

    /// Roles a director may hand out to company members.
    pub const ASSIGNABLE: [Role; 3] = [Role::Director, Role::Senior, Role::Employee];
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "admin" => Ok(Role::Admin),
            "director" => Ok(Role::Director),
            "senior" => Ok(Role::Senior),
            "employee" => Ok(Role::Employee),
            other => Err(TypeConstraintError::InvalidValue(format!("unknown role `{other}`"))),
        }
    }
}

/// Business line a user or company operates under.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Declarant,
    Certification,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Declarant => "declarant",
            ActivityType::Certification => "certification",
        }
    }
}

impl FromStr for ActivityType {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "declarant" => Ok(ActivityType::Declarant),
            "certification" => Ok(ActivityType::Certification),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown activity type `{other}`"
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub activity_type: ActivityType,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub company_id: Option<CompanyId>,
    #[serde(default)]
    pub is_blocked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user record together with the role granted inside their company.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserWithRole {
    #[serde(flatten)]
    pub user: User,
    pub role: Role,
}

impl UserWithRole {
    pub fn has_company(&self) -> bool {
        self.user.company_id.is_some()
    }
}

/// Payload for self-registration.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: Email,
    pub password: String,
    pub full_name: FullName,
    pub phone: PhoneNumber,
    pub activity_type: ActivityType,
}

/// Partial profile update. Absent fields are left untouched by the backend.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<FullName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<PhoneNumber>,
}

impl UpdateUser {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

/// Result of a successful login or registration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AuthGrant<U> {
    pub user: U,
    pub token: String,
}

/// Result of a successful admin login.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TokenGrant {
    pub token: String,
}
