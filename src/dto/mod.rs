//! DTO modules that bridge services with templates.

use serde::Serialize;

use crate::domain::client::Client;
use crate::domain::company::Company;
use crate::domain::types::{ClientId, UserId};
use crate::domain::user::UserWithRole;

pub mod admin;
pub mod badges;
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

/// Entry of a `<select>` element.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl ToString, label: impl Into<String>) -> Self {
        Self {
            value: value.to_string(),
            label: label.into(),
        }
    }
}

pub fn employee_options(users: &[UserWithRole]) -> Vec<SelectOption> {
    users
        .iter()
        .filter(|u| !u.user.is_blocked)
        .map(|u| SelectOption::new(u.user.id, u.user.full_name.clone()))
        .collect()
}

pub fn client_options(clients: &[Client]) -> Vec<SelectOption> {
    clients
        .iter()
        .map(|c| SelectOption::new(c.id, c.company_name.clone()))
        .collect()
}

pub fn company_options(companies: &[Company]) -> Vec<SelectOption> {
    companies
        .iter()
        .map(|c| SelectOption::new(c.id, c.name.clone()))
        .collect()
}

pub(crate) fn user_name(users: &[UserWithRole], id: UserId) -> Option<String> {
    users
        .iter()
        .find(|u| u.user.id == id)
        .map(|u| u.user.full_name.clone())
}

pub(crate) fn client_name(clients: &[Client], id: ClientId) -> Option<String> {
    clients
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.company_name.clone())
}
