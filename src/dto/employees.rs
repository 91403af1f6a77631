use serde::Serialize;

use crate::domain::user::{Role, UserWithRole};
use crate::dto::SelectOption;

pub fn role_label(role: Role) -> &'static str {
    match role {
        Role::Admin => "Администратор",
        Role::Director => "Директор",
        Role::Senior => "Старший",
        Role::Employee => "Сотрудник",
    }
}

#[derive(Debug, Serialize)]
pub struct EmployeeRow {
    pub employee: UserWithRole,
    pub role_label: &'static str,
    pub is_self: bool,
}

#[derive(Debug, Serialize)]
pub struct EmployeesPageData {
    pub employees: Vec<EmployeeRow>,
    pub roles: Vec<SelectOption>,
    /// Colleagues a removed employee's records can be handed to.
    pub reassign_targets: Vec<SelectOption>,
    pub can_manage_roles: bool,
}

pub fn role_options() -> Vec<SelectOption> {
    Role::ASSIGNABLE
        .iter()
        .map(|role| SelectOption::new(role.as_str(), role_label(*role)))
        .collect()
}
