use serde::{Deserialize, Serialize};

use crate::domain::client::Client;
use crate::domain::declaration::{Declaration, DeclarationGroup, DeclarationMode, VehicleType};
use crate::domain::user::UserWithRole;
use crate::dto::{SelectOption, client_name, user_name};
use crate::pagination::Paginated;

/// Query string of the declarations page.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct DeclarationsQuery {
    pub search: Option<String>,
    /// `all`, `mine` or an employee id.
    pub owner: Option<String>,
    pub mode: Option<String>,
    pub client_id: Option<String>,
    pub vehicle_type: Option<String>,
    pub post_number: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub page: Option<usize>,
    /// Browser tab the list is shown in; see [`crate::api::sequencer::tab_token`].
    pub tab: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeclarationRow {
    pub declaration: Declaration,
    pub formatted_number: String,
    pub client_name: Option<String>,
    pub owner_name: Option<String>,
    /// `"01A123BC (АВТО), 7788 (ЖД)"`
    pub vehicles: String,
}

impl DeclarationRow {
    pub fn new(declaration: Declaration, clients: &[Client], employees: &[UserWithRole]) -> Self {
        let vehicles = declaration
            .vehicles
            .iter()
            .map(|v| format!("{} ({})", v.number, v.vehicle_type.label()))
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            formatted_number: declaration.formatted_number(),
            client_name: client_name(clients, declaration.client_id),
            owner_name: user_name(employees, declaration.owner_id),
            vehicles,
            declaration,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeclarationsPageData {
    pub declarations: Paginated<DeclarationRow>,
    pub groups: Vec<DeclarationGroup>,
    pub clients: Vec<SelectOption>,
    pub employees: Vec<SelectOption>,
    pub modes: Vec<SelectOption>,
    pub vehicle_types: Vec<SelectOption>,
    /// Whether the owner filter may list individual employees.
    pub can_filter_by_employee: bool,
    pub search_query: Option<String>,
    pub owner: String,
}

pub fn mode_options() -> Vec<SelectOption> {
    DeclarationMode::ALL
        .iter()
        .map(|mode| SelectOption::new(mode.as_str(), mode.as_str()))
        .collect()
}

pub fn vehicle_type_options() -> Vec<SelectOption> {
    VehicleType::ALL
        .iter()
        .map(|kind| SelectOption::new(kind.code(), format!("{} {}", kind.code(), kind.label())))
        .collect()
}
