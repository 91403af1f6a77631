use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;
use crate::domain::user::{ActivityType, Role, UserWithRole};

/// Interface language; persisted in the visitor session.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ru,
    Uz,
    En,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Ru, Language::Uz, Language::En];

    pub fn code(&self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::Uz => "uz",
            Language::En => "en",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::Ru => "Русский",
            Language::Uz => "O'zbekcha",
            Language::En => "English",
        }
    }
}

impl FromStr for Language {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ru" => Ok(Language::Ru),
            "uz" => Ok(Language::Uz),
            "en" => Ok(Language::En),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unsupported language `{other}`"
            ))),
        }
    }
}

/// Sidebar entry. `roles == None` means every member sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub label_key: &'static str,
    pub path: &'static str,
    pub icon: &'static str,
    pub roles: Option<&'static [Role]>,
}

const MANAGERS: &[Role] = &[Role::Director, Role::Senior];
const DIRECTORS: &[Role] = &[Role::Director];

const fn item(label_key: &'static str, path: &'static str, icon: &'static str) -> MenuItem {
    MenuItem {
        label_key,
        path,
        icon,
        roles: None,
    }
}

const fn restricted(
    label_key: &'static str,
    path: &'static str,
    icon: &'static str,
    roles: &'static [Role],
) -> MenuItem {
    MenuItem {
        label_key,
        path,
        icon,
        roles: Some(roles),
    }
}

pub const DECLARANT_MENU: [MenuItem; 9] = [
    item("menu.dashboard", "/dashboard", "bi-speedometer2"),
    item("menu.declarations", "/declarations", "bi-file-earmark-text"),
    item("menu.certificates", "/certificates", "bi-award"),
    item("menu.tasks", "/tasks", "bi-check2-square"),
    item("menu.documents", "/documents", "bi-folder2-open"),
    item("menu.clients", "/clients", "bi-people"),
    item("menu.partners", "/partners", "bi-building"),
    restricted("menu.employees", "/employees", "bi-person-gear", MANAGERS),
    restricted("menu.requests", "/requests", "bi-inbox", DIRECTORS),
];

pub const CERTIFICATION_MENU: [MenuItem; 8] = [
    item("menu.dashboard", "/dashboard", "bi-speedometer2"),
    item("menu.certificates", "/certificates", "bi-award"),
    item("menu.tasks", "/tasks", "bi-check2-square"),
    item("menu.documents", "/documents", "bi-folder2-open"),
    item("menu.clients", "/clients", "bi-people"),
    item("menu.partners", "/partners", "bi-building"),
    restricted("menu.employees", "/employees", "bi-person-gear", MANAGERS),
    restricted("menu.requests", "/requests", "bi-inbox", DIRECTORS),
];

pub const ADMIN_MENU: [MenuItem; 4] = [
    item("menu.dashboard", "/admin/dashboard", "bi-speedometer2"),
    item("menu.companies", "/admin/companies", "bi-building"),
    item("menu.users", "/admin/users", "bi-people"),
    item("menu.requests", "/admin/requests", "bi-inbox"),
];

impl MenuItem {
    pub fn is_visible_to(&self, role: Role) -> bool {
        self.roles.is_none_or(|roles| roles.contains(&role))
    }

    pub fn label(&self, language: Language) -> &'static str {
        translate(self.label_key, language)
    }
}

pub fn declarant_menu() -> &'static [MenuItem] {
    &DECLARANT_MENU
}

pub fn certification_menu() -> &'static [MenuItem] {
    &CERTIFICATION_MENU
}

pub fn admin_menu() -> &'static [MenuItem] {
    &ADMIN_MENU
}

/// Menu of the user's business line, filtered by their role.
pub fn visible_menu(user: &UserWithRole) -> Vec<MenuItem> {
    if user.role == Role::Admin {
        return admin_menu().to_vec();
    }
    let menu = match user.user.activity_type {
        ActivityType::Declarant => declarant_menu(),
        ActivityType::Certification => certification_menu(),
    };
    menu.iter()
        .filter(|item| item.is_visible_to(user.role))
        .copied()
        .collect()
}

/// `/dashboard` only lights up on an exact match; other items also cover
/// nested paths.
pub fn is_active(item: &MenuItem, current_path: &str) -> bool {
    current_path == item.path
        || (item.path != "/dashboard"
            && item.path != "/admin/dashboard"
            && current_path.starts_with(item.path))
}

fn translate(key: &'static str, language: Language) -> &'static str {
    match (key, language) {
        ("menu.dashboard", Language::Ru) => "Главная",
        ("menu.dashboard", Language::Uz) => "Bosh sahifa",
        ("menu.dashboard", Language::En) => "Dashboard",
        ("menu.declarations", Language::Ru) => "Декларации",
        ("menu.declarations", Language::Uz) => "Deklaratsiyalar",
        ("menu.declarations", Language::En) => "Declarations",
        ("menu.certificates", Language::Ru) => "Сертификаты",
        ("menu.certificates", Language::Uz) => "Sertifikatlar",
        ("menu.certificates", Language::En) => "Certificates",
        ("menu.tasks", Language::Ru) => "Задачи",
        ("menu.tasks", Language::Uz) => "Vazifalar",
        ("menu.tasks", Language::En) => "Tasks",
        ("menu.documents", Language::Ru) => "Документы",
        ("menu.documents", Language::Uz) => "Hujjatlar",
        ("menu.documents", Language::En) => "Documents",
        ("menu.clients", Language::Ru) => "Клиенты",
        ("menu.clients", Language::Uz) => "Mijozlar",
        ("menu.clients", Language::En) => "Clients",
        ("menu.partners", Language::Ru) => "Партнёры",
        ("menu.partners", Language::Uz) => "Hamkorlar",
        ("menu.partners", Language::En) => "Partners",
        ("menu.employees", Language::Ru) => "Сотрудники",
        ("menu.employees", Language::Uz) => "Xodimlar",
        ("menu.employees", Language::En) => "Employees",
        ("menu.requests", Language::Ru) => "Заявки",
        ("menu.requests", Language::Uz) => "So'rovlar",
        ("menu.requests", Language::En) => "Requests",
        ("menu.companies", Language::Ru) => "Компании",
        ("menu.companies", Language::Uz) => "Kompaniyalar",
        ("menu.companies", Language::En) => "Companies",
        ("menu.users", Language::Ru) => "Пользователи",
        ("menu.users", Language::Uz) => "Foydalanuvchilar",
        ("menu.users", Language::En) => "Users",
        ("menu.settings", Language::Ru) => "Настройки",
        ("menu.settings", Language::Uz) => "Sozlamalar",
        ("menu.settings", Language::En) => "Settings",
        (other, _) => other,
    }
}

/// Sidebar entry as handed to templates.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: &'static str,
    pub path: &'static str,
    pub icon: &'static str,
    pub active: bool,
}

pub fn menu_entries(items: &[MenuItem], current_path: &str, language: Language) -> Vec<MenuEntry> {
    items
        .iter()
        .map(|item| MenuEntry {
            label: item.label(language),
            path: item.path,
            icon: item.icon,
            active: is_active(item, current_path),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::domain::types::UserId;
    use crate::domain::user::User;

    fn user(role: Role, activity_type: ActivityType) -> UserWithRole {
        UserWithRole {
            user: User {
                id: UserId::from_uuid(Uuid::new_v4()),
                email: "staff@example.com".to_string(),
                full_name: "Malika Rashidova".to_string(),
                phone: "+998907654321".to_string(),
                activity_type,
                avatar_url: None,
                company_id: None,
                is_blocked: false,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            role,
        }
    }

    fn paths(user: &UserWithRole) -> Vec<&'static str> {
        visible_menu(user).iter().map(|item| item.path).collect()
    }

    #[test]
    fn employee_sees_neither_employees_nor_requests() {
        let menu = paths(&user(Role::Employee, ActivityType::Declarant));
        assert!(!menu.contains(&"/employees"));
        assert!(!menu.contains(&"/requests"));
        assert!(menu.contains(&"/declarations"));
    }

    #[test]
    fn senior_sees_employees_only() {
        let menu = paths(&user(Role::Senior, ActivityType::Certification));
        assert!(menu.contains(&"/employees"));
        assert!(!menu.contains(&"/requests"));
        assert!(!menu.contains(&"/declarations"));
    }

    #[test]
    fn director_sees_the_full_menu() {
        let menu = paths(&user(Role::Director, ActivityType::Declarant));
        assert_eq!(menu.len(), DECLARANT_MENU.len());
        assert!(menu.contains(&"/employees"));
        assert!(menu.contains(&"/requests"));
    }

    #[test]
    fn admin_gets_the_console_menu() {
        let menu = paths(&user(Role::Admin, ActivityType::Declarant));
        assert_eq!(menu, ADMIN_MENU.iter().map(|item| item.path).collect::<Vec<_>>());
    }

    #[test]
    fn dashboard_is_active_only_on_exact_match() {
        let dashboard = DECLARANT_MENU[0];
        let declarations = DECLARANT_MENU[1];

        assert!(is_active(&dashboard, "/dashboard"));
        assert!(!is_active(&dashboard, "/dashboard/extra"));
        assert!(is_active(&declarations, "/declarations/groups"));
    }

    #[test]
    fn certification_menu_has_no_declarations() {
        assert!(
            certification_menu()
                .iter()
                .all(|item| item.path != "/declarations")
        );
    }

    #[test]
    fn labels_follow_language() {
        let tasks = DECLARANT_MENU[3];
        assert_eq!(tasks.label(Language::Ru), "Задачи");
        assert_eq!(tasks.label(Language::En), "Tasks");
        assert_eq!("uz".parse::<Language>().unwrap(), Language::Uz);
        assert!("de".parse::<Language>().is_err());
    }
}
