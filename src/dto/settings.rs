use serde::Serialize;

use crate::domain::user::UserWithRole;
use crate::dto::SelectOption;
use crate::navigation::Language;

#[derive(Debug, Serialize)]
pub struct SettingsPageData {
    pub user: UserWithRole,
    /// Up to two capital letters shown when there is no avatar.
    pub initials: String,
    pub languages: Vec<SelectOption>,
    pub language: Language,
    pub notification_sound: bool,
}

pub fn initials(full_name: &str) -> String {
    full_name
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

pub fn language_options() -> Vec<SelectOption> {
    Language::ALL
        .iter()
        .map(|lang| SelectOption::new(lang.code(), lang.name()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_take_first_letters() {
        assert_eq!(initials("иван петров сидорович"), "ИП");
        assert_eq!(initials("Aziz"), "A");
        assert_eq!(initials("   "), "");
    }
}
