//! Declaration creation, redirection and grouping forms.
//!
//! These forms carry repeated keys (`vehicle_number`, `declaration_ids`), so
//! routes decode them from the raw body with `serde_html_form`.

use serde::Deserialize;
use validator::Validate;

use crate::domain::declaration::{NewDeclaration, NewDeclarationGroup, Vehicle, VehicleType};
use crate::domain::types::{
    DeclarationId, DeclarationNumber, GroupName, Note, PostNumber, UserId,
};
use crate::forms::{FormError, parse_date, parse_id, parse_ids};

#[derive(Debug, Default, Deserialize, Validate)]
pub struct AddDeclarationForm {
    pub post_number: String,
    pub date: String,
    pub declaration_number: String,
    pub client_id: String,
    #[validate(length(min = 1))]
    pub mode: String,
    #[serde(default)]
    pub vehicle_number: Vec<String>,
    #[serde(default)]
    pub vehicle_type: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub note: String,
    #[serde(default)]
    pub document_ids: Vec<String>,
    #[serde(default)]
    pub folder_ids: Vec<String>,
}

impl AddDeclarationForm {
    /// Pairs vehicle numbers with their type codes, skipping blank rows.
    ///
    /// A missing or empty type code falls back to road transport.
    fn vehicles(&self) -> Result<Vec<Vehicle>, FormError> {
        let mut vehicles = Vec::new();
        for (index, number) in self.vehicle_number.iter().enumerate() {
            if number.trim().is_empty() {
                continue;
            }
            let vehicle_type = match self.vehicle_type.get(index).map(|code| code.trim()) {
                Some(code) if !code.is_empty() => code.parse::<VehicleType>()?,
                _ => VehicleType::default(),
            };
            vehicles.push(Vehicle::new(number.trim(), vehicle_type)?);
        }
        if vehicles.is_empty() {
            return Err(FormError::MissingVehicle);
        }
        Ok(vehicles)
    }
}

impl TryFrom<AddDeclarationForm> for NewDeclaration {
    type Error = FormError;

    fn try_from(form: AddDeclarationForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let post_number =
            PostNumber::new(&form.post_number).map_err(|_| FormError::InvalidPostNumber)?;
        let declaration_number = DeclarationNumber::new(&form.declaration_number)
            .map_err(|_| FormError::InvalidDeclarationNumber)?;
        let vehicles = form.vehicles()?;

        Ok(NewDeclaration {
            post_number,
            date: parse_date(&form.date)?,
            declaration_number,
            client_id: parse_id(&form.client_id, "Клиент")?,
            mode: form.mode.parse()?,
            vehicles,
            note: Note::optional(&form.note),
            attached_document_ids: parse_ids(&form.document_ids)?,
            attached_folder_ids: parse_ids(&form.folder_ids)?,
        })
    }
}

/// Hands a record over to another employee. Shared by declarations and certificates.
#[derive(Debug, Deserialize)]
pub struct RedirectForm {
    pub to_user_id: String,
}

impl TryFrom<RedirectForm> for UserId {
    type Error = FormError;

    fn try_from(form: RedirectForm) -> Result<Self, Self::Error> {
        parse_id(&form.to_user_id, "Сотрудник")
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct GroupForm {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub declaration_ids: Vec<String>,
}

impl TryFrom<GroupForm> for NewDeclarationGroup {
    type Error = FormError;

    fn try_from(form: GroupForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(NewDeclarationGroup {
            name: GroupName::new(form.name)?,
            declaration_ids: parse_ids(&form.declaration_ids)?,
        })
    }
}

/// Declarations added to or removed from an existing group.
#[derive(Debug, Deserialize)]
pub struct GroupMembersForm {
    #[serde(default)]
    pub declaration_ids: Vec<String>,
}

pub struct GroupMembersPayload {
    pub declaration_ids: Vec<DeclarationId>,
}

impl TryFrom<GroupMembersForm> for GroupMembersPayload {
    type Error = FormError;

    fn try_from(form: GroupMembersForm) -> Result<Self, Self::Error> {
        let declaration_ids: Vec<DeclarationId> = parse_ids(&form.declaration_ids)?;
        if declaration_ids.is_empty() {
            return Err(FormError::EmptySelection);
        }
        Ok(Self { declaration_ids })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::declaration::DeclarationMode;

    const CLIENT: &str = "22222222-2222-4222-8222-222222222222";

    fn form() -> AddDeclarationForm {
        AddDeclarationForm {
            post_number: "26001".to_string(),
            date: "2025-12-22".to_string(),
            declaration_number: "0010722".to_string(),
            client_id: CLIENT.to_string(),
            mode: "ИМ/40".to_string(),
            vehicle_number: vec!["01a123bc".to_string(), "".to_string()],
            vehicle_type: vec!["".to_string(), "20".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn declaration_form_builds_payload() {
        let declaration = NewDeclaration::try_from(form()).unwrap();
        assert_eq!(declaration.mode, DeclarationMode::Im40);
        assert_eq!(
            declaration.date,
            NaiveDate::from_ymd_opt(2025, 12, 22).unwrap()
        );
        assert_eq!(declaration.vehicles.len(), 1);
        assert_eq!(declaration.vehicles[0].number.as_str(), "01A123BC");
        assert_eq!(declaration.vehicles[0].vehicle_type, VehicleType::Auto);
        assert_eq!(declaration.number_parts().format(), "26001/22.12.2025/0010722");
        assert!(declaration.note.is_none());
    }

    #[test]
    fn fixed_width_numbers_are_enforced() {
        let mut bad_post = form();
        bad_post.post_number = "2600".to_string();
        assert!(matches!(
            NewDeclaration::try_from(bad_post),
            Err(FormError::InvalidPostNumber)
        ));

        let mut bad_number = form();
        bad_number.declaration_number = "001072".to_string();
        assert!(matches!(
            NewDeclaration::try_from(bad_number),
            Err(FormError::InvalidDeclarationNumber)
        ));
    }

    #[test]
    fn at_least_one_vehicle_is_required() {
        let mut no_vehicles = form();
        no_vehicles.vehicle_number = vec!["  ".to_string()];
        assert!(matches!(
            NewDeclaration::try_from(no_vehicles),
            Err(FormError::MissingVehicle)
        ));
    }

    #[test]
    fn repeated_keys_decode_into_rows() {
        let body = "post_number=26001&date=2025-12-22&declaration_number=0010722\
                    &client_id=22222222-2222-4222-8222-222222222222&mode=%D0%AD%D0%9A%2F10\
                    &vehicle_number=AB1&vehicle_type=30&vehicle_number=wagon7&vehicle_type=20";
        let form: AddDeclarationForm = serde_html_form::from_str(body).unwrap();
        let declaration = NewDeclaration::try_from(form).unwrap();
        assert_eq!(declaration.mode, DeclarationMode::Ek10);
        assert_eq!(declaration.vehicles[1].number.as_str(), "WAGON7");
        assert_eq!(declaration.vehicles[1].vehicle_type, VehicleType::Railway);
    }

    #[test]
    fn group_members_must_not_be_empty() {
        let form = GroupMembersForm {
            declaration_ids: vec![],
        };
        assert!(matches!(
            GroupMembersPayload::try_from(form),
            Err(FormError::EmptySelection)
        ));
    }
}
