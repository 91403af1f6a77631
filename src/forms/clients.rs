use serde::Deserialize;
use validator::Validate;

use crate::domain::client::NewClient;
use crate::domain::document::{AccessPolicy, AccessType};
use crate::domain::types::{CompanyName, FullName, Inn, Note, UserId};
use crate::forms::{FormError, parse_ids, validate_inn};

/// Builds an access policy from the radio value and the checked users.
///
/// `selected` without any user is rejected; other types ignore the list.
pub fn parse_access_policy(
    access_type: &str,
    user_ids: &[String],
) -> Result<AccessPolicy, FormError> {
    let access_type = match access_type.trim() {
        "" => AccessType::default(),
        value => value.parse::<AccessType>()?,
    };
    let user_ids: Vec<UserId> = parse_ids(user_ids)?;
    if access_type == AccessType::Selected && user_ids.is_empty() {
        return Err(FormError::EmptySelection);
    }
    Ok(AccessPolicy::from_wire(access_type, user_ids))
}

/// Used for both creating and editing a client.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ClientForm {
    #[validate(length(min = 1, max = 255))]
    pub company_name: String,
    #[validate(custom(function = "validate_inn"))]
    pub inn: String,
    #[validate(length(min = 1, max = 255))]
    pub director_name: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub note: String,
    #[serde(default)]
    pub access_type: String,
    #[serde(default)]
    pub access_user_ids: Vec<String>,
}

impl TryFrom<ClientForm> for NewClient {
    type Error = FormError;

    fn try_from(form: ClientForm) -> Result<Self, Self::Error> {
        let inn = Inn::new(&form.inn).map_err(|_| FormError::InvalidInn)?;
        form.validate()?;
        Ok(NewClient {
            company_name: CompanyName::new(form.company_name)?,
            inn,
            director_name: FullName::new(form.director_name)?,
            note: Note::optional(&form.note),
            access: parse_access_policy(&form.access_type, &form.access_user_ids)?,
        })
    }
}
