use serde::Deserialize;
use validator::Validate;

use crate::domain::company::NewCompany;
use crate::domain::types::{CompanyName, Inn};
use crate::forms::{FormError, validate_inn};

/// Director registering a new firm.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterCompanyForm {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(custom(function = "validate_inn"))]
    pub inn: String,
}

impl TryFrom<RegisterCompanyForm> for NewCompany {
    type Error = FormError;

    fn try_from(form: RegisterCompanyForm) -> Result<Self, Self::Error> {
        let inn = Inn::new(&form.inn).map_err(|_| FormError::InvalidInn)?;
        form.validate()?;
        Ok(NewCompany {
            name: CompanyName::new(form.name)?,
            inn,
        })
    }
}

/// Employee looking up an existing firm to join.
#[derive(Debug, Deserialize, Validate)]
pub struct JoinCompanyForm {
    #[validate(custom(function = "validate_inn"))]
    pub inn: String,
}

impl TryFrom<JoinCompanyForm> for Inn {
    type Error = FormError;

    fn try_from(form: JoinCompanyForm) -> Result<Self, Self::Error> {
        Inn::new(form.inn).map_err(|_| FormError::InvalidInn)
    }
}
