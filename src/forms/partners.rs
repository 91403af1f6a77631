use serde::Deserialize;
use validator::Validate;

use crate::domain::partnership::PartnershipRequest;
use crate::domain::types::{Inn, Note};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
pub struct PartnershipRequestForm {
    pub inn: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub note: String,
}

impl TryFrom<PartnershipRequestForm> for PartnershipRequest {
    type Error = FormError;

    fn try_from(form: PartnershipRequestForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(PartnershipRequest {
            target_company_inn: Inn::new(form.inn).map_err(|_| FormError::InvalidInn)?,
            note: Note::optional(&form.note),
        })
    }
}
