use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{Note, UserId};
use crate::forms::{FormError, parse_id};

/// Direct message from the administrator to a user.
#[derive(Debug, Deserialize, Validate)]
pub struct AdminMessageForm {
    pub user_id: String,
    #[validate(length(min = 1, max = 4000))]
    pub message: String,
}

pub struct AdminMessagePayload {
    pub user_id: UserId,
    pub message: Note,
}

impl TryFrom<AdminMessageForm> for AdminMessagePayload {
    type Error = FormError;

    fn try_from(form: AdminMessageForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            user_id: parse_id(&form.user_id, "Пользователь")?,
            message: Note::new(form.message)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_needs_recipient_and_text() {
        let missing_user = AdminMessagePayload::try_from(AdminMessageForm {
            user_id: String::new(),
            message: "Проверьте реквизиты".to_string(),
        });
        assert!(matches!(missing_user, Err(FormError::Required(_))));

        let empty = AdminMessagePayload::try_from(AdminMessageForm {
            user_id: "33333333-3333-4333-8333-333333333333".to_string(),
            message: String::new(),
        });
        assert!(matches!(empty, Err(FormError::Validation(_))));
    }
}
