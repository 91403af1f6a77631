use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{Note, UserId};
use crate::domain::user::Role;
use crate::forms::{FormError, parse_id};

#[derive(Debug, Deserialize)]
pub struct AssignRoleForm {
    pub role: String,
}

impl TryFrom<AssignRoleForm> for Role {
    type Error = FormError;

    /// Only company roles can be handed out; `admin` is rejected.
    fn try_from(form: AssignRoleForm) -> Result<Self, Self::Error> {
        let role: Role = form.role.parse()?;
        if !Role::ASSIGNABLE.contains(&role) {
            return Err(FormError::InvalidValue(format!(
                "Роль «{role}» нельзя назначить"
            )));
        }
        Ok(role)
    }
}

/// Removing an employee hands their records over to a colleague.
#[derive(Debug, Deserialize)]
pub struct RemoveEmployeeForm {
    #[serde(default)]
    pub reassign_to_id: String,
}

pub struct RemoveEmployeePayload {
    pub reassign_to: UserId,
}

impl RemoveEmployeeForm {
    pub fn into_payload(self, removed: UserId) -> Result<RemoveEmployeePayload, FormError> {
        let reassign_to: UserId = parse_id(&self.reassign_to_id, "Передать записи сотруднику")?;
        if reassign_to == removed {
            return Err(FormError::InvalidValue(
                "Нельзя передать записи удаляемому сотруднику".to_string(),
            ));
        }
        Ok(RemoveEmployeePayload { reassign_to })
    }
}

/// Free-text message, also used by the admin console.
#[derive(Debug, Deserialize, Validate)]
pub struct MessageForm {
    #[validate(length(min = 1, max = 4000))]
    pub message: String,
}

impl TryFrom<MessageForm> for Note {
    type Error = FormError;

    fn try_from(form: MessageForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Note::new(form.message)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: &str = "33333333-3333-4333-8333-333333333333";
    const BOB: &str = "66666666-6666-4666-8666-666666666666";

    #[test]
    fn admin_role_cannot_be_assigned() {
        let form = AssignRoleForm {
            role: "admin".to_string(),
        };
        assert!(Role::try_from(form).is_err());

        let form = AssignRoleForm {
            role: "senior".to_string(),
        };
        assert_eq!(Role::try_from(form).unwrap(), Role::Senior);
    }

    #[test]
    fn reassignment_target_is_required() {
        let removed: UserId = ALICE.parse().unwrap();
        let missing = RemoveEmployeeForm {
            reassign_to_id: String::new(),
        };
        assert!(matches!(
            missing.into_payload(removed),
            Err(FormError::Required(_))
        ));

        let to_self = RemoveEmployeeForm {
            reassign_to_id: ALICE.to_string(),
        };
        assert!(to_self.into_payload(removed).is_err());

        let valid = RemoveEmployeeForm {
            reassign_to_id: BOB.to_string(),
        };
        assert_eq!(
            valid.into_payload(removed).unwrap().reassign_to.to_string(),
            BOB
        );
    }

    #[test]
    fn message_is_sanitized() {
        let note = Note::try_from(MessageForm {
            message: "<script>alert(1)</script>Привет".to_string(),
        })
        .unwrap();
        assert_eq!(note.as_str(), "Привет");
    }
}
