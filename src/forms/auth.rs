//! Login, registration and password recovery forms.

use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{Email, FullName, PhoneNumber, TwoFactorCode};
use crate::domain::user::{ActivityType, NewUser};
use crate::forms::FormError;

pub const MIN_PASSWORD_LENGTH: u64 = 8;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

pub struct LoginPayload {
    pub email: Email,
    pub password: String,
}

impl TryFrom<LoginForm> for LoginPayload {
    type Error = FormError;

    fn try_from(form: LoginForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            email: Email::new(form.email)?,
            password: form.password,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 255))]
    pub full_name: String,
    #[validate(length(min = 1))]
    pub phone: String,
    pub activity_type: String,
    #[validate(length(min = MIN_PASSWORD_LENGTH))]
    pub password: String,
    pub password_confirmation: String,
}

impl TryFrom<RegisterForm> for NewUser {
    type Error = FormError;

    fn try_from(form: RegisterForm) -> Result<Self, Self::Error> {
        form.validate()?;
        if form.password != form.password_confirmation {
            return Err(FormError::PasswordMismatch);
        }
        Ok(NewUser {
            email: Email::new(form.email)?,
            password: form.password,
            full_name: FullName::new(form.full_name)?,
            phone: PhoneNumber::new(form.phone)?,
            activity_type: form.activity_type.parse::<ActivityType>()?,
        })
    }
}

/// Administrator login with a second factor.
#[derive(Debug, Deserialize, Validate)]
pub struct AdminLoginForm {
    #[validate(length(min = 1))]
    pub login: String,
    #[validate(length(min = 1))]
    pub password: String,
    pub code: String,
}

pub struct AdminLoginPayload {
    pub login: String,
    pub password: String,
    pub code: TwoFactorCode,
}

impl TryFrom<AdminLoginForm> for AdminLoginPayload {
    type Error = FormError;

    fn try_from(form: AdminLoginForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let (digits, complete) = TwoFactorCode::mask(&form.code);
        if !complete {
            return Err(FormError::InvalidCode);
        }
        Ok(Self {
            login: form.login.trim().to_string(),
            password: form.password,
            code: TwoFactorCode::new(digits).map_err(|_| FormError::InvalidCode)?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordForm {
    #[validate(email)]
    pub email: String,
}

impl TryFrom<ForgotPasswordForm> for Email {
    type Error = FormError;

    fn try_from(form: ForgotPasswordForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Email::new(form.email)?)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordForm {
    #[validate(length(min = 1))]
    pub token: String,
    #[validate(length(min = MIN_PASSWORD_LENGTH))]
    pub password: String,
    pub password_confirmation: String,
}

pub struct ResetPasswordPayload {
    pub token: String,
    pub password: String,
}

impl TryFrom<ResetPasswordForm> for ResetPasswordPayload {
    type Error = FormError;

    fn try_from(form: ResetPasswordForm) -> Result<Self, Self::Error> {
        form.validate()?;
        if form.password != form.password_confirmation {
            return Err(FormError::PasswordMismatch);
        }
        Ok(Self {
            token: form.token,
            password: form.password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_form() -> RegisterForm {
        RegisterForm {
            email: "Director@Example.com".to_string(),
            full_name: "Rustam Aliev".to_string(),
            phone: "+998 90 123 45 67".to_string(),
            activity_type: "declarant".to_string(),
            password: "longenough".to_string(),
            password_confirmation: "longenough".to_string(),
        }
    }

    #[test]
    fn register_form_normalizes_fields() {
        let user = NewUser::try_from(register_form()).unwrap();
        assert_eq!(user.email.as_str(), "director@example.com");
        assert_eq!(user.phone.as_str(), "+998901234567");
        assert_eq!(user.activity_type, ActivityType::Declarant);
    }

    #[test]
    fn short_password_is_rejected() {
        let mut form = register_form();
        form.password = "short".to_string();
        form.password_confirmation = "short".to_string();
        assert!(matches!(
            NewUser::try_from(form),
            Err(FormError::Validation(_))
        ));
    }

    #[test]
    fn mismatched_confirmation_is_rejected() {
        let mut form = register_form();
        form.password_confirmation = "different1".to_string();
        assert!(matches!(
            NewUser::try_from(form),
            Err(FormError::PasswordMismatch)
        ));
    }

    #[test]
    fn admin_code_must_have_six_digits() {
        let form = AdminLoginForm {
            login: "root".to_string(),
            password: "secret".to_string(),
            code: "12a45".to_string(),
        };
        assert!(matches!(
            AdminLoginPayload::try_from(form),
            Err(FormError::InvalidCode)
        ));

        let form = AdminLoginForm {
            login: "root".to_string(),
            password: "secret".to_string(),
            code: "123 456".to_string(),
        };
        let payload = AdminLoginPayload::try_from(form).unwrap();
        assert_eq!(payload.code.as_str(), "123456");
    }
}
