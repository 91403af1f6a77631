use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{Email, FullName, PhoneNumber};
use crate::domain::user::UpdateUser;
use crate::forms::FormError;
use crate::forms::auth::MIN_PASSWORD_LENGTH;
use crate::navigation::Language;

#[derive(Debug, Deserialize, Validate)]
pub struct ProfileForm {
    #[validate(length(min = 1, max = 255))]
    pub full_name: String,
    #[validate(length(min = 1))]
    pub phone: String,
}

impl TryFrom<ProfileForm> for UpdateUser {
    type Error = FormError;

    fn try_from(form: ProfileForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(UpdateUser {
            full_name: Some(FullName::new(form.full_name)?),
            phone: Some(PhoneNumber::new(form.phone)?),
            ..Default::default()
        })
    }
}

/// Email changes go through their own form, behind Telegram confirmation.
#[derive(Debug, Deserialize, Validate)]
pub struct EmailForm {
    #[validate(email)]
    pub email: String,
}

impl TryFrom<EmailForm> for UpdateUser {
    type Error = FormError;

    fn try_from(form: EmailForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(UpdateUser {
            email: Some(Email::new(form.email)?),
            ..Default::default()
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordForm {
    #[validate(length(min = 1))]
    pub old_password: String,
    #[validate(length(min = MIN_PASSWORD_LENGTH))]
    pub new_password: String,
    pub confirm_password: String,
}

pub struct ChangePasswordPayload {
    pub old_password: String,
    pub new_password: String,
}

impl TryFrom<ChangePasswordForm> for ChangePasswordPayload {
    type Error = FormError;

    fn try_from(form: ChangePasswordForm) -> Result<Self, Self::Error> {
        if form.new_password != form.confirm_password {
            return Err(FormError::PasswordMismatch);
        }
        form.validate()?;
        Ok(Self {
            old_password: form.old_password,
            new_password: form.new_password,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct TelegramCodeForm {
    #[validate(length(min = 1, max = 32))]
    pub code: String,
}

impl TryFrom<TelegramCodeForm> for String {
    type Error = FormError;

    fn try_from(form: TelegramCodeForm) -> Result<Self, Self::Error> {
        let code = TelegramCodeForm {
            code: form.code.trim().to_string(),
        };
        code.validate()?;
        Ok(code.code)
    }
}

#[derive(Debug, Deserialize)]
pub struct LanguageForm {
    pub language: String,
}

impl TryFrom<LanguageForm> for Language {
    type Error = FormError;

    fn try_from(form: LanguageForm) -> Result<Self, Self::Error> {
        Ok(form.language.parse()?)
    }
}

#[cfg(feature = "server")]
pub use avatar::AvatarForm;

#[cfg(feature = "server")]
mod avatar {
    use actix_multipart::form::{MultipartForm, tempfile::TempFile};

    use crate::domain::document::Upload;
    use crate::forms::FormError;
    use crate::forms::documents::read_upload;

    #[derive(MultipartForm)]
    pub struct AvatarForm {
        #[multipart(limit = "2MB")]
        pub avatar: TempFile,
    }

    impl TryFrom<AvatarForm> for Upload {
        type Error = FormError;

        fn try_from(form: AvatarForm) -> Result<Self, Self::Error> {
            let upload = read_upload(form.avatar)?;
            let is_image = upload
                .content_type
                .as_deref()
                .is_some_and(|mime| mime.starts_with("image/"));
            if !is_image {
                return Err(FormError::InvalidValue(
                    "Допустимы только изображения JPG, PNG или GIF".to_string(),
                ));
            }
            Ok(upload)
        }
    }
}
