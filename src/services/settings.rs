//! Personal settings of the signed-in user.

use crate::api::{SettingsApi, UserApi};
use crate::domain::document::Upload;
use crate::domain::user::{UpdateUser, User, UserWithRole};
use crate::dto::settings::{SettingsPageData, initials, language_options};
use crate::forms::settings::{
    ChangePasswordForm, ChangePasswordPayload, EmailForm, LanguageForm, ProfileForm,
    TelegramCodeForm,
};
use crate::navigation::Language;
use crate::services::{ServiceError, ServiceResult};

pub fn load_settings_page(
    user: &UserWithRole,
    language: Language,
    notification_sound: bool,
) -> SettingsPageData {
    SettingsPageData {
        initials: initials(&user.user.full_name),
        user: user.clone(),
        languages: language_options(),
        language,
        notification_sound,
    }
}

pub async fn update_profile<A>(api: &A, form: ProfileForm) -> ServiceResult<User>
where
    A: SettingsApi,
{
    let update = UpdateUser::try_from(form)?;

    api.update_profile(&update).await.map_err(|err| {
        log::error!("Failed to update profile: {err}");
        err.into()
    })
}

pub async fn update_email<A>(api: &A, form: EmailForm) -> ServiceResult<User>
where
    A: SettingsApi,
{
    let update = UpdateUser::try_from(form)?;

    api.update_profile(&update).await.map_err(|err| {
        log::error!("Failed to update email: {err}");
        err.into()
    })
}

/// Returns the URL of the stored avatar.
pub async fn upload_avatar<A>(api: &A, user: &UserWithRole, avatar: Upload) -> ServiceResult<String>
where
    A: UserApi,
{
    if avatar.bytes.is_empty() {
        return Err(ServiceError::Form("Файл пуст".to_string()));
    }
    let id = user.user.id;

    api.upload_avatar(id, avatar).await.map_err(|err| {
        log::error!("Failed to upload avatar of user {id}: {err}");
        err.into()
    })
}

pub async fn change_password<A>(api: &A, form: ChangePasswordForm) -> ServiceResult<()>
where
    A: SettingsApi,
{
    let payload = ChangePasswordPayload::try_from(form)?;

    api.change_password(&payload.old_password, &payload.new_password)
        .await
        .map_err(|err| {
            log::error!("Failed to change password: {err}");
            err.into()
        })
}

pub async fn verify_telegram_code<A>(api: &A, form: TelegramCodeForm) -> ServiceResult<()>
where
    A: SettingsApi,
{
    let code = String::try_from(form)?;

    api.verify_telegram_code(&code).await.map_err(|err| {
        log::error!("Failed to verify telegram code: {err}");
        err.into()
    })
}

/// The choice is stored in the visitor's session by the caller.
pub fn change_language(form: LanguageForm) -> ServiceResult<Language> {
    Ok(Language::try_from(form)?)
}
