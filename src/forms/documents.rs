use serde::Deserialize;
use validator::Validate;

use crate::domain::document::NewFolder;
use crate::domain::types::FolderName;
use crate::forms::clients::parse_access_policy;
use crate::forms::{FormError, parse_optional_id};

/// Used for both creating and renaming a folder.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct FolderForm {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub access_type: String,
    #[serde(default)]
    pub access_user_ids: Vec<String>,
}

impl TryFrom<FolderForm> for NewFolder {
    type Error = FormError;

    fn try_from(form: FolderForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(NewFolder {
            name: FolderName::new(form.name)?,
            parent_id: parse_optional_id(form.parent_id.as_deref())?,
            access: parse_access_policy(&form.access_type, &form.access_user_ids)?,
            client_id: parse_optional_id(form.client_id.as_deref())?,
        })
    }
}

#[cfg(feature = "server")]
pub use upload::{UploadDocumentForm, UploadDocumentPayload, read_upload};

#[cfg(feature = "server")]
mod upload {
    use std::io::Read;

    use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};

    use crate::domain::document::Upload;
    use crate::domain::types::{ClientId, FolderId};
    use crate::forms::{FormError, parse_optional_id};

    /// Reads a received file into memory so it can be forwarded to the backend.
    pub fn read_upload(file: TempFile) -> Result<Upload, FormError> {
        let file_name = file
            .file_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .ok_or(FormError::Required("Файл"))?;
        let content_type = file.content_type.as_ref().map(|mime| mime.to_string());
        let mut bytes = Vec::with_capacity(file.size);
        let mut handle = file.file;
        handle.read_to_end(&mut bytes).map_err(|err| {
            log::error!("Failed to read uploaded file: {err}");
            FormError::InvalidValue("Не удалось прочитать файл".to_string())
        })?;
        Ok(Upload {
            file_name,
            content_type,
            bytes,
        })
    }

    #[derive(MultipartForm)]
    pub struct UploadDocumentForm {
        #[multipart(limit = "25MB")]
        pub file: TempFile,
        pub folder_id: Option<Text<String>>,
        pub client_id: Option<Text<String>>,
    }

    pub struct UploadDocumentPayload {
        pub file: Upload,
        pub folder_id: Option<FolderId>,
        pub client_id: Option<ClientId>,
    }

    impl TryFrom<UploadDocumentForm> for UploadDocumentPayload {
        type Error = FormError;

        fn try_from(form: UploadDocumentForm) -> Result<Self, Self::Error> {
            let folder_id = parse_optional_id(form.folder_id.as_ref().map(|t| t.as_str()))?;
            let client_id = parse_optional_id(form.client_id.as_ref().map(|t| t.as_str()))?;
            Ok(Self {
                file: read_upload(form.file)?,
                folder_id,
                client_id,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::AccessPolicy;

    #[test]
    fn root_folder_has_no_parent() {
        let folder = NewFolder::try_from(FolderForm {
            name: "Договоры".to_string(),
            parent_id: Some(String::new()),
            access_type: "public".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(folder.parent_id, None);
        assert_eq!(folder.access, AccessPolicy::Public);
    }

    #[test]
    fn blank_folder_name_is_rejected() {
        let result = NewFolder::try_from(FolderForm::default());
        assert!(matches!(result, Err(FormError::Validation(_))));
    }
}
