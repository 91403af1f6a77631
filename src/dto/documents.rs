use serde::{Deserialize, Serialize};

use crate::domain::document::{Document, Folder};
use crate::dto::SelectOption;

#[derive(Debug, Default, Clone, Deserialize)]
pub struct DocumentsQuery {
    pub folder_id: Option<String>,
    pub client_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FolderView {
    pub folder: Folder,
    pub access_label: &'static str,
}

impl From<Folder> for FolderView {
    fn from(folder: Folder) -> Self {
        Self {
            access_label: access_label(folder.access_type),
            folder,
        }
    }
}

pub fn access_label(access: crate::domain::document::AccessType) -> &'static str {
    use crate::domain::document::AccessType;
    match access {
        AccessType::Private => "Только я",
        AccessType::Public => "Вся компания",
        AccessType::Selected => "Выбранные сотрудники",
    }
}

#[derive(Debug, Serialize)]
pub struct DocumentsPageData {
    pub current: Option<Folder>,
    /// Root first, current folder last.
    pub breadcrumbs: Vec<Folder>,
    pub folders: Vec<FolderView>,
    pub documents: Vec<Document>,
    pub employees: Vec<SelectOption>,
    pub clients: Vec<SelectOption>,
}
