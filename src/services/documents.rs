//! Document storage: folder navigation, uploads and folder access policies.

use crate::api::query::DocumentListQuery;
use crate::api::{ClientApi, DocumentApi, UserApi};
use crate::domain::document::{Document, Folder, NewFolder, Upload, breadcrumbs};
use crate::domain::types::{ClientId, DocumentId, FolderId};
use crate::dto::documents::{DocumentsPageData, DocumentsQuery, FolderView};
use crate::dto::{client_options, employee_options};
use crate::forms::documents::FolderForm;
use crate::forms::parse_optional_id;
use crate::services::{Member, ServiceError, ServiceResult};

/// Loads the content of one folder (`None` is the root) with its breadcrumb trail.
pub async fn load_documents_page<A>(
    api: &A,
    member: &Member,
    query: DocumentsQuery,
) -> ServiceResult<DocumentsPageData>
where
    A: DocumentApi + ClientApi + UserApi,
{
    let current_id: Option<FolderId> = parse_optional_id(query.folder_id.as_deref())?;
    let client_id: Option<ClientId> = parse_optional_id(query.client_id.as_deref())?;

    let folders = api.list_folders(None).await.map_err(|err| {
        log::error!("Failed to list folders: {err}");
        err
    })?;

    let current = match current_id {
        Some(id) => Some(
            folders
                .iter()
                .find(|f| f.id == id)
                .cloned()
                .ok_or(ServiceError::NotFound)?,
        ),
        None => None,
    };

    let mut list_query = DocumentListQuery::new().folder(current_id);
    if let Some(client_id) = client_id {
        list_query = list_query.client(client_id);
    }
    let documents = api.list_documents(&list_query).await.map_err(|err| {
        log::error!("Failed to list documents: {err}");
        err
    })?;

    let clients = api.list_clients(None).await?;
    let employees = api.list_company_users(member.company_id()).await?;

    let trail = breadcrumbs(&folders, current_id);
    let children = folders
        .into_iter()
        .filter(|f| f.parent_id == current_id)
        .map(FolderView::from)
        .collect();

    Ok(DocumentsPageData {
        current,
        breadcrumbs: trail,
        folders: children,
        documents,
        employees: employee_options(&employees),
        clients: client_options(&clients),
    })
}

pub async fn upload_document<A>(
    api: &A,
    file: Upload,
    folder_id: Option<FolderId>,
    client_id: Option<ClientId>,
) -> ServiceResult<Document>
where
    A: DocumentApi,
{
    if file.bytes.is_empty() {
        return Err(ServiceError::Form("Файл пуст".to_string()));
    }
    let name = file.file_name.clone();

    api.upload_document(file, folder_id, client_id)
        .await
        .map_err(|err| {
            log::error!("Failed to upload document {name}: {err}");
            err.into()
        })
}

pub async fn delete_document<A>(api: &A, id: DocumentId) -> ServiceResult<()>
where
    A: DocumentApi,
{
    api.delete_document(id).await.map_err(|err| {
        log::error!("Failed to delete document {id}: {err}");
        err.into()
    })
}

pub async fn create_folder<A>(api: &A, form: FolderForm) -> ServiceResult<Folder>
where
    A: DocumentApi,
{
    let folder = NewFolder::try_from(form)?;

    api.create_folder(&folder).await.map_err(|err| {
        log::error!("Failed to create folder: {err}");
        err.into()
    })
}

/// Renames, moves or changes access of a folder; a folder cannot become its own parent.
pub async fn update_folder<A>(api: &A, id: FolderId, form: FolderForm) -> ServiceResult<Folder>
where
    A: DocumentApi,
{
    let folder = NewFolder::try_from(form)?;
    if folder.parent_id == Some(id) {
        return Err(ServiceError::Form(
            "Папка не может быть вложена сама в себя".to_string(),
        ));
    }

    api.update_folder(id, &folder).await.map_err(|err| {
        log::error!("Failed to update folder {id}: {err}");
        err.into()
    })
}

pub async fn delete_folder<A>(api: &A, id: FolderId) -> ServiceResult<()>
where
    A: DocumentApi,
{
    api.delete_folder(id).await.map_err(|err| {
        log::error!("Failed to delete folder {id}: {err}");
        err.into()
    })
}
