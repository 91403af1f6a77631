use reqwest::multipart;

use super::{HttpApi, file_part};
use crate::api::query::DocumentListQuery;
use crate::api::token::TokenStore;
use crate::api::{ApiResult, DocumentApi};
use crate::domain::document::{Document, Folder, NewFolder, Upload};
use crate::domain::types::{ClientId, DocumentId, FolderId};

impl<S: TokenStore> DocumentApi for HttpApi<S> {
    async fn upload_document(
        &self,
        file: Upload,
        folder_id: Option<FolderId>,
        client_id: Option<ClientId>,
    ) -> ApiResult<Document> {
        let mut form = multipart::Form::new().part("file", file_part(file)?);
        if let Some(folder_id) = folder_id {
            form = form.text("folderId", folder_id.to_string());
        }
        if let Some(client_id) = client_id {
            form = form.text("clientId", client_id.to_string());
        }
        self.post_multipart("/documents/upload", form).await
    }

    async fn delete_document(&self, id: DocumentId) -> ApiResult<()> {
        self.delete(&format!("/documents/{id}")).await
    }

    async fn get_document(&self, id: DocumentId) -> ApiResult<Document> {
        self.get(&format!("/documents/{id}")).await
    }

    async fn list_documents(&self, query: &DocumentListQuery) -> ApiResult<Vec<Document>> {
        self.get_with("/documents", query).await
    }

    async fn create_folder(&self, folder: &NewFolder) -> ApiResult<Folder> {
        self.post_json("/documents/folders", folder).await
    }

    async fn update_folder(&self, id: FolderId, folder: &NewFolder) -> ApiResult<Folder> {
        self.put_json(&format!("/documents/folders/{id}"), folder)
            .await
    }

    async fn delete_folder(&self, id: FolderId) -> ApiResult<()> {
        self.delete(&format!("/documents/folders/{id}")).await
    }

    async fn list_folders(&self, parent_id: Option<FolderId>) -> ApiResult<Vec<Folder>> {
        match parent_id {
            Some(parent_id) => {
                self.get_with("/documents/folders", &[("parentId", parent_id.to_string())])
                    .await
            }
            None => self.get("/documents/folders").await,
        }
    }
}
