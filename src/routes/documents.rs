use actix_multipart::form::MultipartForm;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::types::{DocumentId, FolderId};
use crate::dto::documents::DocumentsQuery;
use crate::forms::documents::{FolderForm, UploadDocumentForm, UploadDocumentPayload};
use crate::models::auth::MemberContext;
use crate::routes::{finish, member_context, page_error, parse_form, render_template};
use crate::services::ServiceError;
use crate::services::documents as documents_service;

/// Keeps the user inside the folder they were looking at.
fn folder_path(folder_id: Option<FolderId>) -> String {
    match folder_id {
        Some(id) => format!("/documents?folder_id={id}"),
        None => "/documents".to_string(),
    }
}

#[get("/documents")]
pub async fn show_documents(
    ctx: MemberContext,
    query: web::Query<DocumentsQuery>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match documents_service::load_documents_page(&ctx.api, &ctx.member, query.into_inner()).await
    {
        Ok(data) => {
            let mut context = member_context(&ctx, &flash_messages, "/documents");
            context.insert("current", &data.current);
            context.insert("breadcrumbs", &data.breadcrumbs);
            context.insert("folders", &data.folders);
            context.insert("documents", &data.documents);
            context.insert("employees", &data.employees);
            context.insert("clients", &data.clients);

            render_template(&tera, "documents/index.html", &context)
        }
        Err(err) => page_error(err, "/dashboard"),
    }
}

#[post("/documents/upload")]
pub async fn upload_document(
    ctx: MemberContext,
    MultipartForm(form): MultipartForm<UploadDocumentForm>,
) -> impl Responder {
    let payload = UploadDocumentPayload::try_from(form).map_err(ServiceError::from);
    let (result, back) = match payload {
        Ok(payload) => {
            let back = folder_path(payload.folder_id);
            let result = documents_service::upload_document(
                &ctx.api,
                payload.file,
                payload.folder_id,
                payload.client_id,
            )
            .await;
            (result, back)
        }
        Err(err) => (Err(err), folder_path(None)),
    };
    finish(
        result,
        "Документ загружен.",
        "Ошибка при загрузке документа",
        &back,
    )
}

#[post("/documents/{document_id}/delete")]
pub async fn delete_document(
    ctx: MemberContext,
    document_id: web::Path<DocumentId>,
) -> impl Responder {
    let result = documents_service::delete_document(&ctx.api, document_id.into_inner()).await;
    finish(
        result,
        "Документ удалён.",
        "Ошибка при удалении документа",
        "/documents",
    )
}

#[post("/documents/folders/add")]
pub async fn add_folder(ctx: MemberContext, body: web::Bytes) -> impl Responder {
    let result = match parse_form::<FolderForm>(&body) {
        Ok(form) => documents_service::create_folder(&ctx.api, form).await,
        Err(err) => Err(err),
    };
    let back = match &result {
        Ok(folder) => folder_path(folder.parent_id),
        Err(_) => folder_path(None),
    };
    finish(result, "Папка создана.", "Ошибка при создании папки", &back)
}

#[post("/documents/folders/{folder_id}/update")]
pub async fn update_folder(
    ctx: MemberContext,
    folder_id: web::Path<FolderId>,
    body: web::Bytes,
) -> impl Responder {
    let folder_id = folder_id.into_inner();
    let result = match parse_form::<FolderForm>(&body) {
        Ok(form) => documents_service::update_folder(&ctx.api, folder_id, form).await,
        Err(err) => Err(err),
    };
    finish(
        result,
        "Папка обновлена.",
        "Ошибка при изменении папки",
        &folder_path(Some(folder_id)),
    )
}

#[post("/documents/folders/{folder_id}/delete")]
pub async fn delete_folder(ctx: MemberContext, folder_id: web::Path<FolderId>) -> impl Responder {
    let result = documents_service::delete_folder(&ctx.api, folder_id.into_inner()).await;
    finish(
        result,
        "Папка удалена.",
        "Ошибка при удалении папки",
        "/documents",
    )
}
