//! Typed client for the back-office REST backend.
//!
//! Each resource family is a trait with one method per backend operation.
//! [`http::HttpApi`] implements them over `reqwest`; `mock::MockApi` implements
//! them for tests.
#![allow(async_fn_in_trait)]

use crate::domain::certificate::{
    Certificate, CertificateStatusChange, NewCertificate, UpdateCertificate,
};
use crate::domain::client::{Client, NewClient};
use crate::domain::company::{Company, NewCompany};
use crate::domain::dashboard::{AdminStats, DashboardStats, Period};
use crate::domain::declaration::{
    Declaration, DeclarationGroup, NewDeclaration, NewDeclarationGroup, UpdateDeclaration,
};
use crate::domain::document::{Document, Folder, NewFolder, Upload};
use crate::domain::notification::Notification;
use crate::domain::partnership::{Partnership, PartnershipRequest};
use crate::domain::request::Request;
use crate::domain::task::{NewTask, Task, TaskStatus, UpdateTask};
use crate::domain::types::{
    CertificateId, ClientId, CompanyId, DeclarationId, DocumentId, Email, FolderId, GroupId,
    Inn, Note, NotificationId, PartnershipId, RequestId, TaskId, TwoFactorCode, UserId,
};
use crate::domain::user::{AuthGrant, NewUser, Role, TokenGrant, UpdateUser, User, UserWithRole};

pub mod envelope;
pub mod errors;
#[cfg(feature = "server")]
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod query;
pub mod sequencer;
pub mod token;

pub use envelope::{ApiResponse, PaginatedResponse};
pub use errors::{ApiError, ApiResult};
use query::{CertificateListQuery, DeclarationListQuery, DocumentListQuery, Pagination, TaskListQuery};

/// Bearer token cache, written through to a [`token::TokenStore`].
pub trait BearerAuth {
    fn token(&self) -> Option<String>;
    /// Replaces the cached token; `None` clears it everywhere.
    fn set_token(&self, token: Option<String>);
}

pub trait AuthApi {
    async fn login(&self, email: &Email, password: &str) -> ApiResult<AuthGrant<UserWithRole>>;
    async fn register(&self, new_user: &NewUser) -> ApiResult<AuthGrant<User>>;
    async fn logout(&self) -> ApiResult<()>;
    async fn me(&self) -> ApiResult<UserWithRole>;
    async fn forgot_password(&self, email: &Email) -> ApiResult<()>;
    async fn reset_password(&self, token: &str, password: &str) -> ApiResult<()>;
    async fn admin_login(
        &self,
        login: &str,
        password: &str,
        code: &TwoFactorCode,
    ) -> ApiResult<TokenGrant>;
}

pub trait CompanyApi {
    async fn register_company(&self, company: &NewCompany) -> ApiResult<Company>;
    async fn join_company(&self, inn: &Inn) -> ApiResult<Company>;
    async fn find_company_by_inn(&self, inn: &Inn) -> ApiResult<Option<Company>>;
    async fn get_company(&self, id: CompanyId) -> ApiResult<Company>;
    async fn list_companies(&self, pagination: Pagination)
    -> ApiResult<PaginatedResponse<Company>>;
    async fn block_company(&self, id: CompanyId) -> ApiResult<Company>;
    async fn unblock_company(&self, id: CompanyId) -> ApiResult<Company>;
    async fn delete_company(&self, id: CompanyId) -> ApiResult<()>;
    async fn message_company(&self, id: CompanyId, message: &Note) -> ApiResult<()>;
}

pub trait UserApi {
    async fn get_user(&self, id: UserId) -> ApiResult<UserWithRole>;
    async fn list_company_users(&self, company_id: CompanyId) -> ApiResult<Vec<UserWithRole>>;
    async fn list_users(&self, pagination: Pagination)
    -> ApiResult<PaginatedResponse<UserWithRole>>;
    async fn update_user(&self, id: UserId, update: &UpdateUser) -> ApiResult<User>;
    /// Returns the new avatar URL.
    async fn upload_avatar(&self, id: UserId, avatar: Upload) -> ApiResult<String>;
    async fn block_user(&self, id: UserId) -> ApiResult<User>;
    async fn unblock_user(&self, id: UserId) -> ApiResult<User>;
    async fn remove_user(&self, id: UserId, reassign_to: UserId) -> ApiResult<()>;
    async fn assign_role(&self, id: UserId, role: Role) -> ApiResult<UserWithRole>;
    async fn message_user(&self, id: UserId, message: &Note) -> ApiResult<()>;
}

pub trait DeclarationApi {
    async fn create_declaration(&self, declaration: &NewDeclaration) -> ApiResult<Declaration>;
    async fn update_declaration(
        &self,
        id: DeclarationId,
        update: &UpdateDeclaration,
    ) -> ApiResult<Declaration>;
    async fn delete_declaration(&self, id: DeclarationId) -> ApiResult<()>;
    async fn get_declaration(&self, id: DeclarationId) -> ApiResult<Declaration>;
    async fn list_declarations(
        &self,
        query: &DeclarationListQuery,
    ) -> ApiResult<PaginatedResponse<Declaration>>;
    async fn redirect_declaration(
        &self,
        id: DeclarationId,
        to_user: UserId,
    ) -> ApiResult<Declaration>;
    async fn create_group(&self, group: &NewDeclarationGroup) -> ApiResult<DeclarationGroup>;
    async fn add_to_group(
        &self,
        group_id: GroupId,
        declaration_ids: Vec<DeclarationId>,
    ) -> ApiResult<DeclarationGroup>;
    async fn remove_from_group(
        &self,
        group_id: GroupId,
        declaration_ids: Vec<DeclarationId>,
    ) -> ApiResult<DeclarationGroup>;
    async fn list_groups(&self) -> ApiResult<Vec<DeclarationGroup>>;
}

pub trait CertificateApi {
    async fn create_certificate(&self, certificate: &NewCertificate) -> ApiResult<Certificate>;
    async fn update_certificate(
        &self,
        id: CertificateId,
        update: &UpdateCertificate,
    ) -> ApiResult<Certificate>;
    async fn delete_certificate(&self, id: CertificateId) -> ApiResult<()>;
    async fn get_certificate(&self, id: CertificateId) -> ApiResult<Certificate>;
    async fn list_certificates(
        &self,
        query: &CertificateListQuery,
    ) -> ApiResult<PaginatedResponse<Certificate>>;
    async fn redirect_certificate(
        &self,
        id: CertificateId,
        to_user: UserId,
    ) -> ApiResult<Certificate>;
    async fn update_certificate_status(
        &self,
        id: CertificateId,
        change: &CertificateStatusChange,
    ) -> ApiResult<Certificate>;
    async fn fill_certificate_number(
        &self,
        id: CertificateId,
        number: &str,
    ) -> ApiResult<Certificate>;
    async fn confirm_payment(&self, id: CertificateId) -> ApiResult<Certificate>;
    async fn confirm_review(&self, id: CertificateId) -> ApiResult<Certificate>;
    async fn attach_payment_files(
        &self,
        id: CertificateId,
        file_ids: Vec<DocumentId>,
    ) -> ApiResult<Certificate>;
}

pub trait TaskApi {
    async fn create_task(&self, task: &NewTask) -> ApiResult<Task>;
    async fn update_task(&self, id: TaskId, update: &UpdateTask) -> ApiResult<Task>;
    async fn delete_task(&self, id: TaskId) -> ApiResult<()>;
    async fn get_task(&self, id: TaskId) -> ApiResult<Task>;
    async fn list_tasks(&self, query: &TaskListQuery) -> ApiResult<PaginatedResponse<Task>>;
    async fn update_task_status(&self, id: TaskId, status: TaskStatus) -> ApiResult<Task>;
}

pub trait DocumentApi {
    async fn upload_document(
        &self,
        file: Upload,
        folder_id: Option<FolderId>,
        client_id: Option<ClientId>,
    ) -> ApiResult<Document>;
    async fn delete_document(&self, id: DocumentId) -> ApiResult<()>;
    async fn get_document(&self, id: DocumentId) -> ApiResult<Document>;
    async fn list_documents(&self, query: &DocumentListQuery) -> ApiResult<Vec<Document>>;
    async fn create_folder(&self, folder: &NewFolder) -> ApiResult<Folder>;
    async fn update_folder(&self, id: FolderId, folder: &NewFolder) -> ApiResult<Folder>;
    async fn delete_folder(&self, id: FolderId) -> ApiResult<()>;
    async fn list_folders(&self, parent_id: Option<FolderId>) -> ApiResult<Vec<Folder>>;
}

pub trait ClientApi {
    async fn create_client(&self, client: &NewClient) -> ApiResult<Client>;
    async fn update_client(&self, id: ClientId, client: &NewClient) -> ApiResult<Client>;
    async fn delete_client(&self, id: ClientId) -> ApiResult<()>;
    async fn get_client(&self, id: ClientId) -> ApiResult<Client>;
    async fn list_clients(&self, search: Option<String>) -> ApiResult<Vec<Client>>;
}

pub trait PartnershipApi {
    async fn request_partnership(&self, request: &PartnershipRequest) -> ApiResult<Partnership>;
    async fn accept_partnership(&self, id: PartnershipId) -> ApiResult<Partnership>;
    async fn reject_partnership(&self, id: PartnershipId) -> ApiResult<Partnership>;
    async fn remove_partnership(&self, id: PartnershipId) -> ApiResult<()>;
    async fn list_partnerships(&self) -> ApiResult<Vec<Partnership>>;
}

pub trait RequestApi {
    async fn list_requests(&self) -> ApiResult<Vec<Request>>;
    async fn accept_request(&self, id: RequestId) -> ApiResult<Request>;
    async fn reject_request(&self, id: RequestId) -> ApiResult<Request>;
}

pub trait NotificationApi {
    async fn list_notifications(&self) -> ApiResult<Vec<Notification>>;
    async fn mark_notification_read(&self, id: NotificationId) -> ApiResult<Notification>;
    async fn mark_all_notifications_read(&self) -> ApiResult<()>;
}

pub trait DashboardApi {
    async fn dashboard_stats(
        &self,
        period: Option<Period>,
        employee_id: Option<UserId>,
    ) -> ApiResult<DashboardStats>;
    async fn recent_declarations(&self, limit: usize) -> ApiResult<Vec<Declaration>>;
    async fn recent_certificates(&self, limit: usize) -> ApiResult<Vec<Certificate>>;
}

pub trait AdminApi {
    async fn admin_stats(&self) -> ApiResult<AdminStats>;
    async fn admin_requests(&self) -> ApiResult<Vec<Request>>;
    async fn admin_message(&self, user_id: UserId, message: &Note) -> ApiResult<()>;
}

pub trait SettingsApi {
    async fn update_profile(&self, update: &UpdateUser) -> ApiResult<User>;
    async fn change_password(&self, old_password: &str, new_password: &str) -> ApiResult<()>;
    async fn verify_telegram_code(&self, code: &str) -> ApiResult<()>;
}

/// Every resource namespace of the backend.
pub trait BackofficeApi:
    BearerAuth
    + AuthApi
    + CompanyApi
    + UserApi
    + DeclarationApi
    + CertificateApi
    + TaskApi
    + DocumentApi
    + ClientApi
    + PartnershipApi
    + RequestApi
    + NotificationApi
    + DashboardApi
    + AdminApi
    + SettingsApi
{
}

impl<T> BackofficeApi for T where
    T: BearerAuth
        + AuthApi
        + CompanyApi
        + UserApi
        + DeclarationApi
        + CertificateApi
        + TaskApi
        + DocumentApi
        + ClientApi
        + PartnershipApi
        + RequestApi
        + NotificationApi
        + DashboardApi
        + AdminApi
        + SettingsApi
{
}
