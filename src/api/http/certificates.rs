use serde_json::json;

use super::HttpApi;
use crate::api::query::CertificateListQuery;
use crate::api::token::TokenStore;
use crate::api::{ApiResult, CertificateApi, PaginatedResponse};
use crate::domain::certificate::{
    Certificate, CertificateStatusChange, NewCertificate, UpdateCertificate,
};
use crate::domain::types::{CertificateId, DocumentId, UserId};

impl<S: TokenStore> CertificateApi for HttpApi<S> {
    async fn create_certificate(&self, certificate: &NewCertificate) -> ApiResult<Certificate> {
        self.post_json("/certificates", certificate).await
    }

    async fn update_certificate(
        &self,
        id: CertificateId,
        update: &UpdateCertificate,
    ) -> ApiResult<Certificate> {
        self.put_json(&format!("/certificates/{id}"), update).await
    }

    async fn delete_certificate(&self, id: CertificateId) -> ApiResult<()> {
        self.delete(&format!("/certificates/{id}")).await
    }

    async fn get_certificate(&self, id: CertificateId) -> ApiResult<Certificate> {
        self.get(&format!("/certificates/{id}")).await
    }

    async fn list_certificates(
        &self,
        query: &CertificateListQuery,
    ) -> ApiResult<PaginatedResponse<Certificate>> {
        self.get_page("/certificates", query.pagination, &query.filters)
            .await
    }

    async fn redirect_certificate(
        &self,
        id: CertificateId,
        to_user: UserId,
    ) -> ApiResult<Certificate> {
        self.post_json(
            &format!("/certificates/{id}/redirect"),
            &json!({ "toUserId": to_user }),
        )
        .await
    }

    async fn update_certificate_status(
        &self,
        id: CertificateId,
        change: &CertificateStatusChange,
    ) -> ApiResult<Certificate> {
        self.post_json(&format!("/certificates/{id}/status"), change)
            .await
    }

    async fn fill_certificate_number(
        &self,
        id: CertificateId,
        number: &str,
    ) -> ApiResult<Certificate> {
        self.post_json(
            &format!("/certificates/{id}/number"),
            &json!({ "number": number }),
        )
        .await
    }

    async fn confirm_payment(&self, id: CertificateId) -> ApiResult<Certificate> {
        self.post(&format!("/certificates/{id}/confirm-payment"))
            .await
    }

    async fn confirm_review(&self, id: CertificateId) -> ApiResult<Certificate> {
        self.post(&format!("/certificates/{id}/confirm-review")).await
    }

    async fn attach_payment_files(
        &self,
        id: CertificateId,
        file_ids: Vec<DocumentId>,
    ) -> ApiResult<Certificate> {
        self.post_json(
            &format!("/certificates/{id}/attach-payment"),
            &json!({ "fileIds": file_ids }),
        )
        .await
    }
}
