use super::HttpApi;
use crate::api::token::TokenStore;
use crate::api::{ApiResult, PartnershipApi, RequestApi};
use crate::domain::partnership::{Partnership, PartnershipRequest};
use crate::domain::request::Request;
use crate::domain::types::{PartnershipId, RequestId};

impl<S: TokenStore> PartnershipApi for HttpApi<S> {
    async fn request_partnership(&self, request: &PartnershipRequest) -> ApiResult<Partnership> {
        self.post_json("/partnerships/request", request).await
    }

    async fn accept_partnership(&self, id: PartnershipId) -> ApiResult<Partnership> {
        self.post(&format!("/partnerships/{id}/accept")).await
    }

    async fn reject_partnership(&self, id: PartnershipId) -> ApiResult<Partnership> {
        self.post(&format!("/partnerships/{id}/reject")).await
    }

    async fn remove_partnership(&self, id: PartnershipId) -> ApiResult<()> {
        self.delete(&format!("/partnerships/{id}")).await
    }

    async fn list_partnerships(&self) -> ApiResult<Vec<Partnership>> {
        self.get("/partnerships").await
    }
}

impl<S: TokenStore> RequestApi for HttpApi<S> {
    async fn list_requests(&self) -> ApiResult<Vec<Request>> {
        self.get("/requests").await
    }

    async fn accept_request(&self, id: RequestId) -> ApiResult<Request> {
        self.post(&format!("/requests/{id}/accept")).await
    }

    async fn reject_request(&self, id: RequestId) -> ApiResult<Request> {
        self.post(&format!("/requests/{id}/reject")).await
    }
}
