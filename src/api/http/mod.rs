//! `reqwest` implementation of the backend traits.

use std::sync::Mutex;

use reqwest::{Method, RequestBuilder, Response, multipart};
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};

use crate::api::envelope::{ApiResponse, ErrorBody, PaginatedResponse};
use crate::api::errors::{ApiError, ApiResult};
use crate::api::query::Pagination;
use crate::api::token::TokenStore;
use crate::api::BearerAuth;

mod admin;
mod auth;
mod certificates;
mod clients;
mod companies;
mod dashboard;
mod declarations;
mod documents;
mod notifications;
mod partnerships;
mod settings;
mod tasks;
mod users;

/// Query for list endpoints that take nothing besides pagination.
#[derive(Serialize)]
struct NoFilters {}

/// Shared connection settings; cheap to clone into every request handler.
#[derive(Clone, Debug)]
pub struct ApiConnection {
    client: reqwest::Client,
    base_url: String,
}

impl ApiConnection {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Opens a client bound to `store`, priming the token cache from it.
    pub fn open<S: TokenStore>(&self, store: S) -> HttpApi<S> {
        HttpApi::new(self.clone(), store)
    }
}

pub struct HttpApi<S: TokenStore> {
    connection: ApiConnection,
    token: Mutex<Option<String>>,
    store: S,
}

impl<S: TokenStore> HttpApi<S> {
    pub fn new(connection: ApiConnection, store: S) -> Self {
        let token = store.load();
        Self {
            connection,
            token: Mutex::new(token),
            store,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.connection.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.connection.client.request(method, self.url(path));
        match self.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute(&self, builder: RequestBuilder) -> ApiResult<Response> {
        let response = builder.send().await.map_err(|err| {
            log::error!("Backend request failed: {err}");
            ApiError::Transport(err.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(ErrorBody::into_message);
        log::warn!("Backend responded with {status}: {message:?}");
        Err(ApiError::from_status(status.as_u16(), message))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    /// Sends a request and unwraps the `{ data, success, message }` envelope.
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let response = self.execute(builder).await?;
        Self::decode::<ApiResponse<T>>(response).await?.into_result()
    }

    async fn send_unit(&self, builder: RequestBuilder) -> ApiResult<()> {
        self.send::<Option<IgnoredAny>>(builder).await.map(|_| ())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(self.request(Method::GET, path)).await
    }

    async fn get_with<T, Q>(&self, path: &str, query: &Q) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    /// Fetches a paginated list, which is not wrapped in the usual envelope.
    async fn get_page<T, Q>(
        &self,
        path: &str,
        pagination: Pagination,
        filters: &Q,
    ) -> ApiResult<PaginatedResponse<T>>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self
            .request(Method::GET, path)
            .query(&pagination.as_query())
            .query(filters);
        let response = self.execute(builder).await?;
        Self::decode(response).await
    }

    async fn post<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(self.request(Method::POST, path)).await
    }

    async fn post_unit(&self, path: &str) -> ApiResult<()> {
        self.send_unit(self.request(Method::POST, path)).await
    }

    async fn post_json<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    async fn post_json_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<()> {
        self.send_unit(self.request(Method::POST, path).json(body))
            .await
    }

    async fn put_json<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    async fn delete(&self, path: &str) -> ApiResult<()> {
        self.send_unit(self.request(Method::DELETE, path)).await
    }

    /// Multipart upload. Skips the JSON body builder but keeps the bearer header.
    async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: multipart::Form,
    ) -> ApiResult<T> {
        self.send(self.request(Method::POST, path).multipart(form))
            .await
    }
}

impl<S: TokenStore> BearerAuth for HttpApi<S> {
    fn token(&self) -> Option<String> {
        match self.token.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn set_token(&self, token: Option<String>) {
        self.store.save(token.as_deref());
        let mut guard = match self.token.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = token;
    }
}

/// Builds the multipart part for an uploaded file.
fn file_part(upload: crate::domain::document::Upload) -> ApiResult<multipart::Part> {
    let part = multipart::Part::bytes(upload.bytes).file_name(upload.file_name);
    match upload.content_type {
        Some(mime) => part
            .mime_str(&mime)
            .map_err(|err| ApiError::Decode(format!("invalid content type `{mime}`: {err}"))),
        None => Ok(part),
    }
}
