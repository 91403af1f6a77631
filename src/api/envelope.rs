//! Response envelopes shared by every backend endpoint.

use serde::{Deserialize, Serialize};

use crate::api::errors::{ApiError, ApiResult};

/// `{ data, success, message? }`
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

fn default_success() -> bool {
    true
}

impl<T> ApiResponse<T> {
    /// Unwraps the payload, turning `success == false` into [`ApiError::Rejected`].
    pub fn into_result(self) -> ApiResult<T> {
        if self.success {
            Ok(self.data)
        } else {
            Err(ApiError::Rejected(
                self.message
                    .unwrap_or_else(|| crate::api::errors::GENERIC_FAILURE.to_string()),
            ))
        }
    }
}

/// `{ data, total, page, pageSize, totalPages }`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl<T> PaginatedResponse<T> {
    pub fn empty(page: usize, page_size: usize) -> Self {
        Self {
            data: Vec::new(),
            total: 0,
            page,
            page_size,
            total_pages: 0,
        }
    }
}

/// Error body produced by the backend; either field may carry the text.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message.or_else(|| match self.detail {
            Some(serde_json::Value::String(detail)) => Some(detail),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsuccessful_envelope_becomes_rejection() {
        let envelope: ApiResponse<Option<u8>> =
            serde_json::from_str(r#"{"data":null,"success":false,"message":"Неверный пароль"}"#)
                .unwrap();
        assert_eq!(
            envelope.into_result(),
            Err(ApiError::Rejected("Неверный пароль".into()))
        );
    }

    #[test]
    fn error_body_prefers_message_then_string_detail() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail":"Сертификат не найден"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Сертификат не найден"));

        let body: ErrorBody =
            serde_json::from_str(r#"{"detail":[{"loc":["body","inn"],"msg":"bad"}]}"#).unwrap();
        assert_eq!(body.into_message(), None);
    }

    #[test]
    fn paginated_envelope_reads_camel_case() {
        let page: PaginatedResponse<u8> = serde_json::from_str(
            r#"{"data":[1,2],"total":42,"page":2,"pageSize":20,"totalPages":3}"#,
        )
        .unwrap();
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.data, vec![1, 2]);
    }
}
