use thiserror::Error;

/// Message used when the backend does not explain a failure.
pub const GENERIC_FAILURE: &str = "Request failed";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Missing, expired or rejected bearer token.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Entity not found")]
    NotFound,

    /// Any other non-2xx status, carrying the backend message or the generic fallback.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// A 2xx envelope with `success == false`.
    #[error("{0}")]
    Rejected(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

impl ApiError {
    /// Maps a non-2xx status code and an optional backend message to an error.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            401 => ApiError::Unauthorized,
            404 => ApiError::NotFound,
            _ => ApiError::Status {
                status,
                message: message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| GENERIC_FAILURE.to_string()),
            },
        }
    }

    /// Text suitable for a flash message.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { message, .. } | ApiError::Rejected(message) => message.clone(),
            ApiError::Unauthorized => "Сессия истекла, войдите снова".to_string(),
            ApiError::NotFound => "Запись не найдена".to_string(),
            ApiError::Transport(_) | ApiError::Decode(_) => GENERIC_FAILURE.to_string(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_variants() {
        assert_eq!(ApiError::from_status(401, None), ApiError::Unauthorized);
        assert_eq!(
            ApiError::from_status(404, Some("Сертификат не найден".into())),
            ApiError::NotFound
        );
        assert_eq!(
            ApiError::from_status(400, Some("ИНН уже зарегистрирован".into())),
            ApiError::Status {
                status: 400,
                message: "ИНН уже зарегистрирован".into()
            }
        );
    }

    #[test]
    fn missing_message_falls_back_to_generic_text() {
        assert_eq!(
            ApiError::from_status(500, None).to_string(),
            GENERIC_FAILURE
        );
        assert_eq!(
            ApiError::from_status(502, Some("  ".into())).user_message(),
            GENERIC_FAILURE
        );
    }
}
