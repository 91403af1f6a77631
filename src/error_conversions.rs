//! Error conversion glue between the layers.
//!
//! The domain and API layers must not depend on the service error type, so the
//! conversions live here.

use crate::api::errors::ApiError;
use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<FormError> for ServiceError {
    fn from(val: FormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<ApiError> for ServiceError {
    fn from(val: ApiError) -> Self {
        match val {
            ApiError::Unauthorized => ServiceError::Unauthorized,
            ApiError::NotFound => ServiceError::NotFound,
            ApiError::Transport(_) | ApiError::Decode(_) => ServiceError::Internal(val.to_string()),
            other => ServiceError::Api(other.user_message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_messages_reach_the_user() {
        let err = ServiceError::from(ApiError::Status {
            status: 409,
            message: "ИНН уже зарегистрирован".to_string(),
        });
        assert!(matches!(err, ServiceError::Api(ref m) if m == "ИНН уже зарегистрирован"));
        assert!(matches!(
            ServiceError::from(ApiError::Unauthorized),
            ServiceError::Unauthorized
        ));
    }

    #[test]
    fn form_errors_keep_their_text() {
        let err = ServiceError::from(FormError::InvalidInn);
        assert_eq!(err.to_string(), "ИНН должен состоять из 9 цифр");
    }
}
