//! Form definitions backing the portal pages.
//!
//! Every form is validated locally and converted into a typed payload before
//! anything is sent to the backend.

use std::str::FromStr;

use chrono::NaiveDate;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

use crate::domain::types::{Inn, TypeConstraintError};

pub mod admin;
pub mod auth;
pub mod certificates;
pub mod clients;
pub mod company;
pub mod declarations;
pub mod documents;
pub mod employees;
pub mod partners;
pub mod settings;
pub mod tasks;

/// Date format of `<input type="date">`.
pub const HTML_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("Ошибка валидации формы: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Некорректный email")]
    InvalidEmail,

    #[error("Некорректный номер телефона")]
    InvalidPhoneNumber,

    #[error("Поле «{0}» обязательно")]
    Required(&'static str),

    #[error("ИНН должен состоять из 9 цифр")]
    InvalidInn,

    #[error("Номер поста должен состоять из 5 цифр")]
    InvalidPostNumber,

    #[error("Номер декларации должен состоять из 7 цифр")]
    InvalidDeclarationNumber,

    #[error("Код должен состоять из 6 цифр")]
    InvalidCode,

    #[error("Некорректная дата")]
    InvalidDate,

    #[error("Некорректный идентификатор")]
    InvalidId,

    #[error("Пароли не совпадают")]
    PasswordMismatch,

    #[error("Добавьте хотя бы одно транспортное средство")]
    MissingVehicle,

    #[error("Укажите номер сертификата или поручите его сертификатору")]
    MissingCertificateNumber,

    #[error("Выберите хотя бы одного пользователя")]
    EmptySelection,

    #[error("{0}")]
    InvalidValue(String),
}

impl From<TypeConstraintError> for FormError {
    fn from(err: TypeConstraintError) -> Self {
        match err {
            TypeConstraintError::InvalidEmail => FormError::InvalidEmail,
            TypeConstraintError::InvalidPhone => FormError::InvalidPhoneNumber,
            TypeConstraintError::InvalidUuid => FormError::InvalidId,
            other => FormError::InvalidValue(other.to_string()),
        }
    }
}

/// `validator` hook for nine-digit INN fields.
pub fn validate_inn(value: &str) -> Result<(), ValidationError> {
    Inn::new(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("inn"))
}

/// Parses an HTML date input.
pub fn parse_date(value: &str) -> Result<NaiveDate, FormError> {
    NaiveDate::parse_from_str(value.trim(), HTML_DATE_FORMAT).map_err(|_| FormError::InvalidDate)
}

/// Parses an optional id field where an empty string means "not chosen".
pub fn parse_optional_id<T>(value: Option<&str>) -> Result<Option<T>, FormError>
where
    T: FromStr<Err = TypeConstraintError>,
{
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(raw) => raw.parse().map(Some).map_err(|_| FormError::InvalidId),
        None => Ok(None),
    }
}

/// Parses a required id field.
pub fn parse_id<T>(value: &str, field: &'static str) -> Result<T, FormError>
where
    T: FromStr<Err = TypeConstraintError>,
{
    parse_optional_id(Some(value))?.ok_or(FormError::Required(field))
}

/// Parses every non-empty id of a repeated field.
pub fn parse_ids<T>(values: &[String]) -> Result<Vec<T>, FormError>
where
    T: FromStr<Err = TypeConstraintError>,
{
    values
        .iter()
        .filter_map(|raw| parse_optional_id(Some(raw)).transpose())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::UserId;

    #[test]
    fn empty_ids_are_skipped() {
        let ids: Vec<UserId> = parse_ids(&[
            "".to_string(),
            "0b5b7e7a-1a8e-4a51-9d1c-3f8f1b1c2d3e".to_string(),
        ])
        .unwrap();
        assert_eq!(ids.len(), 1);
    }

    #[test]
    fn malformed_id_is_rejected() {
        let result: Result<Option<UserId>, _> = parse_optional_id(Some("not-a-uuid"));
        assert!(matches!(result, Err(FormError::InvalidId)));
    }

    #[test]
    fn html_dates_are_parsed() {
        assert_eq!(
            parse_date("2025-12-22").unwrap(),
            NaiveDate::from_ymd_opt(2025, 12, 22).unwrap()
        );
        assert!(matches!(parse_date("22.12.2025"), Err(FormError::InvalidDate)));
    }
}
