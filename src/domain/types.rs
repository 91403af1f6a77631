//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (fixed-length digit codes,
//! normalized/validated email, parsed identifiers) so that once a value reaches
//! the domain layer it can be treated as trusted.
use std::{ops::Deref, str::FromStr};

use ammonia;
use phonenumber::{Mode, parse};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use uuid::Uuid;
use validator::ValidateEmail;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Phone number did not meet expected format.
    #[error("invalid phone number")]
    InvalidPhone,
    /// Provided uuid failed format validation.
    #[error("invalid uuid value")]
    InvalidUuid,
    /// Fixed-length numeric code had the wrong shape.
    #[error("expected exactly {expected} digits")]
    InvalidDigits { expected: usize },
}

/// Normalizes and validates an email string.
fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = email.into().trim().to_lowercase();
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Strips every non-digit character and truncates the rest to `max` digits.
///
/// Mirrors the input masks used by the INN, post number, declaration number
/// and two-factor code fields: typing letters is a no-op and the field never
/// grows past its fixed width.
pub fn digits_only(input: &str, max: usize) -> String {
    input
        .chars()
        .filter(char::is_ascii_digit)
        .take(max)
        .collect()
}

/// Macro to generate identifiers assigned by the backend.
///
/// Identifiers are only ever parsed from backend data or request paths; the
/// client never mints them.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Wraps an already parsed backend identifier.
            pub const fn from_uuid(value: Uuid) -> Self {
                Self(value)
            }

            /// Returns the raw `Uuid` backing this identifier.
            pub const fn get(self) -> Uuid {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim())
                    .map(Self)
                    .map_err(|_| TypeConstraintError::InvalidUuid)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(UserId, "Unique identifier for a user account.");
id_newtype!(CompanyId, "Unique identifier for a company.");
id_newtype!(DeclarationId, "Unique identifier for a customs declaration.");
id_newtype!(GroupId, "Unique identifier for a declaration group.");
id_newtype!(CertificateId, "Unique identifier for a certificate.");
id_newtype!(CertificateActionId, "Unique identifier for a certificate action log entry.");
id_newtype!(TaskId, "Unique identifier for a task.");
id_newtype!(StatusChangeId, "Unique identifier for a task status change.");
id_newtype!(DocumentId, "Unique identifier for a stored document.");
id_newtype!(FolderId, "Unique identifier for a document folder.");
id_newtype!(ClientId, "Unique identifier for a client counterparty.");
id_newtype!(PartnershipId, "Unique identifier for a partnership.");
id_newtype!(RequestId, "Unique identifier for an inbox request.");
id_newtype!(NotificationId, "Unique identifier for a notification.");

/// Lower-cased and validated email address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Validates and normalizes an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_email(email)?;
        Ok(Self(normalized))
    }

    /// Borrow the email as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the owned inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for Email {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?;
                Ok(Self(inner.into_inner()))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

non_empty_string_newtype!(FullName, "Person name wrapper enforcing non-empty values.");
non_empty_string_newtype!(CompanyName, "Company name wrapper enforcing non-empty values.");
non_empty_string_newtype!(
    CertificateType,
    "Certificate type label (e.g. `СТ-1`, `ГОСТ Р`) enforcing non-empty values."
);
non_empty_string_newtype!(TaskName, "Task title wrapper enforcing non-empty values.");
non_empty_string_newtype!(FolderName, "Folder name wrapper enforcing non-empty values.");
non_empty_string_newtype!(GroupName, "Declaration group name enforcing non-empty values.");
non_empty_string_newtype!(VehicleNumber, "Vehicle plate or wagon number, upper-cased.");

/// Free-text note or message, sanitized and trimmed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Note(String);

impl Note {
    /// Constructs a sanitized, trimmed, non-empty value.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let sanitized = ammonia::clean(&value.into());
        let inner = NonEmptyString::new(sanitized)?;
        Ok(Self(inner.into_inner()))
    }

    /// Builds an optional note, treating blank input as absent.
    pub fn optional(value: &str) -> Option<Self> {
        Self::new(value).ok()
    }

    /// Borrow the value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Note {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Note> for String {
    fn from(value: Note) -> Self {
        value.0
    }
}

/// Macro to generate fixed-width numeric codes.
macro_rules! digit_code_newtype {
    ($name:ident, $len:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Number of digits the code must contain.
            pub const LEN: usize = $len;

            /// Accepts exactly `LEN` ASCII digits after trimming surrounding whitespace.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.len() == Self::LEN && trimmed.chars().all(|c| c.is_ascii_digit()) {
                    Ok(Self(trimmed.to_string()))
                } else {
                    Err(TypeConstraintError::InvalidDigits {
                        expected: Self::LEN,
                    })
                }
            }

            /// Applies the input mask and reports whether the field is complete.
            pub fn mask(input: &str) -> (String, bool) {
                let digits = digits_only(input, Self::LEN);
                let complete = digits.len() == Self::LEN;
                (digits, complete)
            }

            /// Borrow the code as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

digit_code_newtype!(Inn, 9, "Nine-digit company tax identification number.");
digit_code_newtype!(PostNumber, 5, "Five-digit customs post number.");
digit_code_newtype!(DeclarationNumber, 7, "Seven-digit declaration sequence number.");
digit_code_newtype!(TwoFactorCode, 6, "Six-digit admin second-factor code.");

/// Normalizes a phone number string to E.164 format.
pub fn normalize_phone_to_e164(value: &str) -> Result<String, TypeConstraintError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    let parsed = parse(None, trimmed).map_err(|_| TypeConstraintError::InvalidPhone)?;
    Ok(parsed.format().mode(Mode::E164).to_string())
}

/// Normalized phone number wrapper (expected E.164).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Constructs a phone number ensuring it is valid and normalizes to E.164 format.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_phone_to_e164(&value.into())?;
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for PhoneNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for PhoneNumber {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_only_strips_letters_and_truncates() {
        assert_eq!(digits_only("12a34-56 789 0", 9), "123456789");
        assert_eq!(digits_only("abc", 9), "");
        assert_eq!(digits_only("2600", 5), "2600");
    }

    #[test]
    fn inn_requires_exactly_nine_digits() {
        assert!(Inn::new("123456789").is_ok());
        assert_eq!(
            Inn::new("12345678"),
            Err(TypeConstraintError::InvalidDigits { expected: 9 })
        );
        assert!(Inn::new("1234567890").is_err());
        assert!(Inn::new("12345678a").is_err());
    }

    #[test]
    fn inn_mask_truncates_beyond_nine_characters() {
        let (masked, complete) = Inn::mask("30 12-34 56 78 99 11");
        assert_eq!(masked, "301234567");
        assert!(complete);

        let (masked, complete) = Inn::mask("30a1");
        assert_eq!(masked, "301");
        assert!(!complete);
    }

    #[test]
    fn post_and_declaration_numbers_have_fixed_width() {
        assert!(PostNumber::new("26001").is_ok());
        assert!(PostNumber::new("2600").is_err());
        assert!(PostNumber::new("260011").is_err());
        assert!(DeclarationNumber::new("0010722").is_ok());
        assert!(DeclarationNumber::new("010722").is_err());
        assert!(DeclarationNumber::new("00107x2").is_err());
    }

    #[test]
    fn digit_codes_deserialize_through_validation() {
        let ok: Result<Inn, _> = serde_json::from_str("\"123456789\"");
        assert!(ok.is_ok());
        let bad: Result<Inn, _> = serde_json::from_str("\"12345\"");
        assert!(bad.is_err());
    }

    #[test]
    fn identifiers_parse_only_valid_uuids() {
        let id: UserId = "6f1c1f2e-8d0a-4c4e-9f8e-0d1b2c3d4e5f".parse().unwrap();
        assert_eq!(id.to_string(), "6f1c1f2e-8d0a-4c4e-9f8e-0d1b2c3d4e5f");
        assert_eq!(
            "not-a-uuid".parse::<UserId>(),
            Err(TypeConstraintError::InvalidUuid)
        );
    }

    #[test]
    fn note_is_sanitized_and_blank_is_absent() {
        let note = Note::new("  <script>x</script>Deliver by Friday ").unwrap();
        assert_eq!(note.as_str(), "Deliver by Friday");
        assert!(Note::optional("   ").is_none());
    }

    #[test]
    fn email_is_normalized() {
        let email = Email::new("  Director@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "director@example.com");
        assert_eq!(Email::new("nope"), Err(TypeConstraintError::InvalidEmail));
    }
}
