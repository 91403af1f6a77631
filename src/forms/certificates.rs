use chrono::{Days, NaiveDate};
use serde::Deserialize;
use validator::Validate;

use crate::domain::certificate::{
    CertificateNumbering, CertificateStatus, CertificateStatusChange, NewCertificate,
};
use crate::domain::types::{CertificateType, CompanyId, DocumentId, Note};
use crate::forms::{FormError, parse_id, parse_ids};

/// Value of the certifier selector meaning "we certify ourselves".
pub const SELF_CERTIFIER: &str = "self";

/// Converts "deadline in N days" into a calendar date.
pub fn deadline_in_days(today: NaiveDate, days: &str) -> Result<NaiveDate, FormError> {
    let days: u64 = days
        .trim()
        .parse()
        .map_err(|_| FormError::InvalidValue("Срок должен быть положительным числом дней".into()))?;
    if days == 0 {
        return Err(FormError::InvalidValue(
            "Срок должен быть положительным числом дней".into(),
        ));
    }
    today
        .checked_add_days(Days::new(days))
        .ok_or(FormError::InvalidDate)
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct AddCertificateForm {
    pub certifier_company_id: String,
    #[validate(length(min = 1, max = 255))]
    pub certificate_type: String,
    pub deadline_days: String,
    #[serde(default)]
    pub number: String,
    /// Checkbox; present only when ticked.
    #[serde(default)]
    pub fill_by_certifier: Option<String>,
    pub client_id: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub note: String,
    #[serde(default)]
    pub declaration_ids: Vec<String>,
    #[serde(default)]
    pub document_ids: Vec<String>,
    #[serde(default)]
    pub folder_ids: Vec<String>,
}

impl AddCertificateForm {
    /// Ticking "fill by certifier" wins over any typed number.
    pub fn numbering(&self) -> Result<CertificateNumbering, FormError> {
        if self.fill_by_certifier.is_some() {
            return Ok(CertificateNumbering::FilledByCertifier);
        }
        match self.number.trim() {
            "" => Err(FormError::MissingCertificateNumber),
            number => Ok(CertificateNumbering::Provided(number.to_string())),
        }
    }

    fn certifier(&self) -> Result<Option<CompanyId>, FormError> {
        match self.certifier_company_id.trim() {
            "" => Err(FormError::Required("Сертифицирующая компания")),
            SELF_CERTIFIER => Ok(None),
            id => parse_id(id, "Сертифицирующая компания").map(Some),
        }
    }

    /// Builds the payload; the deadline is counted from `today`.
    pub fn into_payload(self, today: NaiveDate) -> Result<NewCertificate, FormError> {
        self.validate()?;

        Ok(NewCertificate {
            certifier_company_id: self.certifier()?,
            numbering: self.numbering()?,
            certificate_type: CertificateType::new(self.certificate_type)?,
            deadline: deadline_in_days(today, &self.deadline_days)?,
            client_id: parse_id(&self.client_id, "Клиент")?,
            linked_declaration_ids: parse_ids(&self.declaration_ids)?,
            note: Note::optional(&self.note),
            attached_document_ids: parse_ids(&self.document_ids)?,
            attached_folder_ids: parse_ids(&self.folder_ids)?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct FillNumberForm {
    #[validate(length(min = 1, max = 100))]
    pub number: String,
}

pub struct FillNumberPayload {
    pub number: String,
}

impl TryFrom<FillNumberForm> for FillNumberPayload {
    type Error = FormError;

    fn try_from(form: FillNumberForm) -> Result<Self, Self::Error> {
        form.validate()?;
        match form.number.trim() {
            "" => Err(FormError::Required("Номер сертификата")),
            number => Ok(Self {
                number: number.to_string(),
            }),
        }
    }
}

/// Generic status step with an optional comment and files.
#[derive(Debug, Deserialize)]
pub struct CertificateStatusForm {
    pub status: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub file_ids: Vec<String>,
}

impl TryFrom<CertificateStatusForm> for CertificateStatusChange {
    type Error = FormError;

    fn try_from(form: CertificateStatusForm) -> Result<Self, Self::Error> {
        let file_ids: Vec<DocumentId> = parse_ids(&form.file_ids)?;
        Ok(CertificateStatusChange {
            status: form.status.parse::<CertificateStatus>()?,
            note: Note::optional(&form.note),
            file_ids: (!file_ids.is_empty()).then_some(file_ids),
        })
    }
}

/// Payment receipts attached by the declarant.
#[derive(Debug, Deserialize)]
pub struct AttachPaymentForm {
    #[serde(default)]
    pub file_ids: Vec<String>,
}

pub struct AttachPaymentPayload {
    pub file_ids: Vec<DocumentId>,
}

impl TryFrom<AttachPaymentForm> for AttachPaymentPayload {
    type Error = FormError;

    fn try_from(form: AttachPaymentForm) -> Result<Self, Self::Error> {
        let file_ids: Vec<DocumentId> = parse_ids(&form.file_ids)?;
        if file_ids.is_empty() {
            return Err(FormError::EmptySelection);
        }
        Ok(Self { file_ids })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLIENT: &str = "22222222-2222-4222-8222-222222222222";
    const CERTIFIER: &str = "44444444-4444-4444-8444-444444444444";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 30).unwrap()
    }

    fn form() -> AddCertificateForm {
        AddCertificateForm {
            certifier_company_id: CERTIFIER.to_string(),
            certificate_type: "СТ-1".to_string(),
            deadline_days: "5".to_string(),
            number: "UZ-123456".to_string(),
            client_id: CLIENT.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn deadline_is_counted_in_days_from_today() {
        let certificate = form().into_payload(today()).unwrap();
        assert_eq!(certificate.deadline, NaiveDate::from_ymd_opt(2026, 2, 4).unwrap());
        assert_eq!(
            certificate.numbering,
            CertificateNumbering::Provided("UZ-123456".to_string())
        );
    }

    #[test]
    fn non_positive_deadline_is_rejected() {
        for days in ["0", "-3", "abc", ""] {
            let mut form = form();
            form.deadline_days = days.to_string();
            assert!(form.into_payload(today()).is_err(), "{days}");
        }
    }

    #[test]
    fn fill_by_certifier_clears_number() {
        let mut form = form();
        form.fill_by_certifier = Some("on".to_string());
        let certificate = form.into_payload(today()).unwrap();
        assert_eq!(certificate.numbering, CertificateNumbering::FilledByCertifier);

        let json = serde_json::to_value(&certificate).unwrap();
        assert_eq!(json["number"], serde_json::Value::Null);
        assert_eq!(json["numberToBeFilledByCertifier"], true);
    }

    #[test]
    fn number_or_certifier_is_required() {
        let mut form = form();
        form.number = "  ".to_string();
        assert!(matches!(
            form.into_payload(today()),
            Err(FormError::MissingCertificateNumber)
        ));
    }

    #[test]
    fn self_certification_has_no_certifier_company() {
        let mut form = form();
        form.certifier_company_id = SELF_CERTIFIER.to_string();
        let certificate = form.into_payload(today()).unwrap();
        assert_eq!(certificate.certifier_company_id, None);
    }

    #[test]
    fn status_form_omits_empty_files() {
        let change = CertificateStatusChange::try_from(CertificateStatusForm {
            status: "rejected".to_string(),
            note: "Нет оплаты".to_string(),
            file_ids: vec![],
        })
        .unwrap();
        assert_eq!(change.status, CertificateStatus::Rejected);
        assert_eq!(change.file_ids, None);
    }
}
