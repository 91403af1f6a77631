//! Certificates and their approval workflow.
//!
//! A certificate moves `in_progress -> awaiting_payment -> on_review -> completed`.
//! `rejected` can be reached from any state that is not terminal. Each forward
//! step is driven by its own backend endpoint, modelled here as a
//! [`CertificateAction`].

use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CertificateActionId, CertificateId, CertificateType, ClientId, CompanyId, DeclarationId,
    DocumentId, FolderId, Note, TypeConstraintError, UserId,
};
use crate::domain::user::ActivityType;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CertificateStatus {
    InProgress,
    AwaitingPayment,
    OnReview,
    Completed,
    Rejected,
}

impl CertificateStatus {
    pub const ALL: [CertificateStatus; 5] = [
        CertificateStatus::InProgress,
        CertificateStatus::AwaitingPayment,
        CertificateStatus::OnReview,
        CertificateStatus::Completed,
        CertificateStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CertificateStatus::InProgress => "in_progress",
            CertificateStatus::AwaitingPayment => "awaiting_payment",
            CertificateStatus::OnReview => "on_review",
            CertificateStatus::Completed => "completed",
            CertificateStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, CertificateStatus::Completed | CertificateStatus::Rejected)
    }

    /// Statuses reachable in a single step from `self`.
    pub fn next_statuses(&self) -> &'static [CertificateStatus] {
        match self {
            CertificateStatus::InProgress => &[
                CertificateStatus::AwaitingPayment,
                CertificateStatus::Rejected,
            ],
            CertificateStatus::AwaitingPayment => {
                &[CertificateStatus::OnReview, CertificateStatus::Rejected]
            }
            CertificateStatus::OnReview => {
                &[CertificateStatus::Completed, CertificateStatus::Rejected]
            }
            CertificateStatus::Completed | CertificateStatus::Rejected => &[],
        }
    }

    pub fn can_transition_to(&self, next: CertificateStatus) -> bool {
        self.next_statuses().contains(&next)
    }
}

impl Display for CertificateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CertificateStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        CertificateStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| {
                TypeConstraintError::InvalidValue(format!("unknown certificate status `{value}`"))
            })
    }
}

/// Entry of the append-only certificate history.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CertificateActionEntry {
    pub id: CertificateActionId,
    pub certificate_id: CertificateId,
    pub action: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub attached_file_ids: Vec<DocumentId>,
    pub performed_by: UserId,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: CertificateId,
    /// `None` means the declarant certifies for itself.
    #[serde(default)]
    pub certifier_company_id: Option<CompanyId>,
    #[serde(rename = "type")]
    pub certificate_type: String,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub number_to_be_filled_by_certifier: bool,
    pub client_id: ClientId,
    #[serde(default)]
    pub linked_declaration_ids: Vec<DeclarationId>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub attached_document_ids: Vec<DocumentId>,
    #[serde(default)]
    pub attached_folder_ids: Vec<FolderId>,
    pub sent_date: DateTime<Utc>,
    pub status: CertificateStatus,
    pub owner_id: UserId,
    #[serde(default)]
    pub assigned_to_id: Option<UserId>,
    pub company_id: CompanyId,
    #[serde(default)]
    pub certifier_company_name: Option<String>,
    #[serde(default)]
    pub certifier_name: Option<String>,
    #[serde(default)]
    pub declarant_company_id: Option<CompanyId>,
    #[serde(default)]
    pub declarant_company_name: Option<String>,
    #[serde(default)]
    pub declarant_name: Option<String>,
    #[serde(default)]
    pub actions: Vec<CertificateActionEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Certificate {
    pub fn numbering(&self) -> CertificateNumbering {
        match &self.number {
            Some(number) if !self.number_to_be_filled_by_certifier => {
                CertificateNumbering::Provided(number.clone())
            }
            _ => CertificateNumbering::FilledByCertifier,
        }
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.status.is_terminal() && self.deadline < today
    }

    /// Whether the certificate still waits for the certifier to fill its number.
    pub fn awaits_number(&self) -> bool {
        self.number_to_be_filled_by_certifier && self.number.is_none()
    }
}

/// Who supplies the certificate number. The two options exclude each other.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CertificateNumbering {
    Provided(String),
    FilledByCertifier,
}

impl CertificateNumbering {
    /// Projects the choice onto the `number` / `numberToBeFilledByCertifier` wire pair.
    pub fn into_wire(self) -> (Option<String>, bool) {
        match self {
            CertificateNumbering::Provided(number) => (Some(number), false),
            CertificateNumbering::FilledByCertifier => (None, true),
        }
    }
}

/// Payload for creating a certificate.
#[derive(Clone, Debug, PartialEq)]
pub struct NewCertificate {
    pub certifier_company_id: Option<CompanyId>,
    pub certificate_type: CertificateType,
    pub deadline: NaiveDate,
    pub numbering: CertificateNumbering,
    pub client_id: ClientId,
    pub linked_declaration_ids: Vec<DeclarationId>,
    pub note: Option<Note>,
    pub attached_document_ids: Vec<DocumentId>,
    pub attached_folder_ids: Vec<FolderId>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewCertificateWire<'a> {
    certifier_company_id: Option<CompanyId>,
    #[serde(rename = "type")]
    certificate_type: &'a CertificateType,
    deadline: NaiveDate,
    number: Option<String>,
    number_to_be_filled_by_certifier: bool,
    client_id: ClientId,
    linked_declaration_ids: &'a [DeclarationId],
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<&'a Note>,
    attached_document_ids: &'a [DocumentId],
    attached_folder_ids: &'a [FolderId],
}

impl Serialize for NewCertificate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (number, number_to_be_filled_by_certifier) = self.numbering.clone().into_wire();
        NewCertificateWire {
            certifier_company_id: self.certifier_company_id,
            certificate_type: &self.certificate_type,
            deadline: self.deadline,
            number,
            number_to_be_filled_by_certifier,
            client_id: self.client_id,
            linked_declaration_ids: &self.linked_declaration_ids,
            note: self.note.as_ref(),
            attached_document_ids: &self.attached_document_ids,
            attached_folder_ids: &self.attached_folder_ids,
        }
        .serialize(serializer)
    }
}

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCertificate {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub certificate_type: Option<CertificateType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Note>,
}

/// Row action offered for a certificate, each bound to its own endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CertificateAction {
    ConfirmPayment,
    ConfirmReview,
    FillNumber,
    AttachPaymentFiles,
    SetStatus(CertificateStatus),
}

impl CertificateAction {
    /// Stable key used in form posts and templates.
    pub fn key(&self) -> &'static str {
        match self {
            CertificateAction::ConfirmPayment => "confirm_payment",
            CertificateAction::ConfirmReview => "confirm_review",
            CertificateAction::FillNumber => "fill_number",
            CertificateAction::AttachPaymentFiles => "attach_payment",
            CertificateAction::SetStatus(CertificateStatus::Rejected) => "reject",
            CertificateAction::SetStatus(_) => "set_status",
        }
    }
}

/// Lists the actions a member of a company with `activity` may perform on `certificate`.
///
/// The certification side drives the workflow: it asks for payment, fills the
/// number, completes or rejects. The declarant side pays and confirms the review.
pub fn available_actions(
    certificate: &Certificate,
    activity: ActivityType,
) -> Vec<CertificateAction> {
    let status = certificate.status;
    if status.is_terminal() {
        return Vec::new();
    }

    let mut actions = Vec::new();
    match activity {
        ActivityType::Certification => {
            if certificate.awaits_number() {
                actions.push(CertificateAction::FillNumber);
            }
            if status == CertificateStatus::InProgress {
                actions.push(CertificateAction::SetStatus(
                    CertificateStatus::AwaitingPayment,
                ));
            }
            if status == CertificateStatus::OnReview {
                actions.push(CertificateAction::SetStatus(CertificateStatus::Completed));
            }
            actions.push(CertificateAction::SetStatus(CertificateStatus::Rejected));
        }
        ActivityType::Declarant => match status {
            CertificateStatus::AwaitingPayment => {
                actions.push(CertificateAction::AttachPaymentFiles);
                actions.push(CertificateAction::ConfirmPayment);
            }
            CertificateStatus::OnReview => {
                actions.push(CertificateAction::ConfirmReview);
            }
            _ => {}
        },
    }
    actions
}

/// Body of the generic status endpoint.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CertificateStatusChange {
    pub status: CertificateStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Note>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_ids: Option<Vec<DocumentId>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn certificate(status: CertificateStatus) -> Certificate {
        let json = serde_json::json!({
            "id": "11111111-1111-4111-8111-111111111111",
            "type": "СТ-1",
            "deadline": "2025-12-31",
            "numberToBeFilledByCertifier": true,
            "clientId": "22222222-2222-4222-8222-222222222222",
            "sentDate": "2025-12-01T09:00:00Z",
            "status": status.as_str(),
            "ownerId": "33333333-3333-4333-8333-333333333333",
            "companyId": "44444444-4444-4444-8444-444444444444",
            "createdAt": "2025-12-01T09:00:00Z",
            "updatedAt": "2025-12-01T09:00:00Z"
        });
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn workflow_moves_forward_one_step_at_a_time() {
        use CertificateStatus::*;
        assert!(InProgress.can_transition_to(AwaitingPayment));
        assert!(AwaitingPayment.can_transition_to(OnReview));
        assert!(OnReview.can_transition_to(Completed));
        assert!(!InProgress.can_transition_to(Completed));
        assert!(!OnReview.can_transition_to(InProgress));
    }

    #[test]
    fn rejected_is_reachable_from_every_open_state_only() {
        for status in CertificateStatus::ALL {
            assert_eq!(
                status.can_transition_to(CertificateStatus::Rejected),
                !status.is_terminal(),
                "{status}"
            );
        }
        assert!(CertificateStatus::Completed.next_statuses().is_empty());
        assert!(CertificateStatus::Rejected.next_statuses().is_empty());
    }

    #[test]
    fn numbering_choices_are_exclusive_on_the_wire() {
        assert_eq!(
            CertificateNumbering::Provided("UZ-001".into()).into_wire(),
            (Some("UZ-001".to_string()), false)
        );
        assert_eq!(CertificateNumbering::FilledByCertifier.into_wire(), (None, true));
    }

    #[test]
    fn certifier_sees_fill_number_until_it_is_set() {
        let cert = certificate(CertificateStatus::InProgress);
        let actions = available_actions(&cert, ActivityType::Certification);
        assert_eq!(
            actions,
            vec![
                CertificateAction::FillNumber,
                CertificateAction::SetStatus(CertificateStatus::AwaitingPayment),
                CertificateAction::SetStatus(CertificateStatus::Rejected),
            ]
        );
    }

    #[test]
    fn declarant_pays_then_confirms_review() {
        let awaiting = certificate(CertificateStatus::AwaitingPayment);
        assert_eq!(
            available_actions(&awaiting, ActivityType::Declarant),
            vec![
                CertificateAction::AttachPaymentFiles,
                CertificateAction::ConfirmPayment
            ]
        );

        let review = certificate(CertificateStatus::OnReview);
        assert_eq!(
            available_actions(&review, ActivityType::Declarant),
            vec![CertificateAction::ConfirmReview]
        );
    }

    #[test]
    fn terminal_certificates_offer_nothing() {
        let done = certificate(CertificateStatus::Completed);
        assert!(available_actions(&done, ActivityType::Certification).is_empty());
        assert!(available_actions(&done, ActivityType::Declarant).is_empty());
    }

    #[test]
    fn overdue_only_while_open() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert!(certificate(CertificateStatus::OnReview).is_overdue(today));
        assert!(!certificate(CertificateStatus::Completed).is_overdue(today));
    }
}
