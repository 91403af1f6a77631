use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::certificate::{
    Certificate, CertificateAction, CertificateNumbering, CertificateStatus, available_actions,
};
use crate::domain::client::Client;
use crate::domain::user::{ActivityType, UserWithRole};
use crate::dto::badges::{Badge, Badged, legend};
use crate::dto::{SelectOption, client_name, user_name};
use crate::pagination::Paginated;

/// Query string of the certificates page.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CertificatesQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    /// `all`, `mine` or an employee id.
    pub owner: Option<String>,
    pub page: Option<usize>,
    /// Browser tab the list is shown in; see [`crate::api::sequencer::tab_token`].
    pub tab: Option<String>,
}

/// Row action as rendered in the actions dropdown.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ActionView {
    pub key: &'static str,
    pub label: &'static str,
    /// Target status for generic status steps.
    pub status: Option<&'static str>,
}

impl From<CertificateAction> for ActionView {
    fn from(action: CertificateAction) -> Self {
        let (label, status) = match action {
            CertificateAction::ConfirmPayment => ("Подтвердить оплату", None),
            CertificateAction::ConfirmReview => ("Подтвердить проверку", None),
            CertificateAction::FillNumber => ("Заполнить номер", None),
            CertificateAction::AttachPaymentFiles => ("Прикрепить оплату", None),
            CertificateAction::SetStatus(status) => {
                let label = match status {
                    CertificateStatus::AwaitingPayment => "Запросить оплату",
                    CertificateStatus::Completed => "Завершить",
                    CertificateStatus::Rejected => "Отклонить",
                    other => other.badge().label,
                };
                (label, Some(status.as_str()))
            }
        };
        Self {
            key: action.key(),
            label,
            status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CertificateRow {
    pub certificate: Certificate,
    pub status: Badge,
    pub number: String,
    pub overdue: bool,
    pub client_name: Option<String>,
    pub owner_name: Option<String>,
    pub actions: Vec<ActionView>,
}

impl CertificateRow {
    pub fn new(
        certificate: Certificate,
        activity: ActivityType,
        today: NaiveDate,
        clients: &[Client],
        employees: &[UserWithRole],
    ) -> Self {
        let number = match certificate.numbering() {
            CertificateNumbering::Provided(number) => number,
            CertificateNumbering::FilledByCertifier => "Заполнит сертификатор".to_string(),
        };
        Self {
            status: certificate.status.badge(),
            overdue: certificate.is_overdue(today),
            client_name: client_name(clients, certificate.client_id),
            owner_name: user_name(employees, certificate.owner_id),
            actions: available_actions(&certificate, activity)
                .into_iter()
                .map(ActionView::from)
                .collect(),
            number,
            certificate,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CertificatesPageData {
    pub certificates: Paginated<CertificateRow>,
    pub statuses: Vec<(CertificateStatus, Badge)>,
    pub clients: Vec<SelectOption>,
    pub employees: Vec<SelectOption>,
    /// Certification partners offered in the add form, after "self".
    pub certifiers: Vec<SelectOption>,
    pub declarations: Vec<SelectOption>,
    pub can_create: bool,
    pub can_filter_by_employee: bool,
    pub search_query: Option<String>,
    pub status: Option<CertificateStatus>,
    pub owner: String,
}

pub fn status_legend() -> Vec<(CertificateStatus, Badge)> {
    legend(&CertificateStatus::ALL)
}
