//! Certificates page and the per-step workflow actions.

use crate::api::query::{CertificateListQuery, DeclarationListQuery, OwnerScope};
use crate::api::sequencer::RequestSequencer;
use crate::api::{CertificateApi, ClientApi, CompanyApi, DeclarationApi, PartnershipApi, UserApi};
use crate::domain::certificate::{
    Certificate, CertificateAction, CertificateStatus, CertificateStatusChange, available_actions,
};
use crate::domain::types::{CertificateId, UserId};
use crate::domain::user::ActivityType;
use crate::dto::certificates::{
    CertificateRow, CertificatesPageData, CertificatesQuery, status_legend,
};
use crate::dto::{SelectOption, client_options, company_options, employee_options};
use crate::forms::certificates::{
    AddCertificateForm, AttachPaymentForm, AttachPaymentPayload, CertificateStatusForm,
    FillNumberForm, FillNumberPayload,
};
use crate::forms::declarations::RedirectForm;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::services::partners::partner_companies;
use crate::services::{
    Member, OwnerFilter, ServiceError, ServiceResult, ensure_colleague, ensure_declarant,
    non_blank, today,
};

/// How many declarations the "link declarations" picker offers.
const LINKABLE_DECLARATIONS: usize = 100;

/// Loads one page of certificates with row actions and the add-form options.
///
/// Returns `None` when a newer load for the same view started meanwhile.
pub async fn load_certificates_page<A>(
    api: &A,
    member: &Member,
    query: CertificatesQuery,
    sequencer: &RequestSequencer,
) -> ServiceResult<Option<CertificatesPageData>>
where
    A: CertificateApi + ClientApi + UserApi + DeclarationApi + PartnershipApi + CompanyApi,
{
    let ticket = sequencer.issue();

    let page = query.page.unwrap_or(1);
    let owner = OwnerFilter::parse(member, query.owner.as_deref());
    let status = non_blank(query.status.clone()).and_then(|s| s.parse::<CertificateStatus>().ok());

    let mut list_query = CertificateListQuery::new()
        .owner(owner.scope, owner.owner_id)
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(term) = non_blank(query.search.clone()) {
        list_query = list_query.search(term);
    }
    if let Some(status) = status {
        list_query = list_query.status(status);
    }

    let certificates = api.list_certificates(&list_query).await.map_err(|err| {
        log::error!("Failed to list certificates: {err}");
        err
    })?;
    let clients = api.list_clients(None).await?;
    let employees = api.list_company_users(member.company_id()).await?;

    let (certifiers, declarations) = if member.is_declarant() {
        (
            certifier_options(api, member).await,
            linkable_declarations(api).await,
        )
    } else {
        (Vec::new(), Vec::new())
    };

    let today = today();
    let activity = member.activity();
    let rows = Paginated::new(
        certificates
            .data
            .into_iter()
            .map(|c| CertificateRow::new(c, activity, today, &clients, &employees))
            .collect(),
        certificates.page,
        certificates.total_pages,
    );

    let data = CertificatesPageData {
        certificates: rows,
        statuses: status_legend(),
        clients: client_options(&clients),
        employees: employee_options(&employees),
        certifiers,
        declarations,
        can_create: member.is_declarant(),
        can_filter_by_employee: member.is_director_or_senior(),
        search_query: non_blank(query.search),
        status,
        owner: owner.as_param(),
    };

    Ok(sequencer.accept(ticket, data))
}

/// Certification partners; an empty list leaves only self-certification.
async fn certifier_options<A>(api: &A, member: &Member) -> Vec<SelectOption>
where
    A: PartnershipApi + CompanyApi,
{
    match partner_companies(api, member).await {
        Ok(companies) => {
            let certifiers: Vec<_> = companies
                .into_iter()
                .filter(|c| c.activity_type == ActivityType::Certification)
                .collect();
            company_options(&certifiers)
        }
        Err(err) => {
            log::warn!("Failed to load certifier companies: {err}");
            Vec::new()
        }
    }
}

async fn linkable_declarations<A>(api: &A) -> Vec<SelectOption>
where
    A: DeclarationApi,
{
    let query = DeclarationListQuery::new()
        .owner(OwnerScope::All, None)
        .paginate(1, LINKABLE_DECLARATIONS);
    match api.list_declarations(&query).await {
        Ok(page) => page
            .data
            .iter()
            .map(|d| SelectOption::new(d.id, d.formatted_number()))
            .collect(),
        Err(err) => {
            log::warn!("Failed to load declarations for linking: {err}");
            Vec::new()
        }
    }
}

/// Creates a certificate; only declarant companies send certificates.
pub async fn create_certificate<A>(
    api: &A,
    member: &Member,
    form: AddCertificateForm,
) -> ServiceResult<Certificate>
where
    A: CertificateApi + PartnershipApi + CompanyApi,
{
    ensure_declarant(member)?;

    let new_certificate = form.into_payload(today())?;

    if let Some(certifier) = new_certificate.certifier_company_id {
        let partners = partner_companies(api, member).await?;
        let is_certifier = partners
            .iter()
            .any(|c| c.id == certifier && c.activity_type == ActivityType::Certification);
        if !is_certifier {
            return Err(ServiceError::Form(
                "Выберите сертифицирующую компанию из партнёров".to_string(),
            ));
        }
    }

    api.create_certificate(&new_certificate)
        .await
        .map_err(|err| {
            log::error!("Failed to create certificate: {err}");
            err.into()
        })
}

pub async fn delete_certificate<A>(api: &A, member: &Member, id: CertificateId) -> ServiceResult<()>
where
    A: CertificateApi,
{
    ensure_declarant(member)?;

    api.delete_certificate(id).await.map_err(|err| {
        log::error!("Failed to delete certificate {id}: {err}");
        err.into()
    })
}

pub async fn redirect_certificate<A>(
    api: &A,
    member: &Member,
    id: CertificateId,
    form: RedirectForm,
) -> ServiceResult<Certificate>
where
    A: CertificateApi + UserApi,
{
    let to_user = UserId::try_from(form)?;
    ensure_colleague(api, member, to_user).await?;

    api.redirect_certificate(id, to_user).await.map_err(|err| {
        log::error!("Failed to redirect certificate {id}: {err}");
        err.into()
    })
}

/// Fetches the certificate and checks `action` is offered for it right now.
async fn ensure_action<A>(
    api: &A,
    member: &Member,
    id: CertificateId,
    action: CertificateAction,
) -> ServiceResult<Certificate>
where
    A: CertificateApi,
{
    let certificate = api.get_certificate(id).await.map_err(|err| {
        log::error!("Failed to get certificate {id}: {err}");
        err
    })?;
    if available_actions(&certificate, member.activity()).contains(&action) {
        Ok(certificate)
    } else {
        Err(ServiceError::Form(
            "Действие недоступно для текущего статуса".to_string(),
        ))
    }
}

pub async fn confirm_payment<A>(
    api: &A,
    member: &Member,
    id: CertificateId,
) -> ServiceResult<Certificate>
where
    A: CertificateApi,
{
    ensure_action(api, member, id, CertificateAction::ConfirmPayment).await?;

    api.confirm_payment(id).await.map_err(|err| {
        log::error!("Failed to confirm payment for certificate {id}: {err}");
        err.into()
    })
}

pub async fn confirm_review<A>(
    api: &A,
    member: &Member,
    id: CertificateId,
) -> ServiceResult<Certificate>
where
    A: CertificateApi,
{
    ensure_action(api, member, id, CertificateAction::ConfirmReview).await?;

    api.confirm_review(id).await.map_err(|err| {
        log::error!("Failed to confirm review for certificate {id}: {err}");
        err.into()
    })
}

pub async fn fill_number<A>(
    api: &A,
    member: &Member,
    id: CertificateId,
    form: FillNumberForm,
) -> ServiceResult<Certificate>
where
    A: CertificateApi,
{
    let payload = FillNumberPayload::try_from(form)?;
    ensure_action(api, member, id, CertificateAction::FillNumber).await?;

    api.fill_certificate_number(id, &payload.number)
        .await
        .map_err(|err| {
            log::error!("Failed to fill number of certificate {id}: {err}");
            err.into()
        })
}

pub async fn attach_payment<A>(
    api: &A,
    member: &Member,
    id: CertificateId,
    form: AttachPaymentForm,
) -> ServiceResult<Certificate>
where
    A: CertificateApi,
{
    let payload = AttachPaymentPayload::try_from(form)?;
    ensure_action(api, member, id, CertificateAction::AttachPaymentFiles).await?;

    api.attach_payment_files(id, payload.file_ids)
        .await
        .map_err(|err| {
            log::error!("Failed to attach payment to certificate {id}: {err}");
            err.into()
        })
}

/// Generic status step: request payment, complete or reject.
pub async fn change_status<A>(
    api: &A,
    member: &Member,
    id: CertificateId,
    form: CertificateStatusForm,
) -> ServiceResult<Certificate>
where
    A: CertificateApi,
{
    let change = CertificateStatusChange::try_from(form)?;
    let certificate =
        ensure_action(api, member, id, CertificateAction::SetStatus(change.status)).await?;
    if !certificate.status.can_transition_to(change.status) {
        return Err(ServiceError::Form("Недопустимый переход статуса".to_string()));
    }

    api.update_certificate_status(id, &change)
        .await
        .map_err(|err| {
            log::error!("Failed to change status of certificate {id}: {err}");
            err.into()
        })
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::services::fixtures::*;

    const CERTIFICATE: &str = "99999999-9999-4999-8999-999999999999";
    const PARTNER: &str = "66666666-6666-4666-8666-666666666666";
    const PARTNERSHIP: &str = "88888888-8888-4888-8888-888888888888";

    fn add_form(certifier: &str) -> AddCertificateForm {
        AddCertificateForm {
            certifier_company_id: certifier.to_string(),
            certificate_type: "СТ-1".to_string(),
            deadline_days: "5".to_string(),
            fill_by_certifier: Some("on".to_string()),
            client_id: CLIENT.to_string(),
            ..Default::default()
        }
    }

    #[actix_web::test]
    async fn certification_companies_cannot_create() {
        let api = MockApi::new();
        let result = create_certificate(&api, &certifier("director"), add_form("self")).await;
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[actix_web::test]
    async fn self_certification_skips_partner_check() {
        let mut api = MockApi::new();
        api.expect_list_partnerships().never();
        api.expect_create_certificate()
            .withf(|c| c.certifier_company_id.is_none())
            .returning(|_| Ok(certificate(CERTIFICATE, "in_progress")));

        let created = create_certificate(&api, &declarant("employee"), add_form("self"))
            .await
            .unwrap();
        assert_eq!(created.status, CertificateStatus::InProgress);
    }

    #[actix_web::test]
    async fn certifier_must_be_an_accepted_partner() {
        let mut api = MockApi::new();
        api.expect_list_partnerships()
            .returning(|| Ok(vec![partnership(PARTNERSHIP, COMPANY, PARTNER, "pending")]));
        api.expect_create_certificate().never();

        let result = create_certificate(&api, &declarant("employee"), add_form(PARTNER)).await;
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[actix_web::test]
    async fn declarant_cannot_confirm_payment_before_it_is_requested() {
        let mut api = MockApi::new();
        api.expect_get_certificate()
            .returning(|_| Ok(certificate(CERTIFICATE, "in_progress")));
        api.expect_confirm_payment().never();

        let result =
            confirm_payment(&api, &declarant("employee"), CERTIFICATE.parse().unwrap()).await;
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[actix_web::test]
    async fn certifier_requests_payment_through_the_status_endpoint() {
        let mut api = MockApi::new();
        api.expect_get_certificate()
            .returning(|_| Ok(certificate(CERTIFICATE, "in_progress")));
        api.expect_update_certificate_status()
            .withf(|_, change| change.status == CertificateStatus::AwaitingPayment)
            .returning(|_, _| Ok(certificate(CERTIFICATE, "awaiting_payment")));

        let form = CertificateStatusForm {
            status: "awaiting_payment".to_string(),
            note: String::new(),
            file_ids: Vec::new(),
        };
        let updated = change_status(&api, &certifier("employee"), CERTIFICATE.parse().unwrap(), form)
            .await
            .unwrap();
        assert_eq!(updated.status, CertificateStatus::AwaitingPayment);
    }

    #[actix_web::test]
    async fn completed_certificates_accept_no_status_change() {
        let mut api = MockApi::new();
        api.expect_get_certificate()
            .returning(|_| Ok(certificate(CERTIFICATE, "completed")));
        api.expect_update_certificate_status().never();

        let form = CertificateStatusForm {
            status: "rejected".to_string(),
            note: String::new(),
            file_ids: Vec::new(),
        };
        let result =
            change_status(&api, &certifier("director"), CERTIFICATE.parse().unwrap(), form).await;
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[actix_web::test]
    async fn certifier_fills_a_pending_number() {
        let mut api = MockApi::new();
        api.expect_get_certificate()
            .returning(|_| Ok(certificate(CERTIFICATE, "on_review")));
        api.expect_fill_certificate_number()
            .withf(|_, number| number == "UZ-2025-001")
            .returning(|_, _| Ok(certificate(CERTIFICATE, "on_review")));

        let form = FillNumberForm {
            number: " UZ-2025-001 ".to_string(),
        };
        assert!(
            fill_number(&api, &certifier("employee"), CERTIFICATE.parse().unwrap(), form)
                .await
                .is_ok()
        );
    }

    #[actix_web::test]
    async fn page_offers_row_actions_for_the_viewer_side() {
        let mut api = MockApi::new();
        api.expect_list_certificates()
            .returning(|_| Ok(page(vec![certificate(CERTIFICATE, "awaiting_payment")])));
        api.expect_list_clients().returning(|_| Ok(vec![client()]));
        api.expect_list_company_users()
            .returning(|_| Ok(vec![user(EMPLOYEE, "employee", "declarant")]));
        api.expect_list_partnerships().returning(|| Ok(Vec::new()));
        api.expect_list_declarations()
            .returning(|_| Ok(page(vec![declaration(PARTNERSHIP)])));

        let data = load_certificates_page(
            &api,
            &declarant("employee"),
            CertificatesQuery::default(),
            &RequestSequencer::new(),
        )
        .await
        .unwrap()
        .unwrap();

        let keys: Vec<_> = data.certificates.items[0]
            .actions
            .iter()
            .map(|a| a.key)
            .collect();
        assert_eq!(keys, vec!["attach_payment", "confirm_payment"]);
        assert!(data.can_create);
        assert_eq!(data.declarations[0].label, "26001/22.12.2025/0010722");
    }
}
