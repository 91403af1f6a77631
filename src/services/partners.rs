//! Partnerships between companies and the partner lookups reused by other pages.

use crate::api::{CompanyApi, PartnershipApi};
use crate::domain::company::Company;
use crate::domain::partnership::{Partnership, PartnershipRequest, PartnershipStatus};
use crate::domain::types::{Inn, PartnershipId};
use crate::domain::user::Role;
use crate::dto::badges::Badged;
use crate::dto::partners::{PartnersPageData, PartnershipRow};
use crate::forms::FormError;
use crate::forms::partners::PartnershipRequestForm;
use crate::services::{Member, ServiceError, ServiceResult, ensure_role, non_blank};

/// Roles allowed to start or answer partnerships.
const PARTNER_MANAGERS: &[Role] = &[Role::Director, Role::Senior];

/// Companies bound to the member's company by an accepted partnership.
///
/// Counterparts the backend cannot resolve are skipped.
pub async fn partner_companies<A>(api: &A, member: &Member) -> ServiceResult<Vec<Company>>
where
    A: PartnershipApi + CompanyApi,
{
    let partnerships = api.list_partnerships().await.map_err(|err| {
        log::error!("Failed to list partnerships: {err}");
        err
    })?;

    let mut companies = Vec::new();
    for partnership in partnerships
        .iter()
        .filter(|p| p.status == PartnershipStatus::Accepted)
    {
        let id = partnership.counterpart(member.company_id());
        match api.get_company(id).await {
            Ok(company) if !company.is_blocked => companies.push(company),
            Ok(_) => {}
            Err(err) => log::warn!("Failed to fetch partner company {id}: {err}"),
        }
    }
    Ok(companies)
}

/// Lists partnerships and, when `lookup` holds an INN, the company it belongs to.
pub async fn load_partners_page<A>(
    api: &A,
    member: &Member,
    lookup: Option<String>,
) -> ServiceResult<PartnersPageData>
where
    A: PartnershipApi + CompanyApi,
{
    let partnerships = api.list_partnerships().await.map_err(|err| {
        log::error!("Failed to list partnerships: {err}");
        err
    })?;

    let own = member.company_id();
    let mut rows = Vec::with_capacity(partnerships.len());
    for partnership in partnerships {
        let counterpart = api.get_company(partnership.counterpart(own)).await.ok();
        rows.push(PartnershipRow {
            status: partnership.status.badge(),
            can_answer: partnership.can_answer(own),
            counterpart,
            partnership,
        });
    }

    let lookup_inn = non_blank(lookup);
    let found = match &lookup_inn {
        Some(raw) => find_company(api, raw).await?,
        None => None,
    };

    Ok(PartnersPageData {
        partnerships: rows,
        found,
        lookup_inn,
    })
}

async fn find_company<A>(api: &A, raw_inn: &str) -> ServiceResult<Option<Company>>
where
    A: CompanyApi,
{
    let inn = Inn::new(raw_inn).map_err(|_| FormError::InvalidInn)?;
    api.find_company_by_inn(&inn).await.map_err(|err| {
        log::error!("Failed to look up company by INN: {err}");
        err.into()
    })
}

pub async fn request_partnership<A>(
    api: &A,
    member: &Member,
    form: PartnershipRequestForm,
) -> ServiceResult<Partnership>
where
    A: PartnershipApi,
{
    ensure_role(member, PARTNER_MANAGERS)?;

    let request = PartnershipRequest::try_from(form)?;
    if request.target_company_inn == member.company.inn {
        return Err(ServiceError::Form(
            "Нельзя отправить запрос своей компании".to_string(),
        ));
    }

    api.request_partnership(&request).await.map_err(|err| {
        log::error!("Failed to request partnership: {err}");
        err.into()
    })
}

pub async fn accept_partnership<A>(
    api: &A,
    member: &Member,
    id: PartnershipId,
) -> ServiceResult<Partnership>
where
    A: PartnershipApi,
{
    ensure_role(member, PARTNER_MANAGERS)?;

    api.accept_partnership(id).await.map_err(|err| {
        log::error!("Failed to accept partnership {id}: {err}");
        err.into()
    })
}

pub async fn reject_partnership<A>(
    api: &A,
    member: &Member,
    id: PartnershipId,
) -> ServiceResult<Partnership>
where
    A: PartnershipApi,
{
    ensure_role(member, PARTNER_MANAGERS)?;

    api.reject_partnership(id).await.map_err(|err| {
        log::error!("Failed to reject partnership {id}: {err}");
        err.into()
    })
}

pub async fn remove_partnership<A>(api: &A, member: &Member, id: PartnershipId) -> ServiceResult<()>
where
    A: PartnershipApi,
{
    ensure_role(member, PARTNER_MANAGERS)?;

    api.remove_partnership(id).await.map_err(|err| {
        log::error!("Failed to remove partnership {id}: {err}");
        err.into()
    })
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::api::mock::MockApi;
    use crate::services::fixtures::*;

    const PARTNER: &str = "66666666-6666-4666-8666-666666666666";
    const PENDING: &str = "77777777-7777-4777-8777-777777777777";
    const ACCEPTED: &str = "88888888-8888-4888-8888-888888888888";

    #[actix_web::test]
    async fn only_accepted_partners_are_listed() {
        let mut api = MockApi::new();
        api.expect_list_partnerships().returning(|| {
            Ok(vec![
                partnership(PENDING, PARTNER, COMPANY, "pending"),
                partnership(ACCEPTED, COMPANY, PARTNER, "accepted"),
            ])
        });
        api.expect_get_company()
            .withf(|id| id.to_string() == PARTNER)
            .times(1)
            .returning(|_| Ok(other_company(PARTNER, "certification")));

        let partners = partner_companies(&api, &declarant("employee")).await.unwrap();
        assert_eq!(partners.len(), 1);
        assert_eq!(partners[0].id.to_string(), PARTNER);
    }

    #[actix_web::test]
    async fn incoming_requests_can_be_answered() {
        let mut api = MockApi::new();
        api.expect_list_partnerships()
            .returning(|| Ok(vec![partnership(PENDING, PARTNER, COMPANY, "pending")]));
        api.expect_get_company()
            .returning(|_| Ok(other_company(PARTNER, "certification")));

        let data = load_partners_page(&api, &declarant("director"), None)
            .await
            .unwrap();
        assert!(data.partnerships[0].can_answer);
        assert!(data.found.is_none());
    }

    #[actix_web::test]
    async fn malformed_lookup_inn_is_a_form_error() {
        let mut api = MockApi::new();
        api.expect_list_partnerships().returning(|| Ok(Vec::new()));
        api.expect_find_company_by_inn().never();

        let result = load_partners_page(&api, &declarant("director"), Some("12ab".into())).await;
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[actix_web::test]
    async fn employees_cannot_request_partnerships() {
        let api = MockApi::new();
        let form = PartnershipRequestForm {
            inn: "111222333".into(),
            note: String::new(),
        };
        let result = request_partnership(&api, &declarant("employee"), form).await;
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[actix_web::test]
    async fn own_inn_is_refused_locally() {
        let mut api = MockApi::new();
        api.expect_request_partnership().never();
        let form = PartnershipRequestForm {
            inn: "123456789".into(),
            note: String::new(),
        };
        let result = request_partnership(&api, &declarant("director"), form).await;
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[actix_web::test]
    async fn backend_failure_is_reported() {
        let mut api = MockApi::new();
        api.expect_accept_partnership()
            .returning(|_| Err(ApiError::Rejected("Запрос уже обработан".into())));
        let result =
            accept_partnership(&api, &declarant("director"), PENDING.parse().unwrap()).await;
        assert!(matches!(result, Err(ServiceError::Api(ref m)) if m == "Запрос уже обработан"));
    }
}
