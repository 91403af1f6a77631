//! Dashboard: counters for a period and the latest records.

use crate::api::{ClientApi, DashboardApi, UserApi};
use crate::domain::dashboard::Period;
use crate::domain::types::UserId;
use crate::dto::certificates::CertificateRow;
use crate::dto::dashboard::{DashboardPageData, DashboardQuery, RECENT_LIMIT};
use crate::dto::declarations::DeclarationRow;
use crate::dto::employee_options;
use crate::services::{Member, ServiceResult, non_blank, optional_date, today};

pub async fn load_dashboard<A>(
    api: &A,
    member: &Member,
    query: DashboardQuery,
) -> ServiceResult<DashboardPageData>
where
    A: DashboardApi + ClientApi + UserApi,
{
    let period_from = optional_date(&query.from);
    let period_to = optional_date(&query.to);
    let period = match (period_from, period_to) {
        (Some(from), Some(to)) => Some(Period::new(from, to)),
        _ => None,
    };

    // Employee statistics are a director/senior view.
    let employee_id = if member.is_director_or_senior() {
        non_blank(query.employee_id).and_then(|id| id.parse::<UserId>().ok())
    } else {
        None
    };

    let stats = api
        .dashboard_stats(period, employee_id)
        .await
        .map_err(|err| {
            log::error!("Failed to load dashboard stats: {err}");
            err
        })?;

    let employees = api.list_company_users(member.company_id()).await?;
    let clients = match api.list_clients(None).await {
        Ok(clients) => clients,
        Err(err) => {
            log::warn!("Failed to list clients for the dashboard: {err}");
            Vec::new()
        }
    };

    let show_declarations = member.is_declarant();
    let recent_declarations = if show_declarations {
        api.recent_declarations(RECENT_LIMIT)
            .await?
            .into_iter()
            .map(|d| DeclarationRow::new(d, &clients, &employees))
            .collect()
    } else {
        Vec::new()
    };

    let today = today();
    let activity = member.activity();
    let recent_certificates = api
        .recent_certificates(RECENT_LIMIT)
        .await?
        .into_iter()
        .map(|c| CertificateRow::new(c, activity, today, &clients, &employees))
        .collect();

    Ok(DashboardPageData {
        stats,
        recent_declarations,
        recent_certificates,
        show_declarations,
        employees: if member.is_director_or_senior() {
            employee_options(&employees)
        } else {
            Vec::new()
        },
        selected_employee: employee_id.map(|id| id.to_string()),
        period_from: period.map(|p| p.from),
        period_to: period.map(|p| p.to),
    })
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::api::mock::MockApi;
    use crate::domain::dashboard::DashboardStats;
    use crate::services::fixtures::*;

    const DECLARATION: &str = "dddddddd-dddd-4ddd-8ddd-dddddddddddd";
    const CERTIFICATE: &str = "eeeeeeee-eeee-4eee-8eee-eeeeeeeeeeee";

    fn common(api: &mut MockApi) {
        api.expect_list_company_users()
            .returning(|_| Ok(vec![user(EMPLOYEE, "employee", "declarant")]));
        api.expect_list_clients().returning(|_| Ok(vec![client()]));
        api.expect_recent_certificates()
            .withf(|limit| *limit == RECENT_LIMIT)
            .returning(|_| Ok(vec![certificate(CERTIFICATE, "in_progress")]));
    }

    #[actix_web::test]
    async fn reversed_period_is_swapped_and_employee_forwarded() {
        let mut api = MockApi::new();
        common(&mut api);
        api.expect_dashboard_stats()
            .withf(|period, employee| {
                *period
                    == Some(Period {
                        from: NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
                        to: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
                    })
                    && employee.map(|e| e.to_string()) == Some(EMPLOYEE.to_string())
            })
            .returning(|_, _| Ok(DashboardStats::default()));
        api.expect_recent_declarations()
            .returning(|_| Ok(vec![declaration(DECLARATION)]));

        let query = DashboardQuery {
            from: Some("2025-12-31".to_string()),
            to: Some("2025-12-01".to_string()),
            employee_id: Some(EMPLOYEE.to_string()),
        };
        let data = load_dashboard(&api, &declarant("director"), query)
            .await
            .unwrap();

        assert!(data.show_declarations);
        assert_eq!(data.recent_declarations.len(), 1);
        assert_eq!(data.recent_certificates.len(), 1);
        assert_eq!(data.selected_employee.as_deref(), Some(EMPLOYEE));
        assert_eq!(data.employees.len(), 1);
    }

    #[actix_web::test]
    async fn certifiers_see_no_declarations_and_no_employee_filter() {
        let mut api = MockApi::new();
        common(&mut api);
        api.expect_dashboard_stats()
            .withf(|period, employee| period.is_none() && employee.is_none())
            .returning(|_, _| Ok(DashboardStats::default()));
        api.expect_recent_declarations().never();

        let query = DashboardQuery {
            from: Some("2025-12-01".to_string()),
            to: None,
            employee_id: Some(EMPLOYEE.to_string()),
        };
        let data = load_dashboard(&api, &certifier("employee"), query)
            .await
            .unwrap();

        assert!(!data.show_declarations);
        assert!(data.recent_declarations.is_empty());
        assert!(data.employees.is_empty());
        assert!(data.selected_employee.is_none());
    }
}
