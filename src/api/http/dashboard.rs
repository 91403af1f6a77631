use super::HttpApi;
use crate::api::token::TokenStore;
use crate::api::{ApiResult, DashboardApi};
use crate::domain::certificate::Certificate;
use crate::domain::dashboard::{DashboardStats, Period};
use crate::domain::declaration::Declaration;
use crate::domain::types::UserId;

impl<S: TokenStore> DashboardApi for HttpApi<S> {
    async fn dashboard_stats(
        &self,
        period: Option<Period>,
        employee_id: Option<UserId>,
    ) -> ApiResult<DashboardStats> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(period) = period {
            params.push(("from", period.from.to_string()));
            params.push(("to", period.to.to_string()));
        }
        if let Some(employee_id) = employee_id {
            params.push(("employeeId", employee_id.to_string()));
        }
        self.get_with("/dashboard/stats", &params).await
    }

    async fn recent_declarations(&self, limit: usize) -> ApiResult<Vec<Declaration>> {
        self.get_with("/dashboard/recent-declarations", &[("limit", limit)])
            .await
    }

    async fn recent_certificates(&self, limit: usize) -> ApiResult<Vec<Certificate>> {
        self.get_with("/dashboard/recent-certificates", &[("limit", limit)])
            .await
    }
}
