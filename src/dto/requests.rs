use serde::{Deserialize, Serialize};

use crate::domain::request::{Request, RequestTab, RequestType};
use crate::dto::badges::{Badge, Badged};

#[derive(Debug, Default, Clone, Deserialize)]
pub struct RequestsQuery {
    pub tab: Option<String>,
}

pub fn request_type_label(kind: RequestType) -> &'static str {
    match kind {
        RequestType::CompanyRegistration => "Регистрация компании",
        RequestType::EmployeeJoin => "Вступление сотрудника",
        RequestType::Partnership => "Партнёрство",
    }
}

#[derive(Debug, Serialize)]
pub struct RequestRow {
    pub request: Request,
    pub status: Badge,
    pub type_label: &'static str,
    pub pending: bool,
}

impl From<Request> for RequestRow {
    fn from(request: Request) -> Self {
        Self {
            status: request.status.badge(),
            type_label: request_type_label(request.request_type),
            pending: request.is_pending(),
            request,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TabView {
    pub key: &'static str,
    pub label: &'static str,
    pub active: bool,
}

pub fn tab_label(tab: RequestTab) -> &'static str {
    match tab {
        RequestTab::All => "Все",
        RequestTab::Join => "Вступление",
        RequestTab::Partnership => "Партнёрство",
        RequestTab::Company => "Компании",
        RequestTab::User => "Пользователи",
    }
}

pub fn tab_views(tabs: &[RequestTab], active: RequestTab) -> Vec<TabView> {
    tabs.iter()
        .map(|tab| TabView {
            key: tab.as_str(),
            label: tab_label(*tab),
            active: *tab == active,
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct RequestsPageData {
    pub requests: Vec<RequestRow>,
    pub tabs: Vec<TabView>,
    pub pending_count: usize,
}
