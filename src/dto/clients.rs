use serde::{Deserialize, Serialize};

use crate::domain::client::Client;
use crate::dto::SelectOption;
use crate::dto::documents::access_label;
use crate::pagination::Paginated;

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ClientsQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ClientRow {
    pub client: Client,
    pub access_label: &'static str,
}

impl From<Client> for ClientRow {
    fn from(client: Client) -> Self {
        Self {
            access_label: access_label(client.access_type),
            client,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClientsPageData {
    pub clients: Paginated<ClientRow>,
    pub employees: Vec<SelectOption>,
    pub search_query: Option<String>,
}
