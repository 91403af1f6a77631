use serde::Serialize;

use crate::domain::company::Company;
use crate::domain::partnership::Partnership;
use crate::dto::badges::Badge;

#[derive(Debug, Serialize)]
pub struct PartnershipRow {
    pub partnership: Partnership,
    pub status: Badge,
    /// The other company, when the backend could resolve it.
    pub counterpart: Option<Company>,
    /// Request sent to us and still awaiting an answer.
    pub can_answer: bool,
}

#[derive(Debug, Serialize)]
pub struct PartnersPageData {
    pub partnerships: Vec<PartnershipRow>,
    /// Result of the INN lookup, when one was made.
    pub found: Option<Company>,
    pub lookup_inn: Option<String>,
}
