//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::navigation::Language;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    /// Root of the REST backend, e.g. `https://api.example.uz/api/v1`.
    pub api_base_url: String,
    pub templates_dir: String,
    pub secret: String,
    /// Interface language until the visitor picks one.
    #[serde(default)]
    pub default_language: Language,
}
