//! Web-facing models: server configuration and per-request session context.

pub mod auth;
pub mod config;
