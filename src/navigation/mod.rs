//! Route table and role gating of the portal.
//!
//! Gating here only decides what to render or where to redirect. The backend
//! enforces authorization on its own.

pub mod guard;
pub mod menu;
pub mod routes;

pub use guard::{LayoutDecision, admin_layout, main_layout, resolve};
pub use menu::{Language, MenuItem, is_active, visible_menu};
pub use routes::{AppRoute, Shell};
