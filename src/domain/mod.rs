//! Entities owned by the back-office REST backend and the value objects
//! guarding their invariants.

pub mod certificate;
pub mod client;
pub mod company;
pub mod dashboard;
pub mod declaration;
pub mod document;
pub mod notification;
pub mod partnership;
pub mod request;
pub mod task;
pub mod types;
pub mod user;
