//! HTTP handlers for the web view

pub mod cleaning;
pub mod health;

pub use cleaning::{cleaning_page, record_routines};
pub use health::health_routes;
