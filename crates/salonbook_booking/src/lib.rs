// --- File: crates/salonbook_booking/src/lib.rs ---
// Declare modules within this crate
pub mod catalog;
#[cfg(test)]
mod catalog_test;
pub mod doc;
pub mod handlers;
pub mod notify;
pub mod routes;
pub mod service;

pub use routes::{routes, routes_with_state};
