//! Domain logic for the hospital document-management system.
//!
//! This crate has no internal dependencies so it can be used by the
//! repository layer, the API layer, and any future CLI tooling alike.

pub mod activity;
pub mod circulation;
pub mod error;
pub mod roles;
pub mod storage;
pub mod types;
pub mod uploads;
