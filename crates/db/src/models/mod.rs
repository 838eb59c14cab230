//! Entity models and DTOs.
//!
//! Row structs derive `FromRow` and map snake_case columns; API-facing
//! types serialize in camelCase to match the frontend wire format.

pub mod activity_log;
pub mod category;
pub mod circulation;
pub mod document;
pub mod session;
pub mod storage_file;
pub mod user;
pub mod workflow;
