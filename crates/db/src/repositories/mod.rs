//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod activity_log_repo;
pub mod category_repo;
pub mod circulation_repo;
pub mod document_repo;
pub mod session_repo;
pub mod storage_file_repo;
pub mod user_repo;
pub mod workflow_repo;

pub use activity_log_repo::ActivityLogRepo;
pub use category_repo::CategoryRepo;
pub use circulation_repo::CirculationRepo;
pub use document_repo::{DocumentRepo, DownloadHistoryRepo};
pub use session_repo::SessionRepo;
pub use storage_file_repo::StorageFileRepo;
pub use user_repo::UserRepo;
pub use workflow_repo::WorkflowRepo;
