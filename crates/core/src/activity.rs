//! Activity log constants.
//!
//! The activity trail is append-only; entries are never updated or
//! deleted. Circulation transitions log the resulting status string as
//! the action name, so `approved` / `in_progress` / `rejected` also
//! appear in the `action` column alongside the constants below.

/// Known action names for activity log entries.
pub mod action_types {
    pub const CREATE: &str = "create";
    pub const UPLOAD: &str = "upload";
    pub const DOWNLOAD: &str = "download";
    pub const DELETE: &str = "delete";
    pub const RESTORE: &str = "restore";
}

/// Known resource types for activity log entries.
pub mod resource_types {
    pub const DOCUMENT: &str = "document";
    pub const CIRCULATION: &str = "circulation";
    pub const STORAGE: &str = "storage";
    pub const WORKFLOW: &str = "workflow";
}
