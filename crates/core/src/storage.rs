//! Personal storage quota constants and arithmetic.
//!
//! Usage counts every non-deleted, non-folder file the owner has; folders
//! and soft-deleted files are free. The check here is pure -- callers read
//! the current usage first, and nothing reserves space between the check
//! and the insert.

use crate::error::CoreError;

/// Per-user cap on total personal file size (5 MiB).
pub const STORAGE_QUOTA_BYTES: i64 = 5 * 1024 * 1024;

/// Fail when the incoming file would push the owner past the quota.
///
/// A file that lands exactly on the limit is accepted.
pub fn check_quota(current_usage: i64, incoming_size: i64) -> Result<(), CoreError> {
    if current_usage + incoming_size > STORAGE_QUOTA_BYTES {
        Err(CoreError::QuotaExceeded {
            usage: current_usage,
            limit: STORAGE_QUOTA_BYTES,
        })
    } else {
        Ok(())
    }
}

/// Usage as a percentage of the quota, for the usage endpoint.
pub fn usage_percentage(usage: i64) -> f64 {
    (usage as f64 / STORAGE_QUOTA_BYTES as f64) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const MB: i64 = 1024 * 1024;

    #[test]
    fn test_upload_within_quota_accepted() {
        assert!(check_quota(0, 3 * MB).is_ok());
    }

    #[test]
    fn test_upload_over_quota_rejected() {
        // 4.5 MB used, 1 MB incoming: over the 5 MB cap.
        let result = check_quota(4 * MB + MB / 2, MB);
        match result {
            Err(CoreError::QuotaExceeded { usage, limit }) => {
                assert_eq!(usage, 4 * MB + MB / 2);
                assert_eq!(limit, STORAGE_QUOTA_BYTES);
            }
            other => panic!("expected QuotaExceeded, got {other:?}"),
        }
    }

    #[test]
    fn test_exact_limit_accepted() {
        assert!(check_quota(2 * MB, 3 * MB).is_ok());
        assert!(check_quota(2 * MB, 3 * MB + 1).is_err());
    }

    #[test]
    fn test_percentage() {
        assert_eq!(usage_percentage(3 * MB), 60.0);
        assert_eq!(usage_percentage(0), 0.0);
    }
}
