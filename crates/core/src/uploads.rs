//! Upload acceptance rules shared by every multipart endpoint.

use crate::error::CoreError;

/// File extensions accepted for any upload, lowercase, without the dot.
pub const ALLOWED_EXTENSIONS: &[&str] = &["docx", "pdf", "xlsx", "jpg", "png", "pptx"];

/// Maximum accepted upload size (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Which upload area a file belongs to; each gets its own subdirectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Document,
    Circulation,
    Storage,
}

impl UploadKind {
    /// Subdirectory name under the upload root.
    pub fn subdir(self) -> &'static str {
        match self {
            UploadKind::Document => "documents",
            UploadKind::Circulation => "circulation",
            UploadKind::Storage => "storage",
        }
    }
}

/// Extract and validate the extension of an uploaded file name.
///
/// Returns the lowercase extension without the dot.
pub fn validate_extension(file_name: &str) -> Result<String, CoreError> {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(CoreError::Validation(format!(
            "Invalid file type. Only {} are allowed.",
            ALLOWED_EXTENSIONS.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extensions_accepted() {
        assert_eq!(validate_extension("report.pdf").unwrap(), "pdf");
        assert_eq!(validate_extension("photo.JPG").unwrap(), "jpg");
        assert_eq!(validate_extension("a.b.docx").unwrap(), "docx");
    }

    #[test]
    fn test_disallowed_extensions_rejected() {
        assert!(validate_extension("script.exe").is_err());
        assert!(validate_extension("archive.zip").is_err());
        assert!(validate_extension("no_extension").is_err());
    }

    #[test]
    fn test_subdirs_are_distinct() {
        assert_eq!(UploadKind::Document.subdir(), "documents");
        assert_eq!(UploadKind::Circulation.subdir(), "circulation");
        assert_eq!(UploadKind::Storage.subdir(), "storage");
    }
}
