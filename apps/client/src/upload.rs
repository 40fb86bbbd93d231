//! Contract file selection: accepted types, the picker filter and the drop check.

use std::path::Path;

use bytes::Bytes;
use tracing::warn;

use crate::errors::{AppError, ValidationError};

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Extensions offered by the file picker.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "docx"];

/// A contract the user has picked or dropped, held in memory until submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime: String,
    pub bytes: Bytes,
}

impl SelectedFile {
    /// Builds a selection from the file picker. The picker already filters by
    /// extension, so an unsupported type here is an error rather than a no-op.
    pub fn new(
        name: impl Into<String>,
        mime: Option<&str>,
        bytes: impl Into<Bytes>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let mime = resolve_mime(&name, mime).ok_or_else(|| ValidationError::UnsupportedFile {
            name: name.clone(),
        })?;
        Ok(Self {
            name,
            mime: mime.to_string(),
            bytes: bytes.into(),
        })
    }

    /// Reads a contract from disk.
    pub async fn from_path(path: &Path) -> Result<Self, AppError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        // Validate before reading so an unsupported file is never loaded.
        let mime = picker_accepts(path)
            .then(|| resolve_mime(&name, None))
            .flatten()
            .ok_or_else(|| ValidationError::UnsupportedFile { name: name.clone() })?;
        let bytes = tokio::fs::read(path).await?;
        Ok(Self {
            name,
            mime: mime.to_string(),
            bytes: Bytes::from(bytes),
        })
    }

    /// Drag-and-drop entry point. Anything that is not a PDF or DOCX is
    /// silently rejected (`None`).
    pub fn from_drop(name: &str, mime: Option<&str>, bytes: impl Into<Bytes>) -> Option<Self> {
        match Self::new(name, mime, bytes) {
            Ok(file) => Some(file),
            Err(_) => {
                warn!(name, mime = mime.unwrap_or(""), "ignoring dropped file of unsupported type");
                None
            }
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Checks that the file can be sent: non-empty and within the upload limit.
    pub fn check_size(&self, max_bytes: u64) -> Result<(), ValidationError> {
        if self.bytes.is_empty() {
            return Err(ValidationError::EmptyFile);
        }
        if self.size() > max_bytes {
            return Err(ValidationError::FileTooLarge {
                size: self.size(),
                limit: max_bytes,
            });
        }
        Ok(())
    }
}

/// True if the MIME type or the file extension identifies a PDF or DOCX.
pub fn is_accepted(name: &str, mime: Option<&str>) -> bool {
    resolve_mime(name, mime).is_some()
}

/// The file picker's filter: the extension must be one of [`ACCEPTED_EXTENSIONS`].
pub fn picker_accepts(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
}

/// Canonical MIME type for an accepted file. An explicit MIME type wins;
/// otherwise the extension decides.
fn resolve_mime(name: &str, mime: Option<&str>) -> Option<&'static str> {
    if let Some(mime) = mime.map(|m| m.trim().to_ascii_lowercase()) {
        if mime == PDF_MIME {
            return Some(PDF_MIME);
        }
        if mime == DOCX_MIME {
            return Some(DOCX_MIME);
        }
    }

    let guessed = mime_guess::from_path(name).first_raw()?;
    match guessed {
        PDF_MIME => Some(PDF_MIME),
        DOCX_MIME => Some(DOCX_MIME),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_pdf_and_docx_by_extension() {
        assert!(is_accepted("offer.pdf", None));
        assert!(is_accepted("OFFER.PDF", None));
        assert!(is_accepted("contract.docx", None));
    }

    #[test]
    fn test_rejects_other_types() {
        assert!(!is_accepted("contract.doc", None));
        assert!(!is_accepted("notes.txt", Some("text/plain")));
        assert!(!is_accepted("no_extension", None));
    }

    #[test]
    fn test_mime_overrides_missing_extension() {
        assert!(is_accepted("blob", Some("application/pdf")));
        let file = SelectedFile::new("blob", Some(DOCX_MIME), vec![1u8]).unwrap();
        assert_eq!(file.mime, DOCX_MIME);
    }

    #[test]
    fn test_drop_of_unsupported_file_is_silently_ignored() {
        assert!(SelectedFile::from_drop("photo.png", Some("image/png"), vec![1u8]).is_none());
        assert!(SelectedFile::from_drop("offer.pdf", None, vec![1u8]).is_some());
    }

    #[test]
    fn test_picker_rejects_unsupported_with_error() {
        let err = SelectedFile::new("notes.txt", None, vec![1u8]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnsupportedFile {
                name: "notes.txt".to_string()
            }
        );
    }

    #[test]
    fn test_size_guard() {
        let empty = SelectedFile::new("a.pdf", None, Vec::<u8>::new()).unwrap();
        assert_eq!(empty.check_size(10), Err(ValidationError::EmptyFile));

        let big = SelectedFile::new("a.pdf", None, vec![0u8; 11]).unwrap();
        assert_eq!(
            big.check_size(10),
            Err(ValidationError::FileTooLarge { size: 11, limit: 10 })
        );
        assert!(big.check_size(11).is_ok());
    }

    #[tokio::test]
    async fn test_from_path_reads_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("offer.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();
        let file = SelectedFile::from_path(&path).await.unwrap();
        assert_eq!(file.name, "offer.pdf");
        assert_eq!(file.mime, PDF_MIME);
        assert_eq!(file.size(), 8);
    }

    #[test]
    fn test_picker_filter() {
        assert!(picker_accepts(Path::new("/tmp/offer.pdf")));
        assert!(picker_accepts(Path::new("Contract.DOCX")));
        assert!(!picker_accepts(Path::new("contract.doc")));
        assert!(!picker_accepts(Path::new("pdf")));
    }

    #[tokio::test]
    async fn test_from_path_outside_picker_filter_is_not_read() {
        // The file does not exist: rejection must happen before any read.
        let err = SelectedFile::from_path(Path::new("/nonexistent/notes.txt"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::UnsupportedFile { .. })
        ));
    }
}
