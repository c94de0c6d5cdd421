//! Document text extraction — turns an uploaded resume into plain text.
//!
//! Extraction never fails loudly: unreadable pages and paragraphs are skipped,
//! and a document that yields nothing comes back as an empty string. The
//! evaluator treats empty text as an extraction failure.

use bytes::Bytes;
use tracing::{info, warn};

pub mod docx;
pub mod pdf;

/// Resume formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Derives the format from a file name's extension, case-insensitively.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let lower = file_name.trim().to_ascii_lowercase();
        if lower.ends_with(".pdf") {
            Some(DocumentFormat::Pdf)
        } else if lower.ends_with(".docx") {
            Some(DocumentFormat::Docx)
        } else {
            None
        }
    }
}

/// An uploaded resume: raw bytes plus the name it was uploaded under.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub file_name: String,
    pub bytes: Bytes,
}

impl UploadedDocument {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn format(&self) -> Option<DocumentFormat> {
        DocumentFormat::from_file_name(&self.file_name)
    }
}

/// Extracts plain text from the document. Returns an empty string for
/// unsupported formats and for documents with no readable text.
pub fn extract_text(document: &UploadedDocument) -> String {
    let text = match document.format() {
        Some(DocumentFormat::Pdf) => pdf::extract_pdf_text(&document.bytes),
        Some(DocumentFormat::Docx) => docx::extract_docx_text(&document.bytes),
        None => {
            warn!("Unsupported resume format: {}", document.file_name);
            return String::new();
        }
    };

    let text = text.trim().to_string();
    info!(
        "Extracted {} chars from {} ({} bytes)",
        text.len(),
        document.file_name,
        document.bytes.len()
    );
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension_is_case_insensitive() {
        assert_eq!(
            DocumentFormat::from_file_name("Resume.PDF"),
            Some(DocumentFormat::Pdf)
        );
        assert_eq!(
            DocumentFormat::from_file_name("cv.final.docx"),
            Some(DocumentFormat::Docx)
        );
    }

    #[test]
    fn test_unknown_extensions_have_no_format() {
        assert_eq!(DocumentFormat::from_file_name("resume.txt"), None);
        assert_eq!(DocumentFormat::from_file_name("resume.doc"), None);
        assert_eq!(DocumentFormat::from_file_name("pdf"), None);
    }

    #[test]
    fn test_txt_extracts_to_empty_string() {
        let doc = UploadedDocument::new("resume.txt", b"Rust engineer, 5 years".to_vec());
        assert_eq!(extract_text(&doc), "");
    }

    #[test]
    fn test_corrupt_pdf_extracts_to_empty_string() {
        let doc = UploadedDocument::new("resume.pdf", b"definitely not a pdf".to_vec());
        assert_eq!(extract_text(&doc), "");
    }

    #[test]
    fn test_docx_dispatch_trims_result() {
        let bytes = docx::tests::build_docx(&["  Jane Doe", "Rust Engineer  "]);
        let doc = UploadedDocument::new("jane.docx", bytes);
        assert_eq!(extract_text(&doc), "Jane Doe\nRust Engineer");
    }
}
