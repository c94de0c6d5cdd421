//! PDF text extraction.
//!
//! Primary path decodes page by page with `lopdf` so a single bad page only
//! costs that page. When `lopdf` loads the file but recovers no text at all,
//! `pdf-extract` (which decodes fonts more thoroughly) gets one whole-document
//! attempt.

use lopdf::Document;
use tracing::{debug, warn};

/// Page texts in document order, joined with `\n`. Pages without a text layer
/// (scanned images) contribute nothing.
pub fn extract_pdf_text(bytes: &[u8]) -> String {
    let doc = match Document::load_mem(bytes) {
        Ok(doc) => doc,
        Err(e) => {
            warn!("Failed to load PDF: {e}");
            return String::new();
        }
    };

    let page_text = join_pages(
        doc.get_pages()
            .keys()
            .map(|page_num| (*page_num, doc.extract_text(&[*page_num]))),
    );
    or_whole_document(page_text, || extract_whole_document(bytes))
}

/// Joins per-page results, skipping pages that are empty or failed to decode.
fn join_pages(pages: impl IntoIterator<Item = (u32, lopdf::Result<String>)>) -> String {
    let mut texts = Vec::new();

    for (page_num, result) in pages {
        match result {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() {
                    debug!("PDF page {page_num} has no text layer");
                } else {
                    texts.push(text.to_string());
                }
            }
            Err(e) => warn!("Failed to extract text from PDF page {page_num}: {e}"),
        }
    }

    texts.join("\n")
}

/// Keeps the page-by-page text unless it came out empty.
fn or_whole_document(page_text: String, fallback: impl FnOnce() -> String) -> String {
    if !page_text.is_empty() {
        return page_text;
    }
    debug!("lopdf recovered no text, trying pdf-extract");
    fallback().trim().to_string()
}

fn extract_whole_document(bytes: &[u8]) -> String {
    // pdf-extract panics on some malformed inputs rather than returning Err.
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("pdf-extract failed: {e}");
            String::new()
        }
        Err(_) => {
            warn!("pdf-extract panicked while decoding PDF");
            String::new()
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    /// Builds a PDF in memory. `None` pages carry no text operators at all,
    /// the way a scanned page with only an image would.
    pub(crate) fn build_pdf(pages: &[Option<&str>]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for page in pages {
            let operations = match page {
                Some(text) => vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
                None => vec![],
            };
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_pages_are_joined_in_order() {
        let bytes = build_pdf(&[Some("Jane Doe"), Some("Senior Rust Engineer")]);
        let text = extract_pdf_text(&bytes);

        let first = text.find("Jane Doe").expect("page 1 text");
        let second = text.find("Senior Rust Engineer").expect("page 2 text");
        assert!(first < second);
        assert_eq!(text.lines().filter(|l| !l.trim().is_empty()).count(), 2);
    }

    #[test]
    fn test_page_without_text_layer_contributes_nothing() {
        let bytes = build_pdf(&[Some("Experience"), None, Some("Education")]);
        let text = extract_pdf_text(&bytes);

        let first = text.find("Experience").expect("page 1 text");
        let third = text.find("Education").expect("page 3 text");
        assert!(first < third);
        assert!(!text.contains("\n\n"));
    }

    #[test]
    fn test_scanned_only_pdf_is_empty() {
        let bytes = build_pdf(&[None, None]);
        assert_eq!(extract_pdf_text(&bytes), "");
    }

    #[test]
    fn test_garbage_bytes_do_not_panic() {
        assert_eq!(extract_pdf_text(b"%PDF-1.7 truncated"), "");
        assert_eq!(extract_pdf_text(&[]), "");
    }

    #[test]
    fn test_failed_page_is_skipped_and_rest_kept() {
        let pages = vec![
            (1, Ok("Experience\n".to_string())),
            (2, Err(lopdf::Error::PageNumberNotFound(2))),
            (3, Ok("  Education ".to_string())),
        ];
        assert_eq!(join_pages(pages), "Experience\nEducation");
    }

    #[test]
    fn test_all_pages_failing_yields_empty_page_text() {
        let pages = vec![
            (1, Err(lopdf::Error::PageNumberNotFound(1))),
            (2, Err(lopdf::Error::PageNumberNotFound(2))),
        ];
        assert_eq!(join_pages(pages), "");
    }

    #[test]
    fn test_whole_document_fallback_runs_only_when_pages_are_empty() {
        let kept = or_whole_document("Jane Doe".to_string(), || {
            panic!("fallback must not run when pages produced text")
        });
        assert_eq!(kept, "Jane Doe");

        let recovered = or_whole_document(String::new(), || "\n Jane Doe \n".to_string());
        assert_eq!(recovered, "Jane Doe");
    }
}
