//! Annotation normalization for the PDF viewer.
//!
//! The host-independent half of the viewer glue: decoding the transported
//! document, mapping rendering-library annotations into the normalized
//! record the embedded consumer expects, and the date conversion that goes
//! with it. The browser surface lives in `pdfannot-wasm`.

pub mod annotation;
pub mod date;
pub mod error;

pub use annotation::{convert, convert_pages, Annotation, AnnotationKind, RawAnnotation};
pub use date::convert_date;
pub use error::AnnotationError;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Decode a base64-encoded document into its raw bytes.
///
/// Standard alphabet only; anything else is a decode failure carrying the
/// underlying reason.
pub fn decode_document(base64_document: &str) -> Result<Vec<u8>, AnnotationError> {
    STANDARD
        .decode(base64_document)
        .map_err(|e| AnnotationError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_document() {
        assert_eq!(decode_document("aGVsbG8=").unwrap(), b"hello");
    }

    #[test]
    fn test_decode_rejects_malformed_input() {
        let err = decode_document("not base64!").unwrap_err();
        assert!(matches!(err, AnnotationError::Decode(_)));
    }

    #[test]
    fn test_decode_rejects_url_safe_alphabet() {
        // '-' and '_' belong to the URL-safe variant, not the standard one.
        assert!(decode_document("a-b_").is_err());
    }

    #[test]
    fn test_error_messages_name_the_page() {
        let err = AnnotationError::PageFetch {
            page: 2,
            reason: "network error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to fetch annotations for page 2: network error"
        );
    }
}
