use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnnotationError {
    #[error("Failed to decode document: {0}")]
    Decode(String),

    #[error("Failed to open document: {0}")]
    DocumentOpen(String),

    #[error("Failed to fetch annotations for page {page}: {reason}")]
    PageFetch { page: u32, reason: String },
}
