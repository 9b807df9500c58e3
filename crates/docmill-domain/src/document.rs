//! The uploaded document - the immutable input to the pipeline.

use crate::id::DocumentId;

/// An uploaded document as received from the storefront back office.
///
/// Constructed once from an upload event and never mutated; the pipeline
/// reads the bytes during text extraction and then only the metadata is
/// needed.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    /// Unique identifier
    pub id: DocumentId,

    /// Display name, usually the uploaded filename
    pub name: String,

    /// Declared or inferred media type (e.g. "application/pdf")
    pub media_type: String,

    /// Raw binary content
    pub bytes: Vec<u8>,
}

impl RawDocument {
    /// Create a document from an upload event.
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            id: DocumentId::new(),
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Size of the binary content in bytes.
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_construction() {
        let doc = RawDocument::new("terms.pdf", "application/pdf", vec![1, 2, 3]);
        assert_eq!(doc.name, "terms.pdf");
        assert_eq!(doc.media_type, "application/pdf");
        assert_eq!(doc.size_bytes(), 3);
    }
}
