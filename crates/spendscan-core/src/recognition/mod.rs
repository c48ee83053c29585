//! Recognition-service boundary.
//!
//! The core never performs the network call itself; it consumes whatever a
//! [`RecognitionService`] implementation returns. The response shape mirrors
//! a document-text-detection annotate response.

use serde::{Deserialize, Serialize};

use crate::error::RecognitionError;

/// External text-recognition capability.
///
/// The only suspension point in the scan flow; implementations own
/// transport, authentication, and timeouts.
#[allow(async_fn_in_trait)]
pub trait RecognitionService {
    /// Run document text detection over a base64-encoded image payload.
    async fn detect_document_text(
        &self,
        image_base64: &str,
    ) -> std::result::Result<RecognitionResponse, RecognitionError>;
}

/// One annotate response from the recognition service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecognitionResponse {
    /// Full multi-line text of the document, when detected.
    pub full_text_annotation: Option<FullTextAnnotation>,

    /// Per-region annotations; the first element's description carries the
    /// whole text and is used as a fallback.
    pub text_annotations: Vec<TextAnnotation>,

    /// Service-reported error. Clients surface this as a hard failure
    /// before the response reaches the parser.
    pub error: Option<ServiceStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FullTextAnnotation {
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TextAnnotation {
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceStatus {
    pub message: String,
}

impl RecognitionResponse {
    /// The recognized text, if any was found.
    ///
    /// Prefers the full-text annotation, falls back to the first text
    /// annotation's description. Blank text counts as no text: a
    /// recognized-but-empty receipt, not an error.
    pub fn text(&self) -> Option<&str> {
        let text = self
            .full_text_annotation
            .as_ref()
            .map(|full| full.text.as_str())
            .or_else(|| {
                self.text_annotations
                    .first()
                    .map(|annotation| annotation.description.as_str())
            })?;

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Response carrying the given full text (test/offline construction).
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            full_text_annotation: Some(FullTextAnnotation { text: text.into() }),
            ..Self::default()
        }
    }
}
