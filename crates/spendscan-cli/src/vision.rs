//! Google Cloud Vision client implementing the recognition boundary.

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use spendscan_core::error::RecognitionError;
use spendscan_core::recognition::{RecognitionResponse, RecognitionService};

const DEFAULT_ENDPOINT: &str = "https://vision.googleapis.com/v1/images:annotate";

/// HTTP client for the document-text-detection endpoint.
pub struct VisionClient {
    api_key: String,
    endpoint: String,
    http: reqwest::Client,
}

/// Batch envelope around per-image responses.
#[derive(Deserialize)]
struct AnnotateBatchResponse {
    #[serde(default)]
    responses: Vec<RecognitionResponse>,
}

impl VisionClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, RecognitionError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(RecognitionError::MissingApiKey);
        }

        Ok(Self {
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            http: reqwest::Client::new(),
        })
    }

    #[cfg(test)]
    fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl RecognitionService for VisionClient {
    async fn detect_document_text(
        &self,
        image_base64: &str,
    ) -> Result<RecognitionResponse, RecognitionError> {
        info!("starting recognition request");

        let payload = json!({
            "requests": [{
                "image": { "content": image_base64 },
                "features": [{ "type": "DOCUMENT_TEXT_DETECTION" }]
            }]
        });

        let url = format!("{}?key={}", self.endpoint, self.api_key);
        let response = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|err| RecognitionError::Transport(err.to_string()))?;

        let status = response.status();
        let batch: AnnotateBatchResponse = response
            .json()
            .await
            .map_err(|err| RecognitionError::Transport(err.to_string()))?;

        if !status.is_success() {
            // Prefer the service's own message over the bare status code.
            let message = batch
                .responses
                .first()
                .and_then(|r| r.error.as_ref())
                .map(|e| e.message.clone())
                .unwrap_or_else(|| format!("HTTP status {status}"));
            return Err(RecognitionError::Service(message));
        }

        let first = batch
            .responses
            .into_iter()
            .next()
            .ok_or_else(|| RecognitionError::Service("service returned an empty response".into()))?;

        if let Some(error) = first.error {
            return Err(RecognitionError::Service(error.message));
        }

        debug!(
            has_text = first.text().is_some(),
            "recognition request finished"
        );
        Ok(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_api_key_rejected() {
        assert!(matches!(
            VisionClient::new(""),
            Err(RecognitionError::MissingApiKey)
        ));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let client = VisionClient::new("test-key")
            .unwrap()
            .with_endpoint("http://127.0.0.1:1/annotate");

        let err = client.detect_document_text("aW1n").await;
        assert!(matches!(err, Err(RecognitionError::Transport(_))));
    }
}
