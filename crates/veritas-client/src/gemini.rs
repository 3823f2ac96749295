//! `GeminiClient`: the `VerificationClient` backed by the Gemini
//! `generateContent` REST endpoint.
//!
//! Request building and response normalisation are free functions so they
//! can be tested without a network. `verify()` only adds the credential
//! lookup and the HTTP round trip.

use std::time::Duration;

use chrono::Utc;
use reqwest::{blocking::Client, StatusCode};
use tracing::{debug, info, warn};

use veritas_config::ClientSettings;
use veritas_contracts::{
    error::{VeritasError, VeritasResult},
    request::VerificationRequest,
    response::FactCheckResponse,
};
use veritas_core::traits::VerificationClient;

use crate::{
    prompt::SYSTEM_PROMPT,
    wire::{
        Content, ErrorEnvelope, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
        Part, Tool,
    },
};

/// Sent in place of the text when the user submitted only an image.
pub const PLACEHOLDER_TEXT: &str = "Analyze this news content.";

/// Media type attached to every inline image, whatever the file was.
pub const INLINE_IMAGE_MIME: &str = "image/jpeg";

/// Report text used when the service returns no text at all.
pub const FALLBACK_REPORT: &str = "Verification failed to generate text.";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Blocking Gemini client. Cheap to share across worker threads.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    settings: ClientSettings,
}

impl GeminiClient {
    /// Build a client from the `[client]` configuration section.
    pub fn new(settings: ClientSettings) -> VeritasResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| VeritasError::ConfigError {
                reason: format!("failed to build HTTP client: {}", e),
            })?;
        Ok(Self { http, settings })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// `{base_url}/models/{model}:generateContent`.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }

    /// Read the access credential. An unset or empty variable is missing.
    fn credential(&self) -> VeritasResult<String> {
        match std::env::var(&self.settings.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(VeritasError::CredentialMissing {
                variable: self.settings.api_key_env.clone(),
            }),
        }
    }
}

impl VerificationClient for GeminiClient {
    fn verify(&self, request: &VerificationRequest) -> VeritasResult<FactCheckResponse> {
        let key = self.credential()?;
        let body = build_request(request, self.settings.temperature);

        debug!(
            generation = %request.generation,
            request_id = %request.request_id,
            model = %self.settings.model,
            "sending generateContent request"
        );

        let response = self
            .http
            .post(self.endpoint())
            .header(API_KEY_HEADER, key)
            .json(&body)
            .send()
            .map_err(remote)?;
        let status = response.status();
        let text = response.text().map_err(remote)?;

        if !status.is_success() {
            let message = error_message(status, &text);
            warn!(
                request_id = %request.request_id,
                status = status.as_u16(),
                %message,
                "generateContent rejected"
            );
            return Err(VeritasError::Remote { message });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&text).map_err(|e| VeritasError::Remote {
                message: format!("malformed response from verification service: {}", e),
            })?;
        let normalized = normalize_response(parsed);

        info!(
            request_id = %request.request_id,
            status = status.as_u16(),
            report_len = normalized.report_text.len(),
            sources = normalized.sources.len(),
            "generateContent succeeded"
        );
        Ok(normalized)
    }
}

fn remote(e: reqwest::Error) -> VeritasError {
    VeritasError::Remote {
        message: e.to_string(),
    }
}

/// Build the JSON body for one verification call.
pub fn build_request(request: &VerificationRequest, temperature: f32) -> GenerateContentRequest {
    let text = if request.text.is_empty() {
        PLACEHOLDER_TEXT.to_string()
    } else {
        request.text.clone()
    };

    let mut parts = vec![Part::text(text)];
    if let Some(image) = &request.image {
        parts.push(Part::inline(INLINE_IMAGE_MIME, image.base64_payload()));
    }

    GenerateContentRequest {
        contents: vec![Content { parts }],
        system_instruction: Content {
            parts: vec![Part::text(SYSTEM_PROMPT)],
        },
        tools: vec![Tool::default()],
        generation_config: GenerationConfig { temperature },
    }
}

/// Reduce a raw reply to the report text and grounding chunks.
///
/// The text is every non-thought text part of the first candidate, joined.
/// An empty result becomes `FALLBACK_REPORT`.
pub fn normalize_response(response: GenerateContentResponse) -> FactCheckResponse {
    let candidate = response.candidates.into_iter().next().unwrap_or_default();

    let report_text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter(|part| part.thought != Some(true))
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    let report_text = if report_text.is_empty() {
        FALLBACK_REPORT.to_string()
    } else {
        report_text
    };

    let sources = candidate
        .grounding_metadata
        .map(|meta| meta.grounding_chunks)
        .unwrap_or_default();

    FactCheckResponse {
        report_text,
        sources,
        received_at: Utc::now(),
    }
}

/// Message for a non-2xx reply: the service's own message when the body
/// carries one, `HTTP <status>` otherwise.
pub fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use serde_json::json;

    use veritas_contracts::request::{ImageAttachment, RequestGeneration, RequestId};

    use super::*;

    fn request(text: &str, image: Option<ImageAttachment>) -> VerificationRequest {
        VerificationRequest {
            generation: RequestGeneration(1),
            request_id: RequestId::new(),
            text: text.to_string(),
            image,
        }
    }

    fn png_attachment() -> ImageAttachment {
        ImageAttachment {
            file_name: "post.png".to_string(),
            media_type: "image/png".to_string(),
            data_uri: "data:image/png;base64,iVBORw0KGgo=".to_string(),
            byte_len: 8,
        }
    }

    fn parse(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    // ── Request building ──────────────────────────────────────────────────────

    #[test]
    fn test_request_carries_text_prompt_tool_and_temperature() {
        let body = build_request(&request("The moon is made of cheese", None), 0.1);
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(
            value["contents"][0]["parts"],
            json!([{ "text": "The moon is made of cheese" }])
        );
        assert_eq!(value["tools"], json!([{ "googleSearch": {} }]));
        assert_eq!(value["generationConfig"]["temperature"].as_f64().unwrap() as f32, 0.1);
        let instruction = value["systemInstruction"]["parts"][0]["text"].as_str().unwrap();
        assert!(instruction.starts_with("You are a Real-Time News Fact-Checking AI."));
    }

    #[test]
    fn test_image_only_request_uses_placeholder_and_jpeg_tag() {
        let body = build_request(&request("", Some(png_attachment())), 0.1);
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(
            value["contents"][0]["parts"],
            json!([
                { "text": "Analyze this news content." },
                { "inlineData": { "mimeType": "image/jpeg", "data": "iVBORw0KGgo=" } }
            ])
        );
    }

    #[test]
    fn test_whitespace_text_is_sent_as_is() {
        let body = build_request(&request("  ", Some(png_attachment())), 0.1);
        assert_eq!(body.contents[0].parts[0].text.as_deref(), Some("  "));
    }

    // ── Response normalisation ────────────────────────────────────────────────

    #[test]
    fn test_normalize_joins_text_parts_and_keeps_chunks() {
        let response = normalize_response(parse(json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "# Verification Report\n" },
                    { "text": "thinking...", "thought": true },
                    { "text": "Checked one claim." }
                ]},
                "groundingMetadata": { "groundingChunks": [
                    { "web": { "uri": "https://www.reuters.com/a", "title": "Reuters" } },
                    { "retrievedContext": {} }
                ]}
            }]
        })));

        assert_eq!(response.report_text, "# Verification Report\nChecked one claim.");
        assert_eq!(response.sources.len(), 2);
        assert_eq!(
            response.sources[0].web.as_ref().map(|w| w.title.as_str()),
            Some("Reuters")
        );
        assert!(response.sources[1].web.is_none());
    }

    #[test]
    fn test_normalize_without_candidates_falls_back() {
        let response = normalize_response(parse(json!({})));
        assert_eq!(response.report_text, FALLBACK_REPORT);
        assert!(response.sources.is_empty());
    }

    #[test]
    fn test_normalize_uses_only_first_candidate() {
        let response = normalize_response(parse(json!({
            "candidates": [
                { "content": { "parts": [] } },
                { "content": { "parts": [{ "text": "second" }] } }
            ]
        })));
        assert_eq!(response.report_text, FALLBACK_REPORT);
    }

    // ── Errors ────────────────────────────────────────────────────────────────

    #[test]
    fn test_error_message_prefers_service_message() {
        let body = r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(
            error_message(StatusCode::TOO_MANY_REQUESTS, body),
            "Resource has been exhausted"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_status() {
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, "<html>"), "HTTP 502");
        assert_eq!(
            error_message(StatusCode::FORBIDDEN, r#"{"error":{"message":""}}"#),
            "HTTP 403"
        );
    }

    #[test]
    fn test_missing_credential_fails_before_network() {
        let settings = ClientSettings {
            // Unroutable, so a network attempt would surface as Remote.
            base_url: "http://127.0.0.1:9".to_string(),
            api_key_env: "VERITAS_TEST_UNSET_CREDENTIAL_7f3a".to_string(),
            ..ClientSettings::default()
        };
        let client = GeminiClient::new(settings).unwrap();

        let err = client.verify(&request("claim", None)).unwrap_err();
        assert!(matches!(
            err,
            VeritasError::CredentialMissing { ref variable } if variable == "VERITAS_TEST_UNSET_CREDENTIAL_7f3a"
        ));
        assert_eq!(err.user_message(), "API Key is missing from the environment.");
    }

    #[test]
    fn test_endpoint_joins_base_url_and_model() {
        let settings = ClientSettings {
            base_url: "https://example.test/v1beta/".to_string(),
            model: "gemini-test".to_string(),
            ..ClientSettings::default()
        };
        let client = GeminiClient::new(settings).unwrap();
        assert_eq!(
            client.endpoint(),
            "https://example.test/v1beta/models/gemini-test:generateContent"
        );
    }
}
