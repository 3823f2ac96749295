//! # veritas-contracts
//!
//! Shared types and error contracts for the VERITAS Pro fact-checking
//! front-end.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate, only data definitions and the error type.

pub mod error;
pub mod request;
pub mod response;
pub mod state;

#[cfg(test)]
mod tests {
    use super::*;
    use error::VeritasError;
    use request::{ImageAttachment, RequestGeneration, RequestId};
    use response::GroundingChunk;
    use state::{activate_progress_step, initial_progress_steps, VerificationState};

    // ── ImageAttachment ──────────────────────────────────────────────────────

    #[test]
    fn image_payload_strips_data_uri_prefix() {
        let image = ImageAttachment {
            file_name: "shot.png".to_string(),
            media_type: "image/png".to_string(),
            data_uri: "data:image/png;base64,iVBORw0KGgo=".to_string(),
            byte_len: 8,
        };
        assert_eq!(image.base64_payload(), "iVBORw0KGgo=");
    }

    #[test]
    fn image_payload_without_comma_is_empty() {
        let image = ImageAttachment {
            file_name: "odd".to_string(),
            media_type: "image/png".to_string(),
            data_uri: "not-a-data-uri".to_string(),
            byte_len: 0,
        };
        assert_eq!(image.base64_payload(), "");
    }

    // ── RequestGeneration / RequestId ────────────────────────────────────────

    #[test]
    fn generation_next_is_strictly_greater() {
        let g = RequestGeneration::default();
        assert!(g.next() > g);
        assert_eq!(g.next().next(), RequestGeneration(2));
    }

    #[test]
    fn request_id_new_produces_unique_values() {
        let unique: std::collections::HashSet<String> =
            (0..50).map(|_| RequestId::new().to_string()).collect();
        assert_eq!(unique.len(), 50);
    }

    // ── GroundingChunk serde ─────────────────────────────────────────────────

    #[test]
    fn grounding_chunk_without_web_deserializes() {
        let chunk: GroundingChunk = serde_json::from_str("{}").unwrap();
        assert!(chunk.web.is_none());
    }

    #[test]
    fn grounding_chunk_with_web_deserializes() {
        let chunk: GroundingChunk = serde_json::from_str(
            r#"{ "web": { "uri": "https://www.reuters.com/a", "title": "Reuters" } }"#,
        )
        .unwrap();
        let web = chunk.web.unwrap();
        assert_eq!(web.uri, "https://www.reuters.com/a");
        assert_eq!(web.title, "Reuters");
    }

    #[test]
    fn grounding_chunk_missing_title_defaults_to_empty() {
        let chunk: GroundingChunk =
            serde_json::from_str(r#"{ "web": { "uri": "https://example.org" } }"#).unwrap();
        assert_eq!(chunk.web.unwrap().title, "");
    }

    // ── Progress steps ───────────────────────────────────────────────────────

    #[test]
    fn initial_progress_steps_are_inactive() {
        let steps = initial_progress_steps();
        assert_eq!(steps.len(), 5);
        assert_eq!(steps[0].id, "ocr");
        assert_eq!(steps[4].label, "Synthesizing Verdict");
        assert!(steps.iter().all(|s| !s.active && !s.completed));
    }

    #[test]
    fn activating_a_step_completes_earlier_ones() {
        let mut steps = initial_progress_steps();
        activate_progress_step(&mut steps, 2);

        assert!(steps[0].completed && !steps[0].active);
        assert!(steps[1].completed && !steps[1].active);
        assert!(steps[2].active && !steps[2].completed);
        assert!(!steps[3].active && !steps[3].completed);
        assert!(!steps[4].active && !steps[4].completed);
    }

    #[test]
    fn default_state_is_idle() {
        assert_eq!(VerificationState::default(), VerificationState::Idle);
        assert_eq!(VerificationState::Loading.label(), "loading");
    }

    // ── VeritasError display messages ────────────────────────────────────────

    #[test]
    fn error_config_error_display() {
        let err = VeritasError::ConfigError {
            reason: "bad temperature".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("configuration error"));
        assert!(msg.contains("bad temperature"));
    }

    #[test]
    fn error_credential_missing_display() {
        let err = VeritasError::CredentialMissing {
            variable: "API_KEY".to_string(),
        };
        assert_eq!(err.to_string(), "API Key is missing from the environment.");
    }

    #[test]
    fn error_remote_shows_bare_message() {
        let err = VeritasError::Remote {
            message: "Quota exceeded".to_string(),
        };
        assert_eq!(err.user_message(), "Quota exceeded");
    }

    #[test]
    fn error_remote_without_message_falls_back() {
        let err = VeritasError::Remote {
            message: "  ".to_string(),
        };
        assert_eq!(err.user_message(), error::GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn error_image_read_display() {
        let err = VeritasError::ImageRead {
            path: "/tmp/missing.png".to_string(),
            reason: "not found".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/missing.png"));
        assert!(msg.contains("not found"));
    }
}
