//! Request-side types: what the user submits and how a submission is
//! identified while it is in flight.

use serde::{Deserialize, Serialize};

/// Correlation id for one submission, carried in every log record about it.
///
/// Unlike [`RequestGeneration`] this has no ordering; it only ties log lines
/// together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub uuid::Uuid);

impl RequestId {
    /// Create a new, unique request ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Monotonically increasing token stamped on every submission and clear.
///
/// Results, failures, and progress ticks carry the generation they were
/// started under. The orchestrator drops anything whose generation is not
/// the current one, so an abandoned request can never overwrite newer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct RequestGeneration(pub u64);

impl RequestGeneration {
    /// The generation that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for RequestGeneration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An image attached to a submission, held as a `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttachment {
    /// File name shown in the input panel, e.g. "screenshot.png".
    pub file_name: String,
    /// Media type inferred when the file was loaded.
    pub media_type: String,
    /// `data:<media_type>;base64,<payload>`.
    pub data_uri: String,
    /// Size of the decoded image in bytes.
    pub byte_len: usize,
}

impl ImageAttachment {
    /// The base64 payload with the `data:...;base64,` prefix stripped.
    ///
    /// A URI without a comma yields an empty payload.
    pub fn base64_payload(&self) -> &str {
        self.data_uri
            .split_once(',')
            .map(|(_, payload)| payload)
            .unwrap_or("")
    }
}

/// Everything the external client needs for one verification call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationRequest {
    /// Generation this request belongs to.
    pub generation: RequestGeneration,
    /// Log correlation id.
    pub request_id: RequestId,
    /// The text the user typed. May be empty when an image is attached.
    pub text: String,
    /// Optional screenshot or photo to analyse.
    pub image: Option<ImageAttachment>,
}
