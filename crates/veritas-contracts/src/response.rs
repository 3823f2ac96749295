//! Response-side types: the report and the grounding citations returned by
//! the external verification service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Web payload of a grounding reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSource {
    pub uri: String,
    #[serde(default)]
    pub title: String,
}

/// One grounding citation, as returned by the service.
///
/// A chunk may carry no web payload at all; such chunks are kept in the
/// list (order is the service's order, no dedup) but are skipped when the
/// source list is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GroundingChunk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<WebSource>,
}

/// The normalised result of a successful verification call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactCheckResponse {
    /// The markdown-subset report document.
    pub report_text: String,
    /// Grounding citations in the order the service returned them.
    pub sources: Vec<GroundingChunk>,
    /// Wall-clock time the response was received (UTC).
    pub received_at: DateTime<Utc>,
}
