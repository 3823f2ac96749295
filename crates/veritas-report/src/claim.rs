//! Claim card extraction.
//!
//! A claim paragraph is a `### ` title line followed by free lines. Four
//! bolded markers are recognised anywhere in a line, case-insensitively:
//! `**verdict**`, `**confidence**`, `**explanation**` and `**sources**`.
//! A marker's value is everything after the first colon on that line.
//!
//! Only the first line carrying a given marker counts. Later duplicates are
//! dropped outright: they match a known marker, so they are not text either.

use serde::Serialize;

use crate::verdict::{classify_verdict, Verdict};

/// One extracted claim, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimCard {
    pub title: String,
    pub verdict: Option<Verdict>,
    /// 0..=100. Zero when absent or unparsable.
    pub confidence: u8,
    pub explanation: Option<String>,
    pub sources_note: Option<String>,
    /// Body layout in authored order. The verdict never appears here.
    pub entries: Vec<CardEntry>,
}

/// A positioned element of the card body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum CardEntry {
    /// Where the confidence bar goes; the value is `ClaimCard::confidence`.
    Confidence,
    Explanation(String),
    Sources(String),
    /// A line with no marker, shown verbatim.
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Verdict,
    Confidence,
    Explanation,
    Sources,
}

const MARKERS: [(&str, Marker); 4] = [
    ("**verdict**", Marker::Verdict),
    ("**confidence**", Marker::Confidence),
    ("**explanation**", Marker::Explanation),
    ("**sources**", Marker::Sources),
];

/// Shown when a verdict line has no value.
const UNKNOWN_VERDICT: &str = "UNKNOWN";

fn marker_of(line: &str) -> Option<Marker> {
    let lower = line.to_lowercase();
    MARKERS
        .iter()
        .find(|(needle, _)| lower.contains(needle))
        .map(|(_, marker)| *marker)
}

/// Everything after the first colon, trimmed. Empty when there is no colon.
fn value_after_colon(line: &str) -> &str {
    line.split_once(':').map(|(_, value)| value.trim()).unwrap_or("")
}

/// Parse `"87%"`-style values. Anything unparsable is 0; out-of-range values
/// are clamped.
pub fn parse_confidence(value: &str) -> u8 {
    let digits = value.trim().trim_end_matches('%').trim();
    digits
        .parse::<i64>()
        .map(|n| n.clamp(0, 100) as u8)
        .unwrap_or(0)
}

/// Build a card from a paragraph whose first line is the claim title.
///
/// `title` is the first line with its `### ` prefix already removed.
pub fn extract_claim_card(title: &str, body: &[&str]) -> ClaimCard {
    let mut card = ClaimCard {
        title: title.trim().to_string(),
        verdict: None,
        confidence: 0,
        explanation: None,
        sources_note: None,
        entries: Vec::new(),
    };
    let mut seen_confidence = false;

    for line in body {
        match marker_of(line) {
            Some(Marker::Verdict) => {
                if card.verdict.is_none() {
                    let value = value_after_colon(line);
                    let raw = if value.is_empty() { UNKNOWN_VERDICT } else { value };
                    card.verdict = Some(classify_verdict(raw));
                }
            }
            Some(Marker::Confidence) => {
                if !seen_confidence {
                    seen_confidence = true;
                    card.confidence = parse_confidence(value_after_colon(line));
                    card.entries.push(CardEntry::Confidence);
                }
            }
            Some(Marker::Explanation) => {
                if card.explanation.is_none() {
                    let value = value_after_colon(line).to_string();
                    card.entries.push(CardEntry::Explanation(value.clone()));
                    card.explanation = Some(value);
                }
            }
            Some(Marker::Sources) => {
                if card.sources_note.is_none() {
                    let value = value_after_colon(line).to_string();
                    card.entries.push(CardEntry::Sources(value.clone()));
                    card.sources_note = Some(value);
                }
            }
            None => card.entries.push(CardEntry::Text((*line).to_string())),
        }
    }

    card
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::VerdictCategory;

    fn card(body: &str) -> ClaimCard {
        let lines: Vec<&str> = body.lines().collect();
        extract_claim_card("Claim 1: Test", &lines)
    }

    #[test]
    fn extracts_all_four_fields() {
        let c = card(
            "- **Verdict**: FALSE\n\
             - **Confidence**: 42%\n\
             - **Explanation**: Because X.\n\
             - **Sources**: Reuters.",
        );

        assert_eq!(c.title, "Claim 1: Test");
        let verdict = c.verdict.unwrap();
        assert_eq!(verdict.category, VerdictCategory::False);
        assert_eq!(verdict.label, "FALSE");
        assert_eq!(c.confidence, 42);
        assert_eq!(c.explanation.as_deref(), Some("Because X."));
        assert_eq!(c.sources_note.as_deref(), Some("Reuters."));
        assert_eq!(
            c.entries,
            vec![
                CardEntry::Confidence,
                CardEntry::Explanation("Because X.".to_string()),
                CardEntry::Sources("Reuters.".to_string()),
            ]
        );
    }

    #[test]
    fn markers_match_case_insensitively() {
        let c = card("**VERDICT**: misleading\n**confidence**: 87%");
        assert_eq!(c.verdict.unwrap().category, VerdictCategory::Misleading);
        assert_eq!(c.confidence, 87);
    }

    #[test]
    fn missing_confidence_defaults_to_zero() {
        let c = card("- **Verdict**: TRUE");
        assert_eq!(c.confidence, 0);
        assert!(!c.entries.contains(&CardEntry::Confidence));
    }

    #[test]
    fn unparsable_confidence_is_zero() {
        assert_eq!(parse_confidence("high"), 0);
        assert_eq!(parse_confidence("87.5%"), 0);
        assert_eq!(parse_confidence(""), 0);
    }

    #[test]
    fn confidence_is_clamped() {
        assert_eq!(parse_confidence("140%"), 100);
        assert_eq!(parse_confidence("-5%"), 0);
        assert_eq!(parse_confidence(" 87 % "), 87);
    }

    #[test]
    fn value_keeps_text_after_first_colon() {
        let c = card("- **Explanation**: Source: the 2020 census: table 4");
        assert_eq!(
            c.explanation.as_deref(),
            Some("Source: the 2020 census: table 4")
        );
    }

    #[test]
    fn verdict_without_value_is_unknown() {
        let c = card("- **Verdict**");
        let verdict = c.verdict.unwrap();
        assert_eq!(verdict.label, "UNKNOWN");
        assert_eq!(verdict.category, VerdictCategory::Unknown);

        let c = card("- **Verdict**:   ");
        assert_eq!(c.verdict.unwrap().label, "UNKNOWN");
    }

    #[test]
    fn verdict_line_is_never_text() {
        let c = card("- **Verdict**: TRUE\nSome context line.");
        assert_eq!(
            c.entries,
            vec![CardEntry::Text("Some context line.".to_string())]
        );
    }

    #[test]
    fn unmarked_lines_keep_their_order() {
        let c = card("first\n- **Confidence**: 10%\nsecond\n- **Sources**: AP\nthird");
        assert_eq!(
            c.entries,
            vec![
                CardEntry::Text("first".to_string()),
                CardEntry::Confidence,
                CardEntry::Text("second".to_string()),
                CardEntry::Sources("AP".to_string()),
                CardEntry::Text("third".to_string()),
            ]
        );
    }

    /// Duplicate markers: first match wins, later ones are dropped.
    #[test]
    fn first_marker_occurrence_wins() {
        let c = card(
            "- **Verdict**: TRUE\n\
             - **Verdict**: FALSE\n\
             - **Confidence**: 30%\n\
             - **Confidence**: 90%\n\
             - **Explanation**: one\n\
             - **Explanation**: two",
        );
        assert_eq!(c.verdict.unwrap().label, "TRUE");
        assert_eq!(c.confidence, 30);
        assert_eq!(c.explanation.as_deref(), Some("one"));
        assert_eq!(
            c.entries,
            vec![
                CardEntry::Confidence,
                CardEntry::Explanation("one".to_string()),
            ]
        );
    }

    #[test]
    fn empty_body_yields_bare_card() {
        let c = extract_claim_card("  Lone claim ", &[]);
        assert_eq!(c.title, "Lone claim");
        assert!(c.verdict.is_none());
        assert_eq!(c.confidence, 0);
        assert!(c.entries.is_empty());
    }
}
