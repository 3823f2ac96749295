//! Report section parsing.
//!
//! A report is split into paragraphs on blank lines. Each paragraph is
//! classified by the first matching rule in `BLOCK_RULES`, which is ordered
//! from the most specific prefix to the least. Paragraphs that match no rule
//! are plain text.
//!
//! The parser never fails. Malformed or truncated documents simply yield
//! fewer blocks.

use serde::Serialize;
use tracing::debug;

use crate::claim::{extract_claim_card, ClaimCard};

/// One typed block of a report, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParsedBlock {
    Title { text: String },
    SectionHeader { text: String },
    ClaimCard(ClaimCard),
    PlainText { lines: Vec<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    ClaimCard,
    SectionHeader,
    Title,
}

/// Prefix → block kind. Longest prefix first, so `### ` is never read as `# `.
const BLOCK_RULES: [(&str, BlockKind); 3] = [
    ("### ", BlockKind::ClaimCard),
    ("## ", BlockKind::SectionHeader),
    ("# ", BlockKind::Title),
];

const PARAGRAPH_DELIMITER: &str = "\n\n";

fn classify(paragraph: &str) -> Option<(BlockKind, &str)> {
    BLOCK_RULES.iter().find_map(|(prefix, kind)| {
        paragraph
            .strip_prefix(prefix)
            .map(|rest| (*kind, rest))
    })
}

/// Split a report document into blocks.
pub fn parse_report(text: &str) -> Vec<ParsedBlock> {
    let normalized = text.replace("\r\n", "\n");
    let mut blocks = Vec::new();

    for paragraph in normalized.split(PARAGRAPH_DELIMITER) {
        let trimmed = paragraph.trim();
        if trimmed.is_empty() {
            continue;
        }

        let Some((kind, rest)) = classify(trimmed) else {
            blocks.push(plain_text(trimmed.lines()));
            continue;
        };

        let mut lines = rest.lines();
        let heading = lines.next().unwrap_or("").trim().to_string();
        let body: Vec<&str> = lines.collect();

        match kind {
            BlockKind::ClaimCard => {
                blocks.push(ParsedBlock::ClaimCard(extract_claim_card(&heading, &body)));
            }
            BlockKind::SectionHeader | BlockKind::Title => {
                blocks.push(if kind == BlockKind::Title {
                    ParsedBlock::Title { text: heading }
                } else {
                    ParsedBlock::SectionHeader { text: heading }
                });
                // Lines under a heading in the same paragraph read as prose.
                if !body.is_empty() {
                    blocks.push(plain_text(body.into_iter()));
                }
            }
        }
    }

    debug!(blocks = blocks.len(), "report parsed");
    blocks
}

fn plain_text<'a>(lines: impl Iterator<Item = &'a str>) -> ParsedBlock {
    ParsedBlock::PlainText {
        lines: lines.map(str::to_string).collect(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
