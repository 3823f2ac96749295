//! Verdict classification.
//!
//! Maps a free-text verdict label to one of five visual categories by
//! case-insensitive substring containment. The rule order is part of the
//! contract: "NOT TRUE" contains "TRUE" and therefore classifies as True.

use serde::Serialize;

/// The visual category of a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictCategory {
    True,
    False,
    Misleading,
    Unverifiable,
    Unknown,
}

/// Abstract badge colour, mapped to concrete colours by each front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Green,
    Red,
    Amber,
    Indigo,
    Slate,
}

/// Colour and glyph for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BadgeStyle {
    pub tone: Tone,
    pub glyph: &'static str,
}

impl VerdictCategory {
    pub fn style(self) -> BadgeStyle {
        match self {
            VerdictCategory::True => BadgeStyle { tone: Tone::Green, glyph: "✔" },
            VerdictCategory::False => BadgeStyle { tone: Tone::Red, glyph: "✘" },
            VerdictCategory::Misleading => BadgeStyle { tone: Tone::Amber, glyph: "⚠" },
            VerdictCategory::Unverifiable => BadgeStyle { tone: Tone::Indigo, glyph: "⌕" },
            VerdictCategory::Unknown => BadgeStyle { tone: Tone::Slate, glyph: "?" },
        }
    }
}

/// A classified verdict: its category plus the label to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub category: VerdictCategory,
    /// The raw label, trimmed and uppercased.
    pub label: String,
}

/// Tested top to bottom; the first keyword contained in the label wins.
const VERDICT_RULES: [(&str, VerdictCategory); 4] = [
    ("TRUE", VerdictCategory::True),
    ("FALSE", VerdictCategory::False),
    ("MISLEADING", VerdictCategory::Misleading),
    ("UNVERIFIABLE", VerdictCategory::Unverifiable),
];

/// Classify a raw verdict label. Total: every input yields a category.
pub fn classify_verdict(raw: &str) -> Verdict {
    let label = raw.trim().to_uppercase();
    let category = VERDICT_RULES
        .iter()
        .find(|(keyword, _)| label.contains(keyword))
        .map(|(_, category)| *category)
        .unwrap_or(VerdictCategory::Unknown);
    Verdict { category, label }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
