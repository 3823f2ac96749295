//! Report rendering.
//!
//! Maps parsed blocks to a `ReportView`, a display tree with no dependency
//! on any UI toolkit. The terminal front-end turns it into styled lines; the
//! `Display` impl turns it into plain text for the headless CLI.

use std::fmt;

use serde::Serialize;

use crate::{
    claim::{CardEntry, ClaimCard},
    parser::{parse_report, ParsedBlock},
    verdict::{Tone, Verdict},
};

/// Label above the confidence bar.
pub const CONFIDENCE_LABEL: &str = "Confidence Score";
/// Label above the explanation panel.
pub const EVIDENCE_LABEL: &str = "Evidence Breakdown";

/// The rendered report: a flat sequence of top-level nodes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ReportView {
    pub nodes: Vec<ViewNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewNode {
    /// Level 1 is the report title, level 2 a section header.
    Heading { level: u8, text: String },
    Paragraphs { lines: Vec<String> },
    Card(CardView),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub title: String,
    pub badge: Option<BadgeView>,
    pub body: Vec<CardItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BadgeView {
    pub label: String,
    pub tone: Tone,
    pub glyph: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardItem {
    ConfidenceBar { percent: u8 },
    Evidence { text: String },
    SourcesNote { text: String },
    Text { text: String },
}

impl ReportView {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl From<&Verdict> for BadgeView {
    fn from(verdict: &Verdict) -> Self {
        let style = verdict.category.style();
        Self {
            label: verdict.label.clone(),
            tone: style.tone,
            glyph: style.glyph,
        }
    }
}

/// Parse and render a report document in one go.
pub fn render_report(text: &str) -> ReportView {
    render_blocks(&parse_report(text))
}

/// Render already-parsed blocks.
pub fn render_blocks(blocks: &[ParsedBlock]) -> ReportView {
    let nodes = blocks
        .iter()
        .map(|block| match block {
            ParsedBlock::Title { text } => ViewNode::Heading {
                level: 1,
                text: text.clone(),
            },
            ParsedBlock::SectionHeader { text } => ViewNode::Heading {
                level: 2,
                text: text.clone(),
            },
            ParsedBlock::PlainText { lines } => ViewNode::Paragraphs {
                lines: lines.clone(),
            },
            ParsedBlock::ClaimCard(card) => ViewNode::Card(render_card(card)),
        })
        .collect();
    ReportView { nodes }
}

fn render_card(card: &ClaimCard) -> CardView {
    let body = card
        .entries
        .iter()
        .map(|entry| match entry {
            CardEntry::Confidence => CardItem::ConfidenceBar {
                percent: card.confidence,
            },
            CardEntry::Explanation(text) => CardItem::Evidence { text: text.clone() },
            CardEntry::Sources(text) => CardItem::SourcesNote { text: text.clone() },
            CardEntry::Text(text) => CardItem::Text { text: text.clone() },
        })
        .collect();
    CardView {
        title: card.title.clone(),
        badge: card.verdict.as_ref().map(BadgeView::from),
        body,
    }
}

/// Number of filled cells when `percent` is drawn `width` cells wide.
pub fn filled_cells(percent: u8, width: usize) -> usize {
    let percent = usize::from(percent.min(100));
    (percent * width + 50) / 100
}

/// `[####------]`-style bar.
pub fn confidence_bar(percent: u8, width: usize) -> String {
    let filled = filled_cells(percent, width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

// ── Plain-text output ─────────────────────────────────────────────────────────

const BAR_WIDTH: usize = 20;

impl fmt::Display for ReportView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, node) in self.nodes.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            match node {
                ViewNode::Heading { level, text } => {
                    let rule = if *level == 1 { '=' } else { '-' };
                    writeln!(f, "{text}")?;
                    writeln!(f, "{}", rule.to_string().repeat(text.chars().count()))?;
                }
                ViewNode::Paragraphs { lines } => {
                    for line in lines {
                        writeln!(f, "{line}")?;
                    }
                }
                ViewNode::Card(card) => write!(f, "{card}")?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for CardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.badge {
            Some(badge) => writeln!(f, "┌ {}  [{} {}]", self.title, badge.glyph, badge.label)?,
            None => writeln!(f, "┌ {}", self.title)?,
        }
        for item in &self.body {
            match item {
                CardItem::ConfidenceBar { percent } => writeln!(
                    f,
                    "│ {CONFIDENCE_LABEL} {} {percent}%",
                    confidence_bar(*percent, BAR_WIDTH)
                )?,
                CardItem::Evidence { text } => writeln!(f, "│ {EVIDENCE_LABEL}: {text}")?,
                CardItem::SourcesNote { text } => writeln!(f, "│ “ {text}")?,
                CardItem::Text { text } => writeln!(f, "│ {text}")?,
            }
        }
        writeln!(f, "└")
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
