//! # veritas-report
//!
//! Parsing and rendering for VERITAS Pro fact-check reports.
//!
//! The report format is a small, fixed markdown subset:
//!
//! - `# ` title, `## ` section headers, `### ` claim cards
//! - inside a card, `**Verdict**`, `**Confidence**`, `**Explanation**` and
//!   `**Sources**` marker lines
//! - everything else is prose
//!
//! Parsing is lenient by construction: no input produces an error, malformed
//! documents just render fewer blocks.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use veritas_report::render::render_report;
//!
//! let view = render_report(&response.report_text);
//! println!("{view}");
//! ```

pub mod claim;
pub mod parser;
pub mod render;
pub mod sources;
pub mod verdict;

pub use parser::{parse_report, ParsedBlock};
pub use render::{render_report, ReportView};
pub use sources::{render_sources, SourceEntry};
pub use verdict::{classify_verdict, Tone, VerdictCategory};
