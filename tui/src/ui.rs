//! Drawing.
//!
//! Layout:
//!   ┌─── header ──────────────────────────────────────────────────────────┐
//!   │  VERITAS Pro                                        state: success  │
//!   ├─── input ───────────────────┬─── output ────────────────────────────┤
//!   │  claim text                 │  placeholder / progress / error /     │
//!   │  attached image, notices    │  report + sources                     │
//!   ├─────────────────────────────┴───────────────────────────────────────┤
//!   │  footer (key bindings)                                              │
//!   └─────────────────────────────────────────────────────────────────────┘

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use veritas_contracts::state::VerificationState;
use veritas_report::{
    render::{confidence_bar, CardItem, CardView, ViewNode, CONFIDENCE_LABEL, EVIDENCE_LABEL},
    ReportView, SourceEntry, Tone,
};

use crate::app::{App, InputMode};

const BAR_WIDTH: usize = 20;

pub fn draw(f: &mut Frame, app: &App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(10),   // input + output
            Constraint::Length(3), // footer
        ])
        .split(f.area());

    render_header(f, outer[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(outer[1]);

    render_input(f, body[0], app);
    match app.orchestrator().state() {
        VerificationState::Idle => render_placeholder(f, body[1]),
        VerificationState::Loading => render_progress(f, body[1], app),
        VerificationState::Error => render_error(f, body[1], app),
        VerificationState::Success => render_result(f, body[1], app),
    }
    render_footer(f, outer[2], app);
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let state = app.orchestrator().state();
    let state_color = match state {
        VerificationState::Idle => Color::Gray,
        VerificationState::Loading => Color::Yellow,
        VerificationState::Success => Color::Green,
        VerificationState::Error => Color::Red,
    };
    let line = Line::from(vec![
        Span::styled(
            "VERITAS Pro    ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled("Real-Time News Fact-Checking    ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("state: {}", state.label()),
            Style::default().fg(state_color),
        ),
    ]);
    f.render_widget(Paragraph::new(line).block(panel("")), area);
}

fn render_input(f: &mut Frame, area: Rect, app: &App) {
    let orchestrator = app.orchestrator();
    let locked = orchestrator.state() == VerificationState::Loading;

    let mut lines: Vec<Line> = orchestrator
        .input_text()
        .split('\n')
        .map(|line| Line::from(line.to_string()))
        .collect();
    if !locked && app.mode == InputMode::Editing {
        if let Some(last) = lines.last_mut() {
            last.spans.push(Span::styled("▏", Style::default().fg(Color::Cyan)));
        }
    }
    if orchestrator.input_text().is_empty() {
        lines.insert(
            0,
            Line::from(Span::styled(
                "Type a headline, claim, or article.",
                Style::default().fg(Color::DarkGray),
            )),
        );
    }

    lines.push(Line::from(""));
    if let Some(image) = orchestrator.image() {
        lines.push(Line::from(vec![
            Span::styled("Image: ", Style::default().fg(Color::Gray)),
            Span::raw(truncate(&image.file_name, 40)),
            Span::styled(
                format!(" ({} KB)", image.byte_len.div_ceil(1024)),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }
    if orchestrator.image_pending() {
        lines.push(Line::from(Span::styled(
            "Reading image…",
            Style::default().fg(Color::Yellow),
        )));
    }
    if let Some(notice) = orchestrator.notice() {
        lines.push(Line::from(Span::styled(
            notice.to_string(),
            Style::default().fg(Color::Yellow),
        )));
    }
    if let InputMode::ImagePath(path) = &app.mode {
        lines.push(Line::from(vec![
            Span::styled("Image path: ", Style::default().fg(Color::Cyan)),
            Span::raw(path.clone()),
            Span::styled("▏", Style::default().fg(Color::Cyan)),
        ]));
    }

    let title = if locked { " Input (locked) " } else { " Input " };
    let p = Paragraph::new(lines)
        .block(panel(title))
        .wrap(Wrap { trim: false });
    f.render_widget(p, area);
}

fn render_placeholder(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Paste a headline or article and press Ctrl-R to verify it.",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "  Attach a screenshot of a post with Ctrl-O.",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(Paragraph::new(lines).block(panel(" Output ")), area);
}

fn render_progress(f: &mut Frame, area: Rect, app: &App) {
    let mut items: Vec<ListItem> = vec![ListItem::new("")];
    for step in app.orchestrator().progress_steps() {
        let (icon, style) = if step.completed {
            ("  ✓ ", Style::default().fg(Color::Green))
        } else if step.active {
            (
                "  ▸ ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )
        } else {
            ("  ◦ ", Style::default().fg(Color::DarkGray))
        };
        let suffix = if step.active { "…" } else { "" };
        items.push(ListItem::new(Line::from(vec![
            Span::styled(icon, style),
            Span::styled(format!("{}{}", step.label, suffix), style),
        ])));
    }
    f.render_widget(List::new(items).block(panel(" Verifying ")), area);
}

fn render_error(f: &mut Frame, area: Rect, app: &App) {
    let message = app.orchestrator().error().unwrap_or_default().to_string();
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", message),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("  Press "),
            Span::styled("Ctrl-T", Style::default().fg(Color::Cyan)),
            Span::raw(" to retry or "),
            Span::styled("Ctrl-L", Style::default().fg(Color::Cyan)),
            Span::raw(" to start over."),
        ]),
    ];
    let block = Block::default()
        .title(" Verification Failed ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_result(f: &mut Frame, area: Rect, app: &App) {
    let Some(rendered) = app.rendered() else {
        render_placeholder(f, area);
        return;
    };
    let mut lines = report_lines(&rendered.report);
    lines.push(Line::from(""));
    lines.extend(source_lines(&rendered.sources));

    let p = Paragraph::new(lines)
        .block(panel(" Verification Report "))
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));
    f.render_widget(p, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let submit_style = if app.orchestrator().can_submit() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let key = Style::default().fg(Color::Cyan);
    let spans = vec![
        Span::styled(" [Ctrl-R] ", submit_style),
        Span::raw("Verify  "),
        Span::styled("[Ctrl-O] ", key),
        Span::raw("Image  "),
        Span::styled("[Ctrl-X] ", key),
        Span::raw("Remove  "),
        Span::styled("[Ctrl-T] ", key),
        Span::raw("Retry  "),
        Span::styled("[Ctrl-L] ", key),
        Span::raw("Clear  "),
        Span::styled("[PgUp/PgDn] ", key),
        Span::raw("Scroll  "),
        Span::styled("[Esc] ", key),
        Span::raw("Quit"),
    ];
    f.render_widget(Paragraph::new(Line::from(spans)).block(panel("")), area);
}

// ── View tree → styled lines ──────────────────────────────────────────────────

pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Green => Color::Green,
        Tone::Red => Color::Red,
        Tone::Amber => Color::Yellow,
        Tone::Indigo => Color::LightBlue,
        Tone::Slate => Color::Gray,
    }
}

/// Styled lines for a rendered report, in document order.
pub fn report_lines(view: &ReportView) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (index, node) in view.nodes.iter().enumerate() {
        if index > 0 {
            lines.push(Line::from(""));
        }
        match node {
            ViewNode::Heading { level: 1, text } => lines.push(Line::from(Span::styled(
                text.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ))),
            ViewNode::Heading { text, .. } => lines.push(Line::from(Span::styled(
                text.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ))),
            ViewNode::Paragraphs { lines: paragraph } => {
                lines.extend(paragraph.iter().map(|line| Line::from(line.clone())));
            }
            ViewNode::Card(card) => lines.extend(card_lines(card)),
        }
    }
    lines
}

fn card_lines(card: &CardView) -> Vec<Line<'static>> {
    let rule = Style::default().fg(Color::DarkGray);
    let mut header = vec![
        Span::styled("┌ ", rule),
        Span::styled(card.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
    ];
    if let Some(badge) = &card.badge {
        header.push(Span::raw("  "));
        header.push(Span::styled(
            format!("[{} {}]", badge.glyph, badge.label),
            Style::default()
                .fg(tone_color(badge.tone))
                .add_modifier(Modifier::BOLD),
        ));
    }

    let mut lines = vec![Line::from(header)];
    for item in &card.body {
        let mut spans = vec![Span::styled("│ ", rule)];
        match item {
            CardItem::ConfidenceBar { percent } => {
                spans.push(Span::styled(
                    format!("{CONFIDENCE_LABEL} "),
                    Style::default().fg(Color::Gray),
                ));
                spans.push(Span::styled(
                    confidence_bar(*percent, BAR_WIDTH),
                    Style::default().fg(Color::Cyan),
                ));
                spans.push(Span::raw(format!(" {percent}%")));
            }
            CardItem::Evidence { text } => {
                spans.push(Span::styled(
                    format!("{EVIDENCE_LABEL}: "),
                    Style::default().fg(Color::Gray),
                ));
                spans.push(Span::raw(text.clone()));
            }
            CardItem::SourcesNote { text } => spans.push(Span::styled(
                format!("“ {text}"),
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::ITALIC),
            )),
            CardItem::Text { text } => spans.push(Span::raw(text.clone())),
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(Span::styled("└", rule)));
    lines
}

/// The grounding source list, headed by the rendered-entry count.
pub fn source_lines(sources: &[SourceEntry]) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        format!("Sources ({})", sources.len()),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ))];
    for source in sources {
        lines.push(Line::from(vec![
            Span::styled("  ● ", Style::default().fg(Color::Cyan)),
            Span::styled(source.hostname.clone(), Style::default().fg(Color::Cyan)),
            Span::raw("  "),
            Span::raw(truncate(&source.title, 80)),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    {}", source.uri),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

/// Truncate a string to at most `max` chars, appending "…" if truncated.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ratatui::{backend::TestBackend, Terminal};

    use veritas_config::AppConfig;
    use veritas_contracts::{
        error::VeritasResult,
        request::VerificationRequest,
        response::FactCheckResponse,
    };
    use veritas_core::{traits::VerificationClient, Action};
    use veritas_report::render_report;

    use super::*;

    struct NeverCalled;

    impl VerificationClient for NeverCalled {
        fn verify(&self, _request: &VerificationRequest) -> VeritasResult<FactCheckResponse> {
            panic!("the drawing tests never submit")
        }
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn idle_screen_shows_placeholder_and_input() {
        let mut app = App::new(Arc::new(NeverCalled), &AppConfig::default());
        app.dispatch(Action::EditText("Moon made of cheese".to_string()));
        let screen = screen(&app);
        assert!(screen.contains("VERITAS Pro"));
        assert!(screen.contains("Moon made of cheese"));
        assert!(screen.contains("press Ctrl-R to verify"));
    }

    #[test]
    fn card_badge_uses_verdict_tone() {
        let view = render_report("### Claim 1: Test\n**Verdict**: FALSE\n**Confidence**: 42%");
        let lines = report_lines(&view);

        assert_eq!(text_of(&lines[0]), "┌ Claim 1: Test  [✘ FALSE]");
        let badge = lines[0].spans.last().unwrap();
        assert_eq!(badge.style.fg, Some(Color::Red));
        assert!(text_of(&lines[1]).contains("Confidence Score"));
        assert!(text_of(&lines[1]).ends_with(" 42%"));
    }

    #[test]
    fn source_header_counts_entries() {
        let sources = vec![SourceEntry {
            uri: "https://www.bbc.co.uk/news/1".to_string(),
            hostname: "www.bbc.co.uk".to_string(),
            title: "BBC".to_string(),
            icon_url: "https://www.google.com/s2/favicons?sz=64&domain=www.bbc.co.uk".to_string(),
        }];
        let lines = source_lines(&sources);
        assert_eq!(text_of(&lines[0]), "Sources (1)");
        assert!(text_of(&lines[1]).contains("www.bbc.co.uk"));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn tones_map_to_distinct_colors() {
        let colors = [Tone::Green, Tone::Red, Tone::Amber, Tone::Indigo, Tone::Slate].map(tone_color);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn truncate_appends_ellipsis() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
