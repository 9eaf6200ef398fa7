//! Pinned bar: the pinned agents in pin order.

use ak_protocol::MinimalPersonaSnapshot;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render_pinned_bar(frame: &mut Frame, area: Rect, pinned: &[MinimalPersonaSnapshot]) {
    let block = Block::default().borders(Borders::ALL).title("Pinned");

    let line = if pinned.is_empty() {
        Line::from(Span::styled(
            "No pinned agents",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let mut spans = Vec::with_capacity(pinned.len() * 2);
        for (i, agent) in pinned.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(
                format!("[{}]", agent.name),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        Line::from(spans)
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}
