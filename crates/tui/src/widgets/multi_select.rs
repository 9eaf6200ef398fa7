//! Multi-select widget.
//!
//! Draws whichever state `render_state` chose: a loading or error
//! placeholder, the empty-collection message, or the chips of selected items
//! above the list of remaining options.

use ak_core::selection::MultiSelectView;
use ak_protocol::Entity;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

/// Render `view` into `area`.
///
/// `highlighted` is the option index under the cursor, or `None` when the
/// field does not have focus.
pub fn render_multi_select<E: Entity>(
    frame: &mut Frame,
    area: Rect,
    view: &MultiSelectView<'_, E>,
    highlighted: Option<usize>,
) {
    let Some(label) = view.label() else {
        return;
    };

    let border_style = if highlighted.is_some() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(label.to_string())
        .border_style(border_style);

    match view {
        MultiSelectView::Hidden => {}
        MultiSelectView::Loading { .. } => {
            let text = Paragraph::new(Span::styled(
                "Loading...",
                Style::default().fg(Color::DarkGray),
            ))
            .block(block);
            frame.render_widget(text, area);
        }
        MultiSelectView::Error { message, .. } => {
            let text = Paragraph::new(Span::styled(
                message.clone(),
                Style::default().fg(Color::Red),
            ))
            .wrap(Wrap { trim: true })
            .block(block);
            frame.render_widget(text, area);
        }
        MultiSelectView::Empty { message, .. } => {
            let text = Paragraph::new(Span::styled(
                message.to_string(),
                Style::default().fg(Color::DarkGray),
            ))
            .wrap(Wrap { trim: true })
            .block(block);
            frame.render_widget(text, area);
        }
        MultiSelectView::Interactive {
            subtext,
            options,
            selected,
            ..
        } => {
            let inner = block.inner(area);
            frame.render_widget(block, area);

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1),
                    Constraint::Length(1),
                    Constraint::Min(1),
                ])
                .split(inner);

            if let Some(subtext) = subtext {
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        subtext.to_string(),
                        Style::default().fg(Color::DarkGray),
                    )),
                    chunks[0],
                );
            }

            frame.render_widget(Paragraph::new(chips(selected)), chunks[1]);

            let items: Vec<ListItem> = options
                .iter()
                .map(|option| ListItem::new(option.name().to_string()))
                .collect();
            let list = List::new(items)
                .highlight_style(
                    Style::default()
                        .bg(Color::Blue)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("+ ");

            let mut state = ListState::default();
            if !options.is_empty() {
                state.select(highlighted.map(|i| i.min(options.len() - 1)));
            }
            frame.render_stateful_widget(list, chunks[2], &mut state);
        }
    }
}

fn chips<E: Entity>(selected: &[&E]) -> Line<'static> {
    if selected.is_empty() {
        return Line::from(Span::styled(
            "None selected",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let mut spans = Vec::with_capacity(selected.len() * 2);
    for (i, item) in selected.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            format!("{} x", item.name()),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ));
    }
    Line::from(spans)
}
