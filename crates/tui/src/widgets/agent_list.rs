//! Agent list widget: every agent in a table, with pin markers.

use ak_protocol::{EntityId, MinimalPersonaSnapshot};
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table, TableState};
use ratatui::Frame;

pub const PIN_MARKER: &str = "●";

/// Renders the agents as a table, marking pinned ones.
///
/// # Arguments
/// * `agents` - The current agents collection, in collection order
/// * `pinned_ids` - Pinned agent IDs
/// * `selected` - Index of the highlighted row
/// * `focused` - Whether this pane has keyboard focus
pub fn render_agent_list(
    frame: &mut Frame,
    area: Rect,
    agents: &[MinimalPersonaSnapshot],
    pinned_ids: &[EntityId],
    selected: usize,
    focused: bool,
) {
    let rows: Vec<Row> = agents
        .iter()
        .map(|agent| {
            let pinned = pinned_ids.contains(&agent.id);
            let marker = if pinned { PIN_MARKER } else { " " };
            let name_style = if agent.is_default_persona {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(marker).style(Style::default().fg(Color::Yellow)),
                Cell::from(agent.id.to_string()),
                Cell::from(agent.name.clone()).style(name_style),
                Cell::from(agent.description.clone()).style(Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();

    let header = Row::new(vec![
        Cell::from(""),
        Cell::from("ID"),
        Cell::from("Agent"),
        Cell::from("Description"),
    ])
    .style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan));

    let widths = [
        Constraint::Length(2),
        Constraint::Length(5),
        Constraint::Percentage(35),
        Constraint::Percentage(60),
    ];

    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };

    let title = format!("Agents ({}) - space: pin, r: refresh", agents.len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style),
        )
        .row_highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    let mut table_state = TableState::default();
    if !agents.is_empty() {
        table_state.select(Some(selected.min(agents.len() - 1)));
    }

    frame.render_stateful_widget(table, area, &mut table_state);
}
