//! TUI application state and event loop.
//!
//! This module defines the main `App` struct that owns the agents context
//! and the provider access form, and runs the event loop using
//! `tokio::select!`.

use ak_core::agents::AgentsContext;
use ak_core::catalog::Catalog;
use ak_core::fetcher::FetchState;
use ak_core::selection::{
    render_state, selected_view, unselected_view, AccessField, FeatureGate,
    LlmProviderAccessForm, MultiSelectSpec,
};
use ak_protocol::ipc::Event;
use ak_protocol::{Entity, EntityId, MinimalPersonaSnapshot, UserGroup};
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::sync::Arc;
use tokio::select;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_stream::StreamExt;
use tracing::debug;

use crate::event::{KeyAction, Pane};
use crate::event_handler;
use crate::tui::{Tui, TuiEvent};
use crate::widgets::{render_agent_list, render_multi_select, render_pinned_bar};

/// Render-ready copy of the agents context.
///
/// The context is queried asynchronously; rendering is synchronous, so the
/// app keeps this snapshot and refreshes it after every change.
#[derive(Debug, Default)]
pub struct AgentsSnapshot {
    pub agents: Arc<Vec<MinimalPersonaSnapshot>>,
    pub pinned: Vec<MinimalPersonaSnapshot>,
    pub pinned_ids: Vec<EntityId>,
}

/// The provider access form being edited, with the candidates for its fields.
pub struct AccessPane {
    pub form: LlmProviderAccessForm,
    pub field: AccessField,
    /// Index into the focused field's remaining options.
    pub highlighted: usize,
    pub personas: FetchState<MinimalPersonaSnapshot>,
    pub groups: FetchState<UserGroup>,
    pub groups_gate: FeatureGate,
    persona_spec: MultiSelectSpec,
    group_spec: MultiSelectSpec,
}

impl AccessPane {
    pub fn new(form: LlmProviderAccessForm, groups_gate: FeatureGate) -> Self {
        Self {
            form,
            field: AccessField::Personas,
            highlighted: 0,
            personas: FetchState::default(),
            groups: FetchState::default(),
            groups_gate,
            persona_spec: MultiSelectSpec::personas(),
            group_spec: MultiSelectSpec::user_groups(),
        }
    }

    fn option_ids(&self) -> Vec<EntityId> {
        let selection = self.form.field(self.field);
        match self.field {
            AccessField::Personas => ids(&unselected_view(self.personas.items(), selection)),
            AccessField::Groups => ids(&unselected_view(self.groups.items(), selection)),
        }
    }

    fn chip_ids(&self) -> Vec<EntityId> {
        let selection = self.form.field(self.field);
        match self.field {
            AccessField::Personas => ids(&selected_view(self.personas.items(), selection)),
            AccessField::Groups => ids(&selected_view(self.groups.items(), selection)),
        }
    }

    fn switch_field(&mut self) {
        self.field = match self.field {
            AccessField::Personas => AccessField::Groups,
            AccessField::Groups => AccessField::Personas,
        };
        self.highlighted = 0;
    }

    fn move_highlight(&mut self, down: bool) {
        let count = self.option_ids().len();
        if down {
            if self.highlighted + 1 < count {
                self.highlighted += 1;
            }
        } else {
            self.highlighted = self.highlighted.saturating_sub(1);
        }
    }

    fn select_highlighted(&mut self) {
        let options = self.option_ids();
        if let Some(id) = options.get(self.highlighted) {
            self.form.select(self.field, *id);
        }
        let remaining = options.len().saturating_sub(1);
        self.highlighted = self.highlighted.min(remaining.saturating_sub(1));
    }

    fn remove_last(&mut self) {
        if let Some(id) = self.chip_ids().last() {
            self.form.remove(self.field, *id);
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let highlight_for = |field: AccessField| {
            (focused && self.field == field).then_some(self.highlighted)
        };

        let personas = render_state(
            &self.persona_spec,
            &self.personas,
            &self.form.personas,
            FeatureGate::Enabled,
        );
        render_multi_select(
            frame,
            chunks[0],
            &personas,
            highlight_for(AccessField::Personas),
        );

        let groups = render_state(
            &self.group_spec,
            &self.groups,
            &self.form.groups,
            self.groups_gate,
        );
        render_multi_select(frame, chunks[1], &groups, highlight_for(AccessField::Groups));
    }
}

fn ids<E: Entity>(view: &[&E]) -> Vec<EntityId> {
    view.iter().map(|e| e.id()).collect()
}

/// Main TUI application state.
pub struct App {
    pub context: AgentsContext,
    pub catalog: Catalog,
    pub snapshot: AgentsSnapshot,
    pub access: AccessPane,
    pub pane: Pane,
    /// Index of the highlighted agent.
    pub selected_index: usize,
    /// Last notification shown in the status line.
    pub status: Option<String>,
    /// Set when the last agents refresh failed.
    pub offline: bool,
    /// Channel to receive events from the core.
    pub event_rx: UnboundedReceiver<Event>,
    /// Flag to indicate if the application should exit.
    pub should_exit: bool,
}

impl App {
    pub fn new(context: AgentsContext, catalog: Catalog, event_rx: UnboundedReceiver<Event>) -> Self {
        let groups_gate = FeatureGate::from(context.config().ui.user_groups_enabled);
        Self {
            context,
            catalog,
            snapshot: AgentsSnapshot::default(),
            access: AccessPane::new(LlmProviderAccessForm::default(), groups_gate),
            pane: Pane::default(),
            selected_index: 0,
            status: None,
            offline: false,
            event_rx,
            should_exit: false,
        }
    }

    /// Re-read the context and the access pane's collections.
    pub async fn sync(&mut self) {
        self.snapshot = AgentsSnapshot {
            agents: self.context.agents().await,
            pinned: self.context.pinned_agents().await,
            pinned_ids: self.context.pinned_agent_ids().to_vec(),
        };
        self.selected_index = self
            .selected_index
            .min(self.snapshot.agents.len().saturating_sub(1));

        self.access.personas = self.catalog.personas().state().await;
        self.access.groups = self.catalog.user_groups().state().await;
    }

    /// Load the access pane's collections if they were never fetched.
    pub async fn load_collections(&mut self) {
        self.catalog.personas().load().await;
        self.catalog.user_groups().load().await;
        self.sync().await;
    }

    /// Main event loop.
    ///
    /// Uses `tokio::select!` to handle keyboard input and core events concurrently.
    pub async fn run(&mut self, tui: &mut Tui) -> Result<()> {
        let mut tui_events = tui.event_stream();

        self.load_collections().await;
        tui.frame_requester().schedule_frame();

        while !self.should_exit {
            select! {
                Some(event) = self.event_rx.recv() => {
                    self.handle_core_event(event).await;
                    tui.frame_requester().schedule_frame();
                }
                Some(tui_event) = tui_events.next() => {
                    self.handle_tui_event(tui, tui_event).await?;
                }
            }
        }

        Ok(())
    }

    /// Handle events from the core (ak-core).
    async fn handle_core_event(&mut self, event: Event) {
        debug!(?event, "core event");
        if let Some(message) = event_handler::describe_core_event(&event) {
            self.status = Some(message);
        }
        self.sync().await;
    }

    /// Handle TUI events (keyboard input, resize, draw).
    async fn handle_tui_event(&mut self, tui: &mut Tui, event: TuiEvent) -> Result<()> {
        match event {
            TuiEvent::Key(key_event) => {
                self.handle_key_event(key_event).await;
                tui.frame_requester().schedule_frame();
            }
            TuiEvent::Paste(_) => {}
            TuiEvent::Draw => {
                tui.draw(|frame| {
                    self.render(frame);
                })?;
            }
        }
        Ok(())
    }

    /// Handle keyboard events.
    pub async fn handle_key_event(&mut self, key_event: KeyEvent) {
        let action = event_handler::map_key_event(key_event, self.pane);
        self.apply(action).await;
    }

    async fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Quit => self.should_exit = true,
            KeyAction::MoveUp => match self.pane {
                Pane::Agents => self.selected_index = self.selected_index.saturating_sub(1),
                Pane::Access => self.access.move_highlight(false),
            },
            KeyAction::MoveDown => match self.pane {
                Pane::Agents => {
                    if self.selected_index + 1 < self.snapshot.agents.len() {
                        self.selected_index += 1;
                    }
                }
                Pane::Access => self.access.move_highlight(true),
            },
            KeyAction::TogglePin => {
                self.toggle_selected_pin();
                self.sync().await;
            }
            KeyAction::Refresh => {
                self.refresh().await;
                self.sync().await;
            }
            KeyAction::SwitchPane => self.pane = self.pane.next(),
            KeyAction::SwitchField => self.access.switch_field(),
            KeyAction::SelectOption => self.access.select_highlighted(),
            KeyAction::RemoveLast => self.access.remove_last(),
            KeyAction::Ignored => {}
        }
    }

    async fn refresh(&mut self) {
        match self.context.refresh_agents().await {
            Ok(()) => {
                let reconnected = std::mem::take(&mut self.offline);
                if reconnected && self.context.config().ui.revalidate_on_reconnect {
                    let failures = self.catalog.revalidate_all().await;
                    debug!(failures = failures.len(), "revalidated after reconnect");
                } else {
                    // Failures land in the groups fetch state
                    let _ = self.catalog.user_groups().refresh().await;
                }
                self.status = Some("Agents refreshed".to_string());
            }
            Err(e) => {
                self.offline = true;
                self.status = Some(e.to_string());
            }
        }
    }

    fn toggle_selected_pin(&mut self) {
        let Some(agent) = self.snapshot.agents.get(self.selected_index).cloned() else {
            return;
        };
        let should_pin = !self.context.is_pinned(agent.id);
        // The save reports its outcome through the event channel.
        if let Err(e) = self.context.toggle_pinned_agent(&agent, should_pin) {
            self.status = Some(e.to_string());
        }
    }

    /// Render the TUI.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Pinned bar
                Constraint::Min(5),    // Agents + access
                Constraint::Length(3), // Status
            ])
            .split(area);

        render_pinned_bar(frame, chunks[0], &self.snapshot.pinned);

        let main = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);

        render_agent_list(
            frame,
            main[0],
            &self.snapshot.agents,
            &self.snapshot.pinned_ids,
            self.selected_index,
            self.pane == Pane::Agents,
        );
        self.access.render(frame, main[1], self.pane == Pane::Access);

        self.render_status(frame, chunks[2]);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("tab: switch pane, q: quit");
        let text = self.status.clone().unwrap_or_default();
        let paragraph = Paragraph::new(text)
            .block(block)
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(paragraph, area);
    }
}
