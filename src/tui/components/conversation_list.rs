//! # ConversationList Component
//!
//! The left column of the live monitor: one row per active conversation,
//! navigated with Up/Down and opened with Enter.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ConversationListState` lives in `TuiState`
//! - `ConversationList` is created each frame with borrowed state and rows

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};

use crate::core::view::ConversationRow;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Events emitted by the conversation list.
pub enum ConversationEvent {
    /// Open the conversation at this row index.
    Open(usize),
}

/// Persistent cursor state for the conversation list.
pub struct ConversationListState {
    pub cursor: usize,
    pub list_state: ListState,
    /// Row count from the last render, used to clamp cursor movement.
    row_count: usize,
}

impl Default for ConversationListState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationListState {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            list_state: ListState::default(),
            row_count: 0,
        }
    }
}

impl EventHandler for ConversationListState {
    type Event = ConversationEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ConversationEvent> {
        match event {
            TuiEvent::CursorUp => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown => {
                if self.row_count > 0 {
                    self.cursor = (self.cursor + 1).min(self.row_count - 1);
                }
                None
            }
            TuiEvent::Submit => {
                if self.cursor < self.row_count {
                    Some(ConversationEvent::Open(self.cursor))
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the conversation list.
pub struct ConversationList<'a> {
    state: &'a mut ConversationListState,
    rows: &'a [ConversationRow],
    focused: bool,
}

impl<'a> ConversationList<'a> {
    pub fn new(
        state: &'a mut ConversationListState,
        rows: &'a [ConversationRow],
        focused: bool,
    ) -> Self {
        Self {
            state,
            rows,
            focused,
        }
    }
}

impl Component for ConversationList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        // The polled list can shrink between frames; keep the cursor valid.
        self.state.row_count = self.rows.len();
        if !self.rows.is_empty() {
            self.state.cursor = self.state.cursor.min(self.rows.len() - 1);
            self.state.list_state.select(Some(self.state.cursor));
        } else {
            self.state.list_state.select(None);
        }

        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Aktif Konuşmalar ")
            .title_bottom(Line::from(" ↑↓ Gez  Enter Aç  r Yenile  i Mesaj ").centered())
            .padding(Padding::horizontal(1));

        if self.rows.is_empty() {
            let empty = Paragraph::new("Aktif konuşma yok.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let header_style = if i == self.state.cursor {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else if row.selected {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };

                let header = Line::from(vec![
                    Span::styled(row.id.clone(), header_style),
                    Span::styled(
                        format!("  {} · {}", row.count_label, row.time_ago),
                        header_style.add_modifier(Modifier::DIM),
                    ),
                ]);
                let preview = Line::from(Span::styled(
                    row.preview.clone(),
                    Style::default().fg(Color::DarkGray),
                ));

                ListItem::new(vec![header, preview])
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}
