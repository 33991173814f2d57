//! # MessageList Component
//!
//! Scrollable column of message bubbles, used by both the live monitor's
//! message view and the chat panel's transcript.
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent scroll state) and the bubbles to
//! draw (props). Since `Component::render` takes `&mut self`, scroll state
//! can be mutated during the render pass.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::view::MessageBubble;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::bubble::Bubble;
use crate::tui::event::TuiEvent;

/// Scroll state for a message list. Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    /// When true, auto-scroll to bottom on new content.
    pub stick_to_bottom: bool,
    /// Total content height from the last render, for scroll clamping.
    content_height: u16,
    /// Last known viewport height.
    viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true, // Start attached to bottom
            content_height: 0,
            viewport_height: 0,
        }
    }

    /// Re-engage auto-scroll if a scroll-down landed at (or past) the bottom.
    fn repin_if_at_bottom(&mut self) {
        let max_y = self.content_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
            }
            _ => return None,
        }
        Some(())
    }
}

/// Transient render wrapper over the persistent scroll state.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub bubbles: &'a [MessageBubble],
}

impl<'a> MessageList<'a> {
    pub fn new(state: &'a mut MessageListState, bubbles: &'a [MessageBubble]) -> Self {
        Self { state, bubbles }
    }
}

impl Component for MessageList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar

        let heights: Vec<u16> = self
            .bubbles
            .iter()
            .map(|b| Bubble::calculate_height(b, content_width))
            .collect();
        let total_height: u16 = heights.iter().sum();

        self.state.content_height = total_height;
        self.state.viewport_height = area.height;

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (bubble, height) in self.bubbles.iter().zip(&heights) {
            let bubble_rect = Rect::new(0, y_offset, content_width, *height);
            scroll_view.render_widget(Bubble::new(bubble), bubble_rect);
            y_offset += height;
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_up_detaches_from_bottom() {
        let mut state = MessageListState::new();
        assert!(state.stick_to_bottom);
        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);
    }

    #[test]
    fn test_scroll_to_bottom_reattaches() {
        let mut state = MessageListState::new();
        state.handle_event(&TuiEvent::ScrollUp);
        state.handle_event(&TuiEvent::ScrollToBottom);
        assert!(state.stick_to_bottom);
    }

    #[test]
    fn test_scroll_down_repins_at_bottom() {
        let mut state = MessageListState::new();
        state.content_height = 10;
        state.viewport_height = 20; // everything fits, so any offset is "bottom"
        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);
        state.handle_event(&TuiEvent::ScrollDown);
        assert!(state.stick_to_bottom);
    }

    #[test]
    fn test_non_scroll_events_ignored() {
        let mut state = MessageListState::new();
        assert!(state.handle_event(&TuiEvent::InputChar('x')).is_none());
        assert!(state.handle_event(&TuiEvent::Submit).is_none());
    }
}
