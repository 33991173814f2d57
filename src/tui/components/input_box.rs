//! # InputBox Component
//!
//! Single-line text input used for the chat message box and the admin
//! intervention box. The buffer is internal state; the title and focus
//! flag are props set by the parent each frame.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by the InputBox.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User pressed Enter. Carries the buffer contents; the buffer is cleared.
    Submit(String),
    ContentChanged,
}

pub struct InputBox {
    /// Text buffer (internal state)
    pub buffer: String,
    /// Border title (prop)
    pub title: &'static str,
    /// Whether keystrokes currently route here (prop); dims the border
    /// and hides the cursor when false.
    pub focused: bool,
}

impl InputBox {
    pub fn new(title: &'static str) -> Self {
        Self {
            buffer: String::new(),
            title,
            focused: false,
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<InputEvent> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.push(*c);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(data) => {
                // Single-line box: pasted newlines become spaces.
                self.buffer.push_str(&data.replace('\n', " "));
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                self.buffer.pop();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Submit => Some(InputEvent::Submit(std::mem::take(&mut self.buffer))),
            _ => None,
        }
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(2) as usize;

        // Show the tail of the buffer when it outgrows the box.
        let char_count = self.buffer.chars().count();
        let visible: String = if char_count >= inner_width && inner_width > 0 {
            self.buffer
                .chars()
                .skip(char_count + 1 - inner_width)
                .collect()
        } else {
            self.buffer.clone()
        };

        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.title);

        let visible_len = visible.chars().count() as u16;
        let input = Paragraph::new(visible).block(block);
        frame.render_widget(input, area);

        if self.focused {
            frame.set_cursor_position((area.x + 1 + visible_len, area.y + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_and_backspace_edit_buffer() {
        let mut input = InputBox::new("Mesaj");
        input.handle_event(&TuiEvent::InputChar('s'));
        input.handle_event(&TuiEvent::InputChar('e'));
        input.handle_event(&TuiEvent::InputChar('l'));
        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "se");
    }

    #[test]
    fn test_submit_drains_buffer() {
        let mut input = InputBox::new("Mesaj");
        input.handle_event(&TuiEvent::InputChar('a'));
        let event = input.handle_event(&TuiEvent::Submit);
        assert_eq!(event, Some(InputEvent::Submit("a".to_string())));
        assert!(input.buffer.is_empty());
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut input = InputBox::new("Mesaj");
        input.handle_event(&TuiEvent::Paste("iki\nsatır".to_string()));
        assert_eq!(input.buffer, "iki satır");
    }
}
