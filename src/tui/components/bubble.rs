//! # Bubble Component
//!
//! Renders one message bubble: a bordered paragraph titled with the sender
//! label and clock time, the wrapped body, and an optional dim confidence
//! line for bot messages.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::core::view::MessageBubble;

pub struct Bubble<'a> {
    pub bubble: &'a MessageBubble,
}

impl<'a> Bubble<'a> {
    pub fn new(bubble: &'a MessageBubble) -> Self {
        Self { bubble }
    }

    /// Height of the rendered bubble at the given width: wrapped body lines,
    /// plus one line for the confidence label, plus two border rows.
    pub fn calculate_height(bubble: &MessageBubble, width: u16) -> u16 {
        let inner_width = width.saturating_sub(2).max(1) as usize;
        let body_lines = textwrap::wrap(&bubble.body, inner_width).len().max(1) as u16;
        let confidence_lines = u16::from(bubble.confidence_label.is_some());
        body_lines + confidence_lines + 2
    }

    fn accent(&self) -> Style {
        if self.bubble.role_label.contains("Bot") {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Cyan)
        }
    }
}

impl Widget for Bubble<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let accent = self.accent();
        let title = if self.bubble.time.is_empty() {
            self.bubble.role_label.to_string()
        } else {
            format!("{} · {}", self.bubble.role_label, self.bubble.time)
        };

        let mut lines: Vec<Line> = self
            .bubble
            .body
            .lines()
            .map(|l| Line::from(l.to_string()))
            .collect();
        if let Some(confidence) = &self.bubble.confidence_label {
            lines.push(Line::from(Span::styled(
                confidence.clone(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )));
        }

        Paragraph::new(lines)
            .block(
                Block::bordered()
                    .title(title)
                    .border_style(accent.add_modifier(Modifier::DIM))
                    .title_style(accent),
            )
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bubble(body: &str, confidence: Option<&str>) -> MessageBubble {
        MessageBubble {
            role_label: "🤖 Bot",
            time: "09:05:07".to_string(),
            body: body.to_string(),
            confidence_label: confidence.map(str::to_string),
        }
    }

    #[test]
    fn test_height_single_line_plus_borders() {
        let b = bubble("Merhaba", None);
        assert_eq!(Bubble::calculate_height(&b, 80), 3);
    }

    #[test]
    fn test_height_counts_wrapped_lines() {
        let b = bubble(
            "this response is long enough to wrap across multiple lines at a narrow width",
            None,
        );
        assert!(Bubble::calculate_height(&b, 30) > 3);
    }

    #[test]
    fn test_height_adds_confidence_line() {
        let without = bubble("Merhaba", None);
        let with = bubble("Merhaba", Some("Güven: 92.0%"));
        assert_eq!(
            Bubble::calculate_height(&with, 80),
            Bubble::calculate_height(&without, 80) + 1
        );
    }

    #[test]
    fn test_height_empty_body_still_one_line() {
        let b = bubble("", None);
        assert_eq!(Bubble::calculate_height(&b, 80), 3);
    }
}
