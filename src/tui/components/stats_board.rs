//! # StatsBoard Component
//!
//! The dashboard panel: one card per aggregation period, laid out in a row.
//! Stateless — it renders the pre-formatted cards and nothing else.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::view::StatCard;
use crate::tui::component::Component;

pub struct StatsBoard<'a> {
    pub cards: &'a [StatCard],
}

impl<'a> StatsBoard<'a> {
    pub fn new(cards: &'a [StatCard]) -> Self {
        Self { cards }
    }

    fn render_card(frame: &mut Frame, area: Rect, card: &StatCard) {
        let label_style = Style::default().fg(Color::DarkGray);
        let value_style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

        let lines = vec![
            stat_line("Konuşma", &card.conversations, label_style, value_style),
            stat_line("Kullanıcı", &card.users, label_style, value_style),
            stat_line("GPT-4", &card.usage, label_style, value_style),
            stat_line("Maliyet", &card.cost, label_style, value_style),
        ];

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", card.title))
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

fn stat_line<'a>(
    label: &'a str,
    value: &'a str,
    label_style: Style,
    value_style: Style,
) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<10}", label), label_style),
        Span::styled(value, value_style),
    ])
}

impl Component for StatsBoard<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.cards.is_empty() {
            return;
        }
        // One equal-width column per card. At typical widths each card gets
        // enough room for the four stat lines.
        let constraints =
            vec![Constraint::Ratio(1, self.cards.len() as u32); self.cards.len()];
        let columns = Layout::horizontal(constraints).split(area);
        for (card, column) in self.cards.iter().zip(columns.iter()) {
            Self::render_card(frame, *column, card);
        }
    }
}
