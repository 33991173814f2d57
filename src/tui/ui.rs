use chrono::Utc;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::Panel;
use crate::core::state::App;
use crate::core::view;
use crate::tui::component::Component;
use crate::tui::components::conversation_list::ConversationList;
use crate::tui::components::stats_board::StatsBoard;
use crate::tui::components::MessageList;
use crate::tui::components::training_panel::TrainingPanel;
use crate::tui::{LiveFocus, TuiState};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, status_area] = layout.areas(frame.area());

    draw_title_bar(frame, title_area, app.panel);

    match app.panel {
        Panel::Live => draw_live_panel(frame, main_area, app, tui),
        Panel::Dashboard => {
            let cards = view::stat_cards(&app.stats);
            StatsBoard::new(&cards).render(frame, main_area);
        }
        Panel::Training => {
            let records = app.training.visible_records();
            TrainingPanel::new(
                &mut tui.training,
                &records,
                app.training.training_in_progress,
                app.training.load_failed,
            )
            .render(frame, main_area);
        }
        Panel::Chat => draw_chat_panel(frame, main_area, app, tui),
    }

    // Status bar: the latest alert text.
    frame.render_widget(
        Span::styled(
            format!(" {}", app.status_message),
            Style::default().fg(Color::Yellow),
        ),
        status_area,
    );
}

/// One tab per panel, the active one highlighted. Tab cycles.
fn draw_title_bar(frame: &mut Frame, area: Rect, active: Panel) {
    let mut spans = vec![Span::styled(
        " Gözcü ",
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )];
    for panel in [Panel::Live, Panel::Dashboard, Panel::Training, Panel::Chat] {
        spans.push(Span::raw(" "));
        let style = if panel == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", panel.label()), style));
    }
    spans.push(Span::styled(
        "  (Tab: panel değiştir, Ctrl+C: çıkış)",
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
    ));
    frame.render_widget(Line::from(spans), area);
}

fn draw_live_panel(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min, Percentage};
    let [list_area, detail_area] =
        Layout::horizontal([Percentage(40), Percentage(60)]).areas(area);

    let rows = view::conversation_rows(
        &app.live.conversations,
        app.live.selected_user_id.as_deref(),
        Utc::now(),
    );
    ConversationList::new(
        &mut tui.live_list,
        &rows,
        matches!(tui.live_focus, LiveFocus::List),
    )
    .render(frame, list_area);

    let [messages_area, input_area] = Layout::vertical([Min(0), Length(3)]).areas(detail_area);

    if app.live.selected_user_id.is_some() {
        let bubbles = view::message_bubbles(&app.live.messages);
        MessageList::new(&mut tui.monitor_view, &bubbles).render(frame, messages_area);
    } else {
        let hint = Paragraph::new("Bir konuşma seçin (Enter)")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::bordered().border_style(Style::default().fg(Color::DarkGray)));
        frame.render_widget(hint, messages_area);
    }

    tui.live_input.focused = matches!(tui.live_focus, LiveFocus::Input);
    tui.live_input.render(frame, input_area);
}

fn draw_chat_panel(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let [messages_area, input_area] = Layout::vertical([Min(0), Length(3)]).areas(area);

    let bubbles = view::chat_bubbles(&app.chat);
    MessageList::new(&mut tui.chat_view, &bubbles).render(frame, messages_area);

    tui.chat_input.focused = true;
    tui.chat_input.render(frame, input_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    /// Smoke test: every panel draws without panicking on a small terminal.
    #[test]
    fn test_draw_ui_all_panels() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = test_app();
        let mut tui = TuiState::new();

        for panel in [Panel::Live, Panel::Dashboard, Panel::Training, Panel::Chat] {
            app.panel = panel;
            terminal.draw(|f| draw_ui(f, &app, &mut tui)).unwrap();
        }
    }

    #[test]
    fn test_draw_ui_with_data() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = test_app();
        let mut tui = TuiState::new();

        app.live.apply_conversations(
            1,
            vec![serde_json::from_str(
                r#"{"_id":"u1","message_count":2,"last_message":"selam","last_timestamp":"2024-06-01T12:00:00Z"}"#,
            )
            .unwrap()],
        );
        app.chat.begin_exchange("merhaba".to_string());

        terminal.draw(|f| draw_ui(f, &app, &mut tui)).unwrap();

        app.panel = Panel::Chat;
        terminal.draw(|f| draw_ui(f, &app, &mut tui)).unwrap();
    }
}
