//! # TrainingPanel Component
//!
//! The training-data manager: a searchable record list with a create form
//! overlay. Destructive or expensive operations (delete, train model) use
//! the double-keypress confirmation pattern — the first press arms the
//! action, a repeat press fires it, and any other key disarms it.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `TrainingPanelState` lives in `TuiState`
//! - `TrainingPanel` is created each frame with borrowed state and records

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Clear, List, ListItem, ListState, Padding, Paragraph,
};

use crate::api::TrainingRecord;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Events emitted by the training panel.
#[derive(Debug, PartialEq)]
pub enum TrainingEvent {
    /// Search term changed; the parent updates the filter in core state.
    Search(String),
    /// Create form submitted with its raw field contents.
    SubmitForm {
        intent: String,
        questions: String,
        answer: String,
    },
    /// Delete the record at this index of the *visible* (filtered) list.
    DeleteAt(usize),
    /// Kick off server-side model training.
    TrainModel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Intent,
    Questions,
    Answer,
}

impl FormField {
    fn next(self) -> FormField {
        match self {
            FormField::Intent => FormField::Questions,
            FormField::Questions => FormField::Answer,
            FormField::Answer => FormField::Intent,
        }
    }

    fn prev(self) -> FormField {
        match self {
            FormField::Intent => FormField::Answer,
            FormField::Questions => FormField::Intent,
            FormField::Answer => FormField::Questions,
        }
    }
}

/// The create-form overlay's edit state.
#[derive(Debug, Default)]
pub struct TrainingFormState {
    pub intent: String,
    pub questions: String,
    pub answer: String,
    pub field: FormField,
}

impl TrainingFormState {
    fn active_buffer(&mut self) -> &mut String {
        match self.field {
            FormField::Intent => &mut self.intent,
            FormField::Questions => &mut self.questions,
            FormField::Answer => &mut self.answer,
        }
    }
}

/// Persistent state for the training panel.
pub struct TrainingPanelState {
    pub cursor: usize,
    pub list_state: ListState,
    pub search_buffer: String,
    pub search_mode: bool,
    /// Create form overlay (None = hidden).
    pub form: Option<TrainingFormState>,
    pub confirm_delete: bool,
    pub confirm_train: bool,
    /// Visible row count from the last render, for cursor clamping.
    row_count: usize,
}

impl Default for TrainingPanelState {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainingPanelState {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            list_state: ListState::default(),
            search_buffer: String::new(),
            search_mode: false,
            form: None,
            confirm_delete: false,
            confirm_train: false,
            row_count: 0,
        }
    }

    /// Closes the form and resets its fields. Called by the parent after a
    /// successful create, matching the original form-clearing behavior.
    pub fn clear_form(&mut self) {
        self.form = None;
    }

    /// True while the panel wants exclusive keyboard input (so Tab must not
    /// switch panels).
    pub fn captures_input(&self) -> bool {
        self.form.is_some() || self.search_mode
    }

    fn handle_form_event(&mut self, event: &TuiEvent) -> Option<TrainingEvent> {
        let form = self.form.as_mut()?;
        match event {
            TuiEvent::Escape => {
                self.form = None;
                None
            }
            TuiEvent::NextPanel | TuiEvent::CursorDown => {
                form.field = form.field.next();
                None
            }
            TuiEvent::CursorUp => {
                form.field = form.field.prev();
                None
            }
            TuiEvent::Submit => {
                if form.field == FormField::Answer {
                    Some(TrainingEvent::SubmitForm {
                        intent: form.intent.clone(),
                        questions: form.questions.clone(),
                        answer: form.answer.clone(),
                    })
                } else {
                    form.field = form.field.next();
                    None
                }
            }
            TuiEvent::InputChar(c) => {
                form.active_buffer().push(*c);
                None
            }
            TuiEvent::Paste(data) => {
                form.active_buffer().push_str(&data.replace('\n', " "));
                None
            }
            TuiEvent::Backspace => {
                form.active_buffer().pop();
                None
            }
            _ => None,
        }
    }

    fn handle_search_event(&mut self, event: &TuiEvent) -> Option<TrainingEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::Submit => {
                self.search_mode = false;
                None
            }
            TuiEvent::InputChar(c) => {
                self.search_buffer.push(*c);
                Some(TrainingEvent::Search(self.search_buffer.clone()))
            }
            TuiEvent::Backspace => {
                self.search_buffer.pop();
                Some(TrainingEvent::Search(self.search_buffer.clone()))
            }
            _ => None,
        }
    }

    fn handle_list_event(&mut self, event: &TuiEvent) -> Option<TrainingEvent> {
        // Any key other than the arming one disarms a pending confirmation.
        if !matches!(event, TuiEvent::InputChar('d')) {
            self.confirm_delete = false;
        }
        if !matches!(event, TuiEvent::InputChar('t')) {
            self.confirm_train = false;
        }

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
            TuiEvent::InputChar('/') => {
                self.search_mode = true;
                None
            }
            TuiEvent::InputChar('n') => {
                self.form = Some(TrainingFormState::default());
                None
            }
            TuiEvent::InputChar('d') => {
                if self.row_count == 0 {
                    return None;
                }
                if self.confirm_delete {
                    self.confirm_delete = false;
                    Some(TrainingEvent::DeleteAt(self.cursor))
                } else {
                    self.confirm_delete = true;
                    None
                }
            }
            TuiEvent::InputChar('t') => {
                if self.confirm_train {
                    self.confirm_train = false;
                    Some(TrainingEvent::TrainModel)
                } else {
                    self.confirm_train = true;
                    None
                }
            }
            _ => None,
        }
    }
}

impl EventHandler for TrainingPanelState {
    type Event = TrainingEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<TrainingEvent> {
        if self.form.is_some() {
            self.handle_form_event(event)
        } else if self.search_mode {
            self.handle_search_event(event)
        } else {
            self.handle_list_event(event)
        }
    }
}

/// Transient render wrapper for the training panel.
pub struct TrainingPanel<'a> {
    state: &'a mut TrainingPanelState,
    records: &'a [&'a TrainingRecord],
    training_in_progress: bool,
    load_failed: bool,
}

impl<'a> TrainingPanel<'a> {
    pub fn new(
        state: &'a mut TrainingPanelState,
        records: &'a [&'a TrainingRecord],
        training_in_progress: bool,
        load_failed: bool,
    ) -> Self {
        Self {
            state,
            records,
            training_in_progress,
            load_failed,
        }
    }

    fn render_search(&self, frame: &mut Frame, area: Rect) {
        let style = if self.state.search_mode {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let search = Paragraph::new(self.state.search_buffer.as_str())
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(style)
                    .title(" Ara "),
            );
        frame.render_widget(search, area);
        if self.state.search_mode {
            let len = self.state.search_buffer.chars().count() as u16;
            frame.set_cursor_position((area.x + 1 + len, area.y + 1));
        }
    }

    fn render_list(&mut self, frame: &mut Frame, area: Rect) {
        self.state.row_count = self.records.len();
        if !self.records.is_empty() {
            self.state.cursor = self.state.cursor.min(self.records.len() - 1);
            self.state.list_state.select(Some(self.state.cursor));
        } else {
            self.state.list_state.select(None);
        }

        let help_text = if self.state.confirm_delete {
            " Silmek için tekrar d basın "
        } else if self.state.confirm_train {
            " Eğitimi başlatmak için tekrar t basın "
        } else {
            " / Ara  n Yeni  d Sil  t Modeli Eğit "
        };
        let title = if self.training_in_progress {
            " Eğitim Verileri — ⏳ Eğitiliyor... "
        } else {
            " Eğitim Verileri "
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        if self.records.is_empty() {
            let text = if self.load_failed {
                "Veri yüklenemedi"
            } else {
                "Kayıt yok."
            };
            let empty = Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = self
            .records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let selected = i == self.state.cursor;
                let intent_style = if selected && self.state.confirm_delete {
                    Style::default()
                        .fg(Color::Red)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else if selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Cyan)
                };

                let header = Line::from(vec![
                    Span::styled(record.intent.clone(), intent_style),
                    Span::styled(
                        format!("  ({} soru)", record.questions.len()),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]);
                let questions = Line::from(Span::styled(
                    record.questions.join(" ; "),
                    Style::default().fg(Color::Gray),
                ));
                let answer = Line::from(Span::styled(
                    format!("→ {}", record.answer),
                    Style::default().fg(Color::DarkGray),
                ));

                ListItem::new(vec![header, questions, answer])
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }

    fn render_form(&mut self, frame: &mut Frame, area: Rect) {
        let Some(form) = &self.state.form else {
            return;
        };

        let overlay = centered_rect(70, 60, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Yeni Eğitim Verisi ")
            .title_bottom(
                Line::from(" Enter İleri/Kaydet  ↑↓ Alan  Esc Vazgeç ").centered(),
            );
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let [intent_area, questions_area, answer_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .areas(inner);

        let fields = [
            (FormField::Intent, " Intent (boş bırakılabilir) ", &form.intent, intent_area),
            (FormField::Questions, " Sorular (virgülle ayırın) ", &form.questions, questions_area),
            (FormField::Answer, " Cevap ", &form.answer, answer_area),
        ];

        for (field, title, value, field_area) in fields {
            let active = form.field == field;
            let style = if active {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let widget = Paragraph::new(value.as_str()).block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(style)
                    .title(title),
            );
            frame.render_widget(widget, field_area);
            if active {
                let len = value.chars().count() as u16;
                frame.set_cursor_position((field_area.x + 1 + len, field_area.y + 1));
            }
        }
    }
}

impl Component for TrainingPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [search_area, list_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);
        self.render_search(frame, search_area);
        self.render_list(frame, list_area);
        self.render_form(frame, area);
    }
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
