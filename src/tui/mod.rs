//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the four
//! panels, and translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm. All
//! business state lives in `core::state::App` and changes only through
//! `core::action::update()`; this layer owns presentation state (focus,
//! cursors, scroll offsets) and performs the I/O that `Effect` values
//! describe.
//!
//! ## Background work
//!
//! Network calls never run on the UI thread. Two poll loops (conversation
//! list, statistics) and per-effect one-shot tasks run under tokio and send
//! completion `Action`s back over an mpsc channel, which the event loop
//! drains between draws. Poll responses carry the sequence number stamped
//! when their request was spawned so `update()` can drop out-of-order
//! arrivals.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::Panel;
use crate::api::{BackendClient, BotClient, StatsPeriod, StatsSnapshot};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::identity;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    ConversationEvent, ConversationListState, InputBox, InputEvent, MessageListState,
    TrainingEvent, TrainingPanelState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Keyboard focus within the live monitor panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveFocus {
    /// Navigating the conversation list. `i` switches to the input box.
    List,
    /// Editing the intervention message. Esc switches back to the list.
    Input,
}

/// TUI-specific presentation state (not part of core business logic).
pub struct TuiState {
    pub live_list: ConversationListState,
    pub live_focus: LiveFocus,
    pub live_input: InputBox,
    pub monitor_view: MessageListState,
    pub chat_view: MessageListState,
    pub chat_input: InputBox,
    pub training: TrainingPanelState,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            live_list: ConversationListState::new(),
            live_focus: LiveFocus::List,
            live_input: InputBox::new(" Müdahale Mesajı "),
            monitor_view: MessageListState::new(),
            chat_view: MessageListState::new(),
            chat_input: InputBox::new(" Mesajınız "),
            training: TrainingPanelState::new(),
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

pub fn run(panel: Panel, config: ResolvedConfig) -> std::io::Result<()> {
    let backend = Arc::new(BackendClient::new(config.backend_base_url.clone()));
    let bot = Arc::new(BotClient::new(config.bot_base_url.clone()));

    let user_id = identity::load_or_create_user_id();
    info!("Chat identity: {}", user_id);

    let mut app = App::new(panel, user_id);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    spawn_conversation_poll(backend.clone(), tx.clone(), config.conversation_poll_secs);
    spawn_statistics_poll(backend.clone(), tx.clone(), config.statistics_poll_secs);
    spawn_training_reload(backend.clone(), tx.clone());

    let mut needs_redraw = true; // Force first frame
    let mut should_quit = false;

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        // Process first event + drain ALL pending events before next draw
        let first_event = poll_event_timeout(Duration::from_millis(250));
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            // Ctrl+C always quits, regardless of focus
            if matches!(event, TuiEvent::ForceQuit) {
                if update(&mut app, Action::Quit) == Effect::Quit {
                    should_quit = true;
                }
                continue;
            }

            // Tab switches panels unless the training panel is capturing
            // input (its form cycles fields with Tab instead)
            if matches!(event, TuiEvent::NextPanel)
                && !(app.panel == Panel::Training && tui.training.captures_input())
            {
                update(&mut app, Action::NextPanel);
                continue;
            }

            if let Some(action) = route_event(&mut app, &mut tui, &event) {
                let effect = update(&mut app, action);
                if dispatch_effect(effect, &mut tui, &backend, &bot, &app.user_id, &tx) {
                    should_quit = true;
                }
            }
        }

        if should_quit {
            break;
        }

        // Handle completions from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if dispatch_effect(effect, &mut tui, &backend, &bot, &app.user_id, &tx) {
                should_quit = true;
            }
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Translate a panel-local event into a core action, updating presentation
/// state (focus, cursors, scroll) along the way.
fn route_event(app: &mut App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match app.panel {
        Panel::Live => {
            if matches!(
                event,
                TuiEvent::ScrollUp
                    | TuiEvent::ScrollDown
                    | TuiEvent::ScrollPageUp
                    | TuiEvent::ScrollPageDown
                    | TuiEvent::ScrollToBottom
            ) {
                tui.monitor_view.handle_event(event);
                return None;
            }
            match tui.live_focus {
                LiveFocus::List => match event {
                    TuiEvent::InputChar('i') => {
                        tui.live_focus = LiveFocus::Input;
                        None
                    }
                    TuiEvent::InputChar('r') => Some(Action::RefreshConversation),
                    _ => match tui.live_list.handle_event(event) {
                        Some(ConversationEvent::Open(i)) => app
                            .live
                            .conversations
                            .get(i)
                            .map(|c| Action::SelectConversation(c.id.clone())),
                        None => None,
                    },
                },
                LiveFocus::Input => match event {
                    TuiEvent::Escape => {
                        tui.live_focus = LiveFocus::List;
                        None
                    }
                    _ => match tui.live_input.handle_event(event) {
                        Some(InputEvent::Submit(text)) => Some(Action::SubmitIntervention(text)),
                        _ => None,
                    },
                },
            }
        }

        Panel::Dashboard => None,

        Panel::Training => match tui.training.handle_event(event) {
            Some(TrainingEvent::Search(term)) => Some(Action::SetTrainingSearch(term)),
            Some(TrainingEvent::SubmitForm {
                intent,
                questions,
                answer,
            }) => Some(Action::SubmitTrainingForm {
                intent,
                questions,
                answer,
            }),
            Some(TrainingEvent::DeleteAt(i)) => app
                .training
                .visible_records()
                .get(i)
                .map(|r| Action::DeleteTrainingRecord(r.id.clone())),
            Some(TrainingEvent::TrainModel) => Some(Action::TrainModel),
            None => None,
        },

        Panel::Chat => {
            if matches!(
                event,
                TuiEvent::ScrollUp
                    | TuiEvent::ScrollDown
                    | TuiEvent::ScrollPageUp
                    | TuiEvent::ScrollPageDown
                    | TuiEvent::ScrollToBottom
            ) {
                tui.chat_view.handle_event(event);
                return None;
            }
            match tui.chat_input.handle_event(event) {
                Some(InputEvent::Submit(text)) => Some(Action::SubmitChatMessage(text)),
                _ => None,
            }
        }
    }
}

/// Perform the I/O an `Effect` describes. Returns true if the app should quit.
fn dispatch_effect(
    effect: Effect,
    tui: &mut TuiState,
    backend: &Arc<BackendClient>,
    bot: &Arc<BotClient>,
    user_id: &str,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match effect {
        Effect::None => {}
        Effect::Quit => return true,

        Effect::FetchConversation { user_id, epoch } => {
            let backend = backend.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = backend.conversation(&user_id).await;
                send_or_warn(&tx, Action::MessagesLoaded { epoch, result });
            });
        }

        Effect::SendIntervention { user_id, message } => {
            let backend = backend.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = backend.send_intervention(&user_id, &message).await;
                send_or_warn(&tx, Action::InterventionDone(result));
            });
        }

        Effect::SendChatMessage(text) => {
            let bot = bot.clone();
            let tx = tx.clone();
            let sender = user_id.to_string();
            tokio::spawn(async move {
                let result = bot.send_message(&sender, &text).await;
                send_or_warn(&tx, Action::BotRepliesReceived(result));
            });
        }

        Effect::CreateTrainingRecord(record) => {
            let backend = backend.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = backend.create_training_data(&record).await;
                send_or_warn(&tx, Action::TrainingCreated(result));
            });
        }

        Effect::DeleteTrainingRecord(id) => {
            let backend = backend.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = backend.delete_training_data(&id).await;
                send_or_warn(&tx, Action::TrainingDeleted(result));
            });
        }

        Effect::ReloadTrainingData { clear_form } => {
            if clear_form {
                tui.training.clear_form();
            }
            spawn_training_reload(backend.clone(), tx.clone());
        }

        Effect::TrainModel => {
            let backend = backend.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = backend.train_model().await;
                send_or_warn(&tx, Action::TrainModelDone(result));
            });
        }
    }
    false
}

fn send_or_warn(tx: &mpsc::Sender<Action>, action: Action) {
    if tx.send(action).is_err() {
        warn!("Failed to send completion action: receiver dropped");
    }
}

/// Polls the live-conversation list. Each tick fires an independent request
/// stamped with a fresh sequence number; a slow response from an earlier
/// tick can arrive after a newer one and is dropped by `update()`.
fn spawn_conversation_poll(
    backend: Arc<BackendClient>,
    tx: mpsc::Sender<Action>,
    poll_secs: u64,
) {
    info!("Polling conversations every {}s", poll_secs);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(poll_secs));
        let mut seq: u64 = 0;
        loop {
            interval.tick().await;
            seq += 1;
            let backend = backend.clone();
            let tx = tx.clone();
            let seq = seq;
            tokio::spawn(async move {
                let result = backend.live_conversations().await;
                send_or_warn(&tx, Action::ConversationsLoaded { seq, result });
            });
        }
    });
}

/// Polls the statistics for all periods. A cycle is all-or-nothing: one
/// failed period fails the cycle and the previous snapshots stay on screen.
fn spawn_statistics_poll(backend: Arc<BackendClient>, tx: mpsc::Sender<Action>, poll_secs: u64) {
    info!("Polling statistics every {}s", poll_secs);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(poll_secs));
        let mut seq: u64 = 0;
        loop {
            interval.tick().await;
            seq += 1;
            let backend = backend.clone();
            let tx = tx.clone();
            let seq = seq;
            tokio::spawn(async move {
                let result = fetch_stats_cycle(&backend).await;
                send_or_warn(&tx, Action::StatisticsLoaded { seq, result });
            });
        }
    });
}

async fn fetch_stats_cycle(
    backend: &BackendClient,
) -> Result<Vec<(StatsPeriod, StatsSnapshot)>, crate::api::ApiError> {
    let mut cycle = Vec::with_capacity(StatsPeriod::ALL.len());
    for period in StatsPeriod::ALL {
        let snapshot = backend.statistics(period).await?;
        cycle.push((period, snapshot));
    }
    Ok(cycle)
}

/// One-shot fetch of the training-data list, used for the initial load and
/// after every create/delete.
fn spawn_training_reload(backend: Arc<BackendClient>, tx: mpsc::Sender<Action>) {
    tokio::spawn(async move {
        let result = backend.training_data().await;
        send_or_warn(&tx, Action::TrainingDataLoaded(result));
    });
}
