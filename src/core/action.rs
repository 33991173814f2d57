//! # Actions
//!
//! Everything that can happen in Gozcu becomes an `Action`.
//! User presses Enter in the chat box? That's `Action::SubmitChatMessage`.
//! A poll tick resolves? That's `Action::ConversationsLoaded`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing the I/O the caller should
//! perform. No network calls happen here, so every transition — including
//! the staleness guards and the alert wording — is testable synchronously.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Failure policy (matching the original panels): background polls fail
//! silently (log, keep stale data); user-initiated operations surface a
//! Turkish status alert; the chat exchange renders a fixed fallback entry.

use log::warn;

use crate::api::{
    ApiError, BotReply, ConversationSummary, Message, NewTrainingRecord, StatsPeriod,
    StatsSnapshot, TrainingRecord,
};
use crate::core::state::App;
use crate::core::training::build_record;

#[derive(Debug)]
pub enum Action {
    Quit,
    NextPanel,

    // Live monitor
    ConversationsLoaded {
        seq: u64,
        result: Result<Vec<ConversationSummary>, ApiError>,
    },
    SelectConversation(String),
    RefreshConversation,
    MessagesLoaded {
        epoch: u64,
        result: Result<Vec<Message>, ApiError>,
    },
    SubmitIntervention(String),
    InterventionDone(Result<(), ApiError>),

    // Dashboard
    StatisticsLoaded {
        seq: u64,
        result: Result<Vec<(StatsPeriod, StatsSnapshot)>, ApiError>,
    },

    // Chat client
    SubmitChatMessage(String),
    BotRepliesReceived(Result<Vec<BotReply>, ApiError>),

    // Training data
    TrainingDataLoaded(Result<Vec<TrainingRecord>, ApiError>),
    SetTrainingSearch(String),
    SubmitTrainingForm {
        intent: String,
        questions: String,
        answer: String,
    },
    TrainingCreated(Result<(), ApiError>),
    DeleteTrainingRecord(String),
    TrainingDeleted(Result<(), ApiError>),
    TrainModel,
    TrainModelDone(Result<(), ApiError>),
}

/// I/O the event loop must perform after an update.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    Quit,
    FetchConversation { user_id: String, epoch: u64 },
    SendIntervention { user_id: String, message: String },
    SendChatMessage(String),
    CreateTrainingRecord(NewTrainingRecord),
    DeleteTrainingRecord(String),
    ReloadTrainingData { clear_form: bool },
    TrainModel,
}

/// Maps a user-initiated failure to its alert text: non-OK responses get the
/// operation-specific message, network/parse failures the generic one.
fn failure_alert(error: &ApiError, non_ok_alert: &str) -> String {
    match error {
        ApiError::Api { .. } => non_ok_alert.to_string(),
        ApiError::Network(_) | ApiError::Parse(_) => "Bağlantı hatası!".to_string(),
    }
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Quit => Effect::Quit,

        Action::NextPanel => {
            app.panel = app.panel.next();
            Effect::None
        }

        // ------------------------------------------------------------------
        // Live monitor
        // ------------------------------------------------------------------
        Action::ConversationsLoaded { seq, result } => {
            match result {
                Ok(conversations) => {
                    if !app.live.apply_conversations(seq, conversations) {
                        warn!("Dropping stale conversation list (seq={})", seq);
                    }
                }
                // Stale-but-available: keep the previous list, log only.
                Err(e) => warn!("Error loading conversations: {}", e),
            }
            Effect::None
        }

        Action::SelectConversation(user_id) => {
            let epoch = app.live.select(user_id.clone());
            Effect::FetchConversation { user_id, epoch }
        }

        Action::RefreshConversation => match app.live.selected_user_id.clone() {
            Some(user_id) => Effect::FetchConversation {
                user_id,
                epoch: app.live.selection_epoch(),
            },
            None => Effect::None,
        },

        Action::MessagesLoaded { epoch, result } => {
            match result {
                Ok(messages) => {
                    if !app.live.apply_messages(epoch, messages) {
                        warn!("Dropping message load for stale selection (epoch={})", epoch);
                    }
                }
                Err(e) => warn!("Error loading conversation: {}", e),
            }
            Effect::None
        }

        Action::SubmitIntervention(text) => {
            let message = text.trim().to_string();
            match app.live.selected_user_id.clone() {
                Some(user_id) if !message.is_empty() => {
                    Effect::SendIntervention { user_id, message }
                }
                _ => Effect::None,
            }
        }

        Action::InterventionDone(result) => match result {
            Ok(()) => {
                app.status_message =
                    "Mesajınız gönderildi! Bot otomatik olarak durdu.".to_string();
                // Reload the conversation so the injected message shows up.
                match app.live.selected_user_id.clone() {
                    Some(user_id) => Effect::FetchConversation {
                        user_id,
                        epoch: app.live.selection_epoch(),
                    },
                    None => Effect::None,
                }
            }
            Err(e) => {
                warn!("Error sending intervention: {}", e);
                app.status_message = failure_alert(&e, "Mesaj gönderilemedi!");
                Effect::None
            }
        },

        // ------------------------------------------------------------------
        // Dashboard
        // ------------------------------------------------------------------
        Action::StatisticsLoaded { seq, result } => {
            match result {
                Ok(snapshots) => {
                    if !app.stats.apply(seq, snapshots) {
                        warn!("Dropping stale statistics cycle (seq={})", seq);
                    }
                }
                Err(e) => warn!("Error loading statistics: {}", e),
            }
            Effect::None
        }

        // ------------------------------------------------------------------
        // Chat client
        // ------------------------------------------------------------------
        Action::SubmitChatMessage(text) => {
            let message = text.trim().to_string();
            if message.is_empty() {
                // Empty send is a no-op: no network call, no transcript entry.
                return Effect::None;
            }
            app.chat.begin_exchange(message.clone());
            Effect::SendChatMessage(message)
        }

        Action::BotRepliesReceived(result) => {
            match result {
                Ok(replies) => app.chat.apply_replies(replies),
                Err(e) => {
                    warn!("Error sending message: {}", e);
                    app.chat.apply_failure();
                }
            }
            Effect::None
        }

        // ------------------------------------------------------------------
        // Training data
        // ------------------------------------------------------------------
        Action::TrainingDataLoaded(result) => {
            match result {
                Ok(records) => {
                    app.training.records = records;
                    app.training.load_failed = false;
                }
                Err(e) => {
                    warn!("Error loading training data: {}", e);
                    app.training.load_failed = true;
                }
            }
            Effect::None
        }

        Action::SetTrainingSearch(term) => {
            app.training.search_term = term;
            Effect::None
        }

        Action::SubmitTrainingForm {
            intent,
            questions,
            answer,
        } => {
            let record = build_record(&intent, &questions, &answer, chrono::Utc::now());
            Effect::CreateTrainingRecord(record)
        }

        Action::TrainingCreated(result) => match result {
            Ok(()) => {
                app.status_message = "Eğitim verisi kaydedildi!".to_string();
                Effect::ReloadTrainingData { clear_form: true }
            }
            Err(e) => {
                warn!("Error saving training data: {}", e);
                app.status_message = failure_alert(&e, "Hata oluştu!");
                Effect::None
            }
        },

        Action::DeleteTrainingRecord(id) => Effect::DeleteTrainingRecord(id),

        Action::TrainingDeleted(result) => match result {
            Ok(()) => {
                app.status_message = "Silindi!".to_string();
                Effect::ReloadTrainingData { clear_form: false }
            }
            Err(e) => {
                warn!("Error deleting training data: {}", e);
                app.status_message = failure_alert(&e, "Silme hatası!");
                Effect::None
            }
        },

        Action::TrainModel => {
            if app.training.training_in_progress {
                // Trigger is disabled while a request is in flight.
                return Effect::None;
            }
            app.training.training_in_progress = true;
            Effect::TrainModel
        }

        Action::TrainModelDone(result) => {
            // Re-enabled regardless of outcome.
            app.training.training_in_progress = false;
            match result {
                Ok(()) => app.status_message = "Model eğitimi başlatıldı!".to_string(),
                Err(e) => {
                    warn!("Error training model: {}", e);
                    app.status_message = failure_alert(&e, "Eğitim başlatılamadı!");
                }
            }
            Effect::None
        }
    }
}
