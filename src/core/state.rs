//! # Application State
//!
//! Core business state for Gozcu. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── panel: Panel                  // which panel is active
//! ├── status_message: String        // status bar / alert text
//! ├── user_id: String               // persisted chat identity
//! ├── live: LiveState               // conversation monitor
//! ├── stats: StatsState             // dashboard snapshots
//! ├── chat: ChatState               // chat client transcript
//! └── training: TrainingState       // training-data cache
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use crate::Panel;
use crate::core::chat::ChatState;
use crate::core::live::LiveState;
use crate::core::stats::StatsState;
use crate::core::training::TrainingState;

pub struct App {
    pub panel: Panel,
    pub status_message: String,
    pub user_id: String,
    pub live: LiveState,
    pub stats: StatsState,
    pub chat: ChatState,
    pub training: TrainingState,
}

impl App {
    pub fn new(panel: Panel, user_id: String) -> Self {
        Self {
            panel,
            status_message: String::from("Gözcü hazır"),
            user_id,
            live: LiveState::new(),
            stats: StatsState::new(),
            chat: ChatState::new(),
            training: TrainingState::new(),
        }
    }
}
