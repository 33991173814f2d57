//! # TUI Components
//!
//! Components follow two patterns:
//!
//! - **Stateless (props-based)**: `Bubble` and `StatsBoard` receive all data
//!   as parameters and render it.
//! - **Stateful (event-driven)**: `InputBox`, `ConversationList`,
//!   `MessageList`, and `TrainingPanel` keep persistent state in `TuiState`
//!   and are wrapped by a transient render struct each frame.
//!
//! Each component file is self-contained: state types, event types,
//! rendering, event handling, and tests live together.

pub mod bubble;
pub mod conversation_list;
pub mod input_box;
pub mod message_list;
pub mod stats_board;
pub mod training_panel;

pub use conversation_list::{ConversationEvent, ConversationListState};
pub use input_box::{InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
pub use training_panel::{TrainingEvent, TrainingPanelState};
