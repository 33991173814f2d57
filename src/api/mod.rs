//! Typed clients and wire types for the backend REST API and the bot webhook.

mod client;
mod types;

pub use client::{ApiError, BackendClient, BotClient};
pub use types::{
    BotReply, ConversationSummary, InterventionRequest, Message, NewTrainingRecord, Sender,
    StatsPeriod, StatsSnapshot, TrainingRecord, WebhookRequest,
};
