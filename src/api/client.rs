//! HTTP clients for the two external collaborators: the backend REST API
//! (conversation storage, statistics, training data) and the bot webhook.
//!
//! Both are thin typed wrappers over reqwest. Every call maps failures into
//! [`ApiError`]; nothing here decides how an error is surfaced — that is the
//! caller's job (status alert, fallback chat entry, or silent stale data).

use std::fmt;

use log::{debug, warn};

use super::types::{
    BotReply, ConversationSummary, InterventionRequest, Message, NewTrainingRecord, StatsPeriod,
    StatsSnapshot, TrainingRecord, WebhookRequest,
};

/// Errors produced by backend or webhook calls.
#[derive(Debug)]
pub enum ApiError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The server answered with a non-success status.
    Api { status: u16, message: String },
    /// The response body was not the JSON shape we expected.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Turns a non-success response into `ApiError::Api`, passing success through.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    warn!("API error: {} - {}", status, message);
    Err(ApiError::Api { status, message })
}

/// Client for the admin backend REST API (`/api/...`).
pub struct BackendClient {
    base_url: String,
    client: reqwest::Client,
}

impl BackendClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let response = check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// `GET /live-conversations` — summaries of every active conversation.
    pub async fn live_conversations(&self) -> Result<Vec<ConversationSummary>, ApiError> {
        self.get_json("/live-conversations").await
    }

    /// `GET /conversation/{id}` — full message history for one user.
    pub async fn conversation(&self, user_id: &str) -> Result<Vec<Message>, ApiError> {
        self.get_json(&format!("/conversation/{}", user_id)).await
    }

    /// `POST /intervention` — inject an admin message and silence the bot
    /// for that user.
    pub async fn send_intervention(&self, user_id: &str, message: &str) -> Result<(), ApiError> {
        let url = format!("{}/intervention", self.base_url);
        debug!("POST {} (user_id={})", url, user_id);
        let body = InterventionRequest {
            user_id,
            message,
            admin: true,
        };
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        check_status(response).await?;
        Ok(())
    }

    /// `GET /statistics?period=...` — one aggregate snapshot.
    pub async fn statistics(&self, period: StatsPeriod) -> Result<StatsSnapshot, ApiError> {
        self.get_json(&format!("/statistics?period={}", period.as_str()))
            .await
    }

    /// `GET /training-data` — all stored training records.
    pub async fn training_data(&self) -> Result<Vec<TrainingRecord>, ApiError> {
        self.get_json("/training-data").await
    }

    /// `POST /training-data` — store a new record.
    pub async fn create_training_data(&self, record: &NewTrainingRecord) -> Result<(), ApiError> {
        let url = format!("{}/training-data", self.base_url);
        debug!("POST {} (intent={})", url, record.intent);
        let response = self
            .client
            .post(&url)
            .json(record)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        check_status(response).await?;
        Ok(())
    }

    /// `DELETE /training-data/{id}`.
    pub async fn delete_training_data(&self, id: &str) -> Result<(), ApiError> {
        let url = format!("{}/training-data/{}", self.base_url, id);
        debug!("DELETE {}", url);
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        check_status(response).await?;
        Ok(())
    }

    /// `POST /train-model` — kicks off retraining. The response only
    /// acknowledges receipt; training runs server-side.
    pub async fn train_model(&self) -> Result<(), ApiError> {
        let url = format!("{}/train-model", self.base_url);
        debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        check_status(response).await?;
        Ok(())
    }
}

/// Client for the bot's REST webhook.
pub struct BotClient {
    base_url: String,
    client: reqwest::Client,
}

impl BotClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// `POST /webhooks/rest/webhook` — send a user utterance, receive the
    /// bot's replies. An empty array is a valid response (the caller renders
    /// a fallback message for it).
    pub async fn send_message(&self, sender: &str, message: &str) -> Result<Vec<BotReply>, ApiError> {
        let url = format!("{}/webhooks/rest/webhook", self.base_url);
        debug!("POST {} (sender={})", url, sender);
        let body = WebhookRequest { sender, message };
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let response = check_status(response).await?;
        response
            .json::<Vec<BotReply>>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}
