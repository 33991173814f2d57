use serde::{Deserialize, Serialize};

/// One entry in the live-conversation list returned by `GET /live-conversations`.
///
/// The backend may omit numeric fields; absent values deserialize as zero /
/// empty so the client never has to special-case partial documents.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ConversationSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub message_count: u64,
    #[serde(default)]
    pub last_message: String,
    #[serde(default)]
    pub last_timestamp: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Messages without a sender tag are treated as user messages.
    #[default]
    User,
    Bot,
}

/// A single message within one conversation (`GET /conversation/{id}`).
///
/// The backend is inconsistent about the body field name: user messages carry
/// `message`, bot messages carry `text`. [`Message::body`] papers over this.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    #[serde(default)]
    pub sender: Sender,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub timestamp: String,
}

impl Message {
    /// The displayable body: `message` if present, else `text`, else empty.
    pub fn body(&self) -> &str {
        self.message
            .as_deref()
            .or(self.text.as_deref())
            .unwrap_or("")
    }
}

/// A stored training example (`GET /training-data`).
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct TrainingRecord {
    /// Server-assigned identity. Older backend versions used `id` instead of `_id`.
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub intent: String,
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub created_at: String,
}

/// Request body for `POST /training-data`. The id is assigned server-side.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewTrainingRecord {
    pub intent: String,
    pub questions: Vec<String>,
    pub answer: String,
    pub created_at: String,
}

/// Request body for `POST /intervention`. `admin: true` tells the backend to
/// suppress the bot's autonomous replies for this user.
#[derive(Serialize, Debug)]
pub struct InterventionRequest<'a> {
    pub user_id: &'a str,
    pub message: &'a str,
    pub admin: bool,
}

/// Request body for the bot webhook (`POST /webhooks/rest/webhook`).
#[derive(Serialize, Debug)]
pub struct WebhookRequest<'a> {
    pub sender: &'a str,
    pub message: &'a str,
}

/// One utterance in the webhook's reply array. Either field may be absent.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BotReply {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Aggregation window for `GET /statistics?period=...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatsPeriod {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Total,
}

impl StatsPeriod {
    pub const ALL: [StatsPeriod; 5] = [
        StatsPeriod::Daily,
        StatsPeriod::Weekly,
        StatsPeriod::Monthly,
        StatsPeriod::Yearly,
        StatsPeriod::Total,
    ];

    /// The query-parameter value the backend expects.
    pub fn as_str(self) -> &'static str {
        match self {
            StatsPeriod::Daily => "daily",
            StatsPeriod::Weekly => "weekly",
            StatsPeriod::Monthly => "monthly",
            StatsPeriod::Yearly => "yearly",
            StatsPeriod::Total => "total",
        }
    }

    /// Turkish display label for the dashboard card.
    pub fn label(self) -> &'static str {
        match self {
            StatsPeriod::Daily => "Bugün",
            StatsPeriod::Weekly => "Bu Hafta",
            StatsPeriod::Monthly => "Bu Ay",
            StatsPeriod::Yearly => "Bu Yıl",
            StatsPeriod::Total => "Toplam",
        }
    }
}

/// One statistics snapshot. Wire field names follow the backend; the cost
/// field is the backend's GPT-4 cost estimate in dollars.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct StatsSnapshot {
    #[serde(default)]
    pub conversation_count: u64,
    #[serde(default)]
    pub unique_users: u64,
    #[serde(rename = "gpt4_usage_count", default)]
    pub usage_count: u64,
    #[serde(rename = "estimated_gpt4_cost", default)]
    pub estimated_cost: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_summary_deserializes_wire_names() {
        let json = r#"{"_id":"u1","message_count":3,"last_message":"hi","last_timestamp":"2024-01-01T00:00:00Z"}"#;
        let conv: ConversationSummary = serde_json::from_str(json).unwrap();
        assert_eq!(conv.id, "u1");
        assert_eq!(conv.message_count, 3);
        assert_eq!(conv.last_message, "hi");
    }

    #[test]
    fn test_conversation_summary_missing_count_is_zero() {
        let json = r#"{"_id":"u2"}"#;
        let conv: ConversationSummary = serde_json::from_str(json).unwrap();
        assert_eq!(conv.message_count, 0);
        assert!(conv.last_message.is_empty());
    }

    #[test]
    fn test_message_body_prefers_message_field() {
        let json = r#"{"sender":"bot","message":"a","text":"b","timestamp":""}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.body(), "a");
        assert_eq!(msg.sender, Sender::Bot);
    }

    #[test]
    fn test_message_body_falls_back_to_text() {
        let json = r#"{"text":"from the bot"}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.body(), "from the bot");
        // Missing sender tag defaults to user, matching the original panel.
        assert_eq!(msg.sender, Sender::User);
    }

    #[test]
    fn test_training_record_accepts_both_id_fields() {
        let with_underscore: TrainingRecord =
            serde_json::from_str(r#"{"_id":"a","intent":"selam","questions":[],"answer":""}"#)
                .unwrap();
        let plain: TrainingRecord =
            serde_json::from_str(r#"{"id":"b","intent":"selam","questions":[],"answer":""}"#)
                .unwrap();
        assert_eq!(with_underscore.id, "a");
        assert_eq!(plain.id, "b");
    }

    /// Contract test: the intervention body must serialize exactly as the
    /// backend expects, including the literal `admin` flag.
    #[test]
    fn test_intervention_request_serialization() {
        let req = InterventionRequest {
            user_id: "u1",
            message: "merhaba",
            admin: true,
        };
        let serialized = serde_json::to_string(&req).unwrap();
        assert_eq!(
            serialized,
            r#"{"user_id":"u1","message":"merhaba","admin":true}"#
        );
    }

    #[test]
    fn test_webhook_request_serialization() {
        let req = WebhookRequest {
            sender: "user_abc123def",
            message: "selam",
        };
        let serialized = serde_json::to_string(&req).unwrap();
        assert_eq!(
            serialized,
            r#"{"sender":"user_abc123def","message":"selam"}"#
        );
    }

    #[test]
    fn test_bot_reply_fields_optional() {
        let replies: Vec<BotReply> =
            serde_json::from_str(r#"[{"text":"Merhaba"},{"image":"http://x/a.png"},{}]"#).unwrap();
        assert_eq!(replies[0].text.as_deref(), Some("Merhaba"));
        assert!(replies[0].image.is_none());
        assert_eq!(replies[1].image.as_deref(), Some("http://x/a.png"));
        assert!(replies[2].text.is_none() && replies[2].image.is_none());
    }

    #[test]
    fn test_stats_snapshot_renamed_and_defaulted_fields() {
        let json = r#"{"conversation_count":10,"unique_users":4,"gpt4_usage_count":2,"estimated_gpt4_cost":1.25}"#;
        let stats: StatsSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(stats.usage_count, 2);
        assert!((stats.estimated_cost - 1.25).abs() < f64::EPSILON);

        let sparse: StatsSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(sparse.conversation_count, 0);
        assert_eq!(sparse.estimated_cost, 0.0);
    }

    #[test]
    fn test_stats_period_query_values() {
        let values: Vec<&str> = StatsPeriod::ALL.iter().map(|p| p.as_str()).collect();
        assert_eq!(values, ["daily", "weekly", "monthly", "yearly", "total"]);
    }
}
