//! # View Models
//!
//! Pure `(state) -> view model` builders, decoupled from ratatui so the
//! rendered content is unit-testable without a terminal. The TUI components
//! only turn these into widgets.

use chrono::{DateTime, Utc};

use crate::api::{ConversationSummary, Message, Sender, StatsPeriod, StatsSnapshot};
use crate::core::chat::{ChatEntry, ChatState};
use crate::core::stats::StatsState;
use crate::core::timeago::time_ago_from_str;

/// Preview length for the last message in a conversation row.
const PREVIEW_CHARS: usize = 50;

/// One row of the live-conversation list.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationRow {
    pub id: String,
    pub time_ago: String,
    pub count_label: String,
    pub preview: String,
    pub selected: bool,
}

/// Builds the full row list; the row matching `selected_id` is flagged.
/// Always a wholesale rebuild — no diffing against a previous render.
pub fn conversation_rows(
    conversations: &[ConversationSummary],
    selected_id: Option<&str>,
    now: DateTime<Utc>,
) -> Vec<ConversationRow> {
    conversations
        .iter()
        .map(|conv| ConversationRow {
            id: conv.id.clone(),
            time_ago: time_ago_from_str(&conv.last_timestamp, now),
            count_label: format!("{} mesaj", conv.message_count),
            preview: preview(&conv.last_message),
            selected: selected_id == Some(conv.id.as_str()),
        })
        .collect()
}

/// First 50 characters of the message plus "...". The original panel appends
/// the ellipsis unconditionally, so short messages get it too.
fn preview(message: &str) -> String {
    let head: String = message.chars().take(PREVIEW_CHARS).collect();
    format!("{}...", head)
}

/// One rendered message bubble of a monitored conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageBubble {
    pub role_label: &'static str,
    pub time: String,
    pub body: String,
    pub confidence_label: Option<String>,
}

/// Builds bubbles for a full message history. Pure and idempotent.
pub fn message_bubbles(messages: &[Message]) -> Vec<MessageBubble> {
    messages
        .iter()
        .map(|msg| MessageBubble {
            role_label: match msg.sender {
                Sender::User => "👤 Kullanıcı",
                Sender::Bot => "🤖 Bot",
            },
            time: clock_time(&msg.timestamp),
            body: msg.body().to_string(),
            confidence_label: msg
                .confidence
                .map(|c| format!("Güven: {:.1}%", c * 100.0)),
        })
        .collect()
}

/// Formats an ISO-8601 timestamp as HH:MM:SS in the timestamp's own offset.
/// Unparseable input renders as an empty time, not an error.
fn clock_time(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_default()
}

/// Builds bubbles for the local chat transcript. The typing placeholder
/// renders as a bot bubble with a fixed body; images render as their URL.
pub fn chat_bubbles(chat: &ChatState) -> Vec<MessageBubble> {
    chat.transcript
        .iter()
        .map(|entry| match entry {
            ChatEntry::User(text) => bubble("👤 Siz", text.clone()),
            ChatEntry::BotText(text) => bubble("🤖 Bot", text.clone()),
            ChatEntry::BotImage(url) => bubble("🤖 Bot", format!("🖼 {}", url)),
            ChatEntry::Typing => bubble("🤖 Bot", "Yazıyor...".to_string()),
        })
        .collect()
}

fn bubble(role_label: &'static str, body: String) -> MessageBubble {
    MessageBubble {
        role_label,
        time: String::new(),
        body,
        confidence_label: None,
    }
}

/// One dashboard card: counts plus the estimated cost, pre-formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub title: &'static str,
    pub conversations: String,
    pub users: String,
    pub usage: String,
    pub cost: String,
}

fn stat_card(period: StatsPeriod, snapshot: StatsSnapshot) -> StatCard {
    StatCard {
        title: period.label(),
        conversations: snapshot.conversation_count.to_string(),
        users: snapshot.unique_users.to_string(),
        usage: snapshot.usage_count.to_string(),
        cost: format!("${:.2}", snapshot.estimated_cost),
    }
}

/// One card per period, in the dashboard's fixed order. Periods that have
/// not been fetched yet render as zeros.
pub fn stat_cards(stats: &StatsState) -> Vec<StatCard> {
    StatsPeriod::ALL
        .iter()
        .map(|&period| stat_card(period, stats.snapshot(period)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn summary(id: &str, count: u64, last: &str, ago_secs: i64) -> ConversationSummary {
        ConversationSummary {
            id: id.to_string(),
            message_count: count,
            last_message: last.to_string(),
            last_timestamp: (now() - TimeDelta::seconds(ago_secs)).to_rfc3339(),
        }
    }

    /// End-to-end scenario from the panel's contract: a 90-second-old
    /// conversation with a long last message.
    #[test]
    fn test_conversation_row_end_to_end() {
        let conversations = vec![summary(
            "u1",
            3,
            "hello world this message is longer than fifty characters for truncation test",
            90,
        )];
        let rows = conversation_rows(&conversations, None, now());

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "u1");
        assert_eq!(rows[0].time_ago, "1 dakika önce");
        assert_eq!(rows[0].count_label, "3 mesaj");
        assert!(rows[0].preview.ends_with("..."));
        assert_eq!(rows[0].preview.chars().count(), 53);
        assert!(rows[0].preview.starts_with("hello world"));
    }

    #[test]
    fn test_selected_row_is_flagged() {
        let conversations = vec![summary("u1", 1, "a", 0), summary("u2", 1, "b", 0)];
        let rows = conversation_rows(&conversations, Some("u2"), now());
        assert!(!rows[0].selected);
        assert!(rows[1].selected);
    }

    #[test]
    fn test_preview_counts_chars_not_bytes() {
        // Turkish text: multi-byte chars must not split.
        let long = "ğ".repeat(60);
        let p = preview(&long);
        assert_eq!(p.chars().count(), 53);
        assert!(p.ends_with("..."));
    }

    fn bot_message(body: &str, confidence: Option<f64>) -> Message {
        serde_json::from_str(&format!(
            r#"{{"sender":"bot","text":"{body}","timestamp":"2024-06-01T09:05:07+03:00"{}}}"#,
            confidence.map_or(String::new(), |c| format!(r#","confidence":{c}"#))
        ))
        .unwrap()
    }

    #[test]
    fn test_message_bubbles_are_idempotent() {
        let messages = vec![bot_message("Merhaba", Some(0.92))];
        let first = message_bubbles(&messages);
        let second = message_bubbles(&messages);
        assert_eq!(first, second);
    }

    #[test]
    fn test_bubble_fields() {
        let bubbles = message_bubbles(&[bot_message("Merhaba", Some(0.875))]);
        assert_eq!(bubbles[0].role_label, "🤖 Bot");
        assert_eq!(bubbles[0].time, "09:05:07");
        assert_eq!(bubbles[0].body, "Merhaba");
        assert_eq!(bubbles[0].confidence_label.as_deref(), Some("Güven: 87.5%"));
    }

    #[test]
    fn test_bubble_without_confidence_has_no_label() {
        let bubbles = message_bubbles(&[bot_message("Merhaba", None)]);
        assert!(bubbles[0].confidence_label.is_none());
    }

    #[test]
    fn test_bubble_with_bad_timestamp_renders_empty_time() {
        let msg: Message = serde_json::from_str(r#"{"message":"hi","timestamp":"oops"}"#).unwrap();
        let bubbles = message_bubbles(&[msg]);
        assert_eq!(bubbles[0].role_label, "👤 Kullanıcı");
        assert!(bubbles[0].time.is_empty());
    }

    #[test]
    fn test_chat_bubbles_cover_all_entry_kinds() {
        let mut chat = crate::core::chat::ChatState::new();
        chat.begin_exchange("selam".to_string());
        let bubbles = chat_bubbles(&chat);
        assert_eq!(bubbles[0].role_label, "👤 Siz");
        assert_eq!(bubbles[0].body, "selam");
        // The in-flight placeholder renders as a bot bubble.
        assert_eq!(bubbles[1].role_label, "🤖 Bot");
        assert_eq!(bubbles[1].body, "Yazıyor...");

        chat.apply_replies(vec![crate::api::BotReply {
            text: None,
            image: Some("http://x/a.png".to_string()),
        }]);
        let bubbles = chat_bubbles(&chat);
        assert_eq!(bubbles[1].body, "🖼 http://x/a.png");
    }

    #[test]
    fn test_stat_cards_cover_all_periods_in_order() {
        let stats = StatsState::new();
        let cards = stat_cards(&stats);
        let titles: Vec<&str> = cards.iter().map(|c| c.title).collect();
        assert_eq!(titles, ["Bugün", "Bu Hafta", "Bu Ay", "Bu Yıl", "Toplam"]);
        // Unfetched periods show zeros and a $0.00 cost.
        assert_eq!(cards[0].conversations, "0");
        assert_eq!(cards[0].cost, "$0.00");
    }

    #[test]
    fn test_stat_card_cost_has_two_decimals() {
        let mut stats = StatsState::new();
        stats.apply(
            1,
            vec![(
                StatsPeriod::Daily,
                StatsSnapshot {
                    conversation_count: 12,
                    unique_users: 7,
                    usage_count: 3,
                    estimated_cost: 1.5,
                },
            )],
        );
        let cards = stat_cards(&stats);
        assert_eq!(cards[0].cost, "$1.50");
        assert_eq!(cards[0].users, "7");
    }
}
