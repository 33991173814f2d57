//! Chat exchange state for the embedded chat client.
//!
//! Mirrors the web widget's behavior: the user's message is rendered
//! immediately, a typing placeholder stands in for the bot until the webhook
//! answers, and the placeholder is removed on success and failure alike.

use crate::api::BotReply;

/// Rendered when the webhook returns an empty reply array.
pub const FALLBACK_REPLY: &str = "Üzgünüm, bir yanıt alamadım.";
/// Rendered when the webhook call fails (network error or non-OK status).
pub const CONNECTION_ERROR_REPLY: &str = "Bağlantı hatası. Lütfen daha sonra tekrar deneyin.";

/// One entry in the chat transcript.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEntry {
    User(String),
    BotText(String),
    /// The bot sent an image URL; the TUI renders it as a link line.
    BotImage(String),
    /// Transient placeholder while a webhook call is in flight.
    Typing,
}

/// Transcript plus the idle / awaiting-response flag.
#[derive(Debug, Default)]
pub struct ChatState {
    pub transcript: Vec<ChatEntry>,
    pub awaiting_response: bool,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outgoing message and shows the typing placeholder.
    /// The caller has already validated that `text` is non-empty.
    pub fn begin_exchange(&mut self, text: String) {
        self.transcript.push(ChatEntry::User(text));
        self.transcript.push(ChatEntry::Typing);
        self.awaiting_response = true;
    }

    /// Applies the webhook's replies: placeholder out, one entry per text
    /// and/or image, fallback message when the array is empty.
    pub fn apply_replies(&mut self, replies: Vec<BotReply>) {
        self.remove_typing();
        let mut rendered_any = false;
        for reply in replies {
            if let Some(text) = reply.text {
                self.transcript.push(ChatEntry::BotText(text));
                rendered_any = true;
            }
            if let Some(image) = reply.image {
                self.transcript.push(ChatEntry::BotImage(image));
                rendered_any = true;
            }
        }
        if !rendered_any {
            self.transcript
                .push(ChatEntry::BotText(FALLBACK_REPLY.to_string()));
        }
        self.awaiting_response = false;
    }

    /// Applies a failed exchange: placeholder out, fixed error message in.
    pub fn apply_failure(&mut self) {
        self.remove_typing();
        self.transcript
            .push(ChatEntry::BotText(CONNECTION_ERROR_REPLY.to_string()));
        self.awaiting_response = false;
    }

    fn remove_typing(&mut self) {
        self.transcript.retain(|e| *e != ChatEntry::Typing);
    }
}
