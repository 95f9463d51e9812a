use serde::{Deserialize, Serialize};

use super::conversation::{ChatMessage, ConversationTurn};
use super::message_role::MessageRole;

/// Generation knobs forwarded verbatim to the model gateway.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            max_tokens: 512,
            temperature: 0.7,
            top_p: 0.95,
        }
    }
}

/// Fully assembled request, consumed once by the model gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedRequest {
    pub system_message: String,
    pub user_message: String,
    pub sampling: SamplingParams,
    pub history: Vec<ConversationTurn>,
}

impl ComposedRequest {
    /// Ordered message list: system, prior turns (blank sides skipped),
    /// then the new user message.
    pub fn messages(&self) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(2 + self.history.len() * 2);
        messages.push(ChatMessage::new(
            MessageRole::System,
            self.system_message.clone(),
        ));

        for turn in &self.history {
            if !turn.user_text.is_empty() {
                messages.push(ChatMessage::new(MessageRole::User, turn.user_text.clone()));
            }
            if !turn.assistant_text.is_empty() {
                messages.push(ChatMessage::new(
                    MessageRole::Assistant,
                    turn.assistant_text.clone(),
                ));
            }
        }

        messages.push(ChatMessage::new(
            MessageRole::User,
            self.user_message.clone(),
        ));
        messages
    }
}
