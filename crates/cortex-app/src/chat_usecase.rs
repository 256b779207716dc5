//! AI chat use case.
//!
//! Append-only conversation history. A failed assistant turn degrades to a
//! canned apology in the history rather than an error notification, so the
//! conversation never silently swallows a user message.

use cortex_core::chat::{ChatMessage, ChatRole};
use cortex_core::error::Result;
use cortex_gateway::ProductivityApi;
use std::sync::Arc;
use tokio::sync::RwLock;

const FALLBACK_REPLY: &str = "죄송합니다. 현재 AI 서비스에 문제가 있습니다.";

/// Use case for the AI chat panel.
pub struct ChatUseCase {
    api: Arc<dyn ProductivityApi>,
    history: Arc<RwLock<Vec<ChatMessage>>>,
}

impl ChatUseCase {
    pub fn new(api: Arc<dyn ProductivityApi>, history: Arc<RwLock<Vec<ChatMessage>>>) -> Self {
        Self { api, history }
    }

    /// Sends a user message and appends the assistant's reply.
    ///
    /// Blank input is dropped. The user message is appended before the
    /// request goes out; when the request fails, the apology takes the
    /// assistant slot and the call still returns `Ok`.
    pub async fn send(&self, message: &str) -> Result<()> {
        let message = message.trim();
        if message.is_empty() {
            return Ok(());
        }

        self.history
            .write()
            .await
            .push(ChatMessage::now(ChatRole::User, message));

        let reply = match self.api.ai_chat(message).await {
            Ok(reply) => reply.response,
            Err(err) => {
                tracing::debug!(target: "chat", error = %err, "assistant turn failed");
                FALLBACK_REPLY.to_string()
            }
        };

        self.history
            .write()
            .await
            .push(ChatMessage::now(ChatRole::Assistant, reply));
        Ok(())
    }

    /// Snapshot of the conversation, oldest first.
    pub async fn history(&self) -> Vec<ChatMessage> {
        self.history.read().await.clone()
    }
}
