//! Bot abstraction for sending replies.
//!
//! [`Bot`] is transport-agnostic; sfl-telegram implements it via teloxide, tests substitute recorders.

use crate::error::Result;
use crate::types::{Chat, Message};
use async_trait::async_trait;

/// How the transport should render a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplyFormat {
    /// Telegram legacy Markdown (`*bold*`, `` `code` ``).
    #[default]
    Markdown,
    Plain,
}

/// Abstraction for sending messages. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str, format: ReplyFormat) -> Result<()>;

    /// Replies in the chat the message came from, as Markdown.
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text, ReplyFormat::Markdown)
            .await
    }
}
