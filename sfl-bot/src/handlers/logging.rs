use async_trait::async_trait;
use sfl_core::{Handler, HandlerResponse, Message, Result};
use tracing::{debug, info, instrument};

/// Logs each message in before() and the response in after(); always continues.
pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            user_id = message.user.id,
            username = %message.user.username.as_deref().unwrap_or("unknown"),
            chat_type = %message.chat.chat_type,
            is_command = message.is_command(),
            message_content = %message.content,
            "Received message"
        );
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        let replied = matches!(response, HandlerResponse::Reply(_));
        debug!(
            message_id = %message.id,
            replied,
            response = ?response,
            "Processed message"
        );
        Ok(())
    }
}
