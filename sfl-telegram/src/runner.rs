//! REPL runner: converts teloxide messages to core::Message, runs the HandlerChain per message in a spawned
//! task, and sends any Reply back through the core Bot.

use anyhow::Result;
use handler_chain::HandlerChain;
use sfl_core::{Bot as CoreBot, HandlerResponse, Message, ToCoreMessage};
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::BotCommand;
use tracing::{debug, error, info, instrument, warn};

use super::adapters::TelegramMessageWrapper;

/// Sent when the chain itself fails (a handler returned Err).
pub const INTERNAL_ERROR_REPLY: &str = "⚠️ Internal error. Please try again.";

/// Registers the "/" menu with Telegram. Failure is logged only; the bot works without a menu.
pub async fn register_commands(bot: &teloxide::Bot, commands: &[(&str, &str)]) {
    let commands: Vec<BotCommand> = commands
        .iter()
        .map(|(cmd, desc)| BotCommand::new(*cmd, *desc))
        .collect();
    match bot.set_my_commands(commands).await {
        Ok(_) => info!("Registered bot commands with Telegram"),
        Err(e) => warn!(error = %e, "Failed to register bot commands"),
    }
}

/// Runs one message through the chain and delivers the outcome. Returns the reply text that was sent, if any.
///
/// Send failures are logged and swallowed.
#[instrument(skip(chain, replier, message), fields(user_id = message.user.id, chat_id = message.chat.id))]
pub async fn process_message(
    chain: &HandlerChain,
    replier: &dyn CoreBot,
    message: &Message,
) -> Option<String> {
    let reply = match chain.handle(message).await {
        Ok(HandlerResponse::Reply(text)) => text,
        Ok(response) => {
            debug!(response = ?response, "step: chain finished without reply");
            return None;
        }
        Err(e) => {
            error!(error = %e, "Handler chain failed");
            INTERNAL_ERROR_REPLY.to_string()
        }
    };

    if let Err(e) = replier.reply_to(message, &reply).await {
        error!(error = %e, "Error sending message");
    }
    Some(reply)
}

/// Starts long polling with the given teloxide Bot. Calls get_me() first to log the bot identity;
/// each text message is converted to core::Message and processed in its own task.
/// Returns when the REPL stops (Ctrl-C).
#[instrument(skip(bot, handler_chain, replier))]
pub async fn run_repl(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    replier: Arc<dyn CoreBot>,
) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => info!(
            username = %me.user.username.as_deref().unwrap_or("-"),
            "Bot identity confirmed"
        ),
        Err(e) => warn!(error = %e, "get_me failed; continuing"),
    }

    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let chain = handler_chain.clone();
        let replier = replier.clone();

        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();

            if msg.text().is_none() {
                debug!(
                    user_id = core_msg.user.id,
                    chat_id = core_msg.chat.id,
                    "Received non-text message"
                );
                return respond(());
            }

            info!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                message_content = %core_msg.content,
                "Received message"
            );

            tokio::spawn(async move {
                process_message(&chain, replier.as_ref(), &core_msg).await;
            });

            respond(())
        }
    })
    .await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sfl_core::{BotError, Chat, Handler, ReplyFormat, User};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingBot {
        sent: Mutex<Vec<(i64, String, ReplyFormat)>>,
        fail: bool,
    }

    #[async_trait]
    impl CoreBot for RecordingBot {
        async fn send_message(
            &self,
            chat: &Chat,
            text: &str,
            format: ReplyFormat,
        ) -> sfl_core::Result<()> {
            if self.fail {
                return Err(BotError::Bot("network down".to_string()));
            }
            self.sent
                .lock()
                .unwrap()
                .push((chat.id, text.to_string(), format));
            Ok(())
        }
    }

    struct FixedHandler(sfl_core::Result<HandlerResponse>);

    #[async_trait]
    impl Handler for FixedHandler {
        async fn handle(&self, _message: &Message) -> sfl_core::Result<HandlerResponse> {
            match &self.0 {
                Ok(r) => Ok(r.clone()),
                Err(e) => Err(BotError::Bot(e.to_string())),
            }
        }
    }

    fn message(content: &str) -> Message {
        Message {
            id: "42".to_string(),
            user: User {
                id: 1,
                username: None,
                first_name: Some("Bumpkin".to_string()),
                last_name: None,
            },
            chat: Chat {
                id: 99,
                chat_type: "private".to_string(),
            },
            content: content.to_string(),
            created_at: chrono::Utc::now(),
        }
    }

    fn chain_with(response: sfl_core::Result<HandlerResponse>) -> HandlerChain {
        HandlerChain::new().add_handler(Arc::new(FixedHandler(response)))
    }

    #[tokio::test]
    async fn test_reply_is_sent_as_markdown() {
        let bot = RecordingBot::default();
        let chain = chain_with(Ok(HandlerResponse::Reply("*pong*".to_string())));

        let sent = process_message(&chain, &bot, &message("/ping")).await;

        assert_eq!(sent.as_deref(), Some("*pong*"));
        assert_eq!(
            *bot.sent.lock().unwrap(),
            vec![(99, "*pong*".to_string(), ReplyFormat::Markdown)]
        );
    }

    #[tokio::test]
    async fn test_no_reply_sends_nothing() {
        let bot = RecordingBot::default();
        let chain = chain_with(Ok(HandlerResponse::Stop));

        assert!(process_message(&chain, &bot, &message("hello")).await.is_none());
        assert!(bot.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_chain_error_sends_internal_error() {
        let bot = RecordingBot::default();
        let chain = chain_with(Err(BotError::Bot("boom".to_string())));

        let sent = process_message(&chain, &bot, &message("/wood")).await;

        assert_eq!(sent.as_deref(), Some(INTERNAL_ERROR_REPLY));
        assert_eq!(bot.sent.lock().unwrap()[0].1, INTERNAL_ERROR_REPLY);
    }

    #[tokio::test]
    async fn test_send_failure_is_swallowed() {
        let bot = RecordingBot {
            fail: true,
            ..RecordingBot::default()
        };
        let chain = chain_with(Ok(HandlerResponse::Reply("hi".to_string())));

        assert_eq!(
            process_message(&chain, &bot, &message("/start")).await.as_deref(),
            Some("hi")
        );
    }
}
