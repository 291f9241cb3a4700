//! # Handler chain
//!
//! Runs a sequence of handlers for each message: every `before` in order (any `false` stops the chain),
//! then `handle` until one returns Stop or Reply, then every `after` in reverse order with the final response.

use sfl_core::{Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Ordered list of handlers shared between message tasks.
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Appends a handler (first Stop/Reply ends the handle phase).
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs the three phases. Returns the first Stop or Reply, or Continue if no handler ended the chain.
    #[instrument(skip(self, message), fields(message_id = %message.id))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        debug!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            handlers = self.handlers.len(),
            "step: handler_chain started"
        );

        for handler in &self.handlers {
            if !handler.before(message).await? {
                info!(
                    user_id = message.user.id,
                    handler = %handler_name(handler),
                    "step: before returned false, chain stopped"
                );
                return Ok(HandlerResponse::Stop);
            }
        }

        let mut final_response = HandlerResponse::Continue;
        for handler in &self.handlers {
            let response = handler.handle(message).await?;
            debug!(
                handler = %handler_name(handler),
                response = ?response,
                "step: handler done"
            );
            if response.is_terminal() {
                final_response = response;
                break;
            }
        }

        for handler in self.handlers.iter().rev() {
            handler.after(message, &final_response).await?;
        }

        debug!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            "step: handler_chain finished"
        );

        Ok(final_response)
    }
}

fn handler_name(handler: &Arc<dyn Handler>) -> &'static str {
    std::any::type_name_of_val(handler.as_ref())
}

// Integration tests live in tests/handler_chain_test.rs
