use thiserror::Error;

/// Errors a [`crate::Handler`] or [`crate::Bot`] can return. User-facing failures are replies, not errors;
/// an error here ends the chain and the runner answers with a generic internal-error text.
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Bot error: {0}")]
    Bot(String),
}

pub type Result<T> = std::result::Result<T, BotError>;
