//! Moderation error taxonomy.
//!
//! Fatal errors (configuration, store connectivity) stop the process;
//! per-message errors (duplicate ban, failed deletion) are logged and the
//! pipeline moves on.

use thiserror::Error;

/// Errors produced by the moderation pipeline.
#[derive(Debug, Error)]
pub enum ModerationError {
    /// The blocklist cannot be turned into a usable matcher.
    #[error("invalid moderation configuration: {0}")]
    Configuration(String),

    /// The chat store failed to answer a read or write.
    ///
    /// Without consistent membership state no safe moderation decision can
    /// be made, so callers must treat this as fatal.
    #[error("chat store unavailable: {0}")]
    StoreUnavailable(String),

    /// A ban record already exists for this user in this chat.
    ///
    /// Raised when two messages race each other to create the ban; the
    /// mute is in place either way.
    #[error("user {user_id} is already banned in chat {chat_id}")]
    AlreadyBanned { chat_id: i64, user_id: u64 },

    /// The platform refused to delete a message.
    ///
    /// The user stays banned; the specific message just could not be
    /// removed. Never retried.
    #[error("could not delete message {message_id} in chat {chat_id}: {source}")]
    DeletionFailed {
        chat_id: i64,
        message_id: i32,
        #[source]
        source: teloxide::RequestError,
    },
}

impl ModerationError {
    /// Whether the process should stop rather than keep handling messages.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::StoreUnavailable(_))
    }
}

impl From<mongodb::error::Error> for ModerationError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::StoreUnavailable(err.to_string())
    }
}
