//! Event handler system.
//!
//! Add new event handlers by:
//! 1. Creating a new file in this directory
//! 2. Adding `pub mod your_event;` below
//! 3. Adding the handler to `message_event_handler()`

pub mod enforce;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use tracing::{debug, error};

use crate::bot::dispatcher::{AppState, ThrottledBot};

/// Build the message event handler.
pub fn message_event_handler() -> UpdateHandler<anyhow::Error> {
    dptree::filter(|msg: Message| {
        // Moderation only applies to group chats
        msg.chat.is_group() || msg.chat.is_supergroup()
    })
    .endpoint(unified_message_handler)
}

/// Unified message handler that runs the moderation pipeline.
async fn unified_message_handler(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
) -> anyhow::Result<()> {
    debug!("New message {} in chat {}", msg.id.0, msg.chat.id);

    if let Err(err) = enforce::enforce_message(&bot, &msg, &state).await {
        if err.is_fatal() {
            // Moderating without a consistent membership store would mean
            // silently letting messages through; stop instead.
            error!("Cannot moderate without the chat store, stopping: {}", err);
            std::process::exit(1);
        }
        error!(
            "Moderation error for message {} in chat {}: {}",
            msg.id.0, msg.chat.id, err
        );
    }

    Ok(())
}
