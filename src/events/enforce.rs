//! Blacklist enforcement handler.
//!
//! The per-message decision pipeline: muted senders lose their message
//! outright, everyone else gets their text checked against the blacklist.

use teloxide::prelude::*;
use tracing::{info, warn};

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::error::ModerationError;

/// Run the moderation pipeline for one incoming message.
///
/// Only `StoreUnavailable` escapes this function; duplicate bans and
/// failed deletions are absorbed and logged here.
pub async fn enforce_message(
    bot: &ThrottledBot,
    msg: &Message,
    state: &AppState,
) -> Result<(), ModerationError> {
    // Only process in groups
    if !msg.chat.is_group() && !msg.chat.is_supergroup() {
        return Ok(());
    }

    let user = match msg.from.as_ref() {
        Some(u) => u,
        None => return Ok(()),
    };

    let chat_id = msg.chat.id;
    let user_id = user.id;

    // An actively muted user does not get to post anything, whatever the
    // content of this particular message.
    if state.bans.is_actively_banned(chat_id.0, user_id.0).await? {
        info!(
            "User {} is muted in chat {}, removing message {}",
            user_id, chat_id, msg.id.0
        );
        if let Err(err) = delete_message(bot, msg).await {
            warn!("{}", err);
        }
        return Ok(());
    }

    let text = match msg.text() {
        Some(t) => t,
        None => return Ok(()),
    };

    if !state.blacklist.matches(text) {
        return Ok(());
    }

    info!(
        "Message {} in chat {} hit the blacklist, muting user {}",
        msg.id.0, chat_id, user_id
    );

    match state.bans.ban(chat_id.0, user_id.0).await {
        Ok(()) => {}
        Err(ModerationError::AlreadyBanned { .. }) => {
            // Lost a race against another message from the same user; the
            // mute is in place either way.
            warn!("User {} was already muted in chat {}", user_id, chat_id);
        }
        Err(err) => return Err(err),
    }

    if let Err(err) = delete_message(bot, msg).await {
        warn!("{}", err);
    }

    Ok(())
}

/// Ask the platform to delete a message. Failures are reported to the
/// caller for logging, never retried.
async fn delete_message(bot: &ThrottledBot, msg: &Message) -> Result<(), ModerationError> {
    bot.delete_message(msg.chat.id, msg.id)
        .await
        .map_err(|source| ModerationError::DeletionFailed {
            chat_id: msg.chat.id.0,
            message_id: msg.id.0,
            source,
        })?;

    Ok(())
}
