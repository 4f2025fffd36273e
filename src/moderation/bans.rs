//! Ban lifecycle service.
//!
//! Per (chat, user) pair a ban is Clean, Active, or Expired. Expiry is
//! computed lazily at read time; there is no background sweep, so a stale
//! record lingers in storage until the user's next message touches it.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::database::{BanState, ChatRepository};
use crate::error::ModerationError;

/// Decides and mutates ban membership for incoming messages.
///
/// Holds no chat state of its own: every decision re-reads the
/// authoritative record through the repository.
#[derive(Clone)]
pub struct BanService {
    chats: Arc<ChatRepository>,
}

impl BanService {
    pub fn new(chats: Arc<ChatRepository>) -> Self {
        Self { chats }
    }

    /// Whether the user is under an active mute in this chat.
    ///
    /// A record past the mute duration is removed on the spot and counts
    /// as not banned.
    pub async fn is_actively_banned(
        &self,
        chat_id: i64,
        user_id: u64,
    ) -> Result<bool, ModerationError> {
        let mut chat = self.chats.get_or_create(chat_id).await?;

        match chat.ban_state(user_id, Utc::now()) {
            BanState::Clean => Ok(false),
            BanState::Active => Ok(true),
            BanState::Expired => {
                info!(
                    "Mute for user {} in chat {} has lapsed, lifting it",
                    user_id, chat_id
                );
                chat.remove_ban(user_id);
                self.chats.save(&chat).await?;
                Ok(false)
            }
        }
    }

    /// Mute a user in a chat.
    ///
    /// Reads the record again right before writing, which keeps the
    /// window for concurrent duplicates small. If a record already exists
    /// by then, returns `AlreadyBanned` and leaves it untouched.
    pub async fn ban(&self, chat_id: i64, user_id: u64) -> Result<(), ModerationError> {
        info!("Muting user {} in chat {}", user_id, chat_id);

        let mut chat = self.chats.get_or_create(chat_id).await?;
        if !chat.add_ban(user_id, Utc::now()) {
            return Err(ModerationError::AlreadyBanned { chat_id, user_id });
        }

        self.chats.save(&chat).await?;
        Ok(())
    }
}
