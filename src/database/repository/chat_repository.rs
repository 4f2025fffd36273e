//! Chat membership repository.
//!
//! Owns the read-modify-write cycle for a chat's document. There is
//! deliberately no cache in front of this repository: every moderation
//! decision must see the latest membership list, so each lookup goes to
//! the store.

use mongodb::bson::doc;
use mongodb::Collection;
use tracing::debug;

use crate::database::models::ChatRecord;
use crate::database::Database;
use crate::error::ModerationError;

/// Collection holding one document per chat.
pub const CHATS_COLLECTION: &str = "chats";

/// Repository for per-chat ban membership.
#[derive(Clone)]
pub struct ChatRepository {
    collection: Collection<ChatRecord>,
}

impl ChatRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(CHATS_COLLECTION),
        }
    }

    /// Fetch a chat's record, creating an empty one on first sight.
    ///
    /// A freshly inserted document is re-read by its `_id` so the caller
    /// always holds what the store holds.
    pub async fn get_or_create(&self, chat_id: i64) -> Result<ChatRecord, ModerationError> {
        let filter = doc! { "chat_id": chat_id };
        if let Some(chat) = self.collection.find_one(filter).await? {
            return Ok(chat);
        }

        debug!("First message from chat {}, creating its record", chat_id);
        let inserted = self.collection.insert_one(ChatRecord::new(chat_id)).await?;

        let chat = self
            .collection
            .find_one(doc! { "_id": inserted.inserted_id })
            .await?
            .ok_or_else(|| {
                ModerationError::StoreUnavailable(format!(
                    "chat record for {} vanished right after insert",
                    chat_id
                ))
            })?;

        Ok(chat)
    }

    /// Persist a chat's record by replacing the whole document.
    ///
    /// No field-level merge: callers get, mutate in memory, then save the
    /// entire structure. Two independent mutations of the same chat must
    /// re-fetch between them.
    pub async fn save(&self, chat: &ChatRecord) -> Result<(), ModerationError> {
        let filter = doc! { "chat_id": chat.chat_id };
        let options = mongodb::options::ReplaceOptions::builder()
            .upsert(true)
            .build();

        self.collection
            .replace_one(filter, chat)
            .with_options(options)
            .await?;

        Ok(())
    }
}
