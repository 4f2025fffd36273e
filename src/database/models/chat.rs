//! Chat membership model.
//!
//! One document per chat, holding the list of currently (or recently)
//! muted users. Uniqueness per (chat, user) is enforced by the mutation
//! methods here, not by the store.

use chrono::{DateTime, Duration, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// How long a blacklist mute lasts, in hours.
pub const BAN_DURATION_HOURS: i64 = 8;

/// One muted user inside one chat.
///
/// `from` is never updated in place; lifting and re-imposing a mute is
/// always remove-then-insert, so a fresh record gets a fresh timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannedUser {
    /// Telegram user ID
    pub id: u64,

    /// When the mute was imposed (persisted as an ISO 8601 string)
    pub from: DateTime<Utc>,
}

/// Logical ban state of a (chat, user) pair at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BanState {
    /// No ban record exists.
    Clean,
    /// A record exists and is younger than the mute duration.
    Active,
    /// A record exists but the mute duration has passed. Transient: the
    /// next check removes the record.
    Expired,
}

/// Per-chat membership document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRecord {
    /// MongoDB document ID
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Telegram chat ID
    pub chat_id: i64,

    /// Muted users, unique by user ID
    #[serde(default)]
    pub users: Vec<BannedUser>,
}

impl ChatRecord {
    /// Create an empty record for a chat.
    pub fn new(chat_id: i64) -> Self {
        Self {
            id: None,
            chat_id,
            users: Vec::new(),
        }
    }

    /// Classify a user's ban state as of `now`.
    pub fn ban_state(&self, user_id: u64, now: DateTime<Utc>) -> BanState {
        match self.users.iter().find(|u| u.id == user_id) {
            None => BanState::Clean,
            Some(user) if now - user.from < Duration::hours(BAN_DURATION_HOURS) => {
                BanState::Active
            }
            Some(_) => BanState::Expired,
        }
    }

    /// Add a ban record for a user.
    ///
    /// Returns false without touching anything if the user already has
    /// one; existing bans are not refreshed or stacked.
    pub fn add_ban(&mut self, user_id: u64, now: DateTime<Utc>) -> bool {
        if self.users.iter().any(|u| u.id == user_id) {
            return false;
        }
        self.users.push(BannedUser {
            id: user_id,
            from: now,
        });
        true
    }

    /// Remove a user's ban record. Returns true if one was removed.
    pub fn remove_ban(&mut self, user_id: u64) -> bool {
        if let Some(pos) = self.users.iter().position(|u| u.id == user_id) {
            self.users.remove(pos);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ban_state_clean_when_no_record() {
        let chat = ChatRecord::new(100);
        assert_eq!(chat.ban_state(7, Utc::now()), BanState::Clean);
    }

    #[test]
    fn ban_state_active_below_duration() {
        let now = Utc::now();
        let mut chat = ChatRecord::new(100);
        chat.users.push(BannedUser {
            id: 7,
            from: now - Duration::hours(1),
        });

        assert_eq!(chat.ban_state(7, now), BanState::Active);
        // The check itself must not touch the record
        assert_eq!(chat.users.len(), 1);
    }

    #[test]
    fn ban_state_expired_past_duration() {
        let now = Utc::now();
        let mut chat = ChatRecord::new(100);
        chat.users.push(BannedUser {
            id: 7,
            from: now - Duration::hours(9),
        });

        assert_eq!(chat.ban_state(7, now), BanState::Expired);
    }

    #[test]
    fn ban_state_expired_at_exact_boundary() {
        let now = Utc::now();
        let mut chat = ChatRecord::new(100);
        chat.users.push(BannedUser {
            id: 7,
            from: now - Duration::hours(BAN_DURATION_HOURS),
        });

        assert_eq!(chat.ban_state(7, now), BanState::Expired);
    }

    #[test]
    fn add_ban_is_guarded_against_duplicates() {
        let now = Utc::now();
        let mut chat = ChatRecord::new(100);

        assert!(chat.add_ban(7, now));
        assert!(!chat.add_ban(7, now + Duration::minutes(5)));

        assert_eq!(chat.users.len(), 1);
        // The original timestamp survives the second attempt
        assert_eq!(chat.users[0].from, now);
    }

    #[test]
    fn remove_ban_deletes_only_the_target() {
        let now = Utc::now();
        let mut chat = ChatRecord::new(100);
        chat.add_ban(7, now);
        chat.add_ban(8, now);

        assert!(chat.remove_ban(7));
        assert!(!chat.remove_ban(7));
        assert_eq!(chat.users.len(), 1);
        assert_eq!(chat.users[0].id, 8);
    }

    #[test]
    fn persisted_shape_uses_iso8601_timestamps() {
        let mut chat = ChatRecord::new(100);
        chat.add_ban(7, "2024-05-01T12:00:00Z".parse().unwrap());

        let doc = serde_json::to_value(&chat).unwrap();
        assert_eq!(doc["chat_id"], 100);
        assert_eq!(doc["users"][0]["id"], 7);
        assert!(doc["users"][0]["from"]
            .as_str()
            .unwrap()
            .starts_with("2024-05-01T12:00:00"));
    }
}
