//! Database module exports.

pub mod chat;

pub use chat::{BanState, BannedUser, ChatRecord, BAN_DURATION_HOURS};
