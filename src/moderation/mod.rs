//! Moderation domain: the blacklist matcher and the ban lifecycle.

mod bans;
mod blacklist;

pub use bans::BanService;
pub use blacklist::{load_blocklist, Blacklist};
