//! Message dispatcher setup.
//!
//! Builds the dispatcher with the moderation event handler.

use std::sync::Arc;

use teloxide::adaptors::Throttle;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;

use crate::database::{ChatRepository, Database};
use crate::events;
use crate::moderation::{BanService, Blacklist};

/// Bot type with Throttle adaptor for automatic rate limiting.
pub type ThrottledBot = Throttle<Bot>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Ban lifecycle service.
    pub bans: BanService,

    /// Compiled blacklist matcher, built once at startup.
    pub blacklist: Arc<Blacklist>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: &Database, blacklist: Arc<Blacklist>) -> Self {
        let chats = Arc::new(ChatRepository::new(db));
        let bans = BanService::new(chats);

        Self { bans, blacklist }
    }
}

/// Build the dispatcher with all handlers.
pub fn build_dispatcher(
    bot: ThrottledBot,
    db: &Database,
    blacklist: Arc<Blacklist>,
) -> Dispatcher<ThrottledBot, anyhow::Error, teloxide::dispatching::DefaultKey> {
    let state = AppState::new(db, blacklist);

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
}

/// Build the handler schema.
fn schema() -> UpdateHandler<anyhow::Error> {
    use teloxide::dispatching::UpdateFilterExt;

    Update::filter_message().branch(events::message_event_handler())
}
