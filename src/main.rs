//! Bouncer - Blacklist moderation bot for group chats.
//!
//! Watches every group message, deletes the ones that contain forbidden
//! words, and puts the offender under a temporary per-chat mute.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `database` - MongoDB integration (chat membership records)
//! - `moderation` - Blacklist matcher and ban lifecycle
//! - `bot` - Core bot functionality (with Throttle for API rate limiting)
//! - `events` - Per-message enforcement pipeline
//! - `error` - Moderation error taxonomy

mod bot;
mod config;
mod database;
mod error;
mod events;
mod moderation;

use std::sync::Arc;

use teloxide::adaptors::throttle::Limits;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use database::{Database, CHATS_COLLECTION};
use moderation::Blacklist;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // Initialize logging with sensible defaults
    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("bouncer=info,teloxide=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    info!("Starting Bouncer...");

    // Load configuration
    let config = Config::from_env();
    info!("Configuration loaded successfully");
    info!("Bot mode: {:?}", config.bot_mode);

    // Compile the blacklist before anything talks to the network; an
    // unusable matcher must stop the process here.
    let words = moderation::load_blocklist(&config.blocklist_file)?;
    let blacklist = Arc::new(Blacklist::from_words(&words)?);
    info!("Blacklist compiled ({} words)", blacklist.word_count());

    // Connect to MongoDB
    info!("Connecting to MongoDB...");
    let db = Database::connect(&config.mongodb_uri, &config.mongodb_database).await?;
    db.ensure_collection(CHATS_COLLECTION).await?;
    info!("Database connected");

    // Initialize bot with Throttle for automatic rate limiting
    let bot = Bot::new(&config.bot_token).throttle(Limits::default());
    info!("Bot initialized with rate limiting (Throttle)");

    // Get bot info
    let me = bot.get_me().await?;
    info!("Bot username: @{}", me.username());

    // Build dispatcher
    let dispatcher = bot::build_dispatcher(bot.clone(), &db, blacklist);

    // Run the bot
    bot::run(&config, dispatcher, bot).await;

    Ok(())
}
