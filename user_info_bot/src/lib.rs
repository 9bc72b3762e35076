//! Source code for User Info Bot, a bot that tells who a forwarded message is from.

/// Various types used throughout.
mod types;

/// Texts and buttons of everything the bot says.
mod responses;

/// Deciding what to do about events and doing it.
mod responder;

/// Ways the bot can respond.
mod outbox;

/// Functions that handle events from Telegram.
mod handlers;

/// Entry function that starts the bot.
mod entry;
pub use entry::*;

/// Environment variable with the bot token.
pub const TOKEN_ENV_VAR: &str = "TELEGRAM_BOT_TOKEN";
