use std::sync::Arc;
use teloxide::{dptree::deps, prelude::*};

use bot_commons::read_bot_token;

use crate::{
    handlers::{handle_callback_query, handle_message},
    responder::Responder,
    types::Command,
    TOKEN_ENV_VAR,
};

/// Run the bot until Ctrl+C.
///
/// Exits the process with code 1 if there's no bot token.
pub async fn entry() {
    let Some(token) = read_bot_token(TOKEN_ENV_VAR) else {
        log::error!("Missing {} in environment variables", TOKEN_ENV_VAR);
        std::process::exit(1);
    };

    let bot = Bot::new(token);

    if let Err(e) = bot.set_my_commands(Command::generate_bot_commands()).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let responder = Arc::new(Responder::new("user_info_bot::responder"));

    log::info!("Creating the handler...");

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(handle_message))
        .branch(Update::filter_callback_query().endpoint(handle_callback_query));

    log::info!("Dispatching the dispatcher!");

    Dispatcher::builder(bot, handler)
        .default_handler(|_| async {})
        .dependencies(deps![responder])
        .enable_ctrlc_handler()
        // One update at a time, in order.
        .distribution_function(|_| None::<std::convert::Infallible>)
        .build()
        .dispatch()
        .await;

    log::info!("it appears we have been bonked.");
}
