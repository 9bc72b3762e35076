use std::sync::Arc;

use bot_commons::useful_methods::MessageStuff;
use teloxide::{
    types::{CallbackQuery, Me, Message},
    Bot, RequestError,
};

use crate::{
    responder::Responder,
    types::{Command, Forward, InboundEvent, ReplyAt, TargetMessage},
};

/// Turn a message into an event for the responder.
///
/// Returns `None` for messages this bot does not answer: commands it doesn't
/// know, commands for other bots, and commands without a sender.
pub fn message_to_event(bot_username: &str, message: &Message) -> Option<InboundEvent> {
    let at = ReplyAt {
        chat: message.chat.id,
        quote: message.reply_target(),
    };

    if !message.is_command() {
        return Some(InboundEvent::Message {
            forward: Forward::of(message),
            at,
        });
    }

    let command = Command::from_callname(message.command_callname(bot_username)?)?;

    let Some(actor) = message.from.as_ref() else {
        // Anonymous group admins and the like.
        log::debug!("Ignoring /{} without a sender.", command.callname());
        return None;
    };

    Some(InboundEvent::Command {
        command,
        actor: actor.into(),
        at,
    })
}

pub fn callback_query_to_event(query: CallbackQuery) -> InboundEvent {
    let target = query.message.as_ref().map(|message| TargetMessage {
        chat: message.chat().id,
        id: message.id(),
    });

    InboundEvent::ButtonPress {
        actor: (&query.from).into(),
        query_id: query.id,
        data: query.data,
        target,
    }
}

pub async fn handle_message(
    bot: Bot,
    me: Me,
    message: Message,
    responder: Arc<Responder>,
) -> Result<(), RequestError> {
    // Bot ignores messages made by itself.
    if message.from.as_ref().is_some_and(|from| from.id == me.id) {
        return Ok(());
    }

    if let Some(event) = message_to_event(me.username(), &message) {
        responder.handle(&bot, event).await;
    }
    Ok(())
}

pub async fn handle_callback_query(
    bot: Bot,
    query: CallbackQuery,
    responder: Arc<Responder>,
) -> Result<(), RequestError> {
    responder.handle(&bot, callback_query_to_event(query)).await;
    Ok(())
}
