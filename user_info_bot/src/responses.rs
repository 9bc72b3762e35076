use std::fmt::Write;

use html_escape::encode_text;

use crate::types::{ButtonPayload, ChatIdentity, Reply, UserIdentity, COMMANDS};

/// Placeholder for things a user or chat doesn't have or doesn't show.
pub const NOT_AVAILABLE: &str = "N/A";

pub const ERROR_TEXT: &str = "⚠️ An error occurred while processing your message";

/// `@username`, HTML-escaped, or [`NOT_AVAILABLE`].
fn username_or_na(username: Option<&str>) -> String {
    match username {
        Some(username) => format!("@{}", encode_text(username)),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn language_or_na(language_code: Option<&str>) -> String {
    match language_code {
        Some(code) => encode_text(code).into_owned(),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn welcome() -> Reply {
    Reply::plain(concat!(
        "👋 Welcome to User Info Bot!\n\n",
        "I can show information about forwarded messages.\n\n",
        "Try these options:"
    ))
    .with_buttons([
        ButtonPayload::MyId.button("Show My ID"),
        ButtonPayload::Help.button("Help"),
    ])
}

/// Response to `/myid`.
pub fn my_id(actor: &UserIdentity) -> Result<Reply, std::fmt::Error> {
    let mut text = String::from("🆔 <b>Your Telegram ID</b>\n");
    writeln!(text, "├ ID: <code>{}</code>", actor.id)?;
    writeln!(
        text,
        "├ Username: {}",
        username_or_na(actor.username.as_deref())
    )?;
    write!(
        text,
        "└ Language: {}",
        language_or_na(actor.language_code.as_deref())
    )?;

    Ok(Reply::html(text).with_buttons([ButtonPayload::RefreshMyId.button("Refresh")]))
}

/// What the "Show My ID" button turns its message into.
pub fn my_id_brief(actor: &UserIdentity) -> Result<Reply, std::fmt::Error> {
    let mut text = String::new();
    writeln!(text, "🆔 <b>Your ID</b>: <code>{}</code>", actor.id)?;
    write!(
        text,
        "👤 <b>Username</b>: {}",
        username_or_na(actor.username.as_deref())
    )?;
    Ok(Reply::html(text))
}

pub fn help() -> Result<Reply, std::fmt::Error> {
    let mut text = String::from("ℹ️ <b>Bot Help</b>\n\n<b>Commands:</b>\n");
    for command in COMMANDS {
        writeln!(text, "/{} - {}", command.callname(), command.description())?;
    }
    text.push_str(concat!(
        "\n<b>How to use:</b>\n",
        "1. Forward any message to see sender info\n",
        "2. Some info may be hidden due to privacy settings"
    ));
    Ok(Reply::html(text))
}

/// Info about the user a message was forwarded from.
pub fn user_info(user: &UserIdentity) -> Result<Reply, std::fmt::Error> {
    let mut text = String::from("👤 <b>User Information</b>\n");
    writeln!(text, "├ ID: <code>{}</code>", user.id)?;
    writeln!(
        text,
        "├ Username: {}",
        username_or_na(user.username.as_deref())
    )?;
    writeln!(
        text,
        "├ Bot: {}",
        if user.is_bot { "✅ Yes" } else { "❌ No" }
    )?;
    write!(
        text,
        "└ Language: {}",
        language_or_na(user.language_code.as_deref())
    )?;

    Ok(Reply::html(text).with_buttons([
        ButtonPayload::RefreshUser(user.id).button("Refresh"),
        ButtonPayload::Close.button("Close"),
    ]))
}

/// Info about the chat or channel a message was forwarded from.
pub fn chat_info(chat: &ChatIdentity) -> Result<Reply, std::fmt::Error> {
    let mut text = String::from("👥 <b>Chat Information</b>\n");
    writeln!(text, "├ ID: <code>{}</code>", chat.id)?;
    write!(
        text,
        "└ Username: {}",
        username_or_na(chat.username.as_deref())
    )?;

    Ok(Reply::html(text).with_buttons([ButtonPayload::Close.button("Close")]))
}

/// Info about a forward from a user who hides their account.
pub fn hidden_forward(name: &str) -> Result<Reply, std::fmt::Error> {
    let mut text = String::from("🕵️ <b>Hidden User</b>\n");
    writeln!(text, "└ Name: {}", encode_text(name))?;
    text.push_str("\nThis user's ID is hidden by their privacy settings.");
    Ok(Reply::html(text))
}

pub fn forward_prompt() -> Reply {
    Reply::plain("ℹ️ Forward me a message to see info about the sender")
        .with_buttons([ButtonPayload::Help.button("What can I do?")])
}

pub fn error() -> Reply {
    Reply::plain(ERROR_TEXT)
}
