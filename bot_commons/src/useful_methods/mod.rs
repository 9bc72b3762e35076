use teloxide::types::{Message, MessageId};

pub trait MessageStuff {
    /// If this message is a command, return its callname without the leading `/`.
    ///
    /// A command like `/help@Some_Bot` is only returned if `bot_username`
    /// matches `Some_Bot`, in which case the `@Some_Bot` part is cut off.
    /// `None` is returned for messages that are not commands, and for
    /// commands that are meant for other bots.
    fn command_callname(&self, bot_username: &str) -> Option<&str>;

    /// `true` if this message's text starts with a well-formed command,
    /// regardless of which bot it's addressed to.
    fn is_command(&self) -> bool;

    /// Message ID to quote when replying to this message.
    ///
    /// In private chats there is nothing to disambiguate, so it's `None` there.
    fn reply_target(&self) -> Option<MessageId>;
}

impl MessageStuff for Message {
    fn command_callname(&self, bot_username: &str) -> Option<&str> {
        parse_command_callname(self.text()?, bot_username)
    }

    fn is_command(&self) -> bool {
        self.text().and_then(split_command).is_some()
    }

    fn reply_target(&self) -> Option<MessageId> {
        if self.chat.is_private() {
            None
        } else {
            Some(self.id)
        }
    }
}

/// Split the command at the start of `text` into its callname and the
/// bot username it's addressed to, if any.
///
/// Returns `None` if `text` doesn't start with a well-formed command, like
/// `/ hello` or `/привет`.
#[must_use]
pub fn split_command(text: &str) -> Option<(&str, Option<&str>)> {
    let command = text.split_whitespace().next()?.strip_prefix('/')?;

    let (callname, username) = match command.split_once('@') {
        Some((callname, username)) => (callname, Some(username)),
        None => (command, None),
    };

    // Telegram commands are latin letters, digits and underscores.
    // See https://core.telegram.org/bots/api#botcommand
    let well_formed =
        |x: &str| !x.is_empty() && x.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_');

    if !well_formed(callname) || !username.map_or(true, well_formed) {
        return None;
    }

    Some((callname, username))
}

/// Text-level part of [`MessageStuff::command_callname`].
#[must_use]
pub fn parse_command_callname<'a>(text: &'a str, bot_username: &str) -> Option<&'a str> {
    match split_command(text)? {
        (callname, None) => Some(callname),
        // Bot names are guaranteed ASCII, so ignore ASCII case specifically.
        (callname, Some(username)) if username.eq_ignore_ascii_case(bot_username) => {
            Some(callname)
        }
        // This command is not for us.
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_command_callname, split_command};

    #[test]
    fn plain_commands() {
        assert_eq!(parse_command_callname("/start", "Info_Bot"), Some("start"));
        assert_eq!(
            parse_command_callname("/myid and some params", "Info_Bot"),
            Some("myid")
        );
        assert_eq!(parse_command_callname("  /help\n", "Info_Bot"), Some("help"));
    }

    #[test]
    fn addressed_commands() {
        assert_eq!(
            parse_command_callname("/help@Info_Bot", "Info_Bot"),
            Some("help")
        );
        assert_eq!(
            parse_command_callname("/help@info_bot", "Info_Bot"),
            Some("help")
        );
        assert_eq!(parse_command_callname("/help@Other_Bot", "Info_Bot"), None);
    }

    #[test]
    fn not_commands() {
        assert_eq!(parse_command_callname("hi /start", "Info_Bot"), None);
        assert_eq!(parse_command_callname("/", "Info_Bot"), None);
        assert_eq!(parse_command_callname("/привет", "Info_Bot"), None);
        assert_eq!(parse_command_callname("", "Info_Bot"), None);
        assert_eq!(parse_command_callname("/ hello", "Info_Bot"), None);
        assert_eq!(parse_command_callname("/my-id", "Info_Bot"), None);
    }

    #[test]
    fn command_shapes() {
        assert_eq!(split_command("/start"), Some(("start", None)));
        assert_eq!(
            split_command("/help@Other_Bot please"),
            Some(("help", Some("Other_Bot")))
        );
        assert_eq!(split_command("/"), None);
        assert_eq!(split_command("/ hello"), None);
        assert_eq!(split_command("/привет"), None);
        assert_eq!(split_command("/help@"), None);
        assert_eq!(split_command("/@Info_Bot"), None);
        assert_eq!(split_command("hello /start"), None);
    }
}
