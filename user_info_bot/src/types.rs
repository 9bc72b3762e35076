use std::fmt::Display;

use teloxide::{
    types::{
        BotCommand, CallbackQueryId, Chat, ChatId, InlineKeyboardButton, InlineKeyboardMarkup,
        Message, MessageId, MessageOrigin, ParseMode, User, UserId,
    },
    RequestError,
};

/// A user, as much as this bot cares to know about one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub id: UserId,
    pub username: Option<String>,
    pub is_bot: bool,
    pub language_code: Option<String>,
}

impl From<&User> for UserIdentity {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            is_bot: user.is_bot,
            language_code: user.language_code.clone(),
        }
    }
}

/// A chat or a channel, as much as this bot cares to know about one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatIdentity {
    pub id: ChatId,
    pub username: Option<String>,
    pub title: Option<String>,
}

impl From<&Chat> for ChatIdentity {
    fn from(chat: &Chat) -> Self {
        Self {
            id: chat.id,
            username: chat.username().map(str::to_owned),
            title: chat.title().map(str::to_owned),
        }
    }
}

/// Who a forwarded message came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardOrigin {
    User(UserIdentity),
    Chat(ChatIdentity),
    /// The user hides their account in forwards. Only the display name is known.
    Hidden(String),
}

/// Forward status of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Forward {
    NotForwarded,
    From(ForwardOrigin),
    /// It is a forward, but there's nothing to tell about its origin.
    Unresolved,
}

impl Forward {
    pub fn of(message: &Message) -> Self {
        let Some(origin) = message.forward_origin() else {
            return Self::NotForwarded;
        };

        match origin {
            MessageOrigin::User { sender_user, .. } => {
                Self::From(ForwardOrigin::User(sender_user.into()))
            }
            MessageOrigin::Chat { sender_chat, .. } => {
                Self::From(ForwardOrigin::Chat(sender_chat.into()))
            }
            MessageOrigin::Channel { chat, .. } => Self::From(ForwardOrigin::Chat(chat.into())),
            MessageOrigin::HiddenUser {
                sender_user_name, ..
            } => {
                if sender_user_name.is_empty() {
                    Self::Unresolved
                } else {
                    Self::From(ForwardOrigin::Hidden(sender_user_name.clone()))
                }
            }
        }
    }
}

/// Commands this bot answers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    MyId,
    Help,
}

pub const COMMANDS: &[Command] = &[Command::Start, Command::MyId, Command::Help];

impl Command {
    /// Command name, without the `/`.
    pub fn callname(self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::MyId => "myid",
            Command::Help => "help",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Command::Start => "Welcome message",
            Command::MyId => "Show your Telegram ID",
            Command::Help => "This message",
        }
    }

    pub fn from_callname(callname: &str) -> Option<Self> {
        COMMANDS
            .iter()
            .copied()
            .find(|x| x.callname().eq_ignore_ascii_case(callname))
    }

    pub fn generate_bot_commands() -> Vec<BotCommand> {
        COMMANDS
            .iter()
            .map(|command| BotCommand {
                command: command.callname().to_string(),
                description: command.description().to_string(),
            })
            .collect()
    }
}

const REFRESH_USER_PREFIX: &str = "refresh_user_";

/// Data attached to inline buttons this bot makes.
///
/// Telegram limits it to 64 bytes, which is plenty for these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonPayload {
    MyId,
    Help,
    Close,
    RefreshMyId,
    RefreshUser(UserId),
}

impl ButtonPayload {
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            "myid" => Some(Self::MyId),
            "help" => Some(Self::Help),
            "close" => Some(Self::Close),
            "refresh_myid" => Some(Self::RefreshMyId),
            _ => {
                let id = data.strip_prefix(REFRESH_USER_PREFIX)?;
                if id.is_empty() || !id.bytes().all(|x| x.is_ascii_digit()) {
                    return None;
                }
                id.parse().ok().map(|id| Self::RefreshUser(UserId(id)))
            }
        }
    }

    /// Make a button with this payload.
    pub fn button(self, text: &str) -> InlineKeyboardButton {
        InlineKeyboardButton::callback(text.to_string(), self.to_string())
    }
}

impl Display for ButtonPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MyId => f.write_str("myid"),
            Self::Help => f.write_str("help"),
            Self::Close => f.write_str("close"),
            Self::RefreshMyId => f.write_str("refresh_myid"),
            Self::RefreshUser(id) => write!(f, "{}{}", REFRESH_USER_PREFIX, id),
        }
    }
}

/// Text to show to the user, optionally with buttons under it.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub parse_mode: Option<ParseMode>,
    pub keyboard: Option<InlineKeyboardMarkup>,
}

impl Reply {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parse_mode: None,
            keyboard: None,
        }
    }

    pub fn html(text: impl Into<String>) -> Self {
        Self {
            parse_mode: Some(ParseMode::Html),
            ..Self::plain(text)
        }
    }

    /// One button per row.
    pub fn with_buttons(mut self, buttons: impl IntoIterator<Item = InlineKeyboardButton>) -> Self {
        self.keyboard = Some(InlineKeyboardMarkup::new(
            buttons.into_iter().map(|x| vec![x]),
        ));
        self
    }

    /// All buttons attached to this reply, row by row.
    #[cfg(test)]
    pub fn buttons(&self) -> impl Iterator<Item = &InlineKeyboardButton> {
        self.keyboard
            .iter()
            .flat_map(|x| x.inline_keyboard.iter().flatten())
    }
}

/// What to do in response to an event.
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundAction {
    /// Send a new message.
    Send(Reply),
    /// Edit the message the event is about.
    Edit(Reply),
    /// Delete the message the event is about.
    Delete,
}

/// Where to send a response to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyAt {
    pub chat: ChatId,
    /// Message to quote, if any.
    pub quote: Option<MessageId>,
}

/// A message that already exists and may be edited or deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetMessage {
    pub chat: ChatId,
    pub id: MessageId,
}

/// An event from Telegram, with everything unneeded stripped out.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    Command {
        command: Command,
        actor: UserIdentity,
        at: ReplyAt,
    },
    Message {
        forward: Forward,
        at: ReplyAt,
    },
    ButtonPress {
        query_id: CallbackQueryId,
        data: Option<String>,
        actor: UserIdentity,
        /// Message with the button. Missing if it's too old.
        target: Option<TargetMessage>,
    },
}

/// Something went wrong while responding to an event.
#[derive(Debug)]
pub enum ResponseError {
    Request(RequestError),
    Format(std::fmt::Error),
}

impl From<RequestError> for ResponseError {
    fn from(value: RequestError) -> Self {
        Self::Request(value)
    }
}

impl From<std::fmt::Error> for ResponseError {
    fn from(value: std::fmt::Error) -> Self {
        Self::Format(value)
    }
}

impl Display for ResponseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Request(e) => write!(f, "request failed: {}", e),
            Self::Format(e) => write!(f, "formatting failed: {}", e),
        }
    }
}

impl std::error::Error for ResponseError {}

#[cfg(test)]
pub(crate) mod tests {
    use teloxide::types::{ChatId, Message, UserId};

    use super::{ButtonPayload, ChatIdentity, Command, Forward, ForwardOrigin, UserIdentity};

    /// Make a private chat message from Bot API JSON, with `extra` fields added on top.
    pub fn message_json(extra: &str) -> Message {
        let json = format!(
            concat!(
                r#"{{"message_id":10,"date":1700000000,"#,
                r#""chat":{{"id":100,"type":"private","first_name":"Alice","username":"alice"}},"#,
                r#""from":{{"id":100,"is_bot":false,"first_name":"Alice","username":"alice","language_code":"en"}},"#,
                r#"{}}}"#
            ),
            extra
        );
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn payload_literals() {
        assert_eq!(ButtonPayload::MyId.to_string(), "myid");
        assert_eq!(ButtonPayload::Help.to_string(), "help");
        assert_eq!(ButtonPayload::Close.to_string(), "close");
        assert_eq!(ButtonPayload::RefreshMyId.to_string(), "refresh_myid");
        assert_eq!(
            ButtonPayload::RefreshUser(UserId(42)).to_string(),
            "refresh_user_42"
        );

        assert_eq!(ButtonPayload::parse("close"), Some(ButtonPayload::Close));
        assert_eq!(
            ButtonPayload::parse("refresh_user_1366743555"),
            Some(ButtonPayload::RefreshUser(UserId(1366743555)))
        );
    }

    #[test]
    fn payload_garbage() {
        assert_eq!(ButtonPayload::parse(""), None);
        assert_eq!(ButtonPayload::parse("CLOSE"), None);
        assert_eq!(ButtonPayload::parse("close "), None);
        assert_eq!(ButtonPayload::parse("refresh_user_"), None);
        assert_eq!(ButtonPayload::parse("refresh_user_+5"), None);
        assert_eq!(ButtonPayload::parse("refresh_user_abc"), None);
        assert_eq!(ButtonPayload::parse("refresh_user_99999999999999999999999"), None);
    }

    #[test]
    fn commands() {
        assert_eq!(Command::from_callname("myid"), Some(Command::MyId));
        assert_eq!(Command::from_callname("MyId"), Some(Command::MyId));
        assert_eq!(Command::from_callname("review"), None);

        let bot_commands = Command::generate_bot_commands();
        let names: Vec<_> = bot_commands.iter().map(|x| x.command.as_str()).collect();
        assert_eq!(names, ["start", "myid", "help"]);
    }

    #[test]
    fn not_forwarded() {
        let message = message_json(r#""text":"hello""#);
        assert_eq!(Forward::of(&message), Forward::NotForwarded);
    }

    #[test]
    fn forwarded_from_user() {
        let message = message_json(concat!(
            r#""text":"hello","#,
            r#""forward_origin":{"type":"user","date":1690000000,"#,
            r#""sender_user":{"id":42,"is_bot":true,"first_name":"Robot"}}"#
        ));
        assert_eq!(
            Forward::of(&message),
            Forward::From(ForwardOrigin::User(UserIdentity {
                id: UserId(42),
                username: None,
                is_bot: true,
                language_code: None,
            }))
        );
    }

    #[test]
    fn forwarded_from_channel() {
        let message = message_json(concat!(
            r#""text":"news","#,
            r#""forward_origin":{"type":"channel","date":1690000000,"message_id":7,"#,
            r#""chat":{"id":-1001234567890,"type":"channel","title":"News","username":"news"}}"#
        ));
        let Forward::From(ForwardOrigin::Chat(ChatIdentity {
            id,
            username,
            title,
        })) = Forward::of(&message)
        else {
            panic!("expected a chat origin");
        };
        assert_eq!(id.0, -1001234567890);
        assert_eq!(username.as_deref(), Some("news"));
        assert_eq!(title.as_deref(), Some("News"));
    }

    #[test]
    fn forwarded_from_hidden_user() {
        let message = message_json(concat!(
            r#""text":"psst","#,
            r#""forward_origin":{"type":"hidden_user","date":1690000000,"#,
            r#""sender_user_name":"Mystery Person"}"#
        ));
        assert_eq!(
            Forward::of(&message),
            Forward::From(ForwardOrigin::Hidden("Mystery Person".to_string()))
        );

        let message = message_json(concat!(
            r#""text":"psst","#,
            r#""forward_origin":{"type":"hidden_user","date":1690000000,"#,
            r#""sender_user_name":""}"#
        ));
        assert_eq!(Forward::of(&message), Forward::Unresolved);

        // Whitespace is still a name.
        let message = message_json(concat!(
            r#""text":"psst","#,
            r#""forward_origin":{"type":"hidden_user","date":1690000000,"#,
            r#""sender_user_name":" "}"#
        ));
        assert_eq!(
            Forward::of(&message),
            Forward::From(ForwardOrigin::Hidden(" ".to_string()))
        );
    }

    #[test]
    fn forwarded_from_chat() {
        let message = message_json(concat!(
            r#""text":"from the group","#,
            r#""forward_origin":{"type":"chat","date":1690000000,"#,
            r#""sender_chat":{"id":-1009876543210,"type":"supergroup","title":"Club","username":"club"}}"#
        ));
        assert_eq!(
            Forward::of(&message),
            Forward::From(ForwardOrigin::Chat(ChatIdentity {
                id: ChatId(-1009876543210),
                username: Some("club".to_string()),
                title: Some("Club".to_string()),
            }))
        );
    }
}
