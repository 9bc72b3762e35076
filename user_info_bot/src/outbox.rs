use std::future::Future;

use teloxide::{
    payloads::{EditMessageTextSetters, SendMessageSetters},
    requests::Requester,
    sugar::request::RequestReplyExt,
    types::{CallbackQueryId, ChatId, MessageId},
    Bot, RequestError,
};

use crate::types::Reply;

/// Everything the bot can do to respond to an event.
pub trait Outbox {
    fn send(
        &self,
        chat: ChatId,
        quote: Option<MessageId>,
        reply: &Reply,
    ) -> impl Future<Output = Result<(), RequestError>> + Send;

    /// Replace text of an existing message.
    /// Its buttons are removed unless `reply` has its own.
    fn edit(
        &self,
        chat: ChatId,
        message: MessageId,
        reply: &Reply,
    ) -> impl Future<Output = Result<(), RequestError>> + Send;

    fn delete(
        &self,
        chat: ChatId,
        message: MessageId,
    ) -> impl Future<Output = Result<(), RequestError>> + Send;

    /// Answer a callback query, so that the client stops showing it as loading.
    fn acknowledge(
        &self,
        query: CallbackQueryId,
    ) -> impl Future<Output = Result<(), RequestError>> + Send;
}

impl Outbox for Bot {
    async fn send(
        &self,
        chat: ChatId,
        quote: Option<MessageId>,
        reply: &Reply,
    ) -> Result<(), RequestError> {
        let mut request = self.send_message(chat, reply.text.clone());
        if let Some(parse_mode) = reply.parse_mode {
            request = request.parse_mode(parse_mode);
        }
        if let Some(keyboard) = &reply.keyboard {
            request = request.reply_markup(keyboard.clone());
        }
        if let Some(quote) = quote {
            request = request.reply_to(quote);
        }
        request.await?;
        Ok(())
    }

    async fn edit(
        &self,
        chat: ChatId,
        message: MessageId,
        reply: &Reply,
    ) -> Result<(), RequestError> {
        let mut request = self.edit_message_text(chat, message, reply.text.clone());
        if let Some(parse_mode) = reply.parse_mode {
            request = request.parse_mode(parse_mode);
        }
        if let Some(keyboard) = &reply.keyboard {
            request = request.reply_markup(keyboard.clone());
        }
        request.await?;
        Ok(())
    }

    async fn delete(&self, chat: ChatId, message: MessageId) -> Result<(), RequestError> {
        self.delete_message(chat, message).await?;
        Ok(())
    }

    async fn acknowledge(&self, query: CallbackQueryId) -> Result<(), RequestError> {
        self.answer_callback_query(query).await?;
        Ok(())
    }
}
