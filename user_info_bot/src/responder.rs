use teloxide::types::ChatId;

use crate::{
    outbox::Outbox,
    responses,
    types::{
        ButtonPayload, Command, Forward, ForwardOrigin, InboundEvent, OutboundAction, ReplyAt,
        ResponseError, TargetMessage, UserIdentity,
    },
};

/// Decides what to do about each event and does it.
///
/// Nothing is kept between events.
pub struct Responder {
    log_target: &'static str,
}

impl Responder {
    /// Make a responder that logs under `log_target`.
    pub fn new(log_target: &'static str) -> Self {
        Self { log_target }
    }

    pub fn on_command(
        &self,
        command: Command,
        actor: &UserIdentity,
    ) -> Result<OutboundAction, std::fmt::Error> {
        let reply = match command {
            Command::Start => responses::welcome(),
            Command::MyId => responses::my_id(actor)?,
            Command::Help => responses::help()?,
        };
        Ok(OutboundAction::Send(reply))
    }

    pub fn on_message(&self, forward: &Forward) -> Result<Option<OutboundAction>, std::fmt::Error> {
        let reply = match forward {
            Forward::From(ForwardOrigin::User(user)) => responses::user_info(user)?,
            Forward::From(ForwardOrigin::Chat(chat)) => responses::chat_info(chat)?,
            Forward::From(ForwardOrigin::Hidden(name)) => responses::hidden_forward(name)?,
            Forward::NotForwarded => responses::forward_prompt(),
            Forward::Unresolved => return Ok(None),
        };
        Ok(Some(OutboundAction::Send(reply)))
    }

    pub fn on_button_press(
        &self,
        payload: Option<ButtonPayload>,
        actor: &UserIdentity,
    ) -> Result<Option<OutboundAction>, std::fmt::Error> {
        let action = match payload {
            Some(ButtonPayload::MyId) => OutboundAction::Edit(responses::my_id_brief(actor)?),
            Some(ButtonPayload::Help) => OutboundAction::Send(responses::help()?),
            Some(ButtonPayload::Close) => OutboundAction::Delete,
            // TODO: re-fetch the user and edit the message with fresh info.
            Some(payload @ (ButtonPayload::RefreshMyId | ButtonPayload::RefreshUser(_))) => {
                log::debug!(target: self.log_target, "No handler for button {}", payload);
                return Ok(None);
            }
            None => return Ok(None),
        };
        Ok(Some(action))
    }

    /// Respond to this event. Errors are logged and reported to the user,
    /// never returned.
    pub async fn handle<O: Outbox + Sync>(&self, outbox: &O, event: InboundEvent) {
        match event {
            InboundEvent::Command { command, actor, at } => {
                log::debug!(target: self.log_target, "/{} from {}", command.callname(), actor.id);
                let result = self.respond_to_command(outbox, command, &actor, at).await;
                self.recover(outbox, result, Some(at)).await;
            }
            InboundEvent::Message { forward, at } => {
                let result = self.respond_to_message(outbox, &forward, at).await;
                self.recover(outbox, result, Some(at)).await;
            }
            InboundEvent::ButtonPress {
                query_id,
                data,
                actor,
                target,
            } => {
                if let Err(e) = outbox.acknowledge(query_id).await {
                    log::warn!(target: self.log_target, "Failed to answer a callback query: {}", e);
                }

                let payload = data.as_deref().and_then(ButtonPayload::parse);
                if payload.is_none() {
                    log::debug!(target: self.log_target, "Unknown button data: {:?}", data);
                }

                let result = self.respond_to_button(outbox, payload, &actor, target).await;
                let at = target.map(|x| ReplyAt {
                    chat: x.chat,
                    quote: None,
                });
                self.recover(outbox, result, at).await;
            }
        }
    }

    async fn respond_to_command<O: Outbox + Sync>(
        &self,
        outbox: &O,
        command: Command,
        actor: &UserIdentity,
        at: ReplyAt,
    ) -> Result<(), ResponseError> {
        let action = self.on_command(command, actor)?;
        self.perform(outbox, action, at, None).await
    }

    async fn respond_to_message<O: Outbox + Sync>(
        &self,
        outbox: &O,
        forward: &Forward,
        at: ReplyAt,
    ) -> Result<(), ResponseError> {
        let Some(action) = self.on_message(forward)? else {
            log::debug!(target: self.log_target, "Forward without a usable origin, ignoring.");
            return Ok(());
        };
        self.perform(outbox, action, at, None).await
    }

    async fn respond_to_button<O: Outbox + Sync>(
        &self,
        outbox: &O,
        payload: Option<ButtonPayload>,
        actor: &UserIdentity,
        target: Option<TargetMessage>,
    ) -> Result<(), ResponseError> {
        let Some(action) = self.on_button_press(payload, actor)? else {
            return Ok(());
        };

        // If the message with the button is gone, new messages go to the presser's DMs.
        let at = ReplyAt {
            chat: target.map_or_else(|| ChatId::from(actor.id), |x| x.chat),
            quote: None,
        };
        self.perform(outbox, action, at, target).await
    }

    async fn perform<O: Outbox + Sync>(
        &self,
        outbox: &O,
        action: OutboundAction,
        at: ReplyAt,
        target: Option<TargetMessage>,
    ) -> Result<(), ResponseError> {
        match (action, target) {
            (OutboundAction::Send(reply), _) => outbox.send(at.chat, at.quote, &reply).await?,
            (OutboundAction::Edit(reply), Some(target)) => {
                outbox.edit(target.chat, target.id, &reply).await?
            }
            (OutboundAction::Delete, Some(target)) => outbox.delete(target.chat, target.id).await?,
            (OutboundAction::Edit(_) | OutboundAction::Delete, None) => {
                log::debug!(target: self.log_target, "Message to change is inaccessible, skipping.");
            }
        }
        Ok(())
    }

    /// Log the error, if any, and tell the user something went wrong.
    async fn recover<O: Outbox + Sync>(
        &self,
        outbox: &O,
        result: Result<(), ResponseError>,
        at: Option<ReplyAt>,
    ) {
        let Err(e) = result else {
            return;
        };

        log::error!(target: self.log_target, "Error handling an event: {}", e);

        let Some(at) = at else {
            return;
        };

        if let Err(e) = outbox.send(at.chat, at.quote, &responses::error()).await {
            log::error!(target: self.log_target, "Failed to report an error to {}: {}", at.chat, e);
        }
    }
}
