use std::sync::Arc;

use teloxide::{
    types::{Me, Message},
    utils::command::BotCommands as _,
};

use crate::{
    registration::{Command, Event, Inbound, Registrar},
    types::{BotType, HandlerResult},
};

use super::send_message::BetterSendMessage;

fn classify(msg: &Message, me: &Me) -> Event {
    // Telegram sends several sizes of the same photo, the last one is the largest
    if let Some(largest) = msg.photo().and_then(|sizes| sizes.last()) {
        return Event::Photo {
            file_id: largest.file.id.clone(),
            caption: msg.caption().map(str::to_string),
        };
    }

    match msg.text() {
        Some(text) if text.starts_with('/') => match Command::parse(text, me.username()) {
            Ok(command) => Event::Command(command),
            Err(_) => Event::UnknownCommand,
        },
        Some(text) => Event::Text(text.to_string()),
        None => Event::Unsupported,
    }
}

pub async fn receive_message(
    registrar: Arc<Registrar>,
    bot: BotType,
    me: Me,
    msg: Message,
) -> HandlerResult {
    let inbound = Inbound {
        chat_id: msg.chat.id,
        sender_handle: msg.from.as_ref().and_then(|user| user.username.clone()),
        event: classify(&msg, &me),
    };

    log::debug!("Got {:?}", inbound);

    for response in registrar.handle(inbound).await? {
        bot.send_response(msg.chat.id, response).await?;
    }

    Ok(())
}
