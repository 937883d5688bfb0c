use teloxide::{
    payloads::SendMessageSetters,
    requests::Requester,
    types::{KeyboardButton, KeyboardMarkup, KeyboardRemove, Recipient, ReplyMarkup},
};

use crate::registration::Response;
use crate::types::BotType;

type SendMessageRequest = <BotType as Requester>::SendMessage;

pub trait BetterSendMessage {
    fn send_message_buttons<C, T, S>(
        &self,
        chat_id: C,
        text: T,
        buttons: Vec<S>,
    ) -> SendMessageRequest
    where
        C: Into<Recipient>,
        T: Into<String>,
        S: Into<String>;

    fn send_response<C>(&self, chat_id: C, response: Response) -> SendMessageRequest
    where
        C: Into<Recipient>,
    {
        self.send_message_buttons(chat_id, response.text, response.options)
    }
}

impl BetterSendMessage for BotType {
    fn send_message_buttons<C, T, S>(
        &self,
        chat_id: C,
        text: T,
        buttons: Vec<S>,
    ) -> SendMessageRequest
    where
        C: Into<Recipient>,
        T: Into<String>,
        S: Into<String>,
    {
        let mut message = self.send_message(chat_id, text);

        if buttons.is_empty() {
            message = message.reply_markup(ReplyMarkup::KeyboardRemove(KeyboardRemove::new()));
        } else {
            // one button per row, the labels are too long to share one
            let rows = buttons
                .into_iter()
                .map(|b| vec![KeyboardButton::new(b.into())])
                .collect::<Vec<Vec<KeyboardButton>>>();

            message = message.reply_markup(ReplyMarkup::Keyboard(
                KeyboardMarkup::new(rows)
                    .resize_keyboard()
                    .one_time_keyboard(),
            ));
        }

        message
    }
}
