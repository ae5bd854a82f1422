use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ParseMode;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Telegram request failed: {0}")]
    Telegram(#[from] teloxide::RequestError),
    #[error("Send failed: {0}")]
    Other(String),
}

/// Outbound side of the messaging transport.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(
        &self,
        chat_id: ChatId,
        text: String,
        parse_mode: Option<ParseMode>,
    ) -> Result<(), TransportError>;
}

/// [`MessageSender`] over the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramSender {
    bot: Bot,
}

impl TelegramSender {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl MessageSender for TelegramSender {
    async fn send(
        &self,
        chat_id: ChatId,
        text: String,
        parse_mode: Option<ParseMode>,
    ) -> Result<(), TransportError> {
        let request = self.bot.send_message(chat_id, text);
        match parse_mode {
            Some(mode) => request.parse_mode(mode).await?,
            None => request.await?,
        };
        Ok(())
    }
}
