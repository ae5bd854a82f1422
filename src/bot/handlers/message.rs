use std::sync::Arc;
use teloxide::prelude::*;

use crate::bot::router::{CommandRouter, IncomingMessage};
use crate::database::store::ChatMeta;

/// Builds the router's view of a Telegram message. `None` for messages
/// without text (stickers, photos, service messages).
pub fn incoming_message(msg: &Message) -> Option<IncomingMessage> {
    let text = msg.text()?;
    let from = msg.from();

    Some(IncomingMessage {
        chat: ChatMeta {
            chat_id: msg.chat.id.0,
            first_name: from.map(|u| u.first_name.clone()),
            last_name: from.and_then(|u| u.last_name.clone()),
            username: from.and_then(|u| u.username.clone()),
        },
        text: text.to_string(),
    })
}

pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

pub async fn message_handler(
    msg: Message,
    router: Arc<CommandRouter>,
) -> HandlerResult {
    match incoming_message(&msg) {
        Some(incoming) => router.handle(&incoming).await,
        None => tracing::debug!("Ignoring non-text message in chat {}", msg.chat.id),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn telegram_message(body: serde_json::Value) -> Message {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_incoming_message_carries_sender_names() {
        let msg = telegram_message(serde_json::json!({
            "message_id": 1,
            "date": 1700000000,
            "chat": { "id": 42, "type": "private", "first_name": "Ada" },
            "from": { "id": 42, "is_bot": false, "first_name": "Ada", "last_name": "Lovelace" },
            "text": "/start"
        }));

        let incoming = incoming_message(&msg).unwrap();
        assert_eq!(incoming.text, "/start");
        assert_eq!(incoming.chat.chat_id, 42);
        assert_eq!(incoming.chat.display_name(), Some("Ada"));
        assert_eq!(incoming.chat.last_name.as_deref(), Some("Lovelace"));
    }

    #[test]
    fn test_non_text_messages_are_skipped() {
        let msg = telegram_message(serde_json::json!({
            "message_id": 2,
            "date": 1700000000,
            "chat": { "id": 42, "type": "private", "first_name": "Ada" },
            "from": { "id": 42, "is_bot": false, "first_name": "Ada" },
            "location": { "latitude": 52.5, "longitude": 13.4 }
        }));

        assert!(incoming_message(&msg).is_none());
    }
}
