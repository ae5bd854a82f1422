//! The persistence boundary the command router talks to.
//!
//! The router never sees SQL. It only knows these operations and the three
//! outcomes a reminder request can have.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Errors surfaced by a [`ReminderStore`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Invalid reminder date or time: {0}")]
    InvalidDateTime(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Who started the chat. Sent with the `/start` registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMeta {
    pub chat_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

impl ChatMeta {
    /// First name, falling back to last name.
    pub fn display_name(&self) -> Option<&str> {
        self.first_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or_else(|| self.last_name.as_deref().filter(|n| !n.is_empty()))
    }
}

/// Reminder fields captured by the `/remind` pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReminder {
    pub text: String,
    pub date: String,
    pub time: String,
}

/// Result of asking the store to create a reminder. A failed request is
/// the `Err` arm of [`StoreResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderOutcome {
    Created,
    AlreadyExists,
}

/// Public/private credential pair authorising a web session for a chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebLinkTokens {
    pub public_token: String,
    pub private_token: String,
}

impl WebLinkTokens {
    pub fn generate() -> Self {
        Self {
            public_token: uuid::Uuid::new_v4().simple().to_string(),
            private_token: uuid::Uuid::new_v4().simple().to_string(),
        }
    }
}

/// Payload handed to the listener when a reminder fires. `id` is the chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiredReminder {
    pub id: i64,
    pub text: String,
    pub date: String,
    pub time: String,
}

/// Receives reminder activations from the store.
#[async_trait]
pub trait ReminderListener: Send + Sync {
    async fn reminder_fired(&self, reminder: FiredReminder);
}

#[async_trait]
pub trait ReminderStore: Send + Sync {
    /// Registers the chat. Repeated registrations succeed.
    async fn start_new_user(&self, chat: &ChatMeta) -> StoreResult<()>;

    /// Creates a pending reminder unless one with the same
    /// (chat, text, date, time) already exists.
    async fn create_reminder(
        &self,
        chat_id: i64,
        reminder: &NewReminder,
    ) -> StoreResult<ReminderOutcome>;

    /// Pending reminders of the chat rendered as message text.
    async fn list_reminders(&self, chat_id: i64, is_today: bool) -> StoreResult<String>;

    /// Binds the token pair to the chat and returns the identifier used in
    /// the web app URL.
    async fn set_up_web_connection(
        &self,
        tokens: &WebLinkTokens,
        chat_id: i64,
    ) -> StoreResult<String>;

    /// Sets the single listener for fired reminders. A later registration
    /// replaces the earlier one; listeners never accumulate.
    fn register_listener(&self, listener: Arc<dyn ReminderListener>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_fallback() {
        let mut chat = ChatMeta {
            chat_id: 1,
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            username: None,
        };
        assert_eq!(chat.display_name(), Some("Ada"));

        chat.first_name = Some(String::new());
        assert_eq!(chat.display_name(), Some("Lovelace"));

        chat.last_name = None;
        assert_eq!(chat.display_name(), None);
    }

    #[test]
    fn test_generated_tokens_differ() {
        let tokens = WebLinkTokens::generate();
        assert_ne!(tokens.public_token, tokens.private_token);
        assert_eq!(tokens.public_token.len(), 32);
    }
}
