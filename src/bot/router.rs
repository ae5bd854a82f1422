//! Maps each chat message to one intent and sends exactly one reply.

use async_trait::async_trait;
use std::sync::Arc;
use teloxide::types::{ChatId, ParseMode};

use crate::bot::messages;
use crate::bot::patterns::{match_intent, Intent};
use crate::bot::transport::MessageSender;
use crate::config::create_web_app_url;
use crate::database::store::{
    ChatMeta, FiredReminder, NewReminder, ReminderListener, ReminderOutcome, ReminderStore,
    WebLinkTokens,
};
use crate::utils::datetime::{valid_date, valid_time};
use crate::utils::logging::{
    log_command_error, log_command_start, log_command_success, log_validation_error,
};
use crate::utils::markdown::markdown_link;

/// A text message as the router sees it.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub chat: ChatMeta,
    pub text: String,
}

/// Date and time checks used by `/remind`. Swappable so tests do not depend
/// on the wall clock.
pub trait DateTimeValidator: Send + Sync {
    fn valid_date(&self, date: &str) -> bool;
    fn valid_time(&self, time: &str, date: &str) -> bool;
}

/// Validates against the local clock.
pub struct LocalClockValidator;

impl DateTimeValidator for LocalClockValidator {
    fn valid_date(&self, date: &str) -> bool {
        valid_date(date)
    }

    fn valid_time(&self, time: &str, date: &str) -> bool {
        valid_time(time, date)
    }
}

pub struct CommandRouter {
    sender: Arc<dyn MessageSender>,
    store: Arc<dyn ReminderStore>,
    validator: Arc<dyn DateTimeValidator>,
    web_app_url: String,
}

impl CommandRouter {
    pub fn new(
        sender: Arc<dyn MessageSender>,
        store: Arc<dyn ReminderStore>,
        web_app_url: impl Into<String>,
    ) -> Self {
        Self {
            sender,
            store,
            validator: Arc::new(LocalClockValidator),
            web_app_url: web_app_url.into(),
        }
    }

    pub fn with_validator(mut self, validator: Arc<dyn DateTimeValidator>) -> Self {
        self.validator = validator;
        self
    }

    /// Registers this router as the store's reminder listener, replacing
    /// whichever listener was registered before.
    pub fn listen_for_reminders(self: &Arc<Self>) {
        self.store.register_listener(self.clone());
    }

    pub async fn handle(&self, msg: &IncomingMessage) {
        let chat_id = msg.chat.chat_id;

        match match_intent(&msg.text) {
            Intent::Start => self.start(&msg.chat).await,
            Intent::Help => {
                log_command_start("help", chat_id, None);
                self.reply(chat_id, messages::HELP.to_string(), None).await;
            }
            Intent::Link => self.link(chat_id).await,
            Intent::Remind(reminder) => self.remind(chat_id, &reminder).await,
            Intent::List { is_today } => self.list(chat_id, is_today).await,
            Intent::Unknown { mentions_remind } => {
                tracing::debug!("No command matched in chat {}", chat_id);
                let reply = if mentions_remind {
                    messages::INVALID_REMIND
                } else {
                    messages::INVALID
                };
                self.reply(chat_id, reply.to_string(), None).await;
            }
        }
    }

    async fn start(&self, chat: &ChatMeta) {
        log_command_start("start", chat.chat_id, None);

        let reply = match self.store.start_new_user(chat).await {
            Ok(()) => {
                log_command_success("start", chat.chat_id, None);
                messages::start(chat.display_name())
            }
            Err(e) => {
                log_command_error("start", chat.chat_id, &e.to_string());
                messages::ERROR.to_string()
            }
        };
        self.reply(chat.chat_id, reply, None).await;
    }

    async fn link(&self, chat_id: i64) {
        log_command_start("link", chat_id, None);

        let tokens = WebLinkTokens::generate();
        match self.store.set_up_web_connection(&tokens, chat_id).await {
            Ok(link_part) if !link_part.is_empty() => {
                let url = create_web_app_url(&self.web_app_url, &link_part);
                log_command_success("link", chat_id, None);
                self.reply(
                    chat_id,
                    markdown_link(messages::LINK, &url),
                    Some(ParseMode::MarkdownV2),
                )
                .await;
            }
            Ok(_) => {
                log_command_error("link", chat_id, "empty session identifier");
                self.reply(chat_id, messages::ERROR.to_string(), None).await;
            }
            Err(e) => {
                log_command_error("link", chat_id, &e.to_string());
                self.reply(chat_id, messages::ERROR.to_string(), None).await;
            }
        }
    }

    async fn remind(&self, chat_id: i64, reminder: &NewReminder) {
        log_command_start("remind", chat_id, Some(&format!("{} {}", reminder.date, reminder.time)));

        let date_ok = self.validator.valid_date(&reminder.date);
        let time_ok = self.validator.valid_time(&reminder.time, &reminder.date);
        if !date_ok || !time_ok {
            let (field, value) = if date_ok {
                ("time", &reminder.time)
            } else {
                ("date", &reminder.date)
            };
            log_validation_error("remind", field, value, chat_id);
            self.reply(chat_id, messages::INVALID_DATETIME.to_string(), None).await;
            return;
        }

        let reply = match self.store.create_reminder(chat_id, reminder).await {
            Ok(ReminderOutcome::Created) => {
                log_command_success("remind", chat_id, None);
                messages::success_reminder(reminder)
            }
            Ok(ReminderOutcome::AlreadyExists) => {
                log_command_success("remind", chat_id, Some("already exists"));
                messages::REMINDER_EXISTS.to_string()
            }
            Err(e) => {
                log_command_error("remind", chat_id, &e.to_string());
                messages::ERROR.to_string()
            }
        };
        self.reply(chat_id, reply, None).await;
    }

    async fn list(&self, chat_id: i64, is_today: bool) {
        log_command_start("list", chat_id, Some(if is_today { "today" } else { "all" }));

        let reply = match self.store.list_reminders(chat_id, is_today).await {
            Ok(list) => {
                log_command_success("list", chat_id, None);
                messages::lists(&list, is_today)
            }
            Err(e) => {
                log_command_error("list", chat_id, &e.to_string());
                messages::ERROR.to_string()
            }
        };
        self.reply(chat_id, reply, None).await;
    }

    /// Send failures are logged and swallowed; there is nobody to tell.
    async fn reply(&self, chat_id: i64, text: String, parse_mode: Option<ParseMode>) {
        if let Err(e) = self.sender.send(ChatId(chat_id), text, parse_mode).await {
            tracing::error!("Failed to send message to chat {}: {}", chat_id, e);
        }
    }
}

#[async_trait]
impl ReminderListener for CommandRouter {
    async fn reminder_fired(&self, reminder: FiredReminder) {
        tracing::info!("Reminder activated for chat {}", reminder.id);
        let text = messages::activated_reminder(&reminder);
        self.reply(reminder.id, text, None).await;
    }
}
