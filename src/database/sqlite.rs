use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::sync::{Arc, RwLock};

use crate::database::connection::DatabaseManager;
use crate::database::models::{Reminder, User, WebSession};
use crate::database::store::{
    ChatMeta, FiredReminder, NewReminder, ReminderListener, ReminderOutcome, ReminderStore,
    StoreError, StoreResult, WebLinkTokens,
};
use crate::utils::datetime::{self, DATE_FORMAT, TIME_FORMAT};
use crate::utils::logging::{log_database_error, log_database_operation};

/// [`ReminderStore`] backed by the SQLite pool.
#[derive(Clone)]
pub struct SqliteStore {
    db: DatabaseManager,
    listener: Arc<RwLock<Option<Arc<dyn ReminderListener>>>>,
}

impl SqliteStore {
    pub fn new(db: DatabaseManager) -> Self {
        Self {
            db,
            listener: Arc::new(RwLock::new(None)),
        }
    }

    pub fn db(&self) -> &DatabaseManager {
        &self.db
    }

    fn current_listener(&self) -> Option<Arc<dyn ReminderListener>> {
        match self.listener.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Marks every pending reminder due at `now` as fired and notifies the
    /// registered listener once per reminder. Returns how many fired.
    ///
    /// Reminders are marked even when no listener is registered; they are
    /// not replayed later.
    pub async fn fire_due(&self, now: NaiveDateTime) -> StoreResult<usize> {
        let due = Reminder::find_due(&self.db.pool, now).await?;
        let listener = self.current_listener();
        let mut fired = 0;

        for reminder in due {
            // Lost the race to another worker
            if !Reminder::mark_fired(&self.db.pool, &reminder.id).await? {
                continue;
            }
            fired += 1;
            log_database_operation("UPDATE", "reminders", Some(&format!("fired {}", reminder.id)));

            match &listener {
                Some(listener) => {
                    listener
                        .reminder_fired(FiredReminder {
                            id: reminder.chat_id,
                            text: reminder.text,
                            date: reminder.date,
                            time: reminder.time,
                        })
                        .await;
                }
                None => tracing::warn!(
                    "Reminder {} fired with no listener registered",
                    reminder.id
                ),
            }
        }

        Ok(fired)
    }
}

#[async_trait]
impl ReminderStore for SqliteStore {
    async fn start_new_user(&self, chat: &ChatMeta) -> StoreResult<()> {
        log_database_operation("UPSERT", "users", Some(&chat.chat_id.to_string()));
        User::upsert(
            &self.db.pool,
            chat.chat_id,
            chat.first_name.as_deref(),
            chat.last_name.as_deref(),
            chat.username.as_deref(),
        )
        .await
        .map_err(|e| {
            log_database_error("UPSERT", "users", &e.to_string(), None);
            e
        })?;
        Ok(())
    }

    async fn create_reminder(
        &self,
        chat_id: i64,
        reminder: &NewReminder,
    ) -> StoreResult<ReminderOutcome> {
        let (Some(date), Some(time)) = (
            datetime::parse_date(&reminder.date),
            datetime::parse_time(&reminder.time),
        ) else {
            return Err(StoreError::InvalidDateTime(format!(
                "{} {}",
                reminder.date, reminder.time
            )));
        };
        let date = date.format(DATE_FORMAT).to_string();
        let time = time.format(TIME_FORMAT).to_string();
        let fire_at = datetime::fire_at(&date, &time)
            .ok_or_else(|| StoreError::InvalidDateTime(format!("{date} {time}")))?;
        let text = reminder.text.trim();

        log_database_operation("INSERT", "reminders", Some(&format!("chat {chat_id} at {fire_at}")));
        let created = Reminder::create(&self.db.pool, chat_id, text, &date, &time, &fire_at)
            .await
            .map_err(|e| {
                log_database_error("INSERT", "reminders", &e.to_string(), None);
                e
            })?;

        Ok(match created {
            Some(_) => ReminderOutcome::Created,
            None => ReminderOutcome::AlreadyExists,
        })
    }

    async fn list_reminders(&self, chat_id: i64, is_today: bool) -> StoreResult<String> {
        let today = datetime::now().format(DATE_FORMAT).to_string();
        let day = is_today.then_some(today.as_str());

        log_database_operation("SELECT", "reminders", Some(&format!("chat {chat_id}")));
        let reminders = Reminder::find_pending_by_chat(&self.db.pool, chat_id, day)
            .await
            .map_err(|e| {
                log_database_error("SELECT", "reminders", &e.to_string(), None);
                e
            })?;
        Ok(format_reminder_list(&reminders))
    }

    async fn set_up_web_connection(
        &self,
        tokens: &WebLinkTokens,
        chat_id: i64,
    ) -> StoreResult<String> {
        log_database_operation("INSERT", "web_sessions", Some(&format!("chat {chat_id}")));
        let session = WebSession::create(
            &self.db.pool,
            chat_id,
            &tokens.public_token,
            &tokens.private_token,
        )
        .await?;
        Ok(session.public_token)
    }

    fn register_listener(&self, listener: Arc<dyn ReminderListener>) {
        match self.listener.write() {
            Ok(mut guard) => *guard = Some(listener),
            Err(poisoned) => *poisoned.into_inner() = Some(listener),
        }
    }
}

/// One line per reminder, numbered in firing order.
pub fn format_reminder_list(reminders: &[Reminder]) -> String {
    if reminders.is_empty() {
        return "No reminders yet.".to_string();
    }

    reminders
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{}. {} {} - {}", i + 1, r.date, r.time, r.text))
        .collect::<Vec<_>>()
        .join("\n")
}
