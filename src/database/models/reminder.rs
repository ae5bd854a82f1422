use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::datetime::FIRE_AT_FORMAT;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_FIRED: &str = "fired";

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Reminder {
    pub id: String,
    pub chat_id: i64,
    pub text: String,
    pub date: String,
    pub time: String,
    pub fire_at: String,
    pub status: String, // 'pending', 'fired'
    pub created_at: String,
}

const COLUMNS: &str = "id, chat_id, text, date, time, fire_at, status, created_at";

impl Reminder {
    /// Inserts a pending reminder. Returns `Ok(None)` when the
    /// (chat, text, date, time) key is already taken.
    pub async fn create(
        pool: &sqlx::SqlitePool,
        chat_id: i64,
        text: &str,
        date: &str,
        time: &str,
        fire_at: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"
            INSERT INTO reminders (id, chat_id, text, date, time, fire_at, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, 'pending', ?)
            ON CONFLICT (chat_id, text, date, time) DO NOTHING
            "#,
        )
        .bind(&id)
        .bind(chat_id)
        .bind(text)
        .bind(date)
        .bind(time)
        .bind(fire_at)
        .bind(&created_at)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(Reminder {
            id,
            chat_id,
            text: text.to_string(),
            date: date.to_string(),
            time: time.to_string(),
            fire_at: fire_at.to_string(),
            status: STATUS_PENDING.to_string(),
            created_at,
        }))
    }

    /// Pending reminders of a chat in firing order. With `day` set, only
    /// those falling on that day (`DD.MM.YYYY`).
    pub async fn find_pending_by_chat(
        pool: &sqlx::SqlitePool,
        chat_id: i64,
        day: Option<&str>,
    ) -> Result<Vec<Self>, sqlx::Error> {
        match day {
            Some(day) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM reminders WHERE chat_id = ? AND status = 'pending' AND date = ? ORDER BY fire_at"
                );
                sqlx::query_as::<_, Reminder>(&query)
                    .bind(chat_id)
                    .bind(day)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM reminders WHERE chat_id = ? AND status = 'pending' ORDER BY fire_at"
                );
                sqlx::query_as::<_, Reminder>(&query)
                    .bind(chat_id)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Pending reminders whose `fire_at` is at or before `now`.
    pub async fn find_due(
        pool: &sqlx::SqlitePool,
        now: NaiveDateTime,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let now = now.format(FIRE_AT_FORMAT).to_string();
        let query = format!(
            "SELECT {COLUMNS} FROM reminders WHERE status = 'pending' AND fire_at <= ? ORDER BY fire_at"
        );
        sqlx::query_as::<_, Reminder>(&query)
            .bind(now)
            .fetch_all(pool)
            .await
    }

    /// Flips a pending reminder to fired. Returns false if another worker
    /// got there first.
    pub async fn mark_fired(pool: &sqlx::SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE reminders SET status = 'fired' WHERE id = ? AND status = 'pending'"
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
