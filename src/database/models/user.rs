use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub chat_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub created_at: String,
}

impl User {
    pub async fn find_by_chat_id(
        pool: &sqlx::SqlitePool,
        chat_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT chat_id, first_name, last_name, username, created_at FROM users WHERE chat_id = ?"
        )
        .bind(chat_id)
        .fetch_optional(pool)
        .await
    }

    /// Creates the user or refreshes the names of an existing one.
    pub async fn upsert(
        pool: &sqlx::SqlitePool,
        chat_id: i64,
        first_name: Option<&str>,
        last_name: Option<&str>,
        username: Option<&str>,
    ) -> Result<Self, sqlx::Error> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO users (chat_id, first_name, last_name, username, created_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (chat_id) DO UPDATE SET
                first_name = excluded.first_name,
                last_name = excluded.last_name,
                username = excluded.username
            "#,
        )
        .bind(chat_id)
        .bind(first_name)
        .bind(last_name)
        .bind(username)
        .bind(&now)
        .execute(pool)
        .await?;

        Self::find_by_chat_id(pool, chat_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }
}
