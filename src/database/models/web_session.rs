use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A companion web session bound to a chat by a token pair.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct WebSession {
    pub public_token: String,
    pub private_token: String,
    pub chat_id: i64,
    pub created_at: String,
}

impl WebSession {
    pub async fn create(
        pool: &sqlx::SqlitePool,
        chat_id: i64,
        public_token: &str,
        private_token: &str,
    ) -> Result<Self, sqlx::Error> {
        let created_at = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO web_sessions (public_token, private_token, chat_id, created_at) VALUES (?, ?, ?, ?)"
        )
        .bind(public_token)
        .bind(private_token)
        .bind(chat_id)
        .bind(&created_at)
        .execute(pool)
        .await?;

        Ok(WebSession {
            public_token: public_token.to_string(),
            private_token: private_token.to_string(),
            chat_id,
            created_at,
        })
    }
}
