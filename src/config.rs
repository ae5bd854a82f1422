use anyhow::{anyhow, Result};
use std::env;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/reminders.db";
const DEFAULT_WEB_APP_URL: &str = "http://localhost:3000/link";

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub database_url: String,
    pub http_port: u16,
    /// Base URL the `/link` command appends the session identifier to
    pub web_app_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }

        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let port_str = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "3000".to_string());
        let http_port = port_str.trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        let web_app_url = env::var("WEB_APP_URL")
            .ok()
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_WEB_APP_URL.to_string());

        Ok(Config {
            telegram_bot_token: token,
            database_url,
            http_port,
            web_app_url,
        })
    }
}

pub fn create_web_app_url(base: &str, session_id: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), session_id)
}
