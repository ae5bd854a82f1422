/// Date and time parsing and reminder validation
pub mod datetime;
/// Structured log lines shared by the bot and services
pub mod logging;
/// Telegram MarkdownV2 escaping
pub mod markdown;
