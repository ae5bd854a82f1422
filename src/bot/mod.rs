/// Telegram dispatcher wiring
pub mod handlers;
/// Reply texts
pub mod messages;
/// Ordered command pattern table
pub mod patterns;
/// Intent dispatch and the reminder-fired hook
pub mod router;
/// Outbound message transport
pub mod transport;
