/// HTTP liveness and readiness endpoints
pub mod health;
/// Scheduled firing of due reminders
pub mod reminder;
