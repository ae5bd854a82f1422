//! User-facing reply texts.

use crate::database::store::{FiredReminder, NewReminder};

pub const HELP: &str = "⏰ Reminder Bot commands:\n\n\
/start - register this chat\n\
/remind <text> <DD.MM.YYYY> <HH:MM> - set a reminder\n\
/list - show all pending reminders\n\
/today - show today's reminders\n\
/link - open your reminders in the web app\n\
/help - show this message\n\n\
Example: /remind call the dentist 24.12.2026 09:30";

pub const LINK: &str = "Open your reminders in the web app";

pub const ERROR: &str = "❌ Something went wrong. Please try again later.";

pub const INVALID_DATETIME: &str =
    "⚠️ Invalid date or time. Use DD.MM.YYYY HH:MM and pick a moment that hasn't passed yet.";

pub const REMINDER_EXISTS: &str = "ℹ️ You already have this reminder.";

pub const INVALID_REMIND: &str =
    "⚠️ I couldn't read that reminder. Use: /remind <text> <DD.MM.YYYY> <HH:MM>";

pub const INVALID: &str = "🤔 I don't know that command. Send /help to see what I can do.";

pub fn start(name: Option<&str>) -> String {
    format!(
        "👋 Hi, {}! I'll keep your reminders.\n\nSend /help to see all commands.",
        name.unwrap_or("there")
    )
}

pub fn success_reminder(reminder: &NewReminder) -> String {
    format!(
        "✅ Reminder set: \"{}\" on {} at {}",
        reminder.text, reminder.date, reminder.time
    )
}

pub fn lists(list: &str, is_today: bool) -> String {
    let heading = if is_today {
        "📅 Today's reminders:"
    } else {
        "📋 All your reminders:"
    };
    format!("{heading}\n\n{list}")
}

pub fn activated_reminder(reminder: &FiredReminder) -> String {
    format!(
        "🔔 Reminder: {}\n\n📅 {} at {}",
        reminder.text, reminder.date, reminder.time
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_greets_by_name() {
        assert!(start(Some("Ada")).contains("Ada"));
        assert!(start(None).contains("there"));
    }

    #[test]
    fn test_lists_heading() {
        assert!(lists("1. x", true).starts_with("📅 Today's"));
        assert!(lists("1. x", false).starts_with("📋 All"));
        assert!(lists("1. x", false).ends_with("1. x"));
    }

    #[test]
    fn test_activated_reminder_mentions_all_fields() {
        let msg = activated_reminder(&FiredReminder {
            id: 1,
            text: "stretch".to_string(),
            date: "20.10.2026".to_string(),
            time: "08:00".to_string(),
        });
        assert!(msg.contains("stretch"));
        assert!(msg.contains("20.10.2026"));
        assert!(msg.contains("08:00"));
    }
}
