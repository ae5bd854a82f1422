use tracing::{debug, error, info, warn};

/// Logs an inbound command with consistent format
pub fn log_command_start(command: &str, chat_id: i64, details: Option<&str>) {
    match details {
        Some(d) => info!("CMD_START: {} in chat {} - {}", command, chat_id, d),
        None => info!("CMD_START: {} in chat {}", command, chat_id),
    }
}

/// Logs command completion with consistent format
pub fn log_command_success(command: &str, chat_id: i64, details: Option<&str>) {
    match details {
        Some(d) => info!("CMD_SUCCESS: {} in chat {} - {}", command, chat_id, d),
        None => info!("CMD_SUCCESS: {} in chat {}", command, chat_id),
    }
}

/// Logs command errors with consistent format
pub fn log_command_error(command: &str, chat_id: i64, error: &str) {
    error!("CMD_ERROR: {} in chat {} - {}", command, chat_id, error);
}

/// Logs rejected user input. Only the field and value are recorded.
pub fn log_validation_error(command: &str, field: &str, value: &str, chat_id: i64) {
    warn!(
        "VALIDATION_ERROR: {} - {} field '{}' invalid in chat {}",
        command, field, value, chat_id
    );
}

pub fn log_database_operation(operation: &str, table: &str, details: Option<&str>) {
    match details {
        Some(d) => debug!("DB_OP: {} on {} - {}", operation, table, d),
        None => debug!("DB_OP: {} on {}", operation, table),
    }
}

pub fn log_database_error(operation: &str, table: &str, error: &str, details: Option<&str>) {
    match details {
        Some(d) => error!("DB_ERROR: {} on {} failed: {} - {}", operation, table, error, d),
        None => error!("DB_ERROR: {} on {} failed: {}", operation, table, error),
    }
}

/// Logs system events with consistent format
pub fn log_system_event(event: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("SYSTEM: {} - {}", event, d),
        None => info!("SYSTEM: {}", event),
    }
}
