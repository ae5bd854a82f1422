//! # Reminder Bot
//!
//! A Telegram bot that keeps personal reminders, plus the bootstrap of its
//! companion web app.
//!
//! ## Features
//! - `/remind <text> <DD.MM.YYYY> <HH:MM>` with date/time validation
//! - Listing all or today's pending reminders
//! - Reminder delivery to the owning chat when due
//! - Token-linked web sessions
//! - Persistent storage with SQLite

/// Command routing, reply texts and the Telegram transport
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Database models, connections, and the persistence boundary
pub mod database;
/// Background services like reminder delivery and health checks
pub mod services;
/// Utility functions for datetime, logging, and formatting
pub mod utils;
/// Web app bootstrap: router, store and root component
pub mod web;
