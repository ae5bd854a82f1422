//! # Reminder Bot Main Entry Point
//!
//! Initializes logging, loads configuration, sets up the database, wires
//! the command router to the reminder service, and runs the Telegram bot
//! next to the web app and health endpoints.

use anyhow::Result;
use serde_json::json;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reminder_bot::bot::handlers::BotHandler;
use reminder_bot::bot::router::CommandRouter;
use reminder_bot::bot::transport::TelegramSender;
use reminder_bot::config::Config;
use reminder_bot::database::connection::DatabaseManager;
use reminder_bot::database::sqlite::SqliteStore;
use reminder_bot::services::health::HealthService;
use reminder_bot::services::reminder::ReminderService;
use reminder_bot::utils::logging::log_system_event;
use reminder_bot::web::create_app;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reminder_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting Reminder Bot v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded - Database: {}, HTTP Port: {}",
        config.database_url, config.http_port);

    // Initialize database
    info!("Initializing database connection...");
    let db_manager = DatabaseManager::new(&config.database_url).await?;
    info!("Running database migrations...");
    db_manager.run_migrations().await?;
    let db_arc = Arc::new(db_manager.clone());
    let store = SqliteStore::new(db_manager);
    info!("Database initialized successfully");

    // Initialize bot and command router
    info!("Initializing Telegram bot...");
    let bot = Bot::new(&config.telegram_bot_token);
    let router = Arc::new(CommandRouter::new(
        Arc::new(TelegramSender::new(bot.clone())),
        Arc::new(store.clone()),
        config.web_app_url.clone(),
    ));
    router.listen_for_reminders();
    let handler = BotHandler::new(router);
    info!("Telegram bot initialized successfully");

    // Initialize and start reminder service
    info!("Initializing reminder service...");
    let mut reminder_service = match ReminderService::new(store).await {
        Ok(service) => {
            info!("Reminder service initialized successfully");
            service
        },
        Err(e) => {
            tracing::error!("Failed to create reminder service: {}", e);
            return Err(anyhow::anyhow!("Failed to create reminder service: {}", e));
        }
    };

    // Reminders that fell due while the bot was down go out right away
    match reminder_service.check_reminders_now().await {
        Ok(fired) => info!("Startup check fired {} overdue reminder(s)", fired),
        Err(e) => tracing::error!("Startup reminder check failed: {}", e),
    }

    if let Err(e) = reminder_service.start().await {
        tracing::error!("Failed to start reminder service: {}", e);
    } else {
        info!("Reminder service started successfully");
    }

    // Web app and health endpoints share one listener
    let web = create_app(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "webAppUrl": config.web_app_url,
    }));
    let http_router = HealthService::new(db_arc).router.merge(web.app);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("HTTP server starting on port {}", config.http_port);

    let bot_task = tokio::spawn(async move {
        Dispatcher::builder(bot, handler.schema())
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    });

    let http_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, http_router).await {
            tracing::error!("HTTP server error: {}", e);
        }
    });

    // Wait for either task to complete (which would indicate shutdown)
    tokio::select! {
        result1 = bot_task => {
            if let Err(e) = result1 {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result2 = http_task => {
            if let Err(e) = result2 {
                tracing::error!("HTTP task error: {}", e);
            }
        }
    }

    if let Err(e) = reminder_service.stop().await {
        tracing::warn!("Error stopping reminder service: {}", e);
    }

    log_system_event("Application stopped", None);
    Ok(())
}
