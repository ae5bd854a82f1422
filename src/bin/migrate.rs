//! Schema maintenance for the reminder database.
//!
//! `migrate [up|check|reset|help]`, reading `DATABASE_URL` from the
//! environment or `.env`.

use anyhow::{anyhow, bail, Context, Result};
use reminder_bot::config::DEFAULT_DATABASE_URL;
use reminder_bot::database::connection::{sqlite_path, DatabaseManager};
use std::io::{self, Write};
use std::path::Path;

enum Command {
    Up,
    Check,
    Reset,
    Help,
}

impl Command {
    fn parse(arg: Option<&str>) -> Result<Self> {
        match arg.unwrap_or("up") {
            "migrate" | "up" => Ok(Command::Up),
            "check" => Ok(Command::Check),
            "reset" => Ok(Command::Reset),
            "help" | "--help" | "-h" => Ok(Command::Help),
            other => Err(anyhow!("Unknown command: {other}")),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    dotenvy::dotenv().ok();

    let arg = std::env::args().nth(1);
    let command = match Command::parse(arg.as_deref()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{e}");
            print_help();
            std::process::exit(1);
        }
    };

    let database_url = std::env::var("DATABASE_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

    match command {
        Command::Up => up(&database_url).await,
        Command::Check => check(&database_url).await,
        Command::Reset => reset(&database_url).await,
        Command::Help => {
            print_help();
            Ok(())
        }
    }
}

async fn connect(database_url: &str) -> Result<DatabaseManager> {
    println!("📊 Database: {database_url}");
    DatabaseManager::new(database_url)
        .await
        .with_context(|| format!("Failed to connect to {database_url}"))
}

async fn up(database_url: &str) -> Result<()> {
    let db = connect(database_url).await?;
    println!("🚀 Running migrations...");
    db.run_migrations().await.context("Migration failed")?;
    println!("✅ Schema is up to date");
    Ok(())
}

async fn check(database_url: &str) -> Result<()> {
    let db = connect(database_url).await?;
    let tables = sqlx::query_scalar::<_, String>(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE '_sqlx%' ORDER BY name",
    )
    .fetch_all(&db.pool)
    .await?;

    if tables.is_empty() {
        println!("⚠️  No tables yet, run `migrate up`");
        return Ok(());
    }

    println!("📋 Tables:");
    for table in tables {
        let rows = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM \"{table}\""))
            .fetch_one(&db.pool)
            .await?;
        println!("  • {table} ({rows} rows)");
    }
    Ok(())
}

async fn reset(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        bail!("Reset needs a file-backed SQLite database, got {database_url}");
    };

    print!("⚠️  Delete every reminder, user and web session in {path}? Type 'yes': ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    if !answer.trim().eq_ignore_ascii_case("yes") {
        println!("Reset cancelled");
        return Ok(());
    }

    if Path::new(path).exists() {
        std::fs::remove_file(path).with_context(|| format!("Failed to delete {path}"))?;
        println!("🗑️  Deleted {path}");
    }
    up(database_url).await
}

fn print_help() {
    println!(
        "\
⏰ Reminder Bot - database tool

USAGE:
    migrate [COMMAND]

COMMANDS:
    up, migrate    Apply pending migrations (default)
    check          List tables with their row counts
    reset          Delete the SQLite file and re-run migrations
    help           Show this message

ENVIRONMENT:
    DATABASE_URL   Connection string (default: {DEFAULT_DATABASE_URL})"
    );
}
