use anyhow::Result;
use chrono::{Duration, NaiveDateTime};
use reminder_bot::database::{
    connection::DatabaseManager,
    models::*,
    sqlite::{format_reminder_list, SqliteStore},
    store::{ChatMeta, NewReminder, ReminderOutcome, ReminderStore, WebLinkTokens},
};
use reminder_bot::utils::datetime::{self, DATE_FORMAT, FIRE_AT_FORMAT};
use tempfile::{tempdir, TempDir};

async fn setup_test_db() -> Result<(DatabaseManager, TempDir)> {
    let temp_dir = tempdir()?;
    let db_path = temp_dir.path().join("test.db");
    let database_url = format!("sqlite:{}", db_path.display());

    let db_manager = DatabaseManager::new(&database_url).await?;
    db_manager.run_migrations().await?;

    Ok((db_manager, temp_dir))
}

fn reminder(text: &str, date: &str, time: &str) -> NewReminder {
    NewReminder {
        text: text.to_string(),
        date: date.to_string(),
        time: time.to_string(),
    }
}

#[tokio::test]
async fn test_user_upsert_refreshes_names() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let user = User::upsert(&db.pool, 42, Some("Ada"), None, Some("ada")).await?;
    assert_eq!(user.chat_id, 42);
    assert_eq!(user.first_name.as_deref(), Some("Ada"));

    let user = User::upsert(&db.pool, 42, Some("Ada"), Some("Lovelace"), None).await?;
    assert_eq!(user.last_name.as_deref(), Some("Lovelace"));
    assert_eq!(user.username, None);

    let missing = User::find_by_chat_id(&db.pool, 7).await?;
    assert!(missing.is_none());

    Ok(())
}

#[tokio::test]
async fn test_start_new_user_is_idempotent() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    let store = SqliteStore::new(db.clone());
    let chat = ChatMeta {
        chat_id: 1001,
        first_name: Some("Grace".to_string()),
        ..Default::default()
    };

    store.start_new_user(&chat).await?;
    store.start_new_user(&chat).await?;

    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(&db.pool)
        .await?;
    assert_eq!(count, 1);

    Ok(())
}

#[tokio::test]
async fn test_create_reminder_detects_duplicates() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    let store = SqliteStore::new(db.clone());

    let first = store.create_reminder(5, &reminder("water plants", "24.12.2030", "09:30")).await?;
    assert_eq!(first, ReminderOutcome::Created);

    // Same key once normalised
    let again = store.create_reminder(5, &reminder("water plants", "24.12.2030", "9:30")).await?;
    assert_eq!(again, ReminderOutcome::AlreadyExists);

    // Another chat owns its own key space
    let other_chat = store.create_reminder(6, &reminder("water plants", "24.12.2030", "09:30")).await?;
    assert_eq!(other_chat, ReminderOutcome::Created);

    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reminders WHERE chat_id = 5")
        .fetch_one(&db.pool)
        .await?;
    assert_eq!(count, 1);

    Ok(())
}

#[tokio::test]
async fn test_concurrent_duplicate_creation_yields_one_row() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    let store = SqliteStore::new(db.clone());
    let new = reminder("standup", "01.02.2031", "10:00");

    let (a, b) = tokio::join!(store.create_reminder(9, &new), store.create_reminder(9, &new));
    let mut outcomes = vec![a?, b?];
    outcomes.sort_by_key(|o| *o == ReminderOutcome::AlreadyExists);
    assert_eq!(outcomes, vec![ReminderOutcome::Created, ReminderOutcome::AlreadyExists]);

    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reminders WHERE chat_id = 9")
        .fetch_one(&db.pool)
        .await?;
    assert_eq!(count, 1);

    Ok(())
}

#[tokio::test]
async fn test_create_reminder_rejects_unparseable_datetime() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    let store = SqliteStore::new(db);

    let result = store.create_reminder(5, &reminder("x", "31.02.2030", "09:30")).await;
    assert!(result.is_err());

    Ok(())
}

#[tokio::test]
async fn test_list_reminders_all_and_today() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    let store = SqliteStore::new(db);

    let today = datetime::now().format(DATE_FORMAT).to_string();
    store.create_reminder(3, &reminder("later", "01.01.2099", "08:00")).await?;
    store.create_reminder(3, &reminder("tonight", &today, "23:59")).await?;
    store.create_reminder(4, &reminder("someone else", &today, "23:59")).await?;

    let all = store.list_reminders(3, false).await?;
    assert_eq!(all.lines().count(), 2);
    assert!(all.starts_with(&format!("1. {today} 23:59 - tonight")));
    assert!(all.contains("2. 01.01.2099 08:00 - later"));

    let today_only = store.list_reminders(3, true).await?;
    assert_eq!(today_only, format!("1. {today} 23:59 - tonight"));

    let empty = store.list_reminders(77, false).await?;
    assert_eq!(empty, "No reminders yet.");

    Ok(())
}

#[tokio::test]
async fn test_web_connection_returns_public_token() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    let store = SqliteStore::new(db.clone());
    let tokens = WebLinkTokens::generate();

    let id = store.set_up_web_connection(&tokens, 11).await?;
    assert_eq!(id, tokens.public_token);

    let session = sqlx::query_as::<_, WebSession>(
        "SELECT public_token, private_token, chat_id, created_at FROM web_sessions WHERE public_token = ?"
    )
    .bind(&id)
    .fetch_one(&db.pool)
    .await?;
    assert_eq!(session.chat_id, 11);
    assert_eq!(session.private_token, tokens.private_token);

    Ok(())
}

#[tokio::test]
async fn test_find_due_and_mark_fired() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let created = Reminder::create(&db.pool, 1, "due", "01.01.2030", "10:00", "2030-01-01 10:00").await?;
    let created = created.ok_or_else(|| anyhow::anyhow!("not created"))?;
    Reminder::create(&db.pool, 1, "not yet", "01.01.2030", "10:01", "2030-01-01 10:01").await?;

    let now = NaiveDateTime::parse_from_str("2030-01-01 10:00", FIRE_AT_FORMAT)?;
    let due = Reminder::find_due(&db.pool, now).await?;
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].id, created.id);

    assert!(Reminder::mark_fired(&db.pool, &created.id).await?);
    // second flip is a no-op
    assert!(!Reminder::mark_fired(&db.pool, &created.id).await?);

    let due = Reminder::find_due(&db.pool, now + Duration::minutes(1)).await?;
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].text, "not yet");

    Ok(())
}

#[test]
fn test_format_reminder_list_empty() {
    assert_eq!(format_reminder_list(&[]), "No reminders yet.");
}
