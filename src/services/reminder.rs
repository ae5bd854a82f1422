use tokio_cron_scheduler::{Job, JobScheduler};

use crate::database::sqlite::SqliteStore;
use crate::utils::datetime;

/// Runs once a minute, at second zero.
const CHECK_SCHEDULE: &str = "0 * * * * *";

type ServiceResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Fires due reminders through the store's registered listener.
pub struct ReminderService {
    store: SqliteStore,
    scheduler: JobScheduler,
}

impl ReminderService {
    pub async fn new(store: SqliteStore) -> ServiceResult<Self> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self { store, scheduler })
    }

    pub async fn start(&mut self) -> ServiceResult<()> {
        let store = self.store.clone();

        let reminder_job = Job::new_async(CHECK_SCHEDULE, move |_uuid, _l| {
            let store = store.clone();
            Box::pin(async move {
                if let Err(e) = check_and_fire_reminders(&store).await {
                    tracing::error!("Failed to fire reminders: {}", e);
                }
            })
        })?;

        self.scheduler.add(reminder_job).await?;
        self.scheduler.start().await?;

        tracing::info!("Reminder service started - checking for due reminders every minute");
        Ok(())
    }

    pub async fn stop(&mut self) -> ServiceResult<()> {
        self.scheduler.shutdown().await?;
        Ok(())
    }

    /// Runs one check immediately instead of waiting for the schedule.
    pub async fn check_reminders_now(&self) -> ServiceResult<usize> {
        check_and_fire_reminders(&self.store).await
    }
}

async fn check_and_fire_reminders(store: &SqliteStore) -> ServiceResult<usize> {
    let fired = store.fire_due(datetime::now()).await?;
    if fired > 0 {
        tracing::info!("Fired {} reminder(s)", fired);
    }
    Ok(fired)
}
