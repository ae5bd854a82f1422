use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::database::connection::DatabaseManager;
use crate::database::models::{STATUS_FIRED, STATUS_PENDING};

/// Body of `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub version: String,
    pub checked_at: DateTime<Utc>,
    pub uptime_seconds: i64,
    pub database: DatabaseReport,
    /// Absent when the database could not be queried.
    pub reminders: Option<ReminderCounts>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseReport {
    pub reachable: bool,
    pub pool_size: u32,
    pub latency_ms: u128,
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReminderCounts {
    pub pending: i64,
    pub fired: i64,
}

#[derive(Clone)]
struct HealthState {
    db: Arc<DatabaseManager>,
    started_at: DateTime<Utc>,
}

/// Liveness and readiness routes for the process.
pub struct HealthService {
    pub router: Router,
}

impl HealthService {
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        let state = HealthState {
            db,
            started_at: Utc::now(),
        };

        let router = Router::new()
            .route("/health", get(health))
            .route("/health/ready", get(ready))
            .route("/health/live", get(|| async { Json("alive") }))
            .with_state(state);

        Self { router }
    }
}

async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthReport>) {
    let started = Instant::now();
    let reachable = state.db.ping().await.is_ok();
    let latency_ms = started.elapsed().as_millis();

    let reminders = if reachable {
        reminder_counts(&state.db).await.ok()
    } else {
        None
    };

    let now = Utc::now();
    let report = HealthReport {
        status: if reachable { "healthy" } else { "unhealthy" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checked_at: now,
        uptime_seconds: (now - state.started_at).num_seconds().max(0),
        database: DatabaseReport {
            reachable,
            pool_size: state.db.pool.size(),
            latency_ms,
        },
        reminders,
    };

    let code = if reachable { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (code, Json(report))
}

async fn ready(State(state): State<HealthState>) -> Result<Json<&'static str>, StatusCode> {
    state
        .db
        .ping()
        .await
        .map(|_| Json("ready"))
        .map_err(|_| StatusCode::SERVICE_UNAVAILABLE)
}

async fn reminder_counts(db: &DatabaseManager) -> Result<ReminderCounts, sqlx::Error> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        "SELECT status, COUNT(*) FROM reminders GROUP BY status",
    )
    .fetch_all(&db.pool)
    .await?;

    let mut counts = ReminderCounts::default();
    for (status, count) in rows {
        match status.as_str() {
            STATUS_PENDING => counts.pending = count,
            STATUS_FIRED => counts.fired = count,
            _ => {}
        }
    }
    Ok(counts)
}
