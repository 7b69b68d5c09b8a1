//! Periodic database health monitoring.
//!
//! [`HealthMonitor`] owns one background task that runs a [`HealthProbe`] on
//! a fixed interval and publishes the result as a [`HealthSnapshot`] through a
//! `tokio::sync::watch` channel. Handlers and the database gate read the latest
//! snapshot without touching the database themselves.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use richiesta_core::types::Timestamp;
use richiesta_db::DbPool;
use serde::Serialize;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Upper bound on a single probe before it counts as a failure.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// How long `stop` waits for the task to exit after cancelling it.
const STOP_TIMEOUT: Duration = Duration::from_secs(5);

/// Failure reported by a [`HealthProbe`].
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ProbeError(pub String);

impl From<sqlx::Error> for ProbeError {
    fn from(err: sqlx::Error) -> Self {
        Self(err.to_string())
    }
}

/// A single reachability check against a dependency.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn probe(&self) -> Result<(), ProbeError>;
}

/// Probe that round-trips `SELECT 1` through the connection pool.
pub struct PgProbe {
    pool: DbPool,
}

impl PgProbe {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthProbe for PgProbe {
    async fn probe(&self) -> Result<(), ProbeError> {
        richiesta_db::health_check(&self.pool).await?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseStatus {
    /// No probe has completed yet.
    #[default]
    Unknown,
    Healthy,
    Unhealthy,
}

/// Latest known health state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSnapshot {
    pub database: DatabaseStatus,
    pub last_checked: Option<Timestamp>,
    pub last_error: Option<String>,
}

impl HealthSnapshot {
    pub fn is_unhealthy(&self) -> bool {
        self.database == DatabaseStatus::Unhealthy
    }
}

/// Owns the periodic probe task and the published snapshot.
///
/// Lifecycle: [`start`](Self::start) spawns the task (the first probe runs
/// immediately), [`stop`](Self::stop) cancels and joins it. Both are safe to
/// call more than once, and a stopped monitor can be started again.
pub struct HealthMonitor {
    probe: Arc<dyn HealthProbe>,
    interval: Duration,
    snapshot: watch::Sender<HealthSnapshot>,
    task: Mutex<Option<(CancellationToken, JoinHandle<()>)>>,
}

impl HealthMonitor {
    pub fn new(probe: Arc<dyn HealthProbe>, interval: Duration) -> Self {
        let (snapshot, _) = watch::channel(HealthSnapshot::default());
        Self {
            probe,
            interval,
            snapshot,
            task: Mutex::new(None),
        }
    }

    /// Spawn the periodic probe task. No-op if it is already running.
    pub async fn start(self: &Arc<Self>) {
        let mut task = self.task.lock().await;
        if task.is_some() {
            tracing::debug!("Health monitor already running");
            return;
        }

        let cancel = CancellationToken::new();
        let monitor = Arc::clone(self);
        let token = cancel.clone();
        let handle = tokio::spawn(async move { monitor.run(token).await });

        *task = Some((cancel, handle));
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "Health monitor started"
        );
    }

    /// Cancel the probe task and wait for it to exit.
    pub async fn stop(&self) {
        let Some((cancel, handle)) = self.task.lock().await.take() else {
            return;
        };

        cancel.cancel();
        if tokio::time::timeout(STOP_TIMEOUT, handle).await.is_err() {
            tracing::warn!("Health monitor did not stop in time");
        }
        tracing::info!("Health monitor stopped");
    }

    /// Run one probe, publish the result and return it.
    pub async fn check_now(&self) -> HealthSnapshot {
        let result = match tokio::time::timeout(PROBE_TIMEOUT, self.probe.probe()).await {
            Ok(result) => result,
            Err(_) => Err(ProbeError(format!(
                "probe timed out after {}s",
                PROBE_TIMEOUT.as_secs()
            ))),
        };

        let next = match result {
            Ok(()) => HealthSnapshot {
                database: DatabaseStatus::Healthy,
                last_checked: Some(Utc::now()),
                last_error: None,
            },
            Err(e) => HealthSnapshot {
                database: DatabaseStatus::Unhealthy,
                last_checked: Some(Utc::now()),
                last_error: Some(e.to_string()),
            },
        };

        let previous = self.snapshot.send_replace(next.clone());
        if previous.database != next.database {
            match next.database {
                DatabaseStatus::Unhealthy => tracing::warn!(
                    error = next.last_error.as_deref().unwrap_or_default(),
                    "Database became unavailable"
                ),
                _ => tracing::info!(status = ?next.database, "Database health changed"),
            }
        }

        next
    }

    /// The most recently published snapshot.
    pub fn current(&self) -> HealthSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Receiver that is notified on every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<HealthSnapshot> {
        self.snapshot.subscribe()
    }

    async fn run(&self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("Health monitor task stopping");
                    break;
                }
                _ = interval.tick() => {
                    self.check_now().await;
                }
            }
        }
    }
}
