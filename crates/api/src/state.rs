use std::sync::Arc;

use richiesta_db::RecordStore;

use crate::background::HealthMonitor;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Source of raw records.
    pub store: Arc<dyn RecordStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Database health snapshot publisher.
    pub health: Arc<HealthMonitor>,
}
