//! Background tasks.
//!
//! Each task is owned by a manager with `start`/`stop` and shuts down through
//! a [`tokio_util::sync::CancellationToken`].

pub mod health_monitor;

pub use health_monitor::{
    DatabaseStatus, HealthMonitor, HealthProbe, HealthSnapshot, PgProbe, ProbeError,
};
