//! Request middleware and extractors.
//!
//! - [`db_gate::require_database`] -- 503 while the database is unhealthy.
//! - [`query::ValidatedQuery`] -- query-string extraction with validation.

pub mod db_gate;
pub mod query;
