//! HTTP handlers, one module per resource.
//!
//! Handlers fetch raw records from the [`RecordStore`](richiesta_db::RecordStore),
//! pass them through `richiesta_core::shaping` and wrap the result in the
//! response envelope.

pub mod category;
pub mod notification;
pub mod quote;
pub mod request;
pub mod user;

use richiesta_core::error::CoreError;
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Shape a single looked-up record, mapping a missing one to 404.
fn shape_found<T>(
    entity: &'static str,
    id: String,
    record: Option<Value>,
    shape: fn(Option<&Value>) -> Option<T>,
) -> AppResult<T> {
    let Some(record) = record else {
        return Err(AppError::Core(CoreError::NotFound { entity, id }));
    };
    shape(Some(&record))
        .ok_or_else(|| AppError::InternalError(format!("{entity} {id} is not a JSON object")))
}
