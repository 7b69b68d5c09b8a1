//! Validated query-string extractor.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use richiesta_core::error::CoreError;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// Deserializes the query string into `T` and runs its `validator` rules.
///
/// Both malformed query strings and rule violations are rejected with a
/// 400 `VALIDATION_ERROR` envelope.
///
/// ```ignore
/// async fn list(ValidatedQuery(params): ValidatedQuery<ListQuery>) -> AppResult<...>
/// ```
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::Core(CoreError::Validation(rejection.body_text())))?;
        params.validate()?;
        Ok(Self(params))
    }
}
