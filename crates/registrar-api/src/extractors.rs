//! # Custom Extractors
//!
//! Maps JSON body rejections to [`AppError::BadRequest`] so malformed
//! bodies get the same structured error shape as every other failure.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::AppError;

/// Extract a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
///
/// Handlers take `Result<Json<T>, JsonRejection>` and call this first:
/// ```ignore
/// async fn handler(body: Result<Json<T>, JsonRejection>) -> Result<..., AppError> {
///     let req = extract_json(body)?;
/// }
/// ```
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}
