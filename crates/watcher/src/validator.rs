use serde_json::Value;

use review_common::error::AppError;

/// Check the decoded API payload and return the most recent homework record.
///
/// Only the first element of `homeworks` is consulted; the rest are ignored.
pub fn check_response(response: &Value) -> Result<&Value, AppError> {
    let payload = response
        .as_object()
        .ok_or_else(|| AppError::shape("not a mapping"))?;

    let homeworks = payload
        .get("homeworks")
        .ok_or_else(|| AppError::shape("missing homeworks"))?
        .as_array()
        .ok_or_else(|| AppError::shape("homeworks not a list"))?;

    homeworks
        .first()
        .ok_or_else(|| AppError::shape("no homeworks"))
}
