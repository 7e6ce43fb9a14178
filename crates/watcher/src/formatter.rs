use serde_json::Value;

use review_common::error::AppError;
use review_common::types::HomeworkStatus;

/// Render the notification text for a homework record.
pub fn parse_status(homework: &Value) -> Result<String, AppError> {
    let name = homework
        .get("homework_name")
        .ok_or_else(|| AppError::shape("missing homework_name"))?;
    let raw_status = homework
        .get("status")
        .ok_or_else(|| AppError::shape("missing status"))?;

    let name = name
        .as_str()
        .ok_or_else(|| AppError::shape("homework_name is not a string"))?;
    let status = match raw_status.as_str() {
        Some(s) => HomeworkStatus::parse(s).ok_or_else(|| AppError::UnknownStatus(s.to_string()))?,
        None => return Err(AppError::UnknownStatus(raw_status.to_string())),
    };

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        name,
        status.verdict()
    ))
}
