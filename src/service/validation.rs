//! Request body parsing and per-field validation rules.

use crate::error::AppError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Field-level checks a payload runs after it has been deserialized.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

pub struct RequestValidator;

impl RequestValidator {
    /// Turn a JSON request body into a typed payload.
    ///
    /// Unparsable JSON, non-object bodies, unknown fields, wrong types, explicit nulls and
    /// failed field rules all become `AppError::Validation` prefixed with `context`.
    /// A body over the request size limit is `AppError::PayloadTooLarge`.
    pub fn parse<T>(body: Result<Json<Value>, JsonRejection>, context: &str) -> Result<T, AppError>
    where
        T: DeserializeOwned + Validate,
    {
        let Json(value) = body.map_err(|e| rejected(context, e))?;
        Self::parse_value(value, context)
    }

    pub fn parse_value<T>(value: Value, context: &str) -> Result<T, AppError>
    where
        T: DeserializeOwned + Validate,
    {
        if !value.is_object() {
            return Err(invalid(context, "body must be a JSON object"));
        }
        let payload: T = serde_json::from_value(value).map_err(|e| invalid(context, e))?;
        payload.validate().map_err(|e| invalid(context, e))?;
        Ok(payload)
    }
}

fn rejected(context: &str, rejection: JsonRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge(rejection.body_text());
    }
    invalid(context, rejection.body_text())
}

fn invalid(context: &str, detail: impl std::fmt::Display) -> AppError {
    AppError::Validation(format!("{}: {}", context, detail))
}

pub fn not_blank(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} must not be blank", field));
    }
    Ok(())
}

pub fn max_length(field: &str, value: &str, max: usize) -> Result<(), String> {
    if value.chars().count() > max {
        return Err(format!("{} must be at most {} characters", field, max));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MovieChanges, NewDirector};
    use serde_json::json;

    #[test]
    fn message_carries_context_and_detail() {
        let err = RequestValidator::parse_value::<NewDirector>(json!({"nme": "x"}), "invalid data")
            .unwrap_err();
        let AppError::Validation(message) = err else {
            panic!("expected validation error");
        };
        assert!(message.starts_with("invalid data: "));
        assert!(message.contains("nme"));
    }

    #[test]
    fn arrays_are_not_payloads() {
        let err = RequestValidator::parse_value::<MovieChanges>(json!([1, 2]), "invalid data");
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    #[test]
    fn field_rules_run_after_deserialization() {
        let err = RequestValidator::parse_value::<NewDirector>(json!({"name": ""}), "invalid data");
        assert!(matches!(err, Err(AppError::Validation(m)) if m.contains("blank")));
    }

    #[test]
    fn max_length_counts_characters() {
        assert!(max_length("name", "ёёё", 3).is_ok());
        assert!(max_length("name", "ёёёё", 3).is_err());
    }
}
