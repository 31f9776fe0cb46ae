use crate::crops::{CropInput, ErrorResponse, InputField};
use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use serde_json::Value;
use thiserror::Error;

/// Why a recommend request body was refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecommendError {
    #[error("Request body must be a JSON object")]
    NotAnObject,
    #[error("Missing required field: {0}")]
    MissingField(InputField),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(InputField, String),
    #[error("{0}")]
    MalformedBody(String),
}

impl IntoResponse for RecommendError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Reads a number, or a string holding one.
fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| !v.is_nan()),
        _ => None,
    }
}

/// Extracts the measurements and the optional model name from a request
/// body. Values are clamped into their field ranges.
pub fn parse_recommend_body(body: &Value) -> Result<(CropInput, Option<String>), RecommendError> {
    let object = body.as_object().ok_or(RecommendError::NotAnObject)?;

    let mut values = [0.0; 5];
    for (slot, field) in values.iter_mut().zip(InputField::all()) {
        let raw = object
            .get(field.as_ref())
            .ok_or(RecommendError::MissingField(field))?;
        *slot = parse_number(raw).ok_or_else(|| {
            let shown = match raw {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            RecommendError::InvalidValue(field, shown)
        })?;
    }

    let [nitrogen, phosphorus, potassium, temperature, humidity] = values;
    let model = object
        .get("model")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok((
        CropInput::new(nitrogen, phosphorus, potassium, temperature, humidity),
        model,
    ))
}
