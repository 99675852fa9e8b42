use serde_json::Value as JsonValue;
use thiserror::Error;

/// Shown when an error body is a JSON object without a `detail` field.
pub const NO_DETAIL: &str = "No details provided";

/// The model list could not be fetched or decoded.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Failed to fetch the model list from the API server: {0}")]
pub struct ModelListError(pub String);

/// Failure of a single `POST /predict` call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    /// Transport failure, non-2xx status, or a body that is not JSON.
    /// `detail` is the server's explanation when one could be extracted.
    #[error("API call failed: {message}")]
    Request {
        message: String,
        detail: Option<String>,
    },

    /// The call succeeded but the body was not a usable prediction.
    #[error("Unexpected error during prediction: {0}")]
    Unexpected(String),
}

impl PredictError {
    pub fn request(err: impl std::fmt::Display) -> Self {
        PredictError::Request {
            message: err.to_string(),
            detail: None,
        }
    }

    /// Secondary "Server response: ..." line, if any.
    pub fn detail_message(&self) -> Option<String> {
        match self {
            PredictError::Request {
                detail: Some(detail),
                ..
            } => Some(format!("Server response: {detail}")),
            _ => None,
        }
    }
}

/// Best-effort extraction of the `detail` field from an error body.
///
/// Returns `None` when the body is not a JSON object; the caller then shows
/// only the primary failure message.
pub fn server_detail(body: &str) -> Option<String> {
    let value: JsonValue = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;
    Some(match object.get("detail") {
        Some(JsonValue::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => NO_DETAIL.to_string(),
    })
}
