/// Client side of the prediction API.
///
/// ```text
///   GET  {base}/models   → [{"name": ...}, ...]
///   POST {base}/predict  ← {"model_name", "intensities"}
///                        → {"predicted_te", "model_used"} | {"detail"}
/// ```

pub mod client;
pub mod error;

use crate::data::model::{LATEST_MODEL, PredictionRequest, PredictionResponse};

pub use client::ApiClient;
pub use error::{ModelListError, PredictError};

/// Operations the form needs from the remote service.
pub trait PredictionService {
    /// Model names as reported by the server.
    fn list_models(&self) -> Result<Vec<String>, ModelListError>;

    /// One prediction call. Never retried.
    fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse, PredictError>;
}

/// Selectable models plus the failure to report, if listing failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelList {
    pub names: Vec<String>,
    pub error: Option<ModelListError>,
}

/// `"latest"` followed by the server's models, or just `"latest"` on failure.
pub fn available_models(service: &dyn PredictionService) -> ModelList {
    match service.list_models() {
        Ok(models) => {
            let names = std::iter::once(LATEST_MODEL.to_string())
                .chain(models)
                .collect();
            ModelList { names, error: None }
        }
        Err(e) => {
            log::error!("{e}");
            ModelList {
                names: vec![LATEST_MODEL.to_string()],
                error: Some(e),
            }
        }
    }
}
