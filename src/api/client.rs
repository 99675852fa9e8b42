use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde_json::Value as JsonValue;

use super::error::{ModelListError, PredictError, server_detail};
use super::PredictionService;
use crate::config::Settings;
use crate::data::model::{ModelEntry, PredictionRequest, PredictionResponse};

// ---------------------------------------------------------------------------
// Blocking HTTP client
// ---------------------------------------------------------------------------

/// Blocking client for the prediction API. Calls run on the UI thread.
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        // `None` disables reqwest's default 30 s timeout.
        let http = Client::builder()
            .timeout(settings.timeout)
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            http,
            base_url: settings.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.base_url)
    }
}

impl PredictionService for ApiClient {
    fn list_models(&self) -> Result<Vec<String>, ModelListError> {
        let url = self.url("models");
        log::debug!("GET {url}");
        let models: Vec<ModelEntry> = self
            .http
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json())
            .map_err(|e| ModelListError(e.to_string()))?;
        Ok(models.into_iter().map(|m| m.name).collect())
    }

    fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse, PredictError> {
        let url = self.url("predict");
        log::info!("Requesting prediction from the API server... (model {})", request.model_name);

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .map_err(PredictError::request)?;

        // Primary message from the status, then a best-effort `detail`.
        if let Some(status_err) = response.error_for_status_ref().err() {
            let detail = response.text().ok().and_then(|body| server_detail(&body));
            let err = PredictError::Request {
                message: status_err.to_string(),
                detail,
            };
            log::error!("{err}");
            return Err(err);
        }

        let body = response.text().map_err(PredictError::request)?;
        let value: JsonValue = serde_json::from_str(&body).map_err(PredictError::request)?;
        let prediction: PredictionResponse = serde_json::from_value(value)
            .map_err(|e| PredictError::Unexpected(e.to_string()))?;

        log::info!(
            "Predicted Te {:.4} with model {}",
            prediction.predicted_te,
            prediction.model_used
        );
        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::available_models;
    use crate::config::default_label_path;
    use crate::data::model::CHANNEL_COUNT;

    fn settings(api_url: String) -> Settings {
        Settings {
            api_url,
            label_path: default_label_path(),
            timeout: Some(Duration::from_secs(5)),
        }
    }

    /// The blocking client must be built, used and dropped off the runtime.
    async fn with_client<T, F>(api_url: String, f: F) -> T
    where
        T: Send + 'static,
        F: FnOnce(&ApiClient) -> T + Send + 'static,
    {
        tokio::task::spawn_blocking(move || {
            let client = ApiClient::new(&settings(api_url)).unwrap();
            f(&client)
        })
        .await
        .unwrap()
    }

    fn unreachable_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }

    fn zero_request() -> PredictionRequest {
        PredictionRequest {
            model_name: "latest".into(),
            intensities: [0.0; CHANNEL_COUNT],
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn models_are_listed_after_latest() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"name": "a.model"}, {"name": "b.model"}])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let models = with_client(server.uri(), |c| available_models(c)).await;
        assert_eq!(models.names, vec!["latest", "a.model", "b.model"]);
        assert_eq!(models.error, None);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn unreachable_server_lists_only_latest() {
        let models = with_client(unreachable_url(), |c| available_models(c)).await;
        assert_eq!(models.names, vec!["latest"]);
        assert!(models.error.is_some());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn server_error_lists_only_latest() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let models = with_client(server.uri(), |c| available_models(c)).await;
        assert_eq!(models.names, vec!["latest"]);
        let message = models.error.unwrap().to_string();
        assert!(message.starts_with("Failed to fetch the model list"), "{message}");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn malformed_model_list_lists_only_latest() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
            .mount(&server)
            .await;

        let models = with_client(server.uri(), |c| available_models(c)).await;
        assert_eq!(models.names, vec!["latest"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn prediction_posts_model_and_intensities() {
        let server = MockServer::start().await;
        let mut intensities = [0.0; CHANNEL_COUNT];
        intensities[3] = 1.25;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .and(body_json(json!({
                "model_name": "a.model",
                "intensities": intensities,
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"predicted_te": 3.52839, "model_used": "a.model"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let request = PredictionRequest {
            model_name: "a.model".into(),
            intensities,
        };
        let prediction = with_client(server.uri(), move |c| c.predict(&request))
            .await
            .unwrap();
        assert_eq!(prediction.predicted_te, 3.52839);
        assert_eq!(prediction.model_used, "a.model");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn all_zero_intensities_are_sent() {
        let server = MockServer::start().await;
        let zeros = [0.0; CHANNEL_COUNT];
        Mock::given(method("POST"))
            .and(path("/predict"))
            .and(body_json(json!({
                "model_name": "latest",
                "intensities": zeros,
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"predicted_te": 1.0, "model_used": "m.joblib"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = with_client(server.uri(), |c| c.predict(&zero_request())).await;
        assert!(result.is_ok());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn bad_request_carries_server_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"detail": "bad input"})))
            .mount(&server)
            .await;

        let err = with_client(server.uri(), |c| c.predict(&zero_request()))
            .await
            .unwrap_err();
        match &err {
            PredictError::Request { message, detail } => {
                assert!(message.contains("400"), "{message}");
                assert_eq!(detail.as_deref(), Some("bad input"));
            }
            other => panic!("expected request failure, got {other:?}"),
        }
        assert!(err.to_string().starts_with("API call failed: "));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn plain_text_error_body_has_no_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let err = with_client(server.uri(), |c| c.predict(&zero_request()))
            .await
            .unwrap_err();
        assert!(matches!(err, PredictError::Request { detail: None, .. }));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn unreachable_predict_is_a_request_failure() {
        let err = with_client(unreachable_url(), |c| c.predict(&zero_request()))
            .await
            .unwrap_err();
        assert!(matches!(err, PredictError::Request { detail: None, .. }));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn non_json_success_is_a_request_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let err = with_client(server.uri(), |c| c.predict(&zero_request()))
            .await
            .unwrap_err();
        assert!(matches!(err, PredictError::Request { detail: None, .. }));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn missing_prediction_field_is_unexpected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"model_used": "a"})))
            .mount(&server)
            .await;

        let err = with_client(server.uri(), |c| c.predict(&zero_request()))
            .await
            .unwrap_err();
        assert!(matches!(err, PredictError::Unexpected(_)));
        assert!(err.to_string().starts_with("Unexpected error during prediction: "));
    }
}
