use std::path::PathBuf;

use crate::api::{ModelList, PredictError, PredictionService, available_models};
use crate::data::cache::LabelCache;
use crate::data::loader::LabelOutcome;
use crate::data::model::{
    CHANNEL_COUNT, LATEST_MODEL, PredictionRequest, PredictionResponse, WavelengthLabels,
};

// ---------------------------------------------------------------------------
// Events emitted by the UI
// ---------------------------------------------------------------------------

/// One user interaction. Each control emits exactly one kind of event.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    ModelSelected(String),
    IntensityChanged { index: usize, value: f64 },
    PredictClicked,
    LabelFileChosen(PathBuf),
    ReloadRequested,
}

// ---------------------------------------------------------------------------
// User-facing messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Caption,
    Warning,
    Error,
}

/// A message line rendered in the form.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub severity: Severity,
    pub text: String,
}

impl Notice {
    fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
        }
    }
}

/// Outcome of the last "Predict" click.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PredictionStatus {
    /// Nothing to show: no click yet, or another interaction happened since.
    #[default]
    Idle,
    /// Clicked; the call runs once a frame showing the request notice has
    /// been rendered. Holds the form values at click time.
    Pending {
        request: PredictionRequest,
        shown: bool,
    },
    Succeeded(PredictionResponse),
    Failed(PredictError),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Data file whose header provides the channel labels.
    pub label_path: PathBuf,

    /// Memoized label loads, keyed by path.
    label_cache: LabelCache,

    /// Outcome for `label_path` (copied out of the cache).
    pub labels: LabelOutcome,

    /// Selectable models and the listing failure, if any.
    pub models: ModelList,

    /// Currently selected model identifier.
    pub selected_model: String,

    /// One value per channel, in label order.
    pub intensities: [f64; CHANNEL_COUNT],

    pub prediction: PredictionStatus,
}

impl AppState {
    /// Load labels and the model list for the first frame.
    pub fn new(label_path: PathBuf, service: &dyn PredictionService) -> Self {
        let mut label_cache = LabelCache::new();
        let labels = label_cache.get_or_load(&label_path).clone();
        let models = available_models(service);
        let selected_model = models
            .names
            .first()
            .cloned()
            .unwrap_or_else(|| LATEST_MODEL.to_string());

        Self {
            label_path,
            label_cache,
            labels,
            models,
            selected_model,
            intensities: [0.0; CHANNEL_COUNT],
            prediction: PredictionStatus::Idle,
        }
    }

    /// Apply one UI event.
    ///
    /// Every interaction re-queries the model list, so a listing failure
    /// lasts only until the next event. A shown prediction outcome is
    /// cleared by any event; a pending one survives until it has run.
    pub fn handle(&mut self, event: UiEvent, service: &dyn PredictionService) {
        log::debug!("Handling {event:?}");
        if !self.prediction_pending() {
            self.prediction = PredictionStatus::Idle;
        }

        let mut predict = false;
        match event {
            UiEvent::ModelSelected(name) => self.selected_model = name,
            UiEvent::IntensityChanged { index, value } => match self.intensities.get_mut(index) {
                Some(slot) => *slot = value,
                None => log::warn!("Ignoring intensity for unknown channel {index}"),
            },
            UiEvent::PredictClicked => predict = true,
            UiEvent::LabelFileChosen(path) => {
                // A freshly picked file is always read from disk.
                self.label_cache.invalidate(&path);
                self.label_path = path;
                self.refresh_labels();
            }
            UiEvent::ReloadRequested => {
                log::info!("Reloading; dropping {} cached label file(s)", self.label_cache.len());
                self.label_cache.clear();
                self.refresh_labels();
            }
        }

        self.refresh_models(service);
        if predict {
            self.request_prediction();
        }
    }

    /// Labels for the form, or `None` when input is blocked.
    pub fn form_labels(&self) -> Option<&WavelengthLabels> {
        self.labels.labels()
    }

    pub fn request(&self) -> PredictionRequest {
        PredictionRequest {
            model_name: self.selected_model.clone(),
            intensities: self.intensities,
        }
    }

    pub fn prediction_pending(&self) -> bool {
        matches!(self.prediction, PredictionStatus::Pending { .. })
    }

    /// Called after a frame has been built; a pending request is now visible.
    pub fn frame_rendered(&mut self) {
        if let PredictionStatus::Pending { shown, .. } = &mut self.prediction {
            *shown = true;
        }
    }

    /// Perform the pending prediction call, if its notice has been shown.
    /// Returns whether a call was made.
    pub fn run_pending_prediction(&mut self, service: &dyn PredictionService) -> bool {
        let request = match &self.prediction {
            PredictionStatus::Pending {
                request,
                shown: true,
            } => request.clone(),
            _ => return false,
        };
        self.prediction = match service.predict(&request) {
            Ok(response) => PredictionStatus::Succeeded(response),
            Err(e) => PredictionStatus::Failed(e),
        };
        true
    }

    fn request_prediction(&mut self) {
        if self.form_labels().is_none() {
            log::warn!("Prediction requested while wavelength labels are unavailable");
            return;
        }
        if self.prediction_pending() {
            log::debug!("Prediction already pending; ignoring click");
            return;
        }
        self.prediction = PredictionStatus::Pending {
            request: self.request(),
            shown: false,
        };
    }

    fn refresh_labels(&mut self) {
        self.labels = self.label_cache.get_or_load(&self.label_path).clone();
    }

    fn refresh_models(&mut self, service: &dyn PredictionService) {
        self.models = available_models(service);
        if !self.models.names.contains(&self.selected_model) {
            self.selected_model = LATEST_MODEL.to_string();
        }
    }

    // -- Messages --

    /// Warning or error about the label file.
    pub fn label_notices(&self) -> Vec<Notice> {
        match &self.labels {
            LabelOutcome::Loaded(_) => Vec::new(),
            LabelOutcome::Fallback { warning, .. } => {
                vec![Notice::new(Severity::Warning, warning.to_string())]
            }
            LabelOutcome::Invalid(e) => vec![
                Notice::new(Severity::Error, e.to_string()),
                Notice::new(
                    Severity::Error,
                    "Cannot load wavelength information; input is unavailable.",
                ),
            ],
        }
    }

    pub fn model_notice(&self) -> Option<Notice> {
        self.models
            .error
            .as_ref()
            .map(|e| Notice::new(Severity::Error, e.to_string()))
    }

    pub fn prediction_notices(&self) -> Vec<Notice> {
        match &self.prediction {
            PredictionStatus::Idle => Vec::new(),
            PredictionStatus::Pending { .. } => vec![Notice::new(
                Severity::Info,
                "Requesting prediction from the API server...",
            )],
            PredictionStatus::Succeeded(r) => vec![
                Notice::new(
                    Severity::Success,
                    format!("Predicted electron temperature (Te): {:.4} eV", r.predicted_te),
                ),
                Notice::new(Severity::Caption, format!("Model used: {}", r.model_used)),
            ],
            PredictionStatus::Failed(e) => {
                let mut notices = vec![Notice::new(Severity::Error, e.to_string())];
                if let Some(detail) = e.detail_message() {
                    notices.push(Notice::new(Severity::Error, detail));
                }
                notices
            }
        }
    }
}
