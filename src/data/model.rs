use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of input channels the prediction model expects.
pub const CHANNEL_COUNT: usize = 11;

/// Model identifier always offered first; passed through to the server as-is.
pub const LATEST_MODEL: &str = "latest";

// ---------------------------------------------------------------------------
// Wavelength – one display label
// ---------------------------------------------------------------------------

/// A single channel label taken from the data file header.
#[derive(Debug, Clone, PartialEq)]
pub enum Wavelength {
    Numeric(f64),
    Text(String),
}

impl fmt::Display for Wavelength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Debug keeps the trailing ".0" on whole numbers (e.g. "700.0").
            Wavelength::Numeric(v) => write!(f, "{v:?}"),
            Wavelength::Text(s) => write!(f, "{s}"),
        }
    }
}

impl Wavelength {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Wavelength::Numeric(v) => Some(*v),
            Wavelength::Text(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// WavelengthLabels – exactly CHANNEL_COUNT labels
// ---------------------------------------------------------------------------

/// Ordered channel labels. Always holds exactly [`CHANNEL_COUNT`] entries.
#[derive(Debug, Clone, PartialEq)]
pub struct WavelengthLabels(Vec<Wavelength>);

impl WavelengthLabels {
    /// Validate the label count. Returns the found count on mismatch.
    pub fn new(labels: Vec<Wavelength>) -> Result<Self, usize> {
        if labels.len() == CHANNEL_COUNT {
            Ok(Self(labels))
        } else {
            Err(labels.len())
        }
    }

    /// Generic "Wavelength 1" .. "Wavelength 11" labels.
    pub fn placeholder() -> Self {
        Self(
            (1..=CHANNEL_COUNT)
                .map(|i| Wavelength::Text(format!("Wavelength {i}")))
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &Wavelength> {
        self.0.iter()
    }

    /// Whether every label is numeric, so they can serve as a plot axis.
    pub fn all_numeric(&self) -> bool {
        self.0.iter().all(|w| w.as_f64().is_some())
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(|w| w.to_string()).collect()
    }
}

// ---------------------------------------------------------------------------
// Wire types for the prediction API
// ---------------------------------------------------------------------------

/// Body of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub model_name: String,
    pub intensities: [f64; CHANNEL_COUNT],
}

/// Successful body of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictionResponse {
    pub predicted_te: f64,
    pub model_used: String,
}

/// One entry of the `GET /models` array.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelEntry {
    pub name: String,
}
