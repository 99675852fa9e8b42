use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Address the FastAPI prediction server listens on by default.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

const DATA_DIR_NAME: &str = "ML_Data";
const LABEL_FILE_NAME: &str = "ML_data_for_learning_N1000.txt";

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Debug, Parser)]
#[command(name = "te-predictor", version, about = "Plasma electron temperature (Te) predictor")]
pub struct Cli {
    /// Base URL of the prediction API server.
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Data file whose header row holds the wavelength labels.
    #[arg(long)]
    pub labels: Option<PathBuf>,

    /// HTTP timeout in seconds. Without it, calls wait indefinitely.
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

// ---------------------------------------------------------------------------
// Resolved settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Base URL without a trailing slash.
    pub api_url: String,
    pub label_path: PathBuf,
    pub timeout: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            label_path: default_label_path(),
            timeout: None,
        }
    }
}

impl From<Cli> for Settings {
    fn from(cli: Cli) -> Self {
        Self {
            api_url: cli.api_url.trim_end_matches('/').to_string(),
            label_path: cli.labels.unwrap_or_else(default_label_path),
            timeout: cli.timeout_secs.map(Duration::from_secs),
        }
    }
}

/// `ML_Data/ML_data_for_learning_N1000.txt` under the project root.
pub fn default_label_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join(DATA_DIR_NAME)
        .join(LABEL_FILE_NAME)
}
