use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{Wavelength, WavelengthLabels};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LabelError {
    #[error("'{}' not found. Using default labels.", .0.display())]
    NotFound(PathBuf),

    #[error("Wavelength load error: {0}. Using default labels.")]
    Unreadable(String),

    #[error("Wavelength data load error: expected 11 wavelengths, found {0}.")]
    WrongCount(usize),
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result of loading the label file. Never an `Err`: every failure maps to
/// either a placeholder fallback or a blocking validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelOutcome {
    /// Header parsed and validated.
    Loaded(WavelengthLabels),
    /// File missing or unreadable; placeholder labels with a warning.
    Fallback {
        labels: WavelengthLabels,
        warning: LabelError,
    },
    /// Header had the wrong number of columns; the form must be blocked.
    Invalid(LabelError),
}

impl LabelOutcome {
    /// Labels usable by the form, if any.
    pub fn labels(&self) -> Option<&WavelengthLabels> {
        match self {
            LabelOutcome::Loaded(labels) | LabelOutcome::Fallback { labels, .. } => Some(labels),
            LabelOutcome::Invalid(_) => None,
        }
    }

    fn fallback(warning: LabelError) -> Self {
        LabelOutcome::Fallback {
            labels: WavelengthLabels::placeholder(),
            warning,
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Read the channel labels from the header row of a whitespace-delimited
/// data file.
///
/// The first column of the header is skipped. If every remaining token parses
/// as a float the labels are numeric, otherwise the raw tokens are kept.
pub fn load_labels(path: &Path) -> LabelOutcome {
    let outcome = match read_header(path) {
        Ok(tokens) => parse_header(tokens),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            LabelOutcome::fallback(LabelError::NotFound(path.to_path_buf()))
        }
        Err(e) => LabelOutcome::fallback(LabelError::Unreadable(e.to_string())),
    };

    match &outcome {
        LabelOutcome::Loaded(_) => log::info!("Loaded wavelength labels from {}", path.display()),
        LabelOutcome::Fallback { warning, .. } => log::warn!("{warning}"),
        LabelOutcome::Invalid(e) => log::error!("{e}"),
    }
    outcome
}

/// Tokens of the first non-blank line, minus the first column.
fn read_header(path: &Path) -> io::Result<Vec<String>> {
    let file = std::fs::File::open(path)?;
    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        return Ok(line.split_whitespace().skip(1).map(str::to_string).collect());
    }
    Err(io::Error::new(
        io::ErrorKind::UnexpectedEof,
        "no columns to parse from file",
    ))
}

fn parse_header(tokens: Vec<String>) -> LabelOutcome {
    let numeric: Option<Vec<Wavelength>> = tokens
        .iter()
        .map(|t| t.parse::<f64>().ok().map(Wavelength::Numeric))
        .collect();
    let labels = numeric.unwrap_or_else(|| tokens.into_iter().map(Wavelength::Text).collect());

    match WavelengthLabels::new(labels) {
        Ok(labels) => LabelOutcome::Loaded(labels),
        Err(found) => LabelOutcome::Invalid(LabelError::WrongCount(found)),
    }
}
