/// Data layer: channel labels and the prediction API wire types.
///
/// Architecture:
/// ```text
///  ML_data_for_learning_*.txt
///        │  (header row only)
///        ▼
///   ┌──────────┐
///   │  loader   │  header → LabelOutcome (labels / fallback / invalid)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  memoized per path, explicit invalidation
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ WavelengthLabels  │  exactly 11 labels, drives the input form
///   └──────────────────┘
/// ```

pub mod cache;
pub mod loader;
pub mod model;
