/// egui rendering. Widgets read [`crate::state::AppState`] and push
/// [`crate::state::UiEvent`]s; they never mutate state directly.
pub mod form;
pub mod panels;
pub mod plot;
