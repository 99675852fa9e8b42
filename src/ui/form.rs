use eframe::egui::{self, Ui};

use crate::state::{AppState, UiEvent};
use crate::ui::panels::notice;

/// Number of input columns in the intensity grid.
const GRID_COLUMNS: usize = 4;

// ---------------------------------------------------------------------------
// Prediction form (central panel)
// ---------------------------------------------------------------------------

/// Render model selection, the intensity inputs and the prediction outcome.
pub fn prediction_form(ui: &mut Ui, state: &AppState, events: &mut Vec<UiEvent>) {
    ui.heading("Plasma Electron Temperature (Te) Prediction");
    ui.add_space(4.0);

    if let Some(n) = state.model_notice() {
        notice(ui, &n);
    }
    model_selector(ui, state, events);
    ui.separator();

    for n in state.label_notices() {
        notice(ui, &n);
    }
    let Some(labels) = state.form_labels() else {
        return;
    };

    ui.strong("Light intensity at each wavelength:");
    ui.add_space(4.0);

    let labels = labels.to_strings();
    ui.columns(GRID_COLUMNS, |columns: &mut [Ui]| {
        for (i, label) in labels.iter().enumerate() {
            let ui = &mut columns[i % GRID_COLUMNS];
            ui.label(label);
            let mut value = state.intensities[i];
            let response = ui.add(
                egui::DragValue::new(&mut value)
                    .speed(0.01)
                    .fixed_decimals(2),
            );
            if response.changed() {
                events.push(UiEvent::IntensityChanged { index: i, value });
            }
            ui.add_space(4.0);
        }
    });

    ui.add_space(8.0);
    if ui.button("Predict electron temperature").clicked() {
        events.push(UiEvent::PredictClicked);
    }

    for n in state.prediction_notices() {
        notice(ui, &n);
    }
}

fn model_selector(ui: &mut Ui, state: &AppState, events: &mut Vec<UiEvent>) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Model:");
        egui::ComboBox::from_id_salt("model_select")
            .selected_text(&state.selected_model)
            .show_ui(ui, |ui: &mut Ui| {
                for name in &state.models.names {
                    if ui
                        .selectable_label(state.selected_model == *name, name)
                        .clicked()
                    {
                        events.push(UiEvent::ModelSelected(name.clone()));
                    }
                }
            });
    });
}
