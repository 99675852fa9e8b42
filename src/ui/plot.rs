use eframe::egui::{Color32, Ui};
use egui_plot::{Line, Plot, PlotPoints, Points};

use crate::data::model::WavelengthLabels;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Intensity preview (below the form)
// ---------------------------------------------------------------------------

/// Plot the entered intensities against their wavelengths.
pub fn intensity_plot(ui: &mut Ui, state: &AppState) {
    let Some(labels) = state.form_labels() else {
        return;
    };

    let coords = preview_points(labels, &state.intensities);
    let x_label = if labels.all_numeric() {
        "Wavelength"
    } else {
        "Channel"
    };

    ui.add_space(8.0);
    Plot::new("intensity_preview")
        .height(220.0)
        .x_axis_label(x_label)
        .y_axis_label("Intensity")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(coords.clone()))
                    .color(Color32::LIGHT_BLUE)
                    .width(1.5),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(coords))
                    .color(Color32::LIGHT_BLUE)
                    .radius(3.0),
            );
        });
}

/// `(x, intensity)` pairs sorted by x. Uses the wavelength when every label
/// is numeric, the 1-based channel number otherwise.
fn preview_points(labels: &WavelengthLabels, intensities: &[f64]) -> Vec<[f64; 2]> {
    let numeric = labels.all_numeric();
    let mut coords: Vec<[f64; 2]> = labels
        .iter()
        .zip(intensities)
        .enumerate()
        .map(|(i, (label, &y))| {
            let x = match label.as_f64() {
                Some(wl) if numeric => wl,
                _ => (i + 1) as f64,
            };
            [x, y]
        })
        .collect();
    coords.sort_by(|a, b| a[0].total_cmp(&b[0]));
    coords
}
