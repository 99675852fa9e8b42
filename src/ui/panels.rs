use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::{AppState, Notice, Severity, UiEvent};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &AppState, events: &mut Vec<UiEvent>) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open label file…").clicked() {
                if let Some(path) = open_label_dialog() {
                    events.push(UiEvent::LabelFileChosen(path));
                }
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                events.push(UiEvent::ReloadRequested);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(
            RichText::new(format!("Labels: {}", state.label_path.display()))
                .small()
                .weak(),
        );
    });
}

// ---------------------------------------------------------------------------
// Left side panel – API server info
// ---------------------------------------------------------------------------

pub fn side_panel(ui: &mut Ui, api_url: &str, events: &mut Vec<UiEvent>) {
    ui.heading("API server");
    ui.separator();

    ui.label("Backend API address:");
    ui.monospace(api_url);
    ui.add_space(8.0);
    notice(
        ui,
        &Notice {
            severity: Severity::Caption,
            text: "The FastAPI server must be running first (`uvicorn main:app --reload`)."
                .to_string(),
        },
    );
    ui.add_space(8.0);

    if ui.button("Reload models").clicked() {
        events.push(UiEvent::ReloadRequested);
    }
}

// ---------------------------------------------------------------------------
// Message lines
// ---------------------------------------------------------------------------

pub fn notice(ui: &mut Ui, notice: &Notice) {
    let text = RichText::new(&notice.text);
    match notice.severity {
        Severity::Info => ui.label(text.color(Color32::LIGHT_BLUE)),
        Severity::Success => ui.label(text.color(Color32::from_rgb(60, 170, 90)).strong()),
        Severity::Caption => ui.label(text.small().weak()),
        Severity::Warning => ui.label(text.color(Color32::from_rgb(220, 160, 40))),
        Severity::Error => ui.label(text.color(Color32::RED)),
    };
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

fn open_label_dialog() -> Option<std::path::PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open wavelength data file")
        .add_filter("Text data", &["txt", "dat", "tsv"])
        .add_filter("All files", &["*"])
        .pick_file()
}
