use anyhow::Result;
use eframe::egui;

use crate::api::ApiClient;
use crate::config::Settings;
use crate::state::{AppState, UiEvent};
use crate::ui::{form, panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TePredictorApp {
    pub state: AppState,
    client: ApiClient,
}

impl TePredictorApp {
    /// Build the API client and load the initial labels and model list.
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = ApiClient::new(settings)?;
        let state = AppState::new(settings.label_path.clone(), &client);
        Ok(Self { state, client })
    }
}

impl eframe::App for TePredictorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // A prediction clicked two frames ago has had its notice painted.
        self.state.run_pending_prediction(&self.client);

        let mut events: Vec<UiEvent> = Vec::new();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state, &mut events);
        });

        // ---- Left side panel: API server info ----
        egui::SidePanel::left("server_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, self.client.base_url(), &mut events);
            });

        // ---- Central panel: form + preview ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    form::prediction_form(ui, &self.state, &mut events);
                    plot::intensity_plot(ui, &self.state);
                });
        });

        self.state.frame_rendered();
        for event in events {
            self.state.handle(event, &self.client);
        }
        if self.state.prediction_pending() {
            ctx.request_repaint();
        }
    }
}
