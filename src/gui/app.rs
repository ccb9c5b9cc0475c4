//! NFHS Explorer Main Application
//! Window shell: startup load, sidebar dispatch and dashboard rendering.

use egui::{Color32, RichText, SidePanel};

use crate::data::SurveyLoader;
use crate::engine::{self, ViewResult};
use crate::gui::{Dashboard, Sidebar, SidebarAction};

/// Fixed location of the survey table.
pub const DATA_PATH: &str = "data/nfhs.csv";

/// Main application window.
pub struct ExplorerApp {
    loader: SurveyLoader,
    load_error: Option<String>,
    sidebar: Sidebar,
    view: Option<ViewResult>,
}

impl ExplorerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let loader = SurveyLoader::new(DATA_PATH);
        let (sidebar, load_error) = match loader.load() {
            Ok(dataset) => (Sidebar::from_dataset(&dataset), None),
            Err(e) => {
                log::error!("failed to load {DATA_PATH}: {e}");
                (Sidebar::default(), Some(e.to_string()))
            }
        };

        let mut app = Self {
            loader,
            load_error,
            sidebar,
            view: None,
        };
        app.recompute();
        app
    }

    /// One interaction cycle: cached load plus a fresh computation of the
    /// current selection.
    fn recompute(&mut self) {
        if self.load_error.is_some() {
            return;
        }
        let dataset = match self.loader.load() {
            Ok(dataset) => dataset,
            Err(e) => {
                self.load_error = Some(e.to_string());
                return;
            }
        };

        let selection = self.sidebar.selection();
        log::debug!(
            "recomputing view: {} regions, indicator `{}`",
            selection.regions.len(),
            selection.indicator
        );
        match engine::compute(&dataset, &selection) {
            Ok(view) => self.view = Some(view),
            Err(e) => {
                log::error!("view computation failed: {e}");
                self.view = None;
            }
        }
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // A failed load renders the failure and nothing else.
        if let Some(message) = self.load_error.clone() {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        RichText::new(format!("Failed to load survey data\n\n{message}"))
                            .size(16.0)
                            .color(Color32::from_rgb(220, 53, 69)),
                    );
                });
            });
            return;
        }

        // Left panel - filters
        SidePanel::left("filter_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    if self.sidebar.show(ui) == SidebarAction::SelectionChanged {
                        self.recompute();
                    }
                });
            });

        // Central panel - dashboard
        egui::CentralPanel::default().show(ctx, |ui| match &self.view {
            Some(view) => Dashboard::show(ui, view, &self.sidebar.indicator),
            None => {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new("No Data").size(20.0));
                });
            }
        });
    }
}
