//! Sidebar Widget
//! Left side panel with the region filter and indicator picker.

use egui::{Color32, ComboBox, RichText, ScrollArea};

use crate::data::SurveyDataset;
use crate::engine::Selection;

/// Left side filter panel.
#[derive(Default)]
pub struct Sidebar {
    pub regions: Vec<String>,
    pub selected: Vec<bool>,
    pub indicators: Vec<String>,
    pub indicator: String,
}

impl Sidebar {
    /// Build the panel state from a loaded dataset with the default
    /// selection applied.
    pub fn from_dataset(dataset: &SurveyDataset) -> Self {
        let defaults = Selection::default_for(dataset);
        let regions = dataset.regions();
        let selected = regions
            .iter()
            .map(|region| defaults.regions.contains(region))
            .collect();

        Self {
            regions,
            selected,
            indicators: dataset.indicators(),
            indicator: defaults.indicator,
        }
    }

    /// The current choices as an engine selection.
    pub fn selection(&self) -> Selection {
        Selection {
            regions: self
                .regions
                .iter()
                .zip(&self.selected)
                .filter(|(_, &checked)| checked)
                .map(|(region, _)| region.clone())
                .collect(),
            indicator: self.indicator.clone(),
        }
    }

    /// Draw the sidebar.
    pub fn show(&mut self, ui: &mut egui::Ui) -> SidebarAction {
        let mut action = SidebarAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("NFHS Explorer")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Filter Options")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Indicator Section =====
        ui.label(RichText::new("Health Indicator").size(14.0).strong());
        ui.add_space(5.0);

        ComboBox::from_id_salt("indicator")
            .width(240.0)
            .selected_text(&self.indicator)
            .show_ui(ui, |ui| {
                for name in &self.indicators {
                    if ui
                        .selectable_label(self.indicator == *name, name)
                        .clicked()
                        && self.indicator != *name
                    {
                        self.indicator = name.clone();
                        action = SidebarAction::SelectionChanged;
                    }
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== States Section =====
        let n_selected = self.selected.iter().filter(|&&checked| checked).count();
        ui.label(
            RichText::new(format!("States ({}/{})", n_selected, self.regions.len()))
                .size(14.0)
                .strong(),
        );
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() {
                self.selected.iter_mut().for_each(|checked| *checked = true);
                action = SidebarAction::SelectionChanged;
            }
            if ui.small_button("Clear All").clicked() {
                self.selected.iter_mut().for_each(|checked| *checked = false);
                action = SidebarAction::SelectionChanged;
            }
        });

        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical().max_height(420.0).show(ui, |ui| {
                    for (i, region) in self.regions.iter().enumerate() {
                        if ui.checkbox(&mut self.selected[i], region).changed() {
                            action = SidebarAction::SelectionChanged;
                        }
                    }
                });
            });

        action
    }
}

/// Actions triggered by the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarAction {
    None,
    SelectionChanged,
}
