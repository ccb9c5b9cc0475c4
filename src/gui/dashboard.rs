//! Dashboard Widget
//! Central panel with the metric tiles, both charts and the filtered table.

use egui::{CollapsingHeader, Color32, RichText, ScrollArea};
use polars::prelude::*;

use crate::charts::ChartPlotter;
use crate::engine::ViewResult;

/// Central dashboard area fed by one computed view.
pub struct Dashboard;

impl Dashboard {
    /// Draw the full dashboard.
    pub fn show(ui: &mut egui::Ui, view: &ViewResult, indicator: &str) {
        ui.add_space(5.0);
        ui.heading("National Family Health Survey Explorer");
        ui.label(
            RichText::new(format!("Visualizing {indicator} across selected states"))
                .color(Color32::GRAY),
        );
        ui.add_space(10.0);

        Self::metric_row(ui, view);

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        let avail_width = ui.available_width();
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.set_width(avail_width * 0.62);
                ui.label(RichText::new("State-wise Comparison").size(14.0).strong());
                ChartPlotter::draw_bar_chart(ui, &view.bar_series, indicator);
            });
            ui.add_space(10.0);
            ui.vertical(|ui| {
                ui.set_width(avail_width * 0.33);
                ui.label(RichText::new("Data Distribution").size(14.0).strong());
                ChartPlotter::draw_distribution_chart(ui, &view.distribution, indicator);
            });
        });

        ui.add_space(10.0);

        CollapsingHeader::new(format!(
            "View Filtered Dataset ({} rows)",
            view.filtered.height()
        ))
        .default_open(false)
        .show(ui, |ui| Self::draw_table(ui, &view.table));
    }

    /// Three scalar metric tiles in equal columns.
    fn metric_row(ui: &mut egui::Ui, view: &ViewResult) {
        let average = view
            .average
            .as_ref()
            .map(|v| format!("{v:.2}"))
            .unwrap_or_else(|_| "N/A".to_string());
        let highest = view
            .max_region
            .as_ref()
            .map(|region| region.clone())
            .unwrap_or_else(|_| "N/A".to_string());

        ui.columns(3, |columns| {
            Self::metric_tile(&mut columns[0], "Average Value", &average);
            Self::metric_tile(&mut columns[1], "Highest State", &highest);
            Self::metric_tile(&mut columns[2], "States Compared", &view.region_count.to_string());
        });
    }

    fn metric_tile(ui: &mut egui::Ui, label: &str, value: &str) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(8.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(label).size(12.0).color(Color32::GRAY));
                ui.label(RichText::new(value).size(24.0).strong());
            });
    }

    /// Striped grid over the projected rows; absent cells render as "NA".
    fn draw_table(ui: &mut egui::Ui, table: &DataFrame) {
        let headers: Vec<String> = table
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        let columns = table.get_columns();

        ScrollArea::vertical().max_height(260.0).show(ui, |ui| {
            egui::Grid::new("filtered_table")
                .striped(true)
                .min_col_width(90.0)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    for header in &headers {
                        ui.label(RichText::new(header).strong().size(12.0));
                    }
                    ui.end_row();

                    for row in 0..table.height() {
                        for column in columns {
                            ui.label(RichText::new(Self::cell_text(column, row)).size(12.0));
                        }
                        ui.end_row();
                    }
                });
        });
    }

    fn cell_text(column: &Column, row: usize) -> String {
        match column.as_materialized_series().get(row) {
            Ok(AnyValue::Null) | Err(_) => "NA".to_string(),
            Ok(AnyValue::Float64(v)) => format!("{v:.1}"),
            Ok(value) => value.to_string().trim_matches('"').to_string(),
        }
    }
}
