//! Chart Plotter Module
//! Creates interactive visualizations using egui_plot.

use egui::Color32;
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Plot, PlotPoints, Points};
use std::collections::HashMap;

use crate::engine::BarEntry;

/// Color palette for states
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(0, 188, 212),  // Cyan
    Color32::from_rgb(255, 87, 34),  // Deep Orange
    Color32::from_rgb(121, 85, 72),  // Brown
    Color32::from_rgb(96, 125, 139), // Blue Grey
];

/// Color of the national distribution box
const DISTRIBUTION_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue

const CHART_HEIGHT: f32 = 340.0;

/// Creates the dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Color for the state at `index` in the bar series.
    pub fn region_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Calculate beeswarm positions for points with duplicate values.
    pub fn beeswarm_positions(y_values: &[f64], center: f64, width: f64) -> Vec<f64> {
        let n = y_values.len();
        if n == 0 {
            return Vec::new();
        }

        let mut positions = vec![center; n];

        // Round values and find duplicates
        let precision = 1e6;
        let mut value_indices: HashMap<i64, Vec<usize>> = HashMap::new();

        for (i, &y) in y_values.iter().enumerate() {
            let key = (y * precision).round() as i64;
            value_indices.entry(key).or_default().push(i);
        }

        // Spread duplicates symmetrically
        for indices in value_indices.values() {
            if indices.len() > 1 {
                let count = indices.len();
                let step = width / (count.max(2) - 1) as f64;
                let start = center - width / 2.0;

                for (i, &idx) in indices.iter().enumerate() {
                    positions[idx] = start + i as f64 * step;
                }
            }
        }

        positions
    }

    /// Draw the state comparison bars.
    /// X-axis: states, Y-axis: selected indicator, one color per state.
    /// Rows with an absent value get no bar.
    pub fn draw_bar_chart(ui: &mut egui::Ui, series: &[BarEntry], indicator: &str) {
        let labels: Vec<String> = series.iter().map(|entry| entry.region.clone()).collect();

        Plot::new("state_comparison")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("State")
            .y_axis_label(indicator.to_owned())
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if idx < labels.len() {
                    labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                for (i, entry) in series.iter().enumerate() {
                    let Some(value) = entry.value else { continue };

                    let color = Self::region_color(i);
                    let bar = Bar::new(i as f64, value)
                        .width(0.6)
                        .name(entry.region.as_str())
                        .fill(color.gamma_multiply(0.85))
                        .stroke(egui::Stroke::new(1.0, color));

                    plot_ui.bar_chart(BarChart::new(vec![bar]));
                }
            });
    }

    /// Draw the national distribution: one box with 1.5*IQR whiskers and
    /// every value overlaid as a beeswarm-spread point.
    pub fn draw_distribution_chart(ui: &mut egui::Ui, values: &[f64], indicator: &str) {
        if values.is_empty() {
            ui.label("No values for this indicator");
            return;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let n = sorted.len();
        let q1 = sorted[n / 4];
        let median = sorted[n / 2];
        let q3 = sorted[3 * n / 4];
        let iqr = q3 - q1;
        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&v| v >= q1 - 1.5 * iqr)
            .unwrap_or(q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= q3 + 1.5 * iqr)
            .unwrap_or(q3);

        Plot::new("national_distribution")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .y_axis_label(indicator.to_owned())
            .include_x(-1.0)
            .include_x(1.0)
            .x_axis_formatter(|_mark, _range| String::new())
            .show(ui, |plot_ui| {
                let box_elem = BoxElem::new(
                    0.0,
                    BoxSpread::new(whisker_low, q1, median, q3, whisker_high),
                )
                .box_width(0.5)
                .fill(DISTRIBUTION_COLOR.gamma_multiply(0.3))
                .stroke(egui::Stroke::new(1.5, DISTRIBUTION_COLOR));

                plot_ui.box_plot(BoxPlot::new(vec![box_elem]).name("National"));

                // All points, no sampling
                let x_positions = Self::beeswarm_positions(values, 0.0, 0.35);
                let points: PlotPoints = x_positions
                    .iter()
                    .zip(values.iter())
                    .map(|(&x, &y)| [x, y])
                    .collect();

                plot_ui.points(
                    Points::new(points)
                        .radius(3.0)
                        .color(DISTRIBUTION_COLOR.gamma_multiply(0.7))
                        .name("All states"),
                );
            });
    }
}
