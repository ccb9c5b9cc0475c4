//! NFHS Explorer - Health Survey Explorer & Interactive Dashboard
//!
//! A Rust application for exploring National Family Health Survey data:
//! filter by state, pick an indicator, see metrics and charts.

mod charts;
mod data;
mod engine;
mod gui;

use eframe::egui;
use gui::ExplorerApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 850.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("NFHS Explorer"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "NFHS Explorer",
        options,
        Box::new(|cc| Ok(Box::new(ExplorerApp::new(cc)))),
    )
}
