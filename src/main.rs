#![warn(clippy::all, rust_2018_idioms)]

use std::path::PathBuf;

use eframe_measure::{MeasureApp, MeasureConfig};

/// Environment variable naming a JSON file with measurement settings
const CONFIG_ENV: &str = "MEASURE_CONFIG";

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let initial_image = std::env::args_os().nth(1).map(PathBuf::from);
    let config_override = std::env::var_os(CONFIG_ENV).and_then(|path| {
        match MeasureConfig::from_json_file(&path) {
            Ok(config) => Some(config),
            Err(err) => {
                log::warn!("Ignoring {}: {}", PathBuf::from(&path).display(), err);
                None
            }
        }
    });

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Measure")
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([400.0, 300.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        "eframe_measure",
        native_options,
        Box::new(move |cc| Ok(Box::new(MeasureApp::new(cc, config_override, initial_image)))),
    )
}
