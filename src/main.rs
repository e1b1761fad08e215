mod app;

use anyhow::anyhow;
use app::SpinDemoApp;
use decimal_spin::logging;
use decimal_spin::settings::Settings;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    let settings = Settings::load();
    let debug = settings.debug_logging || std::env::args().any(|a| a == "--debug");
    logging::init_tracing(debug);

    if let Some(path) = Settings::config_path() {
        log::info!("Settings file: {}", path.display());
    }

    let (width, height) = settings.window_size;
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width, height])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Decimal Spin",
        native_options,
        Box::new(|cc| Ok(Box::new(SpinDemoApp::new(cc, settings)))),
    )
    .map_err(|e| anyhow!("UI terminated with error: {}", e))
}
