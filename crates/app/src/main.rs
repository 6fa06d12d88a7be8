//! Luna PDF
//!
//! A minimal desktop PDF viewer: one page at a time, zoom, drag to pan,
//! wheel or arrow keys to turn pages.

mod app;
mod dialogs;
mod display;
mod menu;
mod shortcuts;
mod texture;

use app::LunaPdfApp;
use eframe::egui;
use luna_pdf_core::ViewerConfig;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

fn main() -> eframe::Result {
    let (config, config_error) = match ViewerConfig::from_env() {
        Ok(config) => (config, None),
        Err(e) => (ViewerConfig::default(), Some(e)),
    };

    if let Err(e) = TermLogger::init(
        config.log_level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    log::info!("Starting {}", config.app_name);
    if let Some(e) = &config_error {
        log::warn!("{}; falling back to defaults", e);
    }

    let app_name = config.app_name.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size)
            .with_title(&app_name),
        ..Default::default()
    };

    eframe::run_native(
        &app_name,
        options,
        Box::new(move |cc| Ok(Box::new(LunaPdfApp::new(cc, config, config_error)))),
    )
}
