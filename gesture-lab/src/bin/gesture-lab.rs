#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use egui::ViewportBuilder;
use gesture_lab::app::GestureLab;
use gesture_lab::config::LabConfig;
use gesture_lab::consts::PKG_NAME;
use std::io::stdout;
use tracing::{error, Level};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

fn init_log() {
    let crate_target = PKG_NAME.replace('-', "_");
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{crate_target}=info,egui_gestures=info")));
    let formatting_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_ansi(true)
        .with_line_number(true)
        .with_writer(stdout.with_max_level(Level::DEBUG));

    Registry::default()
        .with(env_filter)
        .with(formatting_layer)
        .init();
}

pub fn main() -> eframe::Result<()> {
    init_log();

    let path = LabConfig::path();
    let config = LabConfig::load(&path).unwrap_or_else(|err| {
        error!("failed to load config {path:?}: {err}");
        LabConfig::default()
    });

    let options = eframe::NativeOptions {
        centered: true,
        viewport: ViewportBuilder::default()
            .with_inner_size((420.0, 760.0))
            .with_min_inner_size((320.0, 480.0)),
        ..Default::default()
    };
    GestureLab::start(options, config)
}
