mod capture;
mod config;
mod output;
mod preview;
mod session;
mod ui;

use anyhow::{anyhow, Result};
use capture::{CaptureSource, WebcamCapture};
use clap::Parser;
use config::{AppConfig, Args};
use eframe::egui;
use output::JpegFileOutput;
use session::{CameraSlot, Controller};
use ui::CaptureApp;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let config = AppConfig::from(&args);

    tracing::info!("Expression capture starting");
    tracing::info!("Cameras: {:?}", config.cameras);
    tracing::info!("Batch policy: {:?}", config.batch_policy);
    tracing::info!("Preview interval: {:?}", config.preview_interval);

    let slots = open_cameras(&config.cameras);
    if !slots.iter().any(CameraSlot::is_open) {
        tracing::warn!("No camera could be opened; previews will stay empty");
    }

    let mut controller = Controller::new(
        slots,
        config.naming,
        config.batch_policy,
        Box::new(JpegFileOutput),
    );
    if let Some(dir) = &config.output_dir {
        controller.set_output_dir(dir.clone());
    }

    let app = CaptureApp::new(controller, &config);

    let columns = config.cameras.len().max(1) as f32;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.title)
            .with_inner_size([520.0 * columns, 620.0]),
        ..Default::default()
    };

    eframe::run_native(config.title, options, Box::new(|_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow!("Window failed: {}", e))?;

    Ok(())
}

/// Open every requested device. A device that fails to open keeps its slot
/// with no source so the window still shows it.
fn open_cameras(indices: &[u32]) -> Vec<CameraSlot> {
    indices
        .iter()
        .map(|&index| {
            let source = match WebcamCapture::open(index) {
                Ok(camera) => Some(Box::new(camera) as Box<dyn CaptureSource>),
                Err(e) => {
                    tracing::error!("Camera {} unavailable: {:#}", index, e);
                    None
                }
            };
            CameraSlot::new(index, source)
        })
        .collect()
}
