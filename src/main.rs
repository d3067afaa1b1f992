mod app;
mod config;
mod constant;
mod controller;
mod export;
mod mapper;
mod region;
mod view;

use color_eyre::eyre::{Result, WrapErr, eyre};
use eframe::egui;

use crate::app::CookieCutterApp;
use crate::config::Cli;
use crate::constant::{APP_NAME, WINDOW_SIZE, WINDOW_TITLE};

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse_or_exit();
    let source = image::open(&cli.image)
        .wrap_err_with(|| format!("Cannot load image {}", cli.image.display()))?
        .to_rgba8();
    log::info!(
        "Loaded {} ({}x{})",
        cli.image.display(),
        source.width(),
        source.height()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_title(WINDOW_TITLE),
        ..Default::default()
    };
    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| Ok(Box::new(CookieCutterApp::new(cc, source, &cli)))),
    )
    .map_err(|e| eyre!(e.to_string()))?;
    Ok(())
}
