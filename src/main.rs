#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

mod app;
mod cli;
mod error;
mod export;
mod geometry;
mod overlay;
mod session;
mod settings;

use anyhow::{Context, anyhow};
use clap::Parser;
use eframe::egui;
use log::LevelFilter;

use crate::app::MultiCropper;
use crate::cli::{Cli, Commands};
use crate::settings::CropSettings;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .parse_default_env()
        .init();

    match &cli.command {
        Some(Commands::Crop { image, x, y }) => run_crop(&cli, image, *x, *y),
        None => run_gui(cli),
    }
}

fn run_crop(cli: &Cli, image: &std::path::Path, x: i64, y: i64) -> anyhow::Result<()> {
    let settings = CropSettings::parse(&cli.resolutions, &cli.aspect_ratios)?;
    let written = export::export_file(image, x, y, &settings)
        .with_context(|| format!("failed to export crops of {}", image.display()))?;

    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

fn run_gui(cli: Cli) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1024.0, 768.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Multi Cropper",
        options,
        Box::new(move |cc| Ok(Box::new(MultiCropper::new(cc, &cli)))),
    )
    .map_err(|e| anyhow!("failed to run window: {e}"))
}
