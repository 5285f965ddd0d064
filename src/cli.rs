use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::settings::{DEFAULT_ASPECT_RATIOS, DEFAULT_RESOLUTIONS};

#[derive(Parser, Debug)]
#[command(name = "multicrop", version, about = "Export crop variants around a clicked point")]
pub struct Cli {
    /// Folder to open at startup
    pub folder: Option<PathBuf>,

    /// Comma-separated crop resolutions in pixels
    #[arg(short, long, default_value = DEFAULT_RESOLUTIONS, global = true)]
    pub resolutions: String,

    /// Comma-separated W:H aspect ratios
    #[arg(short, long, default_value = DEFAULT_ASPECT_RATIOS, global = true)]
    pub aspect_ratios: String,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export every crop for one image at one point without opening a window
    Crop {
        /// Source image
        image: PathBuf,

        /// Horizontal pixel coordinate of the crop centre
        #[arg(short, long, allow_negative_numbers = true)]
        x: i64,

        /// Vertical pixel coordinate of the crop centre
        #[arg(short, long, allow_negative_numbers = true)]
        y: i64,
    },
}
