use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CropError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid resolution {0:?}: expected a positive integer")]
    InvalidResolution(String),

    #[error("Invalid aspect ratio {0:?}: expected W:H with positive integers")]
    InvalidAspectRatio(String),

    #[error("Crop coordinate out of range: {0}")]
    CropOutOfRange(i64),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

pub type Result<T> = std::result::Result<T, CropError>;
