use std::fmt;

use crate::error::{CropError, Result};

pub const DEFAULT_RESOLUTIONS: &str = "512,640,768";
pub const DEFAULT_ASPECT_RATIOS: &str = "1:1,2:3,3:2";

/// Width:height proportion. Not required to be reduced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AspectRatio {
    pub width: u32,
    pub height: u32,
}

impl AspectRatio {
    pub fn new(width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

/// The resolution and aspect ratio lists every crop is derived from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CropSettings {
    pub resolutions: Vec<u32>,
    pub aspect_ratios: Vec<AspectRatio>,
}

impl Default for CropSettings {
    fn default() -> Self {
        Self {
            resolutions: vec![512, 640, 768],
            aspect_ratios: vec![
                AspectRatio { width: 1, height: 1 },
                AspectRatio { width: 2, height: 3 },
                AspectRatio { width: 3, height: 2 },
            ],
        }
    }
}

impl CropSettings {
    pub fn parse(resolutions: &str, aspect_ratios: &str) -> Result<Self> {
        Ok(Self {
            resolutions: parse_resolutions(resolutions)?,
            aspect_ratios: parse_aspect_ratios(aspect_ratios)?,
        })
    }

    /// Number of crops one click produces.
    pub fn combinations(&self) -> usize {
        self.resolutions.len() * self.aspect_ratios.len()
    }
}

pub fn parse_resolutions(text: &str) -> Result<Vec<u32>> {
    text.split(',')
        .map(|item| {
            let item = item.trim();
            match item.parse::<u32>() {
                Ok(value) if value > 0 => Ok(value),
                _ => Err(CropError::InvalidResolution(item.to_string())),
            }
        })
        .collect()
}

pub fn parse_aspect_ratios(text: &str) -> Result<Vec<AspectRatio>> {
    text.split(',').map(|item| parse_aspect_ratio(item.trim())).collect()
}

fn parse_aspect_ratio(item: &str) -> Result<AspectRatio> {
    let invalid = || CropError::InvalidAspectRatio(item.to_string());

    let (width, height) = item.split_once(':').ok_or_else(invalid)?;
    let width = width.trim().parse::<u32>().map_err(|_| invalid())?;
    let height = height.trim().parse::<u32>().map_err(|_| invalid())?;

    AspectRatio::new(width, height).ok_or_else(invalid)
}
