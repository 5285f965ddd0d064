//! Crop geometry shared by the hover preview and the click export.
//!
//! Every (resolution, aspect ratio) pair yields one crop box centred on the
//! pointer. The smaller side of the ratio maps to the resolution and the other
//! side is scaled up from it.

use crate::settings::{AspectRatio, CropSettings};

/// Nominal crop size for one resolution and aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropSpec {
    pub width: u32,
    pub height: u32,
}

impl CropSpec {
    pub fn new(resolution: u32, ratio: AspectRatio) -> Self {
        let scale = |long: u32, short: u32| -> u32 {
            let scaled = u64::from(resolution) * u64::from(long) / u64::from(short);
            u32::try_from(scaled).unwrap_or(u32::MAX)
        };

        if ratio.width < ratio.height {
            Self {
                width: resolution,
                height: scale(ratio.height, ratio.width),
            }
        } else {
            Self {
                width: scale(ratio.width, ratio.height),
                height: resolution,
            }
        }
    }
}

/// Pixel rectangle, `right` and `bottom` exclusive. Preview rectangles can
/// have negative or out of image coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropRect {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl CropRect {
    pub fn width(&self) -> i64 {
        self.right - self.left
    }

    pub fn height(&self) -> i64 {
        self.bottom - self.top
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeometryMode {
    /// Unclamped boxes for on-screen drawing.
    Preview,
    /// Boxes clamped to an image of the given size.
    Export { width: u32, height: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlannedCrop {
    pub resolution: u32,
    pub spec: CropSpec,
    pub rect: CropRect,
}

/// Computes one crop per (resolution, aspect ratio) pair around `(x, y)`.
///
/// Resolutions form the outer loop and aspect ratios the inner one. In export
/// mode each edge is clamped on its own, so a box near the border shrinks
/// instead of shifting inwards.
pub fn plan_crops(x: i64, y: i64, settings: &CropSettings, mode: GeometryMode) -> Vec<PlannedCrop> {
    let mut crops = Vec::with_capacity(settings.combinations());

    for &resolution in &settings.resolutions {
        for &ratio in &settings.aspect_ratios {
            let spec = CropSpec::new(resolution, ratio);
            let rect = match mode {
                GeometryMode::Preview => preview_rect(x, y, spec),
                GeometryMode::Export { width, height } => export_rect(x, y, spec, width, height),
            };
            crops.push(PlannedCrop {
                resolution,
                spec,
                rect,
            });
        }
    }

    crops
}

fn preview_rect(x: i64, y: i64, spec: CropSpec) -> CropRect {
    let left = x - i64::from(spec.width / 2);
    let top = y - i64::from(spec.height / 2);
    CropRect {
        left,
        top,
        right: left + i64::from(spec.width),
        bottom: top + i64::from(spec.height),
    }
}

fn export_rect(x: i64, y: i64, spec: CropSpec, image_width: u32, image_height: u32) -> CropRect {
    let (left, right) = clamp_span(x, spec.width, image_width);
    let (top, bottom) = clamp_span(y, spec.height, image_height);
    CropRect {
        left,
        top,
        right,
        bottom,
    }
}

// Edges are clamped from the raw centre. A span that comes out empty falls
// back to the single in-bounds pixel nearest the centre.
fn clamp_span(center: i64, size: u32, limit: u32) -> (i64, i64) {
    let limit = i64::from(limit.max(1));
    let half = i64::from(size / 2);

    let start = (center - half).max(0);
    let end = (center + half).min(limit);
    if start < end {
        return (start, end);
    }

    let nearest = center.clamp(0, limit - 1);
    (nearest, nearest + 1)
}
