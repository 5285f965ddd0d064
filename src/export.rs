use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat};

use crate::error::{CropError, Result};
use crate::geometry::{GeometryMode, PlannedCrop, plan_crops};
use crate::settings::CropSettings;

pub const CROPS_DIR: &str = "crops";

/// Crops `image` (loaded from `source_path`) around `(x, y)` once per
/// resolution and aspect ratio, writing PNGs under
/// `<source folder>/crops/<resolution>px/`. Returns the written paths.
pub fn export_crops(
    source_path: &Path,
    image: &DynamicImage,
    x: i64,
    y: i64,
    settings: &CropSettings,
) -> Result<Vec<PathBuf>> {
    let crops_root = source_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(CROPS_DIR);
    let base_name = crop_base_name(source_path);

    let mode = GeometryMode::Export {
        width: image.width(),
        height: image.height(),
    };

    let mut written = Vec::with_capacity(settings.combinations());
    for crop in plan_crops(x, y, settings, mode) {
        let folder = crops_root.join(format!("{}px", crop.resolution));
        fs::create_dir_all(&folder)?;

        let path = unique_crop_path(&folder, &base_name, &crop);
        save_crop(image, &crop, &path)?;
        log::debug!(
            "Saved {}x{} crop to {}",
            crop.rect.width(),
            crop.rect.height(),
            path.display()
        );
        written.push(path);
    }

    log::info!(
        "Exported {} crops of {} into {}",
        written.len(),
        source_path.display(),
        crops_root.display()
    );

    Ok(written)
}

/// Loads the image at `source_path` and exports crops around `(x, y)`.
pub fn export_file(
    source_path: &Path,
    x: i64,
    y: i64,
    settings: &CropSettings,
) -> Result<Vec<PathBuf>> {
    let image = image::open(source_path)?;
    export_crops(source_path, &image, x, y, settings)
}

fn save_crop(image: &DynamicImage, crop: &PlannedCrop, path: &Path) -> Result<()> {
    let rect = crop.rect;
    let (left, top, width, height) = (
        to_pixel(rect.left)?,
        to_pixel(rect.top)?,
        to_pixel(rect.width())?,
        to_pixel(rect.height())?,
    );

    let cropped = image.crop_imm(left, top, width, height);
    cropped.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

fn to_pixel(value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| CropError::CropOutOfRange(value))
}

/// File name prefix: everything before the first dot of the source name.
fn crop_base_name(source_path: &Path) -> String {
    let file_name = source_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    match file_name.split('.').next() {
        Some(prefix) if !prefix.is_empty() => prefix.to_string(),
        _ => source_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string()),
    }
}

fn unique_crop_path(folder: &Path, base_name: &str, crop: &PlannedCrop) -> PathBuf {
    let stem = format!("{}_crop_{}x{}", base_name, crop.spec.width, crop.spec.height);

    let mut path = folder.join(format!("{stem}.png"));
    let mut counter = 1;
    while path.exists() {
        path = folder.join(format!("{stem}_{counter}.png"));
        counter += 1;
    }
    path
}
