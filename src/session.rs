use std::path::{Path, PathBuf};

use image::DynamicImage;
use walkdir::WalkDir;

use crate::error::{CropError, Result};

const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Lists supported images directly inside `folder`, sorted by file name.
pub fn list_images(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(CropError::NotADirectory(folder.to_path_buf()));
    }

    let mut images = Vec::new();
    for entry in WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() && is_supported_image(entry.path()) {
            images.push(entry.into_path());
        }
    }

    Ok(images)
}

pub struct LoadedImage {
    pub path: PathBuf,
    pub image: DynamicImage,
}

/// Folder being worked through and the image currently shown from it.
#[derive(Default)]
pub struct ImageSession {
    folder: Option<PathBuf>,
    images: Vec<PathBuf>,
    index: usize,
    current: Option<LoadedImage>,
}

impl ImageSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the session with the images of `folder` and opens the first.
    ///
    /// An unreadable folder leaves the session untouched. A first image that
    /// fails to decode still switches folders, with no image shown.
    pub fn load(&mut self, folder: &Path) -> Result<()> {
        let images = list_images(folder)?;
        log::info!("Found {} images in {}", images.len(), folder.display());

        self.folder = Some(folder.to_path_buf());
        self.images = images;
        self.index = 0;
        self.open_current()
    }

    /// Like [`load`](Self::load) but starts at `file` when it is listed.
    pub fn load_at(&mut self, folder: &Path, file: &Path) -> Result<()> {
        let images = list_images(folder)?;
        let index = images
            .iter()
            .position(|path| path.file_name() == file.file_name())
            .unwrap_or(0);

        self.folder = Some(folder.to_path_buf());
        self.images = images;
        self.index = index;
        self.open_current()
    }

    /// Moves to the next image. Past the end the session holds no image and
    /// further skips are no-ops.
    pub fn skip(&mut self) -> Result<()> {
        if self.index < self.images.len() {
            self.index += 1;
        }
        log::debug!("Skipped to index {} of {}", self.index, self.images.len());
        self.open_current()
    }

    fn open_current(&mut self) -> Result<()> {
        self.current = None;

        let Some(path) = self.images.get(self.index) else {
            return Ok(());
        };

        let image = image::open(path)?;
        log::info!(
            "Loaded {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        self.current = Some(LoadedImage {
            path: path.clone(),
            image,
        });
        Ok(())
    }

    pub fn folder(&self) -> Option<&Path> {
        self.folder.as_deref()
    }

    pub fn images(&self) -> &[PathBuf] {
        &self.images
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&LoadedImage> {
        self.current.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.current.is_some()
    }

    /// One-based position such as `3/12`, or `None` once past the end.
    pub fn position(&self) -> Option<String> {
        (self.index < self.images.len()).then(|| format!("{}/{}", self.index + 1, self.images.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use std::fs;
    use tempfile::TempDir;

    fn write_image(dir: &Path, name: &str) {
        let img = ImageBuffer::from_fn(8, 6, |_x, _y| Rgb([1_u8, 2_u8, 3_u8]));
        let format = if name.to_ascii_lowercase().ends_with(".png") {
            image::ImageFormat::Png
        } else {
            image::ImageFormat::Jpeg
        };
        img.save_with_format(dir.join(name), format).expect("save");
    }

    fn names(session: &ImageSession) -> Vec<String> {
        session
            .images()
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn supported_extensions_are_case_insensitive() {
        assert!(is_supported_image(Path::new("a.PNG")));
        assert!(is_supported_image(Path::new("a.JpEg")));
        assert!(is_supported_image(Path::new("a.jpg")));
        assert!(!is_supported_image(Path::new("a.gif")));
        assert!(!is_supported_image(Path::new("png")));
    }

    #[test]
    fn load_lists_only_images_sorted_and_opens_first() {
        let dir = TempDir::new().expect("tempdir");
        write_image(dir.path(), "b.JPG");
        write_image(dir.path(), "a.png");
        write_image(dir.path(), "c.jpeg");
        fs::write(dir.path().join("notes.txt"), "x").expect("write");
        fs::create_dir(dir.path().join("crops")).expect("mkdir");
        write_image(&dir.path().join("crops"), "nested.png");

        let mut session = ImageSession::new();
        session.load(dir.path()).expect("load");

        assert_eq!(names(&session), vec!["a.png", "b.JPG", "c.jpeg"]);
        assert_eq!(session.index(), 0);
        assert_eq!(session.position().as_deref(), Some("1/3"));
        let current = session.current().expect("first image");
        assert!(current.path.ends_with("a.png"));
        assert_eq!(current.image.width(), 8);
    }

    #[test]
    fn empty_folder_has_no_image() {
        let dir = TempDir::new().expect("tempdir");
        let mut session = ImageSession::new();
        session.load(dir.path()).expect("load");

        assert!(session.images().is_empty());
        assert!(!session.has_image());
        assert_eq!(session.position(), None);
        session.skip().expect("skip on empty folder");
        assert!(!session.has_image());
    }

    #[test]
    fn skipping_past_the_end_clears_and_stays_cleared() {
        let dir = TempDir::new().expect("tempdir");
        write_image(dir.path(), "one.png");
        write_image(dir.path(), "two.png");

        let mut session = ImageSession::new();
        session.load(dir.path()).expect("load");
        session.skip().expect("skip");
        assert!(session.current().unwrap().path.ends_with("two.png"));

        session.skip().expect("skip past end");
        assert!(!session.has_image());
        for _ in 0..3 {
            session.skip().expect("repeated skip");
            assert!(!session.has_image());
        }
        assert_eq!(session.index(), 2);
    }

    #[test]
    fn loading_a_file_path_is_rejected_and_keeps_state() {
        let dir = TempDir::new().expect("tempdir");
        write_image(dir.path(), "keep.png");

        let mut session = ImageSession::new();
        session.load(dir.path()).expect("load");
        let result = session.load(&dir.path().join("keep.png"));

        assert!(matches!(result, Err(CropError::NotADirectory(_))));
        assert!(session.has_image());
        assert_eq!(session.folder(), Some(dir.path()));
    }

    #[test]
    fn load_at_starts_from_the_given_file() {
        let dir = TempDir::new().expect("tempdir");
        write_image(dir.path(), "a.png");
        write_image(dir.path(), "b.png");
        write_image(dir.path(), "c.png");

        let mut session = ImageSession::new();
        session
            .load_at(dir.path(), &dir.path().join("b.png"))
            .expect("load at");
        assert_eq!(session.index(), 1);
        assert!(session.current().unwrap().path.ends_with("b.png"));
    }

    #[test]
    fn undecodable_image_reports_error_and_skip_recovers() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(dir.path().join("a.png"), b"not an image").expect("write");
        write_image(dir.path(), "b.png");

        let mut session = ImageSession::new();
        assert!(session.load(dir.path()).is_err());
        assert!(!session.has_image());
        assert_eq!(session.images().len(), 2);

        session.skip().expect("skip");
        assert!(session.current().unwrap().path.ends_with("b.png"));
    }
}
