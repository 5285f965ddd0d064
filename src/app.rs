use std::path::{Path, PathBuf};

use eframe::egui;

use crate::cli::Cli;
use crate::error::CropError;
use crate::export::export_crops;
use crate::overlay::paint_previews;
use crate::session::{ImageSession, is_supported_image};
use crate::settings::CropSettings;

pub struct MultiCropper {
    session: ImageSession,
    texture: Option<egui::TextureHandle>,
    resolutions_text: String,
    aspect_ratios_text: String,
    /// Last hovered pixel on the current image.
    pointer: Option<(i64, i64)>,
    status: String,
}

impl MultiCropper {
    pub fn new(cc: &eframe::CreationContext<'_>, cli: &Cli) -> Self {
        let mut app = Self {
            session: ImageSession::new(),
            texture: None,
            resolutions_text: cli.resolutions.clone(),
            aspect_ratios_text: cli.aspect_ratios.clone(),
            pointer: None,
            status: String::from("Load a folder to start"),
        };

        if let Some(folder) = &cli.folder {
            app.load_folder(&cc.egui_ctx, folder, None);
        }
        app
    }

    fn load_texture(&mut self, ctx: &egui::Context) {
        self.pointer = None;
        self.texture = self.session.current().map(|loaded| {
            let size = [loaded.image.width() as _, loaded.image.height() as _];
            let image_buffer = loaded.image.to_rgba8();
            let pixels = image_buffer.as_flat_samples();
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice());
            ctx.load_texture("current-image", color_image, egui::TextureOptions::LINEAR)
        });
    }

    fn load_folder(&mut self, ctx: &egui::Context, folder: &Path, start_at: Option<&Path>) {
        let result = match start_at {
            Some(file) => self.session.load_at(folder, file),
            None => self.session.load(folder),
        };
        self.after_navigation(ctx, result);
    }

    fn skip_image(&mut self, ctx: &egui::Context) {
        let result = self.session.skip();
        self.after_navigation(ctx, result);
    }

    fn after_navigation(&mut self, ctx: &egui::Context, result: Result<(), CropError>) {
        self.load_texture(ctx);
        match result {
            Ok(()) => self.status = self.describe_current(),
            Err(e) => {
                log::error!("Failed to load image: {}", e);
                self.status = format!("Failed to load image: {e}");
            }
        }
    }

    fn describe_current(&self) -> String {
        match (self.session.current(), self.session.position()) {
            (Some(loaded), Some(position)) => {
                format!("{} ({position})", loaded.path.display())
            }
            _ if self.session.images().is_empty() => match self.session.folder() {
                Some(folder) => format!("No images in {}", folder.display()),
                None => String::from("Load a folder to start"),
            },
            _ => format!("No more images ({} viewed)", self.session.index()),
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<PathBuf> =
            ctx.input(|i| i.raw.dropped_files.iter().filter_map(|f| f.path.clone()).collect());
        let Some(path) = dropped.first() else {
            return;
        };

        if path.is_dir() {
            self.load_folder(ctx, path, None);
        } else if is_supported_image(path) {
            if let Some(folder) = path.parent() {
                self.load_folder(ctx, folder, Some(path));
            }
        } else {
            log::warn!("Ignoring dropped file {}", path.display());
        }
    }

    fn settings(&self) -> Result<CropSettings, CropError> {
        CropSettings::parse(&self.resolutions_text, &self.aspect_ratios_text)
    }

    fn export_at(&mut self, x: i64, y: i64) {
        let Some(loaded) = self.session.current() else {
            return;
        };

        let settings = match self.settings() {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Rejected crop settings: {}", e);
                self.status = format!("Invalid settings: {e}");
                return;
            }
        };

        match export_crops(&loaded.path, &loaded.image, x, y, &settings) {
            Ok(written) => {
                self.status = format!("Saved {} crops at ({x}, {y})", written.len());
            }
            Err(e) => {
                log::error!("Failed to export crops: {}", e);
                self.status = format!("Export failed: {e}");
            }
        }
    }

    fn top_bar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            if ui.button("Load Folder").clicked() {
                if let Some(folder) = rfd::FileDialog::new()
                    .set_title("Select Image Folder")
                    .pick_folder()
                {
                    self.load_folder(ctx, &folder, None);
                }
            }

            if ui
                .add_enabled(self.session.position().is_some(), egui::Button::new("Skip Image"))
                .clicked()
            {
                self.skip_image(ctx);
            }

            ui.separator();
            ui.label("Resolutions:");
            ui.add(egui::TextEdit::singleline(&mut self.resolutions_text).desired_width(120.0));
            ui.label("Aspect ratios:");
            ui.add(egui::TextEdit::singleline(&mut self.aspect_ratios_text).desired_width(120.0));
        });

        ui.horizontal(|ui| {
            ui.label(self.status.as_str());
            if let Some((x, y)) = self.pointer {
                ui.separator();
                ui.label(format!("x: {x}, y: {y}"));
            }
        });
    }

    fn image_view(&mut self, ui: &mut egui::Ui) {
        let Some(texture) = &self.texture else {
            self.pointer = None;
            return;
        };
        let texture_id = texture.id();
        let size = texture.size_vec2();

        let mut clicked_at = None;
        egui::ScrollArea::both()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
                let painter = ui.painter_at(rect);
                painter.image(
                    texture_id,
                    rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );

                let to_pixel = |pos: egui::Pos2| {
                    let offset = pos - rect.min;
                    (offset.x.floor() as i64, offset.y.floor() as i64)
                };

                self.pointer = response.hover_pos().map(to_pixel);
                if let Some(pointer) = self.pointer {
                    match self.settings() {
                        Ok(settings) => paint_previews(&painter, rect.min, pointer, &settings),
                        Err(e) => log::debug!("Not drawing previews: {}", e),
                    }
                }

                if response.clicked() {
                    clicked_at = response.interact_pointer_pos().map(to_pixel);
                }
            });

        if let Some((x, y)) = clicked_at {
            self.export_at(x, y);
        }
    }
}

impl eframe::App for MultiCropper {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !ctx.input(|i| i.raw.dropped_files.is_empty()) {
            self.handle_dropped_files(ctx);
        }

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            self.top_bar(ui, ctx);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.image_view(ui);
        });
    }
}
