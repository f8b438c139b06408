use std::path::{Path, PathBuf};

use eframe::egui;

use crate::background::{BackgroundImage, is_image_path};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp", "tif", "tiff"];

/// Turns dropped files, picked files and paths into background images
#[derive(Default)]
pub struct FileHandler;

impl FileHandler {
    pub fn new() -> Self {
        Self
    }

    /// The first usable image among the files dropped this frame
    pub fn take_dropped_image(&mut self, ctx: &egui::Context) -> Option<BackgroundImage> {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        dropped.iter().find_map(|file| self.process_dropped_file(file))
    }

    fn process_dropped_file(&self, file: &egui::DroppedFile) -> Option<BackgroundImage> {
        let file_name = if let Some(path) = &file.path {
            path.display().to_string()
        } else if !file.name.is_empty() {
            file.name.clone()
        } else {
            "unknown".to_owned()
        };

        if !self.is_image_file(file) {
            log::warn!("Dropped file is not a supported type: {}", file_name);
            return None;
        }

        if let Some(bytes) = &file.bytes {
            log::info!("Loading image from memory: {} ({} bytes)", file_name, bytes.len());
            match BackgroundImage::from_bytes(bytes) {
                Ok(image) => Some(image),
                Err(err) => {
                    log::error!("Failed to load {}: {}", file_name, err);
                    None
                }
            }
        } else if let Some(path) = &file.path {
            self.load_path(path)
        } else {
            log::warn!("Dropped file has no accessible data: {}", file_name);
            None
        }
    }

    /// Check if a file is an image based on MIME type or extension
    fn is_image_file(&self, file: &egui::DroppedFile) -> bool {
        if !file.mime.is_empty() {
            file.mime.starts_with("image/")
        } else if let Some(path) = &file.path {
            is_image_path(path)
        } else {
            is_image_path(Path::new(&file.name))
        }
    }

    pub fn load_path(&self, path: &Path) -> Option<BackgroundImage> {
        log::info!("Loading image from path: {}", path.display());
        match BackgroundImage::from_path(path) {
            Ok(image) => Some(image),
            Err(err) => {
                log::error!("Failed to load {}: {}", path.display(), err);
                None
            }
        }
    }

    /// Ask the user for an image file
    pub fn pick_file(&self) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title("Open image")
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()
    }
}
