use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};
use image::RgbaImage;

use crate::background::BackgroundImage;

/// GPU textures for the background image and the loupe contents
///
/// The background texture is uploaded once per loaded image; the loupe
/// texture is rewritten in place on every pointer move.
#[derive(Default)]
pub struct TextureManager {
    background: Option<(usize, TextureHandle)>,
    loupe: Option<TextureHandle>,
}

impl TextureManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texture for `image`, uploading it if it is not the cached one
    pub fn background_texture(&mut self, ctx: &Context, image: &BackgroundImage) -> TextureId {
        if let Some((id, handle)) = &self.background {
            if *id == image.id() {
                return handle.id();
            }
        }

        let name = format!("background_{}", image.id());
        let handle = ctx.load_texture(name, to_color_image(image.pixels()), TextureOptions::LINEAR);
        let texture_id = handle.id();
        self.background = Some((image.id(), handle));
        texture_id
    }

    /// Replace the loupe contents with `pixels`
    pub fn update_loupe(&mut self, ctx: &Context, pixels: &RgbaImage) -> TextureId {
        let image = to_color_image(pixels);
        match &mut self.loupe {
            Some(handle) => {
                handle.set(image, TextureOptions::NEAREST);
                handle.id()
            }
            None => {
                let handle = ctx.load_texture("loupe", image, TextureOptions::NEAREST);
                let texture_id = handle.id();
                self.loupe = Some(handle);
                texture_id
            }
        }
    }

    pub fn loupe_texture(&self) -> Option<TextureId> {
        self.loupe.as_ref().map(|handle| handle.id())
    }

    /// Drop all textures, e.g. when a new image replaces the old one
    pub fn clear_cache(&mut self) {
        self.background = None;
        self.loupe = None;
    }
}

fn to_color_image(pixels: &RgbaImage) -> ColorImage {
    let size = [pixels.width() as usize, pixels.height() as usize];
    ColorImage::from_rgba_unmultiplied(size, pixels.as_raw())
}
