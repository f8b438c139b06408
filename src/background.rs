use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use egui::{Rect, Vec2};
use image::{Rgba, RgbaImage};

use crate::error::ImageLoadError;
use crate::loupe::LoupeView;

// Static counter for telling loaded images apart
static NEXT_IMAGE_ID: AtomicUsize = AtomicUsize::new(1);

/// The raster a session measures on
///
/// Immutable once loaded; the session and the loupe only hold references.
#[derive(Clone)]
pub struct BackgroundImage {
    id: usize,
    pixels: RgbaImage,
}

/// Shared handle to a loaded background image
pub type BackgroundImageRef = Arc<BackgroundImage>;

impl std::fmt::Debug for BackgroundImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundImage")
            .field("id", &self.id)
            .field("width", &self.pixels.width())
            .field("height", &self.pixels.height())
            .finish()
    }
}

impl BackgroundImage {
    pub fn from_rgba(pixels: RgbaImage) -> Result<Self, ImageLoadError> {
        let (width, height) = pixels.dimensions();
        if width == 0 || height == 0 {
            return Err(ImageLoadError::Empty { width, height });
        }
        let id = NEXT_IMAGE_ID.fetch_add(1, Ordering::SeqCst);
        Ok(Self { id, pixels })
    }

    /// Decode an encoded image (png, jpeg, ...) from memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ImageLoadError> {
        let decoded = image::load_from_memory(bytes)?;
        log::debug!("Decoded image: {}x{}", decoded.width(), decoded.height());
        Self::from_rgba(decoded.to_rgba8())
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ImageLoadError> {
        let path = path.as_ref();
        if !is_image_path(path) {
            return Err(ImageLoadError::NotAnImage(path.display().to_string()));
        }
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn into_ref(self) -> BackgroundImageRef {
        Arc::new(self)
    }

    /// Unique per load; lets texture caches notice a new image
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Size in surface pixels
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.pixels.width() as f32, self.pixels.height() as f32)
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Render the loupe contents: the view's crop region scaled up to the
    /// loupe's size with nearest-neighbour sampling.
    ///
    /// Pixels that fall outside the image stay transparent.
    pub fn magnify(&self, view: &LoupeView) -> RgbaImage {
        let side = view.size.round().max(1.0) as u32;
        let crop = view.crop_region;
        let mut out = RgbaImage::from_pixel(side, side, Rgba([0, 0, 0, 0]));
        sample_nearest(&self.pixels, crop, &mut out);
        out
    }
}

fn sample_nearest(src: &RgbaImage, crop: Rect, out: &mut RgbaImage) {
    let (out_w, out_h) = out.dimensions();
    let step_x = crop.width() / out_w as f32;
    let step_y = crop.height() / out_h as f32;

    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let sx = (crop.min.x + (x as f32 + 0.5) * step_x).floor();
        let sy = (crop.min.y + (y as f32 + 0.5) * step_y).floor();
        if sx < 0.0 || sy < 0.0 {
            continue;
        }
        let (sx, sy) = (sx as u32, sy as u32);
        if sx < src.width() && sy < src.height() {
            *pixel = *src.get_pixel(sx, sy);
        }
    }
}

/// Check the file extension for a raster format we can decode
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            matches!(
                ext.as_str(),
                "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp" | "tif" | "tiff"
            )
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Pos2;

    fn checker(width: u32, height: u32) -> BackgroundImage {
        let pixels = RgbaImage::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        });
        BackgroundImage::from_rgba(pixels).unwrap()
    }

    #[test]
    fn test_rejects_empty_image() {
        let err = BackgroundImage::from_rgba(RgbaImage::new(0, 10)).unwrap_err();
        assert!(matches!(err, ImageLoadError::Empty { width: 0, height: 10 }));
    }

    #[test]
    fn test_rejects_garbage_bytes() {
        let err = BackgroundImage::from_bytes(b"definitely not a png").unwrap_err();
        assert!(matches!(err, ImageLoadError::Decode(_)));
    }

    #[test]
    fn test_rejects_non_image_path() {
        let err = BackgroundImage::from_path("notes.txt").unwrap_err();
        assert!(matches!(err, ImageLoadError::NotAnImage(_)));
    }

    #[test]
    fn test_size() {
        let img = checker(40, 30);
        assert_eq!(img.size(), Vec2::new(40.0, 30.0));
    }

    #[test]
    fn test_magnify_replicates_pixels() {
        let img = checker(20, 20);
        let view = LoupeView {
            crop_region: Rect::from_min_size(Pos2::new(4.0, 4.0), Vec2::splat(2.0)),
            size: 10.0,
            crosshair: [
                [Pos2::new(0.0, 5.0), Pos2::new(10.0, 5.0)],
                [Pos2::new(5.0, 0.0), Pos2::new(5.0, 10.0)],
            ],
        };
        let out = img.magnify(&view);
        assert_eq!(out.dimensions(), (10, 10));
        // Each source pixel covers a 5x5 block
        assert_eq!(out.get_pixel(0, 0), img.pixels().get_pixel(4, 4));
        assert_eq!(out.get_pixel(4, 4), img.pixels().get_pixel(4, 4));
        assert_eq!(out.get_pixel(5, 0), img.pixels().get_pixel(5, 4));
        assert_eq!(out.get_pixel(9, 9), img.pixels().get_pixel(5, 5));
    }

    #[test]
    fn test_magnify_outside_is_transparent() {
        let img = checker(4, 4);
        let view = LoupeView {
            crop_region: Rect::from_min_size(Pos2::new(-2.0, -2.0), Vec2::splat(4.0)),
            size: 4.0,
            crosshair: [
                [Pos2::new(0.0, 2.0), Pos2::new(4.0, 2.0)],
                [Pos2::new(2.0, 0.0), Pos2::new(2.0, 4.0)],
            ],
        };
        let out = img.magnify(&view);
        assert_eq!(out.get_pixel(0, 0).0[3], 0);
        assert_eq!(out.get_pixel(3, 3), img.pixels().get_pixel(1, 1));
    }
}
