use egui::{Pos2, Rect, Vec2};

use crate::background::BackgroundImage;
use crate::config::MeasureConfig;

/// Pointer closer than this (in loupe widths / heights) pushes the loupe away
const FAR_SWITCH_X: f32 = 1.5;
const FAR_SWITCH_Y: f32 = 1.1;
/// Pointer beyond this lets the loupe return to its near anchor
const NEAR_SWITCH_X: f32 = 1.7;
const NEAR_SWITCH_Y: f32 = 1.2;

/// Where the loupe overlay sits in the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoupeAnchor {
    /// Top-left corner, the resting position
    #[default]
    Near,
    /// Shifted right, out of the pointer's way
    Far,
}

/// What the loupe overlay should show after a pointer move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoupeView {
    /// Region of the background image (surface pixels) that fills the loupe
    pub crop_region: Rect,
    /// Side length of the square overlay
    pub size: f32,
    /// Horizontal and vertical line through the overlay center, in overlay coordinates
    pub crosshair: [[Pos2; 2]; 2],
}

/// Magnifying overlay following the pointer
#[derive(Debug, Clone)]
pub struct Loupe {
    size: f32,
    magnification: f32,
    margin: f32,
    anchor: LoupeAnchor,
}

impl Default for Loupe {
    fn default() -> Self {
        Self::from_config(&MeasureConfig::default())
    }
}

impl Loupe {
    pub fn from_config(config: &MeasureConfig) -> Self {
        Self {
            size: config.loupe_size,
            magnification: config.loupe_magnification,
            margin: config.loupe_margin,
            anchor: LoupeAnchor::Near,
        }
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn magnification(&self) -> f32 {
        self.magnification
    }

    pub fn anchor(&self) -> LoupeAnchor {
        self.anchor
    }

    /// Top-left corner of the overlay relative to the viewport
    pub fn anchor_offset(&self) -> Vec2 {
        match self.anchor {
            LoupeAnchor::Near => Vec2::new(self.margin, self.margin),
            LoupeAnchor::Far => Vec2::new(2.0 * self.size, self.margin),
        }
    }

    /// Move the overlay out of the pointer's way.
    ///
    /// `frame_pos` is the pointer relative to the visible viewport. The two
    /// threshold pairs form a hysteresis band in which the anchor is kept.
    pub fn update_anchor(&mut self, frame_pos: Pos2) -> LoupeAnchor {
        let (w, h) = (self.size, self.size);
        if frame_pos.x < FAR_SWITCH_X * w && frame_pos.y < FAR_SWITCH_Y * h {
            self.anchor = LoupeAnchor::Far;
        } else if frame_pos.x > NEAR_SWITCH_X * w || frame_pos.y > NEAR_SWITCH_Y * h {
            self.anchor = LoupeAnchor::Near;
        }
        self.anchor
    }

    /// The magnified view centered on `pos` (surface pixels)
    pub fn view_at(&self, pos: Pos2) -> LoupeView {
        let side = self.size;
        let half = side / 2.0;
        LoupeView {
            crop_region: Rect::from_center_size(pos, Vec2::splat(side / self.magnification)),
            size: side,
            crosshair: [
                [Pos2::new(0.0, half), Pos2::new(side, half)],
                [Pos2::new(half, 0.0), Pos2::new(half, side)],
            ],
        }
    }

    /// Handle a pointer move. Without a background image nothing is drawn
    /// and the anchor stays where it is.
    pub fn update(
        &mut self,
        pos: Pos2,
        frame_pos: Pos2,
        image: Option<&BackgroundImage>,
    ) -> Option<LoupeView> {
        if image.is_none() {
            return None;
        }
        self.update_anchor(frame_pos);
        Some(self.view_at(pos))
    }
}
