//! Applies draw commands to an egui painter.
//!
//! Nothing here knows about segments or calibration; it only maps the
//! command list onto egui shapes at a given screen origin.

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, TextureId, Vec2};

use super::{DrawCommand, LineCap, TextMeasure};
use crate::loupe::LoupeView;

/// Text measurement backed by egui's font layout
pub struct EguiTextMeasure {
    ctx: egui::Context,
}

impl EguiTextMeasure {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl TextMeasure for EguiTextMeasure {
    fn text_width(&self, text: &str, font_px: f32) -> f32 {
        self.ctx.fonts(|fonts| {
            fonts
                .layout_no_wrap(text.to_owned(), FontId::proportional(font_px), Color32::BLACK)
                .size()
                .x
        })
    }
}

/// Paint `commands` with the surface's top-left corner at `origin`
pub fn paint_commands(painter: &Painter, origin: Pos2, commands: &[DrawCommand]) {
    let offset = origin.to_vec2();
    let mut painter = painter.clone();

    for command in commands {
        match command {
            DrawCommand::Clear { size } => {
                painter = painter.with_clip_rect(Rect::from_min_size(origin, *size));
            }
            DrawCommand::Lines { lines, style } => {
                let stroke = Stroke::new(style.width, style.color);
                for [a, b] in lines {
                    let (a, b) = (*a + offset, *b + offset);
                    painter.line_segment([a, b], stroke);
                    if style.cap == LineCap::Round && style.width > 1.0 {
                        painter.circle_filled(a, style.width / 2.0, style.color);
                        painter.circle_filled(b, style.width / 2.0, style.color);
                    }
                }
            }
            DrawCommand::Text {
                pos,
                text,
                font_px,
                color,
            } => {
                painter.text(
                    *pos + offset,
                    Align2::CENTER_CENTER,
                    text,
                    FontId::proportional(*font_px),
                    *color,
                );
            }
        }
    }
}

/// Paint the magnified image and crosshair into `rect`
pub fn paint_loupe(painter: &Painter, rect: Rect, texture: TextureId, view: &LoupeView) {
    let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
    painter.rect_filled(rect, 0.0, Color32::from_gray(32));
    painter.image(texture, rect, uv, Color32::WHITE);

    let scale = rect.width() / view.size.max(1.0);
    let stroke = Stroke::new(1.0, Color32::BLACK);
    for [a, b] in view.crosshair {
        let a = rect.min + Vec2::new(a.x, a.y) * scale;
        let b = rect.min + Vec2::new(b.x, b.y) * scale;
        painter.line_segment([a, b], stroke);
    }
    painter.rect_stroke(rect, 0.0, Stroke::new(1.0, Color32::DARK_GRAY));
}
