//! Turns a measurement session into draw commands.
//!
//! Rendering is a pure function of the session: it never mutates state and
//! never fails. Degenerate geometry only drops the affected decoration.

mod command;
mod label;
pub mod painter;

use egui::{Color32, Pos2, Vec2};

pub use command::{DrawCommand, LineCap, LineStyle};
pub use label::{FixedAdvance, LABEL_DIGITS, TextMeasure, format_length, format_significant, parse_length};

use crate::config::MeasureConfig;
use crate::geometry;
use crate::segment::Segment;
use crate::session::MeasurementSession;

/// Extra vertical room around the label font in its halo
const LABEL_HALO_PADDING: f32 = 10.0;
/// Horizontal margin on each side of the label in its halo
const LABEL_HALO_MARGIN: f32 = 10.0;
/// Edit-style labels need at least this much line to sit next to
const MIN_EDIT_LABEL_LENGTH: f32 = 2.0;

/// Colors and sizes used for measurement lines
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub font_px: f32,
    pub cap_half_length: f32,
    pub halo_width: f32,
    pub edit_shortening: f32,
    pub halo: Color32,
    pub highlight_halo: Color32,
    pub ink: Color32,
    pub highlight_ink: Color32,
    pub edit_ink: Color32,
    pub text: Color32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::from_config(&MeasureConfig::default())
    }
}

impl RenderStyle {
    pub fn from_config(config: &MeasureConfig) -> Self {
        Self {
            font_px: config.label_font_px,
            cap_half_length: config.cap_half_length,
            halo_width: config.halo_width,
            edit_shortening: config.edit_shortening,
            halo: Color32::from_rgba_unmultiplied(255, 255, 255, 102),
            highlight_halo: Color32::from_rgba_unmultiplied(255, 255, 0, 102),
            ink: Color32::BLACK,
            highlight_ink: Color32::from_rgb(0, 0, 255),
            edit_ink: Color32::from_rgb(0, 0, 255),
            text: Color32::BLACK,
        }
    }
}

/// Builds the command list for a full repaint of the measurement surface
pub struct Renderer {
    style: RenderStyle,
    measure: Box<dyn TextMeasure>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderStyle::default(), Box::new(FixedAdvance::default()))
    }
}

impl Renderer {
    pub fn new(style: RenderStyle, measure: Box<dyn TextMeasure>) -> Self {
        Self { style, measure }
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Paint every committed segment, then the in-progress one.
    ///
    /// `highlight` is the index of a committed segment to draw in the
    /// selection colors (the one being calibrated).
    pub fn render(&self, session: &MeasurementSession, highlight: Option<usize>) -> Vec<DrawCommand> {
        let scale = session.scale_factor();
        let mut out = vec![DrawCommand::Clear {
            size: session.canvas_size(),
        }];

        for (index, segment) in session.committed().iter().enumerate() {
            self.paint_segment(segment, scale, highlight == Some(index), &mut out);
        }
        if let Some(segment) = session.in_progress() {
            self.paint_edit_segment(segment, scale, &mut out);
        }
        out
    }

    /// Committed style: halo, label halo, ink, label
    pub fn paint_segment(&self, segment: &Segment, scale: f64, highlight: bool, out: &mut Vec<DrawCommand>) {
        let style = &self.style;
        let text = format_length(segment.scaled_length(scale));
        let center = segment.center();
        let halo_color = if highlight { style.highlight_halo } else { style.halo };

        let body = self.body_with_caps(segment);
        push_lines(
            out,
            body.clone(),
            LineStyle::new(style.halo_width, halo_color, LineCap::Round),
        );

        let text_len = self.measure.text_width(&text, style.font_px);
        let label_y = center.y - style.font_px / 2.0;
        let half = text_len / 2.0 + LABEL_HALO_MARGIN;
        push_lines(
            out,
            vec![[
                Pos2::new(center.x - half, label_y),
                Pos2::new(center.x + half, label_y),
            ]],
            LineStyle::new(style.font_px + LABEL_HALO_PADDING, halo_color, LineCap::Round),
        );

        let ink = if highlight { style.highlight_ink } else { style.ink };
        push_lines(out, body, LineStyle::new(1.0, ink, LineCap::Round));

        out.push(DrawCommand::Text {
            pos: Pos2::new(center.x, label_y),
            text,
            font_px: style.font_px,
            color: style.text,
        });
    }

    /// In-progress style: one cap at the anchor, the body stopping short of
    /// the pointer with a flat end, and the label placed behind the anchor.
    pub fn paint_edit_segment(&self, segment: &Segment, scale: f64, out: &mut Vec<DrawCommand>) {
        let style = &self.style;
        let len = segment.length();
        let text = format_length(segment.scaled_length(scale));
        let text_len = self.measure.text_width(&text, style.font_px) + 2.0 * style.font_px;

        let mut d = segment.p2 - segment.p1;
        if len > style.edit_shortening {
            d *= (len - style.edit_shortening) / len;
        }
        let body = [segment.p1, segment.p1 + d];
        // The anchor cap uses the full segment direction
        let cap = geometry::t_cap(segment.p1, segment.p2, style.cap_half_length);

        push_lines(
            out,
            cap.into_iter().collect(),
            LineStyle::new(style.halo_width, style.halo, LineCap::Round),
        );
        push_lines(
            out,
            vec![body],
            LineStyle::new(style.halo_width, style.halo, LineCap::Butt),
        );

        let mut ink_lines: Vec<[Pos2; 2]> = cap.into_iter().collect();
        ink_lines.push(body);
        push_lines(out, ink_lines, LineStyle::new(1.0, style.edit_ink, LineCap::Butt));

        if len < MIN_EDIT_LABEL_LENGTH {
            return;
        }

        let label_height = style.font_px + LABEL_HALO_PADDING;
        let offset = Vec2::new(
            -d.x * text_len / (2.0 * len),
            -d.y * label_height / (2.0 * len),
        );
        let label_pos = segment.p1 + offset;
        // The round caps of the halo stroke cover the font-sized margin
        let halo_half = text_len / 2.0 - style.font_px;
        push_lines(
            out,
            vec![[
                Pos2::new(label_pos.x - halo_half, label_pos.y),
                Pos2::new(label_pos.x + halo_half, label_pos.y),
            ]],
            LineStyle::new(label_height, style.halo, LineCap::Round),
        );
        out.push(DrawCommand::Text {
            pos: label_pos,
            text,
            font_px: style.font_px,
            color: style.text,
        });
    }

    fn body_with_caps(&self, segment: &Segment) -> Vec<[Pos2; 2]> {
        let half = self.style.cap_half_length;
        let mut lines = vec![[segment.p1, segment.p2]];
        lines.extend(geometry::t_cap(segment.p1, segment.p2, half));
        lines.extend(geometry::t_cap(segment.p2, segment.p1, half));
        lines
    }
}

fn push_lines(out: &mut Vec<DrawCommand>, lines: Vec<[Pos2; 2]>, style: LineStyle) {
    if !lines.is_empty() {
        out.push(DrawCommand::Lines { lines, style });
    }
}
