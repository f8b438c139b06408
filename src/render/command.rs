use egui::{Color32, Pos2, Vec2};

/// How stroke ends are finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Round,
    /// Flat, ending exactly at the endpoint
    Butt,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub width: f32,
    pub color: Color32,
    pub cap: LineCap,
}

impl LineStyle {
    pub fn new(width: f32, color: Color32, cap: LineCap) -> Self {
        Self { width, color, cap }
    }
}

/// One instruction for the measurement surface, in surface pixels
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Start a fresh frame of the given size
    Clear { size: Vec2 },
    /// Stroke every line piece with one style
    Lines {
        lines: Vec<[Pos2; 2]>,
        style: LineStyle,
    },
    /// Text centered on `pos`
    Text {
        pos: Pos2,
        text: String,
        font_px: f32,
        color: Color32,
    },
}

impl DrawCommand {
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }
}
