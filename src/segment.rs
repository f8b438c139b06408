use egui::Pos2;

use crate::geometry;

/// A measurement line between two surface points
///
/// Segments never carry their own scale; the session's scale factor
/// applies to all of them uniformly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub p1: Pos2,
    pub p2: Pos2,
}

impl Segment {
    pub fn new(p1: Pos2, p2: Pos2) -> Self {
        Self { p1, p2 }
    }

    /// A zero-length segment anchored at `pos`
    pub fn anchored_at(pos: Pos2) -> Self {
        Self::new(pos, pos)
    }

    /// Move the free (second) endpoint
    pub fn update_pos(&mut self, pos: Pos2) {
        self.p2 = pos;
    }

    /// Pixel length
    pub fn length(&self) -> f32 {
        geometry::distance(self.p1, self.p2)
    }

    pub fn center(&self) -> Pos2 {
        geometry::midpoint(self.p1, self.p2)
    }

    pub fn distance_to_center(&self, pos: Pos2) -> f32 {
        geometry::distance(self.center(), pos)
    }

    /// Length in user units for the given scale factor
    pub fn scaled_length(&self, scale_factor: f64) -> f64 {
        scale_factor * f64::from(self.length())
    }
}
