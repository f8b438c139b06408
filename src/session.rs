use egui::{Pos2, Vec2};

use crate::background::BackgroundImageRef;
use crate::error::SessionError;
use crate::segment::Segment;

/// The segment currently being drawn and when it was anchored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InProgress {
    pub segment: Segment,
    /// Seconds, on the same clock as the events that drive the session
    pub anchor_time: f64,
}

/// All measurement state of the active view
///
/// Committed segments are append-only. A segment is in progress exactly
/// while the interaction is in the drawing state.
#[derive(Debug, Clone)]
pub struct MeasurementSession {
    committed: Vec<Segment>,
    in_progress: Option<InProgress>,
    scale_factor: f64,
    background: Option<BackgroundImageRef>,
    canvas_size: Vec2,
}

impl MeasurementSession {
    pub fn new(default_canvas_size: Vec2) -> Self {
        Self {
            committed: Vec::new(),
            in_progress: None,
            scale_factor: 1.0,
            background: None,
            canvas_size: default_canvas_size,
        }
    }

    /// Drop all segments and calibration and resize to `canvas_size`
    pub fn reset(&mut self, canvas_size: Vec2) {
        self.committed.clear();
        self.in_progress = None;
        self.scale_factor = 1.0;
        self.canvas_size = canvas_size;
    }

    /// Start over on a freshly loaded image; the canvas takes the image's size
    pub fn load_background(&mut self, image: BackgroundImageRef) {
        self.reset(image.size());
        self.background = Some(image);
    }

    pub fn background(&self) -> Option<&BackgroundImageRef> {
        self.background.as_ref()
    }

    pub fn canvas_size(&self) -> Vec2 {
        self.canvas_size
    }

    pub fn committed(&self) -> &[Segment] {
        &self.committed
    }

    pub fn in_progress(&self) -> Option<&Segment> {
        self.in_progress.as_ref().map(|p| &p.segment)
    }

    pub fn anchor_timestamp(&self) -> Option<f64> {
        self.in_progress.as_ref().map(|p| p.anchor_time)
    }

    pub fn is_drawing(&self) -> bool {
        self.in_progress.is_some()
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Set the pixel-to-unit factor; only positive finite values are accepted
    pub fn set_scale_factor(&mut self, scale_factor: f64) -> Result<(), SessionError> {
        if !scale_factor.is_finite() || scale_factor <= 0.0 {
            return Err(SessionError::InvalidScale(scale_factor));
        }
        self.scale_factor = scale_factor;
        Ok(())
    }

    /// Anchor a new zero-length segment at `pos`
    pub fn begin_segment(&mut self, pos: Pos2, now: f64) {
        self.in_progress = Some(InProgress {
            segment: Segment::anchored_at(pos),
            anchor_time: now,
        });
    }

    /// Track the pointer with the free endpoint. Returns false when nothing is in progress.
    pub fn update_in_progress(&mut self, pos: Pos2) -> bool {
        match &mut self.in_progress {
            Some(progress) => {
                progress.segment.update_pos(pos);
                true
            }
            None => false,
        }
    }

    pub fn take_in_progress(&mut self) -> Option<InProgress> {
        self.in_progress.take()
    }

    pub fn commit(&mut self, segment: Segment) {
        self.committed.push(segment);
    }

    /// Index and center distance of the committed segment whose center is
    /// closest to `pos`. Ties go to the earlier segment.
    pub fn nearest_segment(&self, pos: Pos2) -> Option<(usize, f32)> {
        let mut best: Option<(usize, f32)> = None;
        for (index, segment) in self.committed.iter().enumerate() {
            let distance = segment.distance_to_center(pos);
            match best {
                Some((_, smallest)) if distance >= smallest => {}
                _ => best = Some((index, distance)),
            }
        }
        best
    }
}
