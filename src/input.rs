use egui::{Context, Key, Pos2, Rect, Response};

use crate::interaction::MeasureEvent;

/// Translates egui input on the canvas into measurement events
///
/// Positions are made relative to the canvas origin (surface pixels) and,
/// for the loupe, to the visible viewport.
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect this frame's events for the canvas `response`.
    ///
    /// `viewport` is the visible part of the canvas in screen coordinates.
    pub fn process_input(&mut self, ctx: &Context, response: &Response, viewport: Rect) -> Vec<MeasureEvent> {
        let origin = response.rect.min;
        let mut events = Vec::new();

        match response.hover_pos() {
            Some(pos) if Some(pos) != self.last_pointer_pos => {
                events.push(MeasureEvent::PointerMove {
                    pos: to_surface(pos, origin),
                    frame_pos: to_surface(pos, viewport.min),
                });
                self.last_pointer_pos = Some(pos);
            }
            Some(_) => {}
            None => self.last_pointer_pos = None,
        }

        // A double click arrives after the click that completes it
        if let Some(pos) = response.interact_pointer_pos() {
            if response.clicked() {
                events.push(MeasureEvent::PrimaryClick {
                    pos: to_surface(pos, origin),
                });
            }
            if response.double_clicked() {
                events.push(MeasureEvent::DoubleClick {
                    pos: to_surface(pos, origin),
                });
            }
        }

        if ctx.input(|i| i.key_pressed(Key::Escape)) {
            events.push(MeasureEvent::Escape);
        }

        events
    }
}

/// Screen position relative to `origin`
pub fn to_surface(screen: Pos2, origin: Pos2) -> Pos2 {
    Pos2::ZERO + (screen - origin)
}
