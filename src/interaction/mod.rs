//! The click / move / double-click state machine driving a measurement session.
//!
//! Every event is handled to completion, including the repaint it triggers,
//! before the next one is accepted.

mod policy;

use egui::Pos2;

pub use policy::{CalibrationPolicy, CommitPolicy};

use crate::background::BackgroundImageRef;
use crate::config::MeasureConfig;
use crate::help::{HelpLevel, HelpTracker};
use crate::loupe::{Loupe, LoupeView};
use crate::render::{DrawCommand, Renderer, format_length, parse_length};
use crate::session::MeasurementSession;

/// Text shown when asking for the real-world length of a segment
pub const CALIBRATION_PROMPT: &str = "Length of selected line?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    /// A segment is in progress; its free end follows the pointer
    Drawing,
}

/// Input in surface coordinates, already translated by the host
#[derive(Debug, Clone)]
pub enum MeasureEvent {
    PrimaryClick { pos: Pos2 },
    /// `frame_pos` is the pointer relative to the visible viewport
    PointerMove { pos: Pos2, frame_pos: Pos2 },
    DoubleClick { pos: Pos2 },
    Escape,
    ImageLoaded(BackgroundImageRef),
}

impl MeasureEvent {
    /// A pointer move on an unscrolled view
    pub fn pointer_move(pos: Pos2) -> Self {
        Self::PointerMove { pos, frame_pos: pos }
    }
}

/// Where the controller sends what it wants shown
pub trait MeasureOutput {
    /// Replace the measurement surface with these commands
    fn repaint(&mut self, commands: Vec<DrawCommand>);
    fn loupe_repaint(&mut self, view: LoupeView);
    fn help_level_reached(&mut self, level: HelpLevel);
}

/// Modal request for a real-world length
pub trait CalibrationPrompt {
    /// `None` means the user dismissed the prompt
    fn request_length(&mut self, prompt: &str, default_value: &str) -> Option<String>;
}

impl<F> CalibrationPrompt for F
where
    F: FnMut(&str, &str) -> Option<String>,
{
    fn request_length(&mut self, prompt: &str, default_value: &str) -> Option<String> {
        self(prompt, default_value)
    }
}

/// A selected segment waiting for the user's length
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationRequest {
    pub segment_index: usize,
    pub prompt: String,
    /// Current displayed length, also used to detect an unchanged answer
    pub default_value: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalibrationOutcome {
    Applied { scale_factor: f64 },
    Unchanged,
}

/// Owns the session and applies the interaction rules to it
#[derive(Debug)]
pub struct MeasureController {
    session: MeasurementSession,
    renderer: Renderer,
    loupe: Loupe,
    commit_policy: CommitPolicy,
    calibration_policy: CalibrationPolicy,
    help: HelpTracker,
    pending: Option<CalibrationRequest>,
}

impl Default for MeasureController {
    fn default() -> Self {
        Self::new(&MeasureConfig::default(), Renderer::default())
    }
}

impl MeasureController {
    pub fn new(config: &MeasureConfig, renderer: Renderer) -> Self {
        let [width, height] = config.default_canvas_size;
        Self {
            session: MeasurementSession::new(egui::vec2(width, height)),
            renderer,
            loupe: Loupe::from_config(config),
            commit_policy: CommitPolicy::from_config(config),
            calibration_policy: CalibrationPolicy::from_config(config),
            help: HelpTracker::new(),
            pending: None,
        }
    }

    /// Announce the first help level and paint the empty surface
    pub fn start(&mut self, out: &mut dyn MeasureOutput) {
        self.reach(HelpLevel::FileLoading, out);
        self.repaint(out);
    }

    pub fn state(&self) -> InteractionState {
        if self.session.is_drawing() {
            InteractionState::Drawing
        } else {
            InteractionState::Idle
        }
    }

    pub fn session(&self) -> &MeasurementSession {
        &self.session
    }

    pub fn loupe(&self) -> &Loupe {
        &self.loupe
    }

    pub fn help_level(&self) -> Option<HelpLevel> {
        self.help.current()
    }

    pub fn pending_calibration(&self) -> Option<&CalibrationRequest> {
        self.pending.as_ref()
    }

    /// Dispatch one event. `now` is in seconds on a monotonic clock.
    pub fn handle(
        &mut self,
        event: MeasureEvent,
        now: f64,
        prompt: &mut dyn CalibrationPrompt,
        out: &mut dyn MeasureOutput,
    ) {
        match event {
            MeasureEvent::PrimaryClick { pos } => self.primary_click(pos, now, out),
            MeasureEvent::PointerMove { pos, frame_pos } => self.pointer_move(pos, frame_pos, out),
            MeasureEvent::DoubleClick { pos } => {
                self.double_click(pos, prompt, out);
            }
            MeasureEvent::Escape => self.escape(out),
            MeasureEvent::ImageLoaded(image) => self.image_loaded(image, out),
        }
    }

    /// Start a segment, or finish the current one and decide whether to keep it
    pub fn primary_click(&mut self, pos: Pos2, now: f64, out: &mut dyn MeasureOutput) {
        match self.session.take_in_progress() {
            None => {
                self.session.begin_segment(pos, now);
                log::debug!("Started segment at {pos:?}");
                self.reach(HelpLevel::FinishLine, out);
            }
            Some(mut progress) => {
                progress.segment.update_pos(pos);
                let length = progress.segment.length();
                let elapsed = now - progress.anchor_time;
                if self.commit_policy.should_commit(length, elapsed) {
                    log::debug!("Committed segment of {length:.1}px");
                    self.session.commit(progress.segment);
                    self.reach(HelpLevel::SetLength, out);
                } else {
                    log::debug!("Discarded segment of {length:.1}px after {elapsed:.3}s");
                }
            }
        }
        self.repaint(out);
    }

    pub fn pointer_move(&mut self, pos: Pos2, frame_pos: Pos2, out: &mut dyn MeasureOutput) {
        let background = self.session.background().map(|image| image.as_ref());
        if let Some(view) = self.loupe.update(pos, frame_pos, background) {
            out.loupe_repaint(view);
        }
        if self.session.update_in_progress(pos) {
            self.repaint(out);
        }
    }

    pub fn escape(&mut self, out: &mut dyn MeasureOutput) {
        if self.session.take_in_progress().is_some() {
            log::debug!("Segment cancelled");
            self.repaint(out);
        }
    }

    /// Reset the session for a new background image
    pub fn image_loaded(&mut self, image: BackgroundImageRef, out: &mut dyn MeasureOutput) {
        log::info!("Background image loaded: {}x{}", image.width(), image.height());
        self.session.load_background(image);
        self.pending = None;
        self.reach(HelpLevel::StartLine, out);
        self.repaint(out);
    }

    /// Calibrate synchronously: select, prompt, apply
    pub fn double_click(
        &mut self,
        pos: Pos2,
        prompt: &mut dyn CalibrationPrompt,
        out: &mut dyn MeasureOutput,
    ) -> CalibrationOutcome {
        let Some(request) = self.begin_calibration(pos, out) else {
            return CalibrationOutcome::Unchanged;
        };
        let answer = prompt.request_length(&request.prompt, &request.default_value);
        self.finish_calibration(answer.as_deref(), out)
    }

    /// Select the segment nearest to `pos` for calibration and paint it highlighted.
    ///
    /// Returns `None` when nothing is close enough, while drawing, or while
    /// another request is still open.
    pub fn begin_calibration(&mut self, pos: Pos2, out: &mut dyn MeasureOutput) -> Option<CalibrationRequest> {
        if self.session.is_drawing() || self.pending.is_some() {
            return None;
        }
        let (index, distance) = self.session.nearest_segment(pos)?;
        if !self.calibration_policy.selects(distance) {
            log::debug!("No segment within {}px of {pos:?}", self.calibration_policy.radius);
            return None;
        }

        let segment = self.session.committed()[index];
        let request = CalibrationRequest {
            segment_index: index,
            prompt: CALIBRATION_PROMPT.to_owned(),
            default_value: format_length(segment.scaled_length(self.session.scale_factor())),
        };
        self.pending = Some(request.clone());
        self.repaint(out);
        Some(request)
    }

    /// Apply the user's answer to the open calibration request.
    ///
    /// Unchanged, unparsable and non-positive answers keep the current scale.
    pub fn finish_calibration(&mut self, answer: Option<&str>, out: &mut dyn MeasureOutput) -> CalibrationOutcome {
        let Some(request) = self.pending.take() else {
            return CalibrationOutcome::Unchanged;
        };

        let mut outcome = CalibrationOutcome::Unchanged;
        let pixel_length = self
            .session
            .committed()
            .get(request.segment_index)
            .map(|segment| f64::from(segment.length()));

        if let (Some(answer), Some(pixel_length)) = (answer, pixel_length) {
            let value = (answer != request.default_value)
                .then(|| parse_length(answer))
                .flatten()
                .filter(|value| *value > 0.0);
            if let Some(value) = value.filter(|_| pixel_length > 0.0) {
                match self.session.set_scale_factor(value / pixel_length) {
                    Ok(()) => {
                        log::debug!("Scale factor set to {}", self.session.scale_factor());
                        outcome = CalibrationOutcome::Applied {
                            scale_factor: self.session.scale_factor(),
                        };
                    }
                    Err(err) => log::debug!("Calibration ignored: {err}"),
                }
            } else {
                log::debug!("Calibration answer {answer:?} leaves the scale unchanged");
            }
        }

        self.reach(HelpLevel::Expert, out);
        self.repaint(out);
        outcome
    }

    /// Commands for the current state, highlighting a segment under calibration
    pub fn draw_commands(&self) -> Vec<DrawCommand> {
        let highlight = self.pending.as_ref().map(|request| request.segment_index);
        self.renderer.render(&self.session, highlight)
    }

    fn repaint(&self, out: &mut dyn MeasureOutput) {
        out.repaint(self.draw_commands());
    }

    fn reach(&mut self, level: HelpLevel, out: &mut dyn MeasureOutput) {
        if let Some(level) = self.help.reach(level) {
            out.help_level_reached(level);
        }
    }
}
