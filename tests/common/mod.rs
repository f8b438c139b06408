#![allow(dead_code)]

use eframe_measure::render::{FixedAdvance, RenderStyle};
use eframe_measure::{
    BackgroundImage, DrawCommand, HelpLevel, LoupeView, MeasureConfig, MeasureController,
    MeasureOutput, Renderer,
};
use egui::Pos2;
use image::RgbaImage;

/// Records everything the controller asks to show
#[derive(Default)]
pub struct Recorder {
    pub repaints: Vec<Vec<DrawCommand>>,
    pub loupe_views: Vec<LoupeView>,
    pub help_levels: Vec<HelpLevel>,
}

impl MeasureOutput for Recorder {
    fn repaint(&mut self, commands: Vec<DrawCommand>) {
        self.repaints.push(commands);
    }

    fn loupe_repaint(&mut self, view: LoupeView) {
        self.loupe_views.push(view);
    }

    fn help_level_reached(&mut self, level: HelpLevel) {
        self.help_levels.push(level);
    }
}

impl Recorder {
    pub fn last_repaint(&self) -> &[DrawCommand] {
        self.repaints.last().map(Vec::as_slice).unwrap_or(&[])
    }
}

pub fn controller() -> MeasureController {
    let config = MeasureConfig::default();
    let renderer = Renderer::new(
        RenderStyle::from_config(&config),
        Box::new(FixedAdvance::default()),
    );
    MeasureController::new(&config, renderer)
}

pub fn test_image(width: u32, height: u32) -> BackgroundImage {
    BackgroundImage::from_rgba(RgbaImage::new(width, height)).unwrap()
}

/// Draw a line with two clicks `elapsed` seconds apart, starting at time `t0`
pub fn draw_line(
    controller: &mut MeasureController,
    out: &mut Recorder,
    from: Pos2,
    to: Pos2,
    t0: f64,
    elapsed: f64,
) {
    controller.primary_click(from, t0, out);
    controller.pointer_move(to, to, out);
    controller.primary_click(to, t0 + elapsed, out);
}

/// All label texts of a repaint, in paint order
pub fn labels(commands: &[DrawCommand]) -> Vec<String> {
    commands
        .iter()
        .filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}
