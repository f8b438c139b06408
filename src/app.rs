use std::path::PathBuf;

use crate::background::BackgroundImage;
use crate::config::MeasureConfig;
use crate::file_handler::FileHandler;
use crate::help::HelpLevel;
use crate::input::InputHandler;
use crate::interaction::{CalibrationRequest, MeasureController, MeasureEvent, MeasureOutput};
use crate::loupe::LoupeView;
use crate::panels;
use crate::render::painter::EguiTextMeasure;
use crate::render::{DrawCommand, RenderStyle, Renderer};
use crate::texture_manager::TextureManager;

/// Latest output of the controller, waiting to be painted
#[derive(Debug, Default)]
pub struct MeasureSurface {
    pub commands: Vec<DrawCommand>,
    pub loupe: Option<LoupeView>,
    /// The loupe texture needs to be resampled
    pub loupe_dirty: bool,
    pub help: Option<HelpLevel>,
    /// When the current help level was first shown (egui time)
    pub help_since: Option<f64>,
}

impl MeasureOutput for MeasureSurface {
    fn repaint(&mut self, commands: Vec<DrawCommand>) {
        self.commands = commands;
    }

    fn loupe_repaint(&mut self, view: LoupeView) {
        self.loupe = Some(view);
        self.loupe_dirty = true;
    }

    fn help_level_reached(&mut self, level: HelpLevel) {
        log::debug!("Help level reached: {level:?}");
        self.help = Some(level);
        self.help_since = None;
    }
}

/// Calibration prompt shown as a modal window
#[derive(Debug, Clone)]
pub struct CalibrationDialog {
    pub request: CalibrationRequest,
    pub text: String,
    pub focused: bool,
}

impl CalibrationDialog {
    pub fn new(request: CalibrationRequest) -> Self {
        let text = request.default_value.clone();
        Self {
            request,
            text,
            focused: false,
        }
    }
}

pub struct MeasureApp {
    pub(crate) config: MeasureConfig,
    pub(crate) controller: MeasureController,
    pub(crate) surface: MeasureSurface,
    pub(crate) input: InputHandler,
    pub(crate) files: FileHandler,
    pub(crate) textures: TextureManager,
    /// Open calibration prompt; no canvas input is delivered while set
    pub(crate) dialog: Option<CalibrationDialog>,
}

impl MeasureApp {
    /// Called once before the first frame.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config_override: Option<MeasureConfig>,
        initial_image: Option<PathBuf>,
    ) -> Self {
        let config = config_override
            .or_else(|| cc.storage.and_then(|storage| eframe::get_value(storage, eframe::APP_KEY)))
            .unwrap_or_default();
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                log::warn!("Ignoring stored settings: {err}");
                MeasureConfig::default()
            }
        };

        let renderer = Renderer::new(
            RenderStyle::from_config(&config),
            Box::new(EguiTextMeasure::new(cc.egui_ctx.clone())),
        );
        let mut app = Self {
            controller: MeasureController::new(&config, renderer),
            config,
            surface: MeasureSurface::default(),
            input: InputHandler::new(),
            files: FileHandler::new(),
            textures: TextureManager::new(),
            dialog: None,
        };
        app.controller.start(&mut app.surface);

        if let Some(path) = initial_image {
            if let Some(image) = app.files.load_path(&path) {
                app.load_image(image);
            }
        }
        app
    }

    /// Measure on a new image, dropping everything measured so far
    pub fn load_image(&mut self, image: BackgroundImage) {
        self.textures.clear_cache();
        self.dialog = None;
        self.surface.loupe = None;
        self.controller.image_loaded(image.into_ref(), &mut self.surface);
    }

    /// Feed one canvas event to the controller
    pub fn dispatch(&mut self, event: MeasureEvent, now: f64) {
        match event {
            MeasureEvent::DoubleClick { pos } => {
                if let Some(request) = self.controller.begin_calibration(pos, &mut self.surface) {
                    self.dialog = Some(CalibrationDialog::new(request));
                }
            }
            event => {
                // Calibration goes through the dialog above, never through a blocking prompt
                let mut no_prompt = |_: &str, _: &str| -> Option<String> { None };
                self.controller.handle(event, now, &mut no_prompt, &mut self.surface);
            }
        }
    }
}

impl eframe::App for MeasureApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.config);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(image) = self.files.take_dropped_image(ctx) {
            self.load_image(image);
        }

        panels::top_panel(self, ctx);
        panels::help_panel(self, ctx);
        panels::central_panel(self, ctx);
        panels::calibration_dialog(self, ctx);
    }
}
