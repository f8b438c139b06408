#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod background;
pub mod config;
pub mod error;
pub mod file_handler;
pub mod geometry;
pub mod help;
pub mod input;
pub mod interaction;
pub mod loupe;
pub mod panels;
pub mod render;
pub mod segment;
pub mod session;
pub mod texture_manager;

pub use app::MeasureApp;
pub use background::{BackgroundImage, BackgroundImageRef};
pub use config::MeasureConfig;
pub use error::{ConfigError, ImageLoadError, SessionError};
pub use help::HelpLevel;
pub use interaction::{
    CalibrationOutcome, CalibrationPrompt, InteractionState, MeasureController, MeasureEvent,
    MeasureOutput,
};
pub use loupe::{Loupe, LoupeAnchor, LoupeView};
pub use render::{DrawCommand, Renderer};
pub use segment::Segment;
pub use session::MeasurementSession;
