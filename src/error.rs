use thiserror::Error;

/// Errors raised while loading or validating the measurement settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config value for `{field}`: {value}")]
    InvalidValue { field: &'static str, value: f64 },
}

/// Errors that can occur when turning a file into a background image
#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("Failed to read image file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Not an image file: {0}")]
    NotAnImage(String),

    #[error("Image has no pixels ({width}x{height})")]
    Empty { width: u32, height: u32 },
}

/// Errors from checked mutations of the measurement session
#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("Scale factor must be a positive finite number, got {0}")]
    InvalidScale(f64),
}
