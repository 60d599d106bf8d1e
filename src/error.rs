//! Error types for kagami3d.
//!
//! The retargeting path itself is infallible: absent bones and missing solve
//! results are skipped, out-of-range weights are clamped. Errors exist only
//! at the resource boundaries (config, assets, capture device, detector).

use thiserror::Error;

/// Main error type for kagami3d
#[derive(Error, Debug)]
pub enum KagamiError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Avatar asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("Detector error: {0}")]
    Detector(#[from] DetectorError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid configuration value: {field} - {message}")]
    InvalidValue { field: String, message: String },
}

/// Avatar asset loading errors. A load failure never disturbs an
/// already-loaded avatar; the session for the new asset simply never starts.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to load avatar asset: {0}")]
    Load(String),

    #[error("Avatar asset has no usable skeleton: {0}")]
    NoSkeleton(String),
}

/// Capture device errors
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("No capture device available")]
    NoDevice,

    #[error("Failed to acquire capture device: {0}")]
    Acquire(String),

    #[error("Failed to grab video frame: {0}")]
    FrameGrab(String),
}

/// Detector adapter errors
#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("Detector configuration rejected: {0}")]
    Configure(String),

    #[error("Frame submission failed: {0}")]
    Submit(String),

    #[error("Failed to parse detection result: {0}")]
    ResultParse(String),
}

/// Result type alias for kagami3d operations
pub type Result<T> = std::result::Result<T, KagamiError>;
