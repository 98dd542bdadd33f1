use thiserror::Error;

/// Error types for the strokefield effect core
#[derive(Error, Debug)]
pub enum FieldError {
    /// Palette has fewer entries than the generator draws from
    #[error("Palette has {len} colors, at least {required} required")]
    PaletteTooSmall { len: usize, required: usize },

    /// Color string is not `#rrggbb`
    #[error("Invalid hex color: {0:?}")]
    InvalidHexColor(String),

    /// Preset palette index out of range
    #[error("Unknown preset palette {index} ({available} available)")]
    UnknownPreset { index: usize, available: usize },

    /// Control parameter name not recognized
    #[error("Unknown control parameter: {0:?}")]
    UnknownControl(String),

    /// Viewport with a zero dimension
    #[error("Invalid viewport: {width}x{height}")]
    InvalidViewport { width: u32, height: u32 },

    /// Frame requested before the driver was started
    #[error("Frame driver has not been started")]
    DriverNotStarted,

    /// Driver started twice
    #[error("Frame driver is already running")]
    AlreadyRunning,
}

/// Result type using FieldError
pub type Result<T> = std::result::Result<T, FieldError>;
