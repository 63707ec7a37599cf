//! Error types
//!
//! The simulation itself never fails once constructed; errors only come from
//! bad configuration or from the output side of a driver.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid or unreadable game configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("gap range is inverted: min_gap {min} > max_gap {max}")]
    InvertedGapRange { min: f32, max: f32 },

    #[error("platform count bounds are invalid: min {min}, max {max}")]
    InvalidPlatformBounds { min: usize, max: usize },

    #[error(
        "platform width {platform_width} plus margins {margin}*2 does not fit in screen width {screen_width}"
    )]
    PlatformTooWide {
        platform_width: f32,
        margin: f32,
        screen_width: f32,
    },

    #[error("type mix for level {level} has a negative share ({normal}/{trap}/{trampoline})")]
    NegativeShare {
        level: u32,
        normal: f32,
        trap: f32,
        trampoline: f32,
    },

    #[error("type mix for level {level} sums to {sum}, expected 1.0")]
    MixSum { level: u32, sum: f32 },

    #[error("no type mix configured")]
    MissingTypeMix,

    #[error("level {index} is out of range 1..={max_level}")]
    LevelOutOfRange { index: u32, max_level: u32 },
}

/// Failure while handing a frame to a render sink
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode frame: {0}")]
    Encode(#[from] serde_json::Error),
}
