//! # Error Types
//!
//! This module defines error types used throughout the eplabel library.

use thiserror::Error;

/// Main error type for eplabel operations
#[derive(Debug, Error)]
pub enum LabelError {
    /// A millimetre or dot value is negative, zero where it must be positive,
    /// or otherwise out of range for the shape being built.
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    /// Raster data that is not rectangular, not byte aligned, or has the
    /// wrong number of bytes.
    #[error("Malformed bitmap: {0}")]
    MalformedBitmap(String),

    /// Font size outside the printer's resident fonts (1-5)
    #[error("Unsupported font size: {0} (expected 1-5)")]
    UnsupportedFontSize(u8),

    /// Content that cannot be placed on the label at all
    #[error("Payload too wide: {width_dot} dots exceeds {max_width_dot} dots")]
    PayloadTooWide { width_dot: u32, max_width_dot: u32 },

    /// The configured printer lacks the requested accessory
    #[error("Feature unavailable: {0}")]
    FeatureUnavailable(String),

    /// Out-of-range device setting (speed, darkness, codepage, gap)
    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    /// Transport-level errors (connection, I/O)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Configuration file could not be parsed
    #[error("Config error: {0}")]
    Config(String),

    /// 2D code generation failed
    #[error("Render error: {0}")]
    Render(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Something printed differently from what was asked, without failing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelWarning {
    /// Text wider than the label, printed uncropped
    #[error("'{text}' is {width_dot} dots wide, label is {max_width_dot}")]
    PayloadTooWide {
        text: String,
        width_dot: u32,
        max_width_dot: u32,
    },

    /// Trailing characters were dropped to fit the label
    #[error("'{original}' cropped to '{printed}'")]
    Cropped { original: String, printed: String },
}
