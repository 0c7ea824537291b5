//! # Printer Configuration
//!
//! This module defines hardware specifications for supported label printers
//! and the per-scroll label configuration.
//!
//! ## Supported Printers
//!
//! | Model | Resolution | Max print width |
//! |-------|------------|-----------------|
//! | GK420t | 203 DPI (8 dots/mm) | 104mm (832 dots) |
//!
//! ## Usage
//!
//! ```
//! use eplabel::printer::LabelConfig;
//!
//! let config = LabelConfig::from_json_str(r#"{ "label_width_mm": 60.0 }"#).unwrap();
//! assert_eq!(config.label_width_mm, 60.0);
//! assert_eq!(config.scroll_columns, 1); // everything else keeps its default
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::components::Label;
use crate::error::LabelError;
use crate::units::UnitConverter;

/// # Printer Model
///
/// Fixed characteristics of a label printer.
///
/// ```text
/// dots_per_mm = dpi / 25.4
///
/// For GK420t:
///   dots_per_mm = 203 / 25.4 ≈ 8
///   max width   = 832 dots = 104mm
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PrinterModel {
    /// Printer model name
    pub name: &'static str,

    /// Resolution in dots per millimetre
    pub dots_per_mm: f32,

    /// Widest printable area in dots
    pub max_width_dots: u32,
}

impl PrinterModel {
    /// # Zebra GK420t Configuration
    ///
    /// | Property | Value |
    /// |----------|-------|
    /// | Resolution | 203 DPI |
    /// | Dot size | 0.125mm |
    /// | Print width | 104mm (832 dots) |
    /// | Language | EPL2 |
    pub const GK420T: Self = Self {
        name: "Zebra GK420t",
        dots_per_mm: 8.0,
        max_width_dots: 832,
    };

    /// Calculate print width in millimeters
    #[inline]
    pub fn width_mm(&self) -> f32 {
        self.max_width_dots as f32 / self.dots_per_mm
    }
}

impl Default for PrinterModel {
    fn default() -> Self {
        Self::GK420T
    }
}

/// Which end of the image buffer the printer starts from (`Z` command).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrintDirection {
    /// Print from the top of the image buffer
    Top,
    /// Print from the bottom of the image buffer
    #[default]
    Bottom,
}

/// # Label Configuration
///
/// Describes the label scroll loaded into the printer and how the printer
/// should be driven. Built once and never mutated by the encoder.
///
/// ## Scroll Geometry
///
/// ```text
/// ├─ width ─┤gap├─ width ─┤gap├─ width ─┤   columns = 3
/// ┌─────────┐   ┌─────────┐   ┌─────────┐
/// │         │   │         │   │         │  length
/// └─────────┘   └─────────┘   └─────────┘
///                                           gap
/// ┌─────────┐   ┌─────────┐   ┌─────────┐
/// ```
///
/// Every field has a default matching a 50 × 20mm single column scroll on a
/// GK420t, so a JSON file only needs the values that differ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Width of one label
    pub label_width_mm: f32,

    /// Length (height) of one label
    pub label_length_mm: f32,

    /// Added to the length reported to the printer. Shifts the printer's
    /// perceived origin; keep it small.
    pub length_adjust_mm: f32,

    /// Number of labels side by side on the scroll
    pub scroll_columns: u32,

    /// Gap between columns and between rows of labels
    pub label_gap_mm: f32,

    /// Positive moves everything right
    pub x_offset_mm: f32,

    /// Positive moves everything up
    pub y_offset_mm: f32,

    /// Print head resolution
    pub dots_per_mm: f32,

    /// Burn level, 0 (lightest) to 15 (darkest)
    pub darkness_level: u8,

    /// 2=50mm/s, 3=75mm/s, 4=100mm/s, 5=125mm/s
    pub print_speed: u8,

    pub print_direction: PrintDirection,

    /// Whether the cutter accessory is fitted
    pub cutter_enabled: bool,

    /// Character set for the `I` command (0-15)
    pub codepage: u8,

    /// Keyboard/country code for the `I` command
    pub country_code: String,

    /// Emit `xa` when the printer is configured
    pub auto_calibrate: bool,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            label_width_mm: 50.0,
            label_length_mm: 20.0,
            length_adjust_mm: 1.75,
            scroll_columns: 1,
            label_gap_mm: 2.0,
            x_offset_mm: 0.875,
            y_offset_mm: 0.0,
            dots_per_mm: PrinterModel::GK420T.dots_per_mm,
            darkness_level: 13,
            print_speed: 3,
            print_direction: PrintDirection::Bottom,
            cutter_enabled: false,
            codepage: 1,
            country_code: "044".to_string(),
            auto_calibrate: false,
        }
    }
}

impl LabelConfig {
    /// Parse a JSON document; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, LabelError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| LabelError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LabelError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            LabelError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&text)
    }

    /// Check every field against what the printer accepts.
    pub fn validate(&self) -> Result<(), LabelError> {
        if !(self.dots_per_mm.is_finite() && self.dots_per_mm > 0.0) {
            return Err(LabelError::InvalidDimension(format!(
                "dots_per_mm must be positive, got {}",
                self.dots_per_mm
            )));
        }
        positive("label_width_mm", self.label_width_mm)?;
        positive("label_length_mm", self.label_length_mm)?;
        positive(
            "label_length_mm + length_adjust_mm",
            self.label_length_mm + self.length_adjust_mm,
        )?;
        if self.scroll_columns < 1 {
            return Err(LabelError::InvalidDimension(
                "scroll_columns must be at least 1".into(),
            ));
        }

        let gap_dot = self.gap_dot()?;
        if !(16..=240).contains(&gap_dot) {
            return Err(LabelError::InvalidSetting(format!(
                "label gap of {} dots is outside 16-240",
                gap_dot
            )));
        }
        if !(2..=5).contains(&self.print_speed) {
            return Err(LabelError::InvalidSetting(format!(
                "print speed {} is outside 2-5",
                self.print_speed
            )));
        }
        if self.darkness_level > 15 {
            return Err(LabelError::InvalidSetting(format!(
                "darkness level {} is outside 0-15",
                self.darkness_level
            )));
        }
        if self.codepage > 15 {
            return Err(LabelError::InvalidSetting(format!(
                "codepage {} is outside 0-15",
                self.codepage
            )));
        }
        self.converter().offset_to_dot(self.x_offset_mm)?;
        self.converter().offset_to_dot(self.y_offset_mm)?;

        let reel_width_dot = self.reel_width_dot()?;
        let head_width_dot = self.head_width_dot()?;
        if reel_width_dot > head_width_dot {
            return Err(LabelError::InvalidDimension(format!(
                "{} columns of {}mm need {} dots, the print head has {}",
                self.scroll_columns, self.label_width_mm, reel_width_dot, head_width_dot
            )));
        }
        Ok(())
    }

    /// Converter for this printer's resolution
    #[inline]
    pub fn converter(&self) -> UnitConverter {
        UnitConverter::new(self.dots_per_mm)
    }

    /// Geometry shared by every label on the scroll
    pub fn label(&self) -> Result<Label, LabelError> {
        Label::new(self.label_width_mm, self.label_length_mm, &self.converter())
    }

    pub fn gap_dot(&self) -> Result<u32, LabelError> {
        self.converter().mm_to_dot(self.label_gap_mm)
    }

    /// Label length sent in the `Q` command (includes the length adjustment)
    pub fn form_length_dot(&self) -> Result<u32, LabelError> {
        self.converter()
            .mm_to_dot(self.label_length_mm + self.length_adjust_mm)
    }

    /// Full scroll width sent in the `q` command
    pub fn reel_width_dot(&self) -> Result<u32, LabelError> {
        let width = self.converter().mm_to_dot(self.label_width_mm)?;
        let gap = self.gap_dot()?;
        let columns = self.scroll_columns;
        columns
            .checked_mul(width)
            .zip(columns.saturating_sub(1).checked_mul(gap))
            .and_then(|(labels, gaps)| labels.checked_add(gaps))
            .ok_or_else(|| too_wide(columns, self.label_width_mm))
    }

    /// Horizontal distance between the origins of adjacent columns
    pub fn column_pitch_dot(&self) -> Result<u32, LabelError> {
        self.converter()
            .mm_to_dot(self.label_width_mm)?
            .checked_add(self.gap_dot()?)
            .ok_or_else(|| too_wide(1, self.label_width_mm))
    }

    /// Widest printable area of a GK420t-class head at this resolution
    pub fn head_width_dot(&self) -> Result<u32, LabelError> {
        self.converter().mm_to_dot(PrinterModel::GK420T.width_mm())
    }
}

fn too_wide(columns: u32, width_mm: f32) -> LabelError {
    LabelError::InvalidDimension(format!(
        "{} columns of {}mm do not fit in a dot count",
        columns, width_mm
    ))
}

fn positive(name: &str, value: f32) -> Result<(), LabelError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LabelError::InvalidDimension(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}

// ============================================================================
// TESTS
// ============================================================================
