//! # Label Geometry
//!
//! The physical printable area and alignment of objects within it.

use super::Dimensions;
use crate::error::LabelError;
use crate::units::UnitConverter;

/// Horizontal placement of an object on a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    #[default]
    Left,
    Centre,
    Right,
    /// Explicit x position in dots
    At(u32),
}

/// Vertical placement of an object on a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    #[default]
    Top,
    Middle,
    Bottom,
    /// Explicit y position in dots
    At(u32),
}

/// One label on the scroll.
///
/// All labels on a scroll share the same geometry, so a single `Label`
/// describes every column and row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Label {
    pub width_mm: f32,
    pub length_mm: f32,
    pub width_dot: u32,
    pub length_dot: u32,
}

impl Label {
    /// Create a label from its size in millimetres.
    ///
    /// ## Errors
    ///
    /// `InvalidDimension` unless both sides are positive.
    pub fn new(width_mm: f32, length_mm: f32, conv: &UnitConverter) -> Result<Self, LabelError> {
        if !(width_mm > 0.0 && length_mm > 0.0) {
            return Err(LabelError::InvalidDimension(format!(
                "label must be larger than zero, got {}x{}mm",
                width_mm, length_mm
            )));
        }
        Ok(Self {
            width_mm,
            length_mm,
            width_dot: conv.mm_to_dot(width_mm)?,
            length_dot: conv.mm_to_dot(length_mm)?,
        })
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width_dot: self.width_dot,
            length_dot: self.length_dot,
        }
    }

    /// Top-left corner, in dots, that places an object of `dims` on this
    /// label. Objects larger than the label are pinned to the origin.
    pub fn align(&self, dims: Dimensions, h: HAlign, v: VAlign) -> (u32, u32) {
        let x = match h {
            HAlign::Left => 0,
            HAlign::Centre => self.width_dot.saturating_sub(dims.width_dot) / 2,
            HAlign::Right => self.width_dot.saturating_sub(dims.width_dot),
            HAlign::At(x) => x,
        };
        let y = match v {
            VAlign::Top => 0,
            VAlign::Middle => self.length_dot.saturating_sub(dims.length_dot) / 2,
            VAlign::Bottom => self.length_dot.saturating_sub(dims.length_dot),
            VAlign::At(y) => y,
        };
        (x, y)
    }
}
