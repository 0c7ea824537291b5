//! # Unit Conversion
//!
//! Labels are described in millimetres, the print head addresses dots.
//!
//! ```text
//! dots = round(mm × dots_per_mm)
//!
//! For GK420t (203 DPI):
//!   dots_per_mm = 8
//!   50mm label  = 400 dots
//!   1 dot       = 0.125mm
//! ```
//!
//! Rounding is half-away-from-zero, so `0.0625mm` (half a dot) becomes 1 dot.

use crate::error::LabelError;

/// Converts millimetre measurements into device dots.
///
/// ## Example
///
/// ```
/// use eplabel::units::UnitConverter;
///
/// let conv = UnitConverter::new(8.0);
/// assert_eq!(conv.mm_to_dot(50.0).unwrap(), 400);
/// assert_eq!(conv.apply_offset(10, -2.0).unwrap(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitConverter {
    dots_per_mm: f32,
}

impl UnitConverter {
    /// Create a converter for a print head resolution.
    pub const fn new(dots_per_mm: f32) -> Self {
        Self { dots_per_mm }
    }

    /// Print head resolution
    #[inline]
    pub fn dots_per_mm(&self) -> f32 {
        self.dots_per_mm
    }

    /// Convert a non-negative millimetre value to dots.
    ///
    /// ## Errors
    ///
    /// `InvalidDimension` for negative or non-finite input.
    pub fn mm_to_dot(&self, mm: f32) -> Result<u32, LabelError> {
        if !mm.is_finite() || mm < 0.0 {
            return Err(LabelError::InvalidDimension(format!(
                "{}mm cannot be converted to dots",
                mm
            )));
        }
        Ok((mm * self.dots_per_mm).round() as u32)
    }

    /// Convert a signed offset in millimetres to a signed dot count.
    pub fn offset_to_dot(&self, mm: f32) -> Result<i32, LabelError> {
        if !mm.is_finite() {
            return Err(LabelError::InvalidDimension(format!(
                "offset {}mm is not finite",
                mm
            )));
        }
        Ok((mm * self.dots_per_mm).round() as i32)
    }

    /// Convert dots back to millimetres
    #[inline]
    pub fn dot_to_mm(&self, dots: u32) -> f32 {
        dots as f32 / self.dots_per_mm
    }

    /// Shift a dot position by an offset given in millimetres.
    ///
    /// Positions never go below the printer origin: a result under zero is
    /// clamped to 0.
    pub fn apply_offset(&self, axis_dot: u32, offset_mm: f32) -> Result<u32, LabelError> {
        let offset = self.offset_to_dot(offset_mm)?;
        Ok(shift(axis_dot, offset))
    }
}

/// Add a signed dot delta to a position, clamping at the origin.
#[inline]
pub(crate) fn shift(axis_dot: u32, delta: i32) -> u32 {
    (axis_dot as i64 + delta as i64).clamp(0, u32::MAX as i64) as u32
}

// ============================================================================
// TESTS
// ============================================================================
