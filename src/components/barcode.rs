//! # Code 128 Bar Codes
//!
//! The printer draws the bars itself; this model only predicts how wide the
//! symbol will be so it can be centred, and crops the payload when it would
//! not fit.
//!
//! ## Width Estimate
//!
//! ```text
//! every symbol       = 11 modules
//! checksum + stop    = 2 symbols
//! digit pair "42"    = 1 symbol  (Code Set C)
//! any other char     = 1 symbol  (Code Set A/B)
//! switching code set = 1 extra symbol (includes the start symbol)
//! ```
//!
//! A scanner also needs an 11 module quiet zone on each side.

use super::Dimensions;
use crate::error::LabelError;
use crate::protocol::text::check_payload;
use crate::units::UnitConverter;

/// Width of the narrowest bar, in dots
pub const MODULE_DOT: u32 = 1;

/// Modules per Code 128 symbol
pub const SYMBOL_MODULES: u32 = 11;

/// Blank margin required either side of the bars, in modules
pub const QUIET_ZONE_MODULES: u32 = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CodeSet {
    /// Set A or B, one character per symbol
    AlphaNumeric,
    /// Set C, two digits per symbol
    DigitPairs,
}

/// Number of Code 128 symbols needed to encode `text`.
pub fn code128_symbols(text: &str) -> u32 {
    let chars: Vec<char> = text.chars().collect();
    let mut symbols = 2;
    let mut active: Option<CodeSet> = None;
    let mut index = 0;

    while index < chars.len() {
        let pair = chars[index].is_ascii_digit()
            && chars.get(index + 1).is_some_and(|c| c.is_ascii_digit());
        let wanted = if pair {
            CodeSet::DigitPairs
        } else {
            CodeSet::AlphaNumeric
        };

        symbols += if active == Some(wanted) { 1 } else { 2 };
        active = Some(wanted);
        index += if pair { 2 } else { 1 };
    }

    symbols
}

/// Predicted width of the bars for `text`, quiet zones excluded.
pub fn code128_width_dot(text: &str) -> u32 {
    code128_symbols(text) * SYMBOL_MODULES * MODULE_DOT
}

/// A Code 128 bar code.
#[derive(Debug, Clone, PartialEq)]
pub struct Barcode {
    text: String,
    cropped: bool,
    height_mm: f32,
    width_dot: u32,
    height_dot: u32,
}

impl Barcode {
    /// Create a bar code, cropping trailing characters until the bars plus
    /// both quiet zones fit in `max_width_dot`.
    ///
    /// Shrinking the modules would make the code unreadable, so the payload
    /// is shortened instead.
    ///
    /// ## Errors
    ///
    /// - `InvalidDimension` for empty text, control characters or a
    ///   non-positive height
    /// - `PayloadTooWide` when not even one character fits
    pub fn new(
        text: &str,
        height_mm: f32,
        max_width_dot: Option<u32>,
        conv: &UnitConverter,
    ) -> Result<Self, LabelError> {
        if text.is_empty() {
            return Err(LabelError::InvalidDimension("bar code text is empty".into()));
        }
        check_payload(text)?;
        if !(height_mm > 0.0) {
            return Err(LabelError::InvalidDimension(format!(
                "bar code height must be positive, got {}mm",
                height_mm
            )));
        }
        let height_dot = conv.mm_to_dot(height_mm)?;
        if height_dot == 0 {
            return Err(LabelError::InvalidDimension(format!(
                "bar code height of {}mm is less than one dot",
                height_mm
            )));
        }

        let mut payload = text.to_string();
        let mut width_dot = code128_width_dot(&payload);

        if let Some(max_width_dot) = max_width_dot {
            let fit = max_width_dot.saturating_sub(2 * QUIET_ZONE_MODULES * MODULE_DOT);
            while width_dot > fit {
                payload.pop();
                if payload.is_empty() {
                    return Err(LabelError::PayloadTooWide {
                        width_dot: code128_width_dot(text),
                        max_width_dot: fit,
                    });
                }
                width_dot = code128_width_dot(&payload);
            }
        }

        let cropped = payload != text;
        if cropped {
            log::warn!("bar code '{}' cropped to '{}' to fit the label", text, payload);
        }

        Ok(Self {
            text: payload,
            cropped,
            height_mm,
            width_dot,
            height_dot,
        })
    }

    /// The (possibly cropped) payload
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether characters were dropped to fit
    pub fn is_cropped(&self) -> bool {
        self.cropped
    }

    pub fn height_mm(&self) -> f32 {
        self.height_mm
    }

    pub fn width_dot(&self) -> u32 {
        self.width_dot
    }

    pub fn height_dot(&self) -> u32 {
        self.height_dot
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width_dot: self.width_dot,
            length_dot: self.height_dot,
        }
    }
}
