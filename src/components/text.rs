//! # Text
//!
//! Text printed with the printer's resident fonts. Character cells are fixed
//! size, so the footprint of a string is known without rendering it.
//!
//! | Font | Width (dots) | Height (dots) |
//! |------|--------------|---------------|
//! | 1 | 10 | 12 |
//! | 2 | 12 | 16 |
//! | 3 | 14 | 20 |
//! | 4 | 16 | 24 |
//! | 5 | 34 | 48 |
//!
//! Widths include the 2-dot spacing between characters.

use std::ops::RangeInclusive;

use super::Dimensions;
use crate::error::LabelError;
use crate::protocol::text::check_payload;

/// Resident font sizes
pub const FONT_SIZES: RangeInclusive<u8> = 1..=5;

/// Font used for titles
pub const TITLE_FONT: u8 = 5;

/// Width of one character cell, spacing included.
pub fn char_width_dot(font_size: u8) -> Result<u32, LabelError> {
    match font_size {
        1..=4 => Ok(8 + 2 * font_size as u32),
        5 => Ok(34),
        other => Err(LabelError::UnsupportedFontSize(other)),
    }
}

/// Height of one character cell.
pub fn char_height_dot(font_size: u8) -> Result<u32, LabelError> {
    match font_size {
        1..=4 => Ok(8 + 4 * font_size as u32),
        5 => Ok(48),
        other => Err(LabelError::UnsupportedFontSize(other)),
    }
}

/// A single line of text in one resident font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    text: String,
    font_size: u8,
    width_dot: u32,
    height_dot: u32,
}

impl Text {
    /// ## Errors
    ///
    /// - `InvalidDimension` for an empty string or one holding control
    ///   characters
    /// - `UnsupportedFontSize` outside 1-5
    pub fn new(text: impl Into<String>, font_size: u8) -> Result<Self, LabelError> {
        let text = text.into();
        let char_width = char_width_dot(font_size)?;
        let height_dot = char_height_dot(font_size)?;
        if text.is_empty() {
            return Err(LabelError::InvalidDimension("text is empty".into()));
        }
        check_payload(&text)?;
        let width_dot = char_width * text.chars().count() as u32;
        Ok(Self {
            text,
            font_size,
            width_dot,
            height_dot,
        })
    }

    /// Longest prefix of `text` that is at most `max_width_dot` wide.
    ///
    /// Cropping is per character, never per word. Returns `None` when not
    /// even one character fits.
    pub fn fitted(
        text: &str,
        font_size: u8,
        max_width_dot: u32,
    ) -> Result<Option<Self>, LabelError> {
        let fit = (max_width_dot / char_width_dot(font_size)?) as usize;
        let prefix: String = text.chars().take(fit).collect();
        if prefix.is_empty() {
            return Ok(None);
        }
        Self::new(prefix, font_size).map(Some)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font_size(&self) -> u8 {
        self.font_size
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
