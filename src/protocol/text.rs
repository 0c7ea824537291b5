//! # EPL2 Text (A)
//!
//! Prints an ASCII string with one of the resident fonts.
//!
//! ## Protocol Details
//!
//! ```text
//! A{x},{y},{rotation},{font},{h_mul},{v_mul},{N|R},"{data}"
//! ```
//!
//! | Parameter | Range | Meaning |
//! |-----------|-------|---------|
//! | rotation | 0-3 | 0°, 90°, 180°, 270° clockwise |
//! | font | 1-5 | resident font |
//! | h_mul | 1-6 | horizontal expansion |
//! | v_mul | 1-9 | vertical expansion |
//! | N / R | | normal or reverse (white on black) |
//!
//! Inside the quotes a `"` is written as `\"` and a backslash as `\\`.
//! Control characters cannot be escaped: a line feed would end the
//! instruction and start a new one.

use super::commands::line;
use crate::error::LabelError;

/// Clockwise rotation of a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    None,
    Cw90,
    Cw180,
    Cw270,
}

impl Rotation {
    /// Parameter value for the `A` command
    pub fn code(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Cw90 => 1,
            Self::Cw180 => 2,
            Self::Cw270 => 3,
        }
    }

    /// Rotation for a multiple of 90 degrees.
    pub fn from_degrees(degrees: u32) -> Result<Self, LabelError> {
        match degrees % 360 {
            0 => Ok(Self::None),
            90 => Ok(Self::Cw90),
            180 => Ok(Self::Cw180),
            270 => Ok(Self::Cw270),
            other => Err(LabelError::InvalidSetting(format!(
                "rotation must be a multiple of 90 degrees, got {}",
                other
            ))),
        }
    }
}

/// Presentation of a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub rotation: Rotation,
    /// Horizontal multiplier (1-6)
    pub h_mul: u8,
    /// Vertical multiplier (1-9)
    pub v_mul: u8,
    /// White on black
    pub reverse: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            rotation: Rotation::None,
            h_mul: 1,
            v_mul: 1,
            reverse: false,
        }
    }
}

impl TextStyle {
    /// Reverse video variant of this style
    pub fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }

    pub fn validate(&self) -> Result<(), LabelError> {
        if !(1..=6).contains(&self.h_mul) || !(1..=9).contains(&self.v_mul) {
            return Err(LabelError::InvalidSetting(format!(
                "text expansion {}x{} is outside 1-6 x 1-9",
                self.h_mul, self.v_mul
            )));
        }
        Ok(())
    }
}

/// Reject payloads holding control characters.
pub fn check_payload(data: &str) -> Result<(), LabelError> {
    match data.chars().find(|c| c.is_control()) {
        Some(ch) => Err(LabelError::InvalidDimension(format!(
            "payload {:?} contains control character {:?}",
            data, ch
        ))),
        None => Ok(()),
    }
}

/// Quote a string payload for EPL2. Control characters are dropped.
pub fn quote(data: &str) -> String {
    let mut out = String::with_capacity(data.len() + 2);
    out.push('"');
    for ch in data.chars().filter(|c| !c.is_control()) {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

/// Encode an `A` instruction.
///
/// ```
/// use eplabel::protocol::text::{text, TextStyle};
///
/// let cmd = text(5, 10, 1, &TextStyle::default().reversed(), "S/N");
/// assert_eq!(cmd, b"A5,10,0,1,1,1,R,\"S/N\"\n");
/// ```
pub fn text(x: u32, y: u32, font_size: u8, style: &TextStyle, data: &str) -> Vec<u8> {
    line(&format!(
        "A{},{},{},{},{},{},{},{}",
        x,
        y,
        style.rotation.code(),
        font_size,
        style.h_mul,
        style.v_mul,
        if style.reverse { 'R' } else { 'N' },
        quote(data)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_default_style() {
        assert_eq!(
            text(0, 0, 3, &TextStyle::default(), "A"),
            b"A0,0,0,3,1,1,N,\"A\"\n"
        );
    }

    #[test]
    fn test_text_rotated_expanded() {
        let style = TextStyle {
            rotation: Rotation::Cw270,
            h_mul: 2,
            v_mul: 3,
            reverse: false,
        };
        assert_eq!(text(1, 2, 4, &style, "x"), b"A1,2,3,4,2,3,N,\"x\"\n");
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote(r#"5" \ 6"#), r#""5\" \\ 6""#);
    }

    #[test]
    fn test_quote_keeps_one_line() {
        assert_eq!(quote("A\nP99\r"), "\"AP99\"");
        assert_eq!(
            text(0, 0, 1, &TextStyle::default(), "A\nP99"),
            b"A0,0,0,1,1,1,N,\"AP99\"\n"
        );
    }

    #[test]
    fn test_check_payload() {
        assert!(check_payload("S/N \"42\"").is_ok());
        assert!(matches!(
            check_payload("A\nP99"),
            Err(LabelError::InvalidDimension(_))
        ));
        assert!(check_payload("tab\there").is_err());
    }

    #[test]
    fn test_rotation_from_degrees() {
        assert_eq!(Rotation::from_degrees(90).unwrap(), Rotation::Cw90);
        assert_eq!(Rotation::from_degrees(450).unwrap(), Rotation::Cw90);
        assert!(Rotation::from_degrees(45).is_err());
    }

    #[test]
    fn test_style_validation() {
        assert!(TextStyle::default().validate().is_ok());
        let style = TextStyle {
            h_mul: 7,
            ..Default::default()
        };
        assert!(style.validate().is_err());
    }
}
