//! # EPL2 Setup and Control Commands
//!
//! Instructions that configure the printer or act on the image buffer, as
//! opposed to drawing into it.
//!
//! ## Typical Job
//!
//! ```text
//! N                 clear image buffer
//! R0,0              reference point
//! I8,1,044          8-bit character set
//! Q174,16           form length + gap
//! q400              label width
//! S3                speed
//! D13               darkness
//! ZB                print direction
//! ...drawing...
//! P1                print one label
//! ```
//!
//! ## Reference
//!
//! EPL2 Programming Guide, command reference chapter.

use crate::printer::PrintDirection;

/// Terminates every instruction
pub const LINE_END: u8 = b'\n';

/// Encode one instruction line.
#[inline]
pub fn line(instruction: &str) -> Vec<u8> {
    let mut cmd = Vec::with_capacity(instruction.len() + 1);
    cmd.extend_from_slice(instruction.as_bytes());
    cmd.push(LINE_END);
    cmd
}

// ============================================================================
// IMAGE BUFFER
// ============================================================================

/// # Clear Image Buffer (N)
///
/// Clears the image buffer before building a new label. Should begin every
/// label definition.
///
/// ```
/// use eplabel::protocol::commands;
///
/// assert_eq!(commands::clear_buffer(), b"N\n");
/// ```
#[inline]
pub fn clear_buffer() -> Vec<u8> {
    line("N")
}

/// # Print (Pn)
///
/// Prints the image buffer `copies` times. This is the only instruction that
/// commits a label.
///
/// ## Protocol Details
///
/// | Format | Example |
/// |--------|---------|
/// | `P{copies}` | `P1` |
#[inline]
pub fn print_label(copies: u32) -> Vec<u8> {
    line(&format!("P{}", copies))
}

// ============================================================================
// FORM SETUP
// ============================================================================

/// # Set Reference Point (R)
///
/// Moves the origin for every following coordinate. Must be sent before the
/// form dimensions since they are measured from it.
#[inline]
pub fn reference(x: u32, y: u32) -> Vec<u8> {
    line(&format!("R{},{}", x, y))
}

/// # Character Set (I)
///
/// Selects 8-bit data, code page `id` and keyboard/country code `country`.
///
/// | Format | Example |
/// |--------|---------|
/// | `I8,{id},{country}` | `I8,1,044` |
#[inline]
pub fn codepage(id: u8, country: &str) -> Vec<u8> {
    line(&format!("I8,{},{}", id, country))
}

/// # Set Form Length (Q)
///
/// Label length and the gap to the next label, both in dots.
#[inline]
pub fn form_length(length_dot: u32, gap_dot: u32) -> Vec<u8> {
    line(&format!("Q{},{}", length_dot, gap_dot))
}

/// # Set Label Width (q)
///
/// Width of the whole scroll in dots (all columns and the gaps between them).
#[inline]
pub fn label_width(width_dot: u32) -> Vec<u8> {
    line(&format!("q{}", width_dot))
}

/// # Speed Select (S)
///
/// 2=50mm/s, 3=75mm/s, 4=100mm/s, 5=125mm/s
#[inline]
pub fn print_speed(level: u8) -> Vec<u8> {
    line(&format!("S{}", level))
}

/// # Density (D)
///
/// Burn level, 0 (lightest) to 15 (darkest).
#[inline]
pub fn darkness(level: u8) -> Vec<u8> {
    line(&format!("D{}", level))
}

/// # Print Direction (Z)
///
/// `ZT` prints from the top of the image buffer, `ZB` from the bottom.
#[inline]
pub fn print_direction(direction: PrintDirection) -> Vec<u8> {
    match direction {
        PrintDirection::Top => line("ZT"),
        PrintDirection::Bottom => line("ZB"),
    }
}

// ============================================================================
// OPTIONS
// ============================================================================

/// # Enable Cutter (OC)
///
/// Cut after every `quantity` labels. Only meaningful with the cutter
/// accessory fitted.
#[inline]
pub fn cut_after(quantity: u32) -> Vec<u8> {
    line(&format!("OC{}", quantity))
}

/// # Reset Options (O)
///
/// Disables every hardware option, the cutter included.
#[inline]
pub fn options_reset() -> Vec<u8> {
    line("O")
}

/// # Auto Sense (xa)
///
/// Feeds labels to calibrate the gap sensor for a new scroll.
#[inline]
pub fn auto_sense() -> Vec<u8> {
    line("xa")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_buffer() {
        assert_eq!(clear_buffer(), b"N\n");
    }

    #[test]
    fn test_print_label() {
        assert_eq!(print_label(1), b"P1\n");
        assert_eq!(print_label(12), b"P12\n");
    }

    #[test]
    fn test_form_setup() {
        assert_eq!(reference(0, 0), b"R0,0\n");
        assert_eq!(codepage(1, "044"), b"I8,1,044\n");
        assert_eq!(form_length(174, 16), b"Q174,16\n");
        assert_eq!(label_width(400), b"q400\n");
        assert_eq!(print_speed(3), b"S3\n");
        assert_eq!(darkness(13), b"D13\n");
    }

    #[test]
    fn test_print_direction() {
        assert_eq!(print_direction(PrintDirection::Top), b"ZT\n");
        assert_eq!(print_direction(PrintDirection::Bottom), b"ZB\n");
    }

    #[test]
    fn test_options() {
        assert_eq!(cut_after(1), b"OC1\n");
        assert_eq!(options_reset(), b"O\n");
        assert_eq!(auto_sense(), b"xa\n");
    }
}
