//! # EPL2 Graphics
//!
//! ## Graphic Write (GW)
//!
//! Loads a 1-bit raster directly into the image buffer.
//!
//! ```text
//! GW{x},{y},{bytes_per_row},{rows}\n
//! <bytes_per_row × rows raw bytes>\n
//! ```
//!
//! Each byte holds 8 horizontal dots, MSB leftmost. A **0 bit prints black**
//! and a 1 bit leaves the dot white, the opposite of most raster formats.
//!
//! ## Line Draw Black (LO)
//!
//! ```text
//! LO{x},{y},{width},{height}
//! ```
//!
//! Fills a solid rectangle. Every line, box edge and rule is drawn with it.

use super::commands::{LINE_END, line};

/// # Graphic Write (GW)
///
/// `data` must already be packed, `bytes_per_row × rows` long.
///
/// ```
/// use eplabel::protocol::graphics;
///
/// let cmd = graphics::graphic_write(0, 0, 1, 2, &[0x0F, 0xF0]);
/// assert_eq!(cmd, b"GW0,0,1,2\n\x0F\xF0\n");
/// ```
pub fn graphic_write(x: u32, y: u32, bytes_per_row: u32, rows: u32, data: &[u8]) -> Vec<u8> {
    let mut cmd = line(&format!("GW{},{},{},{}", x, y, bytes_per_row, rows));
    cmd.reserve(data.len() + 1);
    cmd.extend_from_slice(data);
    cmd.push(LINE_END);
    cmd
}

/// # Line Draw Black (LO)
#[inline]
pub fn line_draw(x: u32, y: u32, width_dot: u32, height_dot: u32) -> Vec<u8> {
    line(&format!("LO{},{},{},{}", x, y, width_dot, height_dot))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphic_write_header_and_payload() {
        let data = [0u8; 20];
        let cmd = graphic_write(5, 6, 10, 2, &data);
        assert!(cmd.starts_with(b"GW5,6,10,2\n"));
        assert_eq!(cmd.len(), b"GW5,6,10,2\n".len() + 20 + 1);
        assert_eq!(cmd.last(), Some(&b'\n'));
    }

    #[test]
    fn test_line_draw() {
        assert_eq!(line_draw(1, 2, 300, 3), b"LO1,2,300,3\n");
    }
}
