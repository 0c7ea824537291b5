//! # Binary Images
//!
//! Two-level raster images sent with the `GW` graphic write command.
//!
//! ## Pixel Convention
//!
//! Unlike most printers, EPL2 raster data is *negative*:
//!
//! ```text
//! 0 = black (burn)
//! 1 = white (no burn)
//! ```
//!
//! ## Byte Alignment
//!
//! `GW` transfers whole bytes per row. An image whose width is not a multiple
//! of 8 is padded on the right with white pixels:
//!
//! ```text
//! raw width 77 → padded width 80 → 10 bytes per row
//!
//! row: 0101...0101 [111]
//!      └─ 77 px ─┘ └pad┘
//! ```

use image::GrayImage;

use super::Dimensions;
use crate::error::LabelError;
use crate::units::UnitConverter;

/// Black pixel
pub const BLACK: u8 = 0;

/// White pixel
pub const WHITE: u8 = 1;

/// A rectangular two-level bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryImage {
    /// Row-major pixels, each [`BLACK`] or [`WHITE`], `raw_width_dot` per row
    pixels: Vec<u8>,
    raw_width_dot: u32,
    width_dot: u32,
    length_dot: u32,
}

/// Round a pixel width up to the next whole byte.
#[inline]
pub fn padded_width(raw_width_dot: u32) -> u32 {
    raw_width_dot.div_ceil(8) * 8
}

impl BinaryImage {
    /// Build an image from rows of `'0'` and `'1'` characters.
    ///
    /// Carriage returns and line feeds inside a row are ignored.
    ///
    /// ## Example
    ///
    /// ```
    /// use eplabel::components::BinaryImage;
    ///
    /// let image = BinaryImage::from_rows(&["0110", "1001"]).unwrap();
    /// assert_eq!(image.width_dot(), 8);
    /// assert_eq!(image.to_bytes(), vec![0b0110_1111, 0b1001_1111]);
    /// ```
    ///
    /// ## Errors
    ///
    /// `MalformedBitmap` when empty, when rows differ in length, or on any
    /// character other than `0` and `1`.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, LabelError> {
        let mut pixels = Vec::new();
        let mut raw_width: Option<usize> = None;

        for (index, row) in rows.iter().enumerate() {
            let mut count = 0;
            for ch in row.as_ref().chars().filter(|c| *c != '\r' && *c != '\n') {
                let pixel = match ch {
                    '0' => BLACK,
                    '1' => WHITE,
                    other => {
                        return Err(LabelError::MalformedBitmap(format!(
                            "row {} contains '{}'",
                            index, other
                        )));
                    }
                };
                pixels.push(pixel);
                count += 1;
            }

            match raw_width {
                None => raw_width = Some(count),
                Some(width) if width != count => {
                    return Err(LabelError::MalformedBitmap(format!(
                        "row {} is {} pixels wide, expected {}",
                        index, count, width
                    )));
                }
                Some(_) => {}
            }
        }

        Self::from_pixels(raw_width.unwrap_or(0) as u32, pixels)
    }

    /// Build an image from row-major pixel values ([`BLACK`]/[`WHITE`]).
    pub fn from_pixels(raw_width_dot: u32, pixels: Vec<u8>) -> Result<Self, LabelError> {
        if raw_width_dot == 0 || pixels.is_empty() {
            return Err(LabelError::MalformedBitmap("image is empty".into()));
        }
        if pixels.len() % raw_width_dot as usize != 0 {
            return Err(LabelError::MalformedBitmap(format!(
                "{} pixels do not divide into rows of {}",
                pixels.len(),
                raw_width_dot
            )));
        }
        if let Some(bad) = pixels.iter().find(|p| **p > WHITE) {
            return Err(LabelError::MalformedBitmap(format!(
                "pixel value {} is neither black nor white",
                bad
            )));
        }

        let length_dot = (pixels.len() / raw_width_dot as usize) as u32;
        Ok(Self {
            pixels,
            raw_width_dot,
            width_dot: padded_width(raw_width_dot),
            length_dot,
        })
    }

    /// Threshold a grayscale image: luma below `threshold` prints black.
    pub fn from_luma(image: &GrayImage, threshold: u8) -> Result<Self, LabelError> {
        let pixels = image
            .pixels()
            .map(|p| if p.0[0] < threshold { BLACK } else { WHITE })
            .collect();
        Self::from_pixels(image.width(), pixels)
    }

    /// Width before byte padding
    pub fn raw_width_dot(&self) -> u32 {
        self.raw_width_dot
    }

    /// Width after padding, always a multiple of 8
    pub fn width_dot(&self) -> u32 {
        self.width_dot
    }

    pub fn length_dot(&self) -> u32 {
        self.length_dot
    }

    pub fn bytes_per_row(&self) -> u32 {
        self.width_dot / 8
    }

    pub fn width_mm(&self, conv: &UnitConverter) -> f32 {
        conv.dot_to_mm(self.width_dot)
    }

    pub fn length_mm(&self, conv: &UnitConverter) -> f32 {
        conv.dot_to_mm(self.length_dot)
    }

    /// Pixel at (x, y); padding columns read as white.
    pub fn pixel(&self, x: u32, y: u32) -> u8 {
        if x >= self.raw_width_dot || y >= self.length_dot {
            return WHITE;
        }
        self.pixels[(y * self.raw_width_dot + x) as usize]
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width_dot: self.width_dot,
            length_dot: self.length_dot,
        }
    }

    /// Pack into `GW` payload bytes: MSB is the leftmost pixel, rows are
    /// padded with white bits.
    pub fn to_bytes(&self) -> Vec<u8> {
        let bytes_per_row = self.bytes_per_row() as usize;
        let mut out = Vec::with_capacity(bytes_per_row * self.length_dot as usize);

        for row in self.pixels.chunks(self.raw_width_dot as usize) {
            for byte_index in 0..bytes_per_row {
                let mut byte = 0u8;
                for bit in 0..8 {
                    let x = byte_index * 8 + bit;
                    let pixel = row.get(x).copied().unwrap_or(WHITE);
                    byte = (byte << 1) | pixel;
                }
                out.push(byte);
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_padded_width() {
        assert_eq!(padded_width(1), 8);
        assert_eq!(padded_width(8), 8);
        assert_eq!(padded_width(9), 16);
        assert_eq!(padded_width(77), 80);
    }

    #[test]
    fn test_width_always_multiple_of_eight() {
        for width in 1..=40usize {
            let row = "0".repeat(width);
            let image = BinaryImage::from_rows(&[row.as_str()]).unwrap();
            assert_eq!(image.width_dot() % 8, 0);
            assert_eq!(image.width_dot(), (width as u32).div_ceil(8) * 8);
        }
    }

    #[test]
    fn test_width_77_scenario() {
        let row = "01".repeat(38) + "0";
        let image = BinaryImage::from_rows(&[row.clone(), row]).unwrap();
        assert_eq!(image.raw_width_dot(), 77);
        assert_eq!(image.width_dot(), 80);
        assert_eq!(image.bytes_per_row(), 10);
        assert_eq!(image.to_bytes().len(), 20);
    }

    #[test]
    fn test_padding_is_white() {
        let image = BinaryImage::from_rows(&["000000000"]).unwrap();
        // 9 black pixels: one full byte, then 1 black + 7 white
        assert_eq!(image.to_bytes(), vec![0x00, 0x7F]);
    }

    #[test]
    fn test_line_endings_ignored() {
        let image = BinaryImage::from_rows(&["0101\r\n", "1010\n"]).unwrap();
        assert_eq!(image.raw_width_dot(), 4);
        assert_eq!(image.length_dot(), 2);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        assert!(matches!(
            BinaryImage::from_rows(&["0101", "010"]),
            Err(LabelError::MalformedBitmap(_))
        ));
    }

    #[test]
    fn test_bad_symbol_rejected() {
        assert!(matches!(
            BinaryImage::from_rows(&["01x1"]),
            Err(LabelError::MalformedBitmap(_))
        ));
    }

    #[test]
    fn test_empty_rejected() {
        let rows: [&str; 0] = [];
        assert!(BinaryImage::from_rows(&rows).is_err());
        assert!(BinaryImage::from_rows(&[""]).is_err());
    }

    #[test]
    fn test_from_luma() {
        let mut img = GrayImage::from_pixel(3, 1, Luma([255]));
        img.put_pixel(1, 0, Luma([10]));
        let image = BinaryImage::from_luma(&img, 128).unwrap();
        assert_eq!(image.pixel(0, 0), WHITE);
        assert_eq!(image.pixel(1, 0), BLACK);
        assert_eq!(image.pixel(5, 0), WHITE);
        assert_eq!(image.to_bytes(), vec![0b1011_1111]);
    }
}
