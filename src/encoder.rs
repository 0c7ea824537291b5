//! # EPL2 Command Encoder
//!
//! [`EplEncoder`] owns the command buffer for one printer. Each `encode_*`
//! or `set_*` call appends instructions (as IR [`Op`]s) and returns the
//! encoder again, so calls chain:
//!
//! ```
//! use eplabel::{EplEncoder, LabelConfig, MemoryTransport};
//!
//! let mut encoder = EplEncoder::new(LabelConfig::default(), MemoryTransport::new())?;
//! encoder
//!     .clear_command()
//!     .encode_text("HELLO", 165, 70, 3)?
//!     .encode_print_label(1)?
//!     .send_command()?;
//!
//! assert_eq!(
//!     encoder.transport().batches_text(),
//!     vec!["N\nA172,70,0,3,1,1,N,\"HELLO\"\nP1\n"]
//! );
//! # Ok::<(), eplabel::LabelError>(())
//! ```
//!
//! ## Coordinates
//!
//! Drawing calls take dots relative to the top-left corner of the label in
//! the active column. The encoder moves them onto the scroll:
//!
//! ```text
//! x' = x + (label_width + gap) × column + x_offset
//! y' = y − y_offset
//! ```
//!
//! Results below zero are clamped to the printer origin. The default
//! configuration has a 0.875 mm (7 dot) x offset, hence `A172` above.
//!
//! ## Buffer Lifecycle
//!
//! | Event | Buffer |
//! |-------|--------|
//! | construction | empty |
//! | `clear_command()` | `[N]` |
//! | `encode_*` / `set_*` | grows |
//! | `send_command()` succeeds | written, then `[N]` |
//! | `send_command()` fails | unchanged |
//! | `send_raw()` | untouched |

use crate::components::{
    BinaryImage, LineDirection, Segment, char_width_dot, outline_segments, padded_width,
};
use crate::error::LabelError;
use crate::ir::{Op, Program};
use crate::printer::{LabelConfig, PrintDirection};
use crate::protocol::barcode::QrErrorLevel;
use crate::protocol::text::{TextStyle, check_payload};
use crate::transport::Transport;
use crate::units::{UnitConverter, shift};

/// Stateful EPL2 command builder bound to one transport.
pub struct EplEncoder<T: Transport> {
    config: LabelConfig,
    conv: UnitConverter,
    column_pitch_dot: u32,
    gap_dot: u32,
    x_offset_dot: i32,
    y_offset_dot: i32,
    origin_column: u32,
    buffer: Program,
    transport: T,
}

impl<T: Transport> EplEncoder<T> {
    /// Create an encoder with an empty buffer.
    ///
    /// ## Errors
    ///
    /// Whatever [`LabelConfig::validate`] rejects.
    pub fn new(config: LabelConfig, transport: T) -> Result<Self, LabelError> {
        config.validate()?;
        let conv = config.converter();
        Ok(Self {
            column_pitch_dot: config.column_pitch_dot()?,
            gap_dot: config.gap_dot()?,
            x_offset_dot: conv.offset_to_dot(config.x_offset_mm)?,
            y_offset_dot: conv.offset_to_dot(config.y_offset_mm)?,
            conv,
            config,
            origin_column: 0,
            buffer: Program::new(),
            transport,
        })
    }

    pub fn config(&self) -> &LabelConfig {
        &self.config
    }

    /// Instructions queued since the last send or clear
    pub fn buffer(&self) -> &Program {
        &self.buffer
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    pub fn origin_column(&self) -> u32 {
        self.origin_column
    }

    /// Select the scroll column later drawing calls land in.
    pub fn set_origin_column(&mut self, column: u32) -> Result<&mut Self, LabelError> {
        if column >= self.config.scroll_columns {
            return Err(LabelError::InvalidSetting(format!(
                "column {} does not exist on a {}-column scroll",
                column, self.config.scroll_columns
            )));
        }
        self.origin_column = column;
        Ok(self)
    }

    /// Map label-relative dots to printer dots.
    fn place(&self, x: u32, y: u32) -> (u32, u32) {
        let column_x = x.saturating_add(self.column_pitch_dot * self.origin_column);
        (
            shift(column_x, self.x_offset_dot),
            shift(y, -self.y_offset_dot),
        )
    }

    // ========================================================================
    // CONFIGURATION COMMANDS
    // ========================================================================

    /// Reference point, in millimetres from the print head origin.
    pub fn set_reference(&mut self, x_mm: f32, y_mm: f32) -> Result<&mut Self, LabelError> {
        let x = self.conv.mm_to_dot(x_mm)?;
        let y = self.conv.mm_to_dot(y_mm)?;
        self.buffer.push(Op::Reference { x, y });
        Ok(self)
    }

    /// Code page 0-15, with the configured country code.
    pub fn set_codepage(&mut self, id: u8) -> Result<&mut Self, LabelError> {
        if id > 15 {
            return Err(LabelError::InvalidSetting(format!(
                "codepage {} is outside 0-15",
                id
            )));
        }
        self.buffer.push(Op::Codepage {
            id,
            country: self.config.country_code.clone(),
        });
        Ok(self)
    }

    /// Form length in millimetres; the gap comes from the configuration.
    pub fn set_form_length(&mut self, length_mm: f32) -> Result<&mut Self, LabelError> {
        let length_dot = self.conv.mm_to_dot(length_mm)?;
        if length_dot == 0 {
            return Err(LabelError::InvalidDimension(format!(
                "form length of {}mm is less than one dot",
                length_mm
            )));
        }
        self.buffer.push(Op::FormLength {
            length_dot,
            gap_dot: self.gap_dot,
        });
        Ok(self)
    }

    /// Scroll width in millimetres (every column plus the gaps between).
    pub fn set_label_width(&mut self, width_mm: f32) -> Result<&mut Self, LabelError> {
        let width_dot = self.conv.mm_to_dot(width_mm)?;
        if width_dot == 0 {
            return Err(LabelError::InvalidDimension(format!(
                "label width of {}mm is less than one dot",
                width_mm
            )));
        }
        self.buffer.push(Op::LabelWidth { width_dot });
        Ok(self)
    }

    pub fn set_print_speed(&mut self, level: u8) -> Result<&mut Self, LabelError> {
        if !(2..=5).contains(&level) {
            return Err(LabelError::InvalidSetting(format!(
                "print speed {} is outside 2-5",
                level
            )));
        }
        self.buffer.push(Op::PrintSpeed(level));
        Ok(self)
    }

    pub fn set_darkness_level(&mut self, level: u8) -> Result<&mut Self, LabelError> {
        if level > 15 {
            return Err(LabelError::InvalidSetting(format!(
                "darkness level {} is outside 0-15",
                level
            )));
        }
        self.buffer.push(Op::Darkness(level));
        Ok(self)
    }

    pub fn set_print_direction(&mut self, direction: PrintDirection) -> &mut Self {
        self.buffer.push(Op::PrintDirection(direction));
        self
    }

    /// Enable the cutter after every label, or reset all options.
    pub fn set_cut(&mut self, enabled: bool) -> &mut Self {
        if enabled {
            self.buffer.push(Op::CutAfter { quantity: 1 });
        } else {
            self.buffer.push(Op::OptionsReset);
        }
        self
    }

    /// Enable the cutter after every `quantity` labels.
    pub fn set_cut_after(&mut self, quantity: u32) -> Result<&mut Self, LabelError> {
        if quantity == 0 {
            return Err(LabelError::InvalidSetting(
                "cut quantity must be at least 1".into(),
            ));
        }
        self.buffer.push(Op::CutAfter { quantity });
        Ok(self)
    }

    /// Drop everything queued and start a new buffer with the clear
    /// instruction.
    pub fn clear_command(&mut self) -> &mut Self {
        self.buffer = Program::with_clear();
        self
    }

    /// Queue the standard setup sequence from the configuration.
    ///
    /// The reference point always comes first since the form dimensions are
    /// measured from it.
    pub fn configure(&mut self) -> Result<&mut Self, LabelError> {
        let form_length_dot = self.config.form_length_dot()?;
        let reel_width_dot = self.config.reel_width_dot()?;

        self.buffer.push(Op::Reference { x: 0, y: 0 });
        self.set_codepage(self.config.codepage)?;
        self.buffer.push(Op::FormLength {
            length_dot: form_length_dot,
            gap_dot: self.gap_dot,
        });
        self.buffer.push(Op::LabelWidth {
            width_dot: reel_width_dot,
        });
        self.set_print_speed(self.config.print_speed)?;
        self.set_darkness_level(self.config.darkness_level)?;
        self.set_print_direction(self.config.print_direction);
        Ok(self)
    }

    // ========================================================================
    // DRAWING COMMANDS
    // ========================================================================

    /// Code 128 bar code. Cropping to the label is the caller's job.
    pub fn encode_barcode_c128(
        &mut self,
        text: &str,
        start_x: u32,
        start_y: u32,
        height_dot: u32,
        show_text: bool,
    ) -> Result<&mut Self, LabelError> {
        if text.is_empty() {
            return Err(LabelError::InvalidDimension("bar code text is empty".into()));
        }
        check_payload(text)?;
        if height_dot == 0 {
            return Err(LabelError::InvalidDimension(
                "bar code height must be at least one dot".into(),
            ));
        }
        let (x, y) = self.place(start_x, start_y);
        self.buffer.push(Op::Barcode {
            x,
            y,
            height_dot,
            human_readable: show_text,
            text: text.to_string(),
        });
        Ok(self)
    }

    /// Pre-rendered QR code bitmap, sent as a graphic write.
    pub fn encode_qr_code(
        &mut self,
        symbol: &BinaryImage,
        start_x: u32,
        start_y: u32,
    ) -> Result<&mut Self, LabelError> {
        self.encode_image(symbol, start_x, start_y)
    }

    /// Pre-rendered Aztec code bitmap, sent as a graphic write.
    pub fn encode_aztec_code(
        &mut self,
        symbol: &BinaryImage,
        start_x: u32,
        start_y: u32,
    ) -> Result<&mut Self, LabelError> {
        self.encode_image(symbol, start_x, start_y)
    }

    /// Any [`BinaryImage`], packed and sent as a graphic write.
    pub fn encode_image(
        &mut self,
        image: &BinaryImage,
        start_x: u32,
        start_y: u32,
    ) -> Result<&mut Self, LabelError> {
        self.encode_binary_image(
            &image.to_bytes(),
            image.width_dot(),
            image.length_dot(),
            start_x,
            start_y,
        )
    }

    /// QR code drawn by the printer firmware. Not every model supports it.
    pub fn encode_qr_firmware(
        &mut self,
        data: &str,
        start_x: u32,
        start_y: u32,
        scale: u8,
        level: QrErrorLevel,
    ) -> Result<&mut Self, LabelError> {
        check_symbol(data, scale)?;
        let (x, y) = self.place(start_x, start_y);
        self.buffer.push(Op::QrFirmware {
            x,
            y,
            scale,
            level,
            data: data.to_string(),
        });
        Ok(self)
    }

    /// Aztec code drawn by the printer firmware. Not every model supports it.
    pub fn encode_aztec_firmware(
        &mut self,
        data: &str,
        start_x: u32,
        start_y: u32,
        scale: u8,
        correction: u8,
    ) -> Result<&mut Self, LabelError> {
        check_symbol(data, scale)?;
        let (x, y) = self.place(start_x, start_y);
        self.buffer.push(Op::AztecFirmware {
            x,
            y,
            scale,
            correction,
            data: data.to_string(),
        });
        Ok(self)
    }

    /// Packed raster: `width_dot / 8` bytes per row, `length_dot` rows,
    /// 0 bits black.
    ///
    /// ## Errors
    ///
    /// `MalformedBitmap` if the width is not a multiple of 8 or the byte
    /// count does not match.
    pub fn encode_binary_image(
        &mut self,
        data: &[u8],
        width_dot: u32,
        length_dot: u32,
        start_x: u32,
        start_y: u32,
    ) -> Result<&mut Self, LabelError> {
        if width_dot == 0 || width_dot != padded_width(width_dot) {
            return Err(LabelError::MalformedBitmap(format!(
                "raster width of {} dots is not a positive multiple of 8",
                width_dot
            )));
        }
        let bytes_per_row = width_dot / 8;
        let expected = bytes_per_row as usize * length_dot as usize;
        if length_dot == 0 || data.len() != expected {
            return Err(LabelError::MalformedBitmap(format!(
                "expected {} bytes for {}x{} dots, got {}",
                expected,
                width_dot,
                length_dot,
                data.len()
            )));
        }
        let (x, y) = self.place(start_x, start_y);
        self.buffer.push(Op::GraphicWrite {
            x,
            y,
            bytes_per_row,
            rows: length_dot,
            data: data.to_vec(),
        });
        Ok(self)
    }

    /// One line of text in the default style. No wrapping or cropping.
    pub fn encode_text(
        &mut self,
        text: &str,
        start_x: u32,
        start_y: u32,
        font_size: u8,
    ) -> Result<&mut Self, LabelError> {
        self.encode_text_styled(text, start_x, start_y, font_size, &TextStyle::default())
    }

    pub fn encode_text_styled(
        &mut self,
        text: &str,
        start_x: u32,
        start_y: u32,
        font_size: u8,
        style: &TextStyle,
    ) -> Result<&mut Self, LabelError> {
        char_width_dot(font_size)?;
        style.validate()?;
        if text.is_empty() {
            return Err(LabelError::InvalidDimension("text is empty".into()));
        }
        check_payload(text)?;
        let (x, y) = self.place(start_x, start_y);
        self.buffer.push(Op::Text {
            x,
            y,
            font_size,
            style: *style,
            text: text.to_string(),
        });
        Ok(self)
    }

    /// One straight stroke. A square outline is four calls.
    pub fn encode_line(
        &mut self,
        start_x: u32,
        start_y: u32,
        length_dot: u32,
        thickness_dot: u32,
        direction: LineDirection,
    ) -> Result<&mut Self, LabelError> {
        if length_dot == 0 || thickness_dot == 0 {
            return Err(LabelError::InvalidDimension(format!(
                "line of {}x{} dots is empty",
                length_dot, thickness_dot
            )));
        }
        let (width_dot, height_dot) = match direction {
            LineDirection::Horizontal => (length_dot, thickness_dot),
            LineDirection::Vertical => (thickness_dot, length_dot),
            LineDirection::Square => {
                return Err(LabelError::InvalidDimension(
                    "a square is four lines, not one".into(),
                ));
            }
        };
        let (x, y) = self.place(start_x, start_y);
        self.buffer.push(Op::Line {
            x,
            y,
            width_dot,
            height_dot,
        });
        Ok(self)
    }

    /// Shorthand for [`Self::encode_line`] with a precomputed segment.
    pub fn encode_segment(&mut self, segment: &Segment) -> Result<&mut Self, LabelError> {
        self.encode_line(
            segment.x,
            segment.y,
            segment.length_dot,
            segment.thickness_dot,
            segment.direction,
        )
    }

    /// Outlined rectangle: exactly four line draws (top, bottom, left,
    /// right) meeting at the corners.
    pub fn encode_box(
        &mut self,
        width_dot: u32,
        length_dot: u32,
        stroke_dot: u32,
        start_x: u32,
        start_y: u32,
    ) -> Result<&mut Self, LabelError> {
        if stroke_dot == 0 || 2 * stroke_dot > width_dot.min(length_dot) {
            return Err(LabelError::InvalidDimension(format!(
                "stroke of {} dots does not fit a {}x{} dot box",
                stroke_dot, width_dot, length_dot
            )));
        }
        let (x, y) = self.place(start_x, start_y);
        for segment in outline_segments(x, y, width_dot, length_dot, stroke_dot) {
            let (w, h) = match segment.direction {
                LineDirection::Vertical => (segment.thickness_dot, segment.length_dot),
                _ => (segment.length_dot, segment.thickness_dot),
            };
            self.buffer.push(Op::Line {
                x: segment.x,
                y: segment.y,
                width_dot: w,
                height_dot: h,
            });
        }
        Ok(self)
    }

    /// End the current label definition.
    pub fn encode_print_label(&mut self, copies: u32) -> Result<&mut Self, LabelError> {
        if copies == 0 {
            return Err(LabelError::InvalidSetting(
                "copies must be at least 1".into(),
            ));
        }
        self.buffer.push(Op::PrintLabel { copies });
        Ok(self)
    }

    /// Queue a gap sensor calibration.
    pub fn auto_sense(&mut self) -> &mut Self {
        self.buffer.push(Op::AutoSense);
        self
    }

    // ========================================================================
    // SENDING
    // ========================================================================

    /// Write the whole buffer to the transport, then reset it to `[N]`.
    ///
    /// On failure the buffer is kept and the error returned as-is; nothing
    /// is retried.
    pub fn send_command(&mut self) -> Result<&mut Self, LabelError> {
        let bytes = self.buffer.to_bytes();
        log::debug!(
            "sending {} instructions ({} bytes, {} labels)",
            self.buffer.len(),
            bytes.len(),
            self.buffer.label_count()
        );
        self.transport.write_all(&bytes)?;
        self.clear_command();
        Ok(self)
    }

    /// Write `data` straight to the transport, bypassing the buffer.
    pub fn send_raw(&mut self, data: &[u8]) -> Result<&mut Self, LabelError> {
        log::debug!("sending {} raw bytes", data.len());
        self.transport.write_all(data)?;
        Ok(self)
    }
}

fn check_symbol(data: &str, scale: u8) -> Result<(), LabelError> {
    if data.is_empty() {
        return Err(LabelError::InvalidDimension("symbol data is empty".into()));
    }
    check_payload(data)?;
    if !(1..=99).contains(&scale) {
        return Err(LabelError::InvalidSetting(format!(
            "symbol scale {} is outside 1-99",
            scale
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MemoryTransport;

    /// Default geometry without offsets, so coordinates pass through.
    fn plain_config() -> LabelConfig {
        LabelConfig {
            x_offset_mm: 0.0,
            ..Default::default()
        }
    }

    fn encoder() -> EplEncoder<MemoryTransport> {
        EplEncoder::new(plain_config(), MemoryTransport::new()).unwrap()
    }

    fn text(encoder: &EplEncoder<MemoryTransport>) -> String {
        String::from_utf8_lossy(&encoder.buffer().to_bytes()).into_owned()
    }

    #[test]
    fn test_new_buffer_is_empty() {
        assert!(encoder().buffer().is_empty());
    }

    #[test]
    fn test_clear_command() {
        let mut enc = encoder();
        enc.encode_text("X", 0, 0, 1).unwrap();
        enc.clear_command();
        assert_eq!(enc.buffer().ops, vec![Op::ClearBuffer]);
    }

    #[test]
    fn test_configure_order() {
        let mut enc = encoder();
        enc.configure().unwrap();
        assert_eq!(text(&enc), "R0,0\nI8,1,044\nQ174,16\nq400\nS3\nD13\nZB\n");
    }

    #[test]
    fn test_configure_two_columns() {
        let config = LabelConfig {
            scroll_columns: 2,
            ..plain_config()
        };
        let mut enc = EplEncoder::new(config, MemoryTransport::new()).unwrap();
        enc.configure().unwrap();
        assert!(text(&enc).contains("q816\n"));
    }

    #[test]
    fn test_setting_ranges() {
        let mut enc = encoder();
        assert!(enc.set_print_speed(1).is_err());
        assert!(enc.set_darkness_level(16).is_err());
        assert!(enc.set_codepage(16).is_err());
        assert!(enc.set_cut_after(0).is_err());
        assert!(enc.buffer().is_empty());
    }

    #[test]
    fn test_set_cut() {
        let mut enc = encoder();
        enc.set_cut(true).set_cut(false);
        assert_eq!(text(&enc), "OC1\nO\n");
    }

    #[test]
    fn test_millimetre_settings() {
        let mut enc = encoder();
        enc.set_reference(1.0, 0.5)
            .unwrap()
            .set_form_length(30.0)
            .unwrap()
            .set_label_width(104.0)
            .unwrap();
        assert_eq!(text(&enc), "R8,4\nQ240,16\nq832\n");
        assert!(enc.set_form_length(0.0).is_err());
        assert!(enc.set_label_width(-1.0).is_err());
    }

    #[test]
    fn test_aztec_bitmap_is_graphic_write() {
        let symbol = BinaryImage::from_rows(&["0101", "1010"]).unwrap();
        let mut enc = encoder();
        enc.encode_aztec_code(&symbol, 2, 3).unwrap();
        let bytes = enc.buffer().to_bytes();
        assert!(bytes.starts_with(b"GW2,3,1,2\n"));
        assert_eq!(&bytes[bytes.len() - 3..], &[0b0101_1111, 0b1010_1111, b'\n']);
    }

    #[test]
    fn test_barcode_validation() {
        let mut enc = encoder();
        assert!(matches!(
            enc.encode_barcode_c128("123", 0, 0, 0, false),
            Err(LabelError::InvalidDimension(_))
        ));
        assert!(matches!(
            enc.encode_barcode_c128("", 0, 0, 10, false),
            Err(LabelError::InvalidDimension(_))
        ));
        enc.encode_barcode_c128("123", 0, 0, 10, true).unwrap();
        assert_eq!(text(&enc), "B0,0,0,1,1,3,10,B,\"123\"\n");
    }

    #[test]
    fn test_binary_image_validation() {
        let mut enc = encoder();
        assert!(matches!(
            enc.encode_binary_image(&[0; 10], 77, 1, 0, 0),
            Err(LabelError::MalformedBitmap(_))
        ));
        assert!(matches!(
            enc.encode_binary_image(&[0; 9], 80, 1, 0, 0),
            Err(LabelError::MalformedBitmap(_))
        ));
        enc.encode_binary_image(&[0; 20], 80, 2, 3, 4).unwrap();
        assert!(enc.buffer().to_bytes().starts_with(b"GW3,4,10,2\n"));
    }

    #[test]
    fn test_box_emits_four_lines() {
        let mut enc = encoder();
        enc.encode_box(100, 50, 2, 10, 20).unwrap();
        assert_eq!(
            text(&enc),
            "LO10,20,100,2\nLO10,68,100,2\nLO10,22,2,46\nLO108,22,2,46\n"
        );
    }

    #[test]
    fn test_box_stroke_too_wide() {
        let mut enc = encoder();
        assert!(enc.encode_box(10, 10, 6, 0, 0).is_err());
        assert!(enc.encode_box(10, 10, 0, 0, 0).is_err());
    }

    #[test]
    fn test_line_directions() {
        let mut enc = encoder();
        enc.encode_line(0, 0, 100, 3, LineDirection::Horizontal)
            .unwrap()
            .encode_line(0, 0, 100, 3, LineDirection::Vertical)
            .unwrap();
        assert_eq!(text(&enc), "LO0,0,100,3\nLO0,0,3,100\n");
        assert!(enc.encode_line(0, 0, 10, 1, LineDirection::Square).is_err());
    }

    #[test]
    fn test_column_and_offset_placement() {
        let config = LabelConfig {
            scroll_columns: 2,
            x_offset_mm: 0.875,
            y_offset_mm: 1.0,
            ..Default::default()
        };
        let mut enc = EplEncoder::new(config, MemoryTransport::new()).unwrap();
        enc.set_origin_column(1).unwrap();
        enc.encode_text("A", 10, 20, 1).unwrap();
        // 10 + (400 + 16) + 7, 20 - 8
        assert_eq!(text(&enc), "A433,12,0,1,1,1,N,\"A\"\n");
        assert!(enc.set_origin_column(2).is_err());
    }

    #[test]
    fn test_negative_offset_clamps() {
        let config = LabelConfig {
            x_offset_mm: -2.0,
            ..Default::default()
        };
        let mut enc = EplEncoder::new(config, MemoryTransport::new()).unwrap();
        enc.encode_text("A", 5, 0, 1).unwrap();
        assert_eq!(text(&enc), "A0,0,0,1,1,1,N,\"A\"\n");
    }

    #[test]
    fn test_send_resets_buffer() {
        let mut enc = encoder();
        enc.clear_command()
            .encode_text("A", 0, 0, 1)
            .unwrap()
            .encode_print_label(1)
            .unwrap()
            .send_command()
            .unwrap();
        assert_eq!(enc.buffer().ops, vec![Op::ClearBuffer]);
        assert_eq!(
            enc.transport().batches_text(),
            vec!["N\nA0,0,0,1,1,1,N,\"A\"\nP1\n"]
        );
    }

    #[test]
    fn test_failed_send_keeps_buffer() {
        let mut enc = EplEncoder::new(plain_config(), MemoryTransport::failing()).unwrap();
        enc.clear_command().auto_sense();
        assert!(matches!(enc.send_command(), Err(LabelError::Transport(_))));
        assert_eq!(enc.buffer().ops, vec![Op::ClearBuffer, Op::AutoSense]);
    }

    #[test]
    fn test_send_raw_bypasses_buffer() {
        let mut enc = encoder();
        enc.clear_command().encode_text("A", 0, 0, 1).unwrap();
        enc.send_raw(b"xa\n").unwrap();
        assert_eq!(enc.transport().batches_text(), vec!["xa\n"]);
        assert_eq!(enc.buffer().len(), 2);
    }

    #[test]
    fn test_firmware_symbols() {
        let mut enc = encoder();
        enc.encode_qr_firmware("hi", 1, 2, 3, QrErrorLevel::H)
            .unwrap()
            .encode_aztec_firmware("hi", 1, 2, 4, 0)
            .unwrap();
        assert_eq!(
            text(&enc),
            "b1,2,Q,m2,s3,eH,iA,\"hi\"\nb1,2,A,d4,e0,\"hi\"\n"
        );
        assert!(enc.encode_qr_firmware("hi", 0, 0, 0, QrErrorLevel::M).is_err());
    }

    #[test]
    fn test_text_font_validation() {
        let mut enc = encoder();
        assert!(matches!(
            enc.encode_text("A", 0, 0, 6),
            Err(LabelError::UnsupportedFontSize(6))
        ));
    }
}
