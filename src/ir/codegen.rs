//! # Code Generation
//!
//! Converts IR programs to EPL2 bytes.

use super::ops::{Op, Program};
use crate::protocol::{barcode, commands, graphics, text};

impl Program {
    /// Compile the program to EPL2 bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for op in &self.ops {
            out.extend(op.to_bytes());
        }
        out
    }
}

impl Op {
    /// Encode this op as one instruction line.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            // ===== Image Buffer =====
            Op::ClearBuffer => commands::clear_buffer(),
            Op::PrintLabel { copies } => commands::print_label(*copies),

            // ===== Setup =====
            Op::Reference { x, y } => commands::reference(*x, *y),
            Op::Codepage { id, country } => commands::codepage(*id, country),
            Op::FormLength {
                length_dot,
                gap_dot,
            } => commands::form_length(*length_dot, *gap_dot),
            Op::LabelWidth { width_dot } => commands::label_width(*width_dot),
            Op::PrintSpeed(level) => commands::print_speed(*level),
            Op::Darkness(level) => commands::darkness(*level),
            Op::PrintDirection(direction) => commands::print_direction(*direction),
            Op::CutAfter { quantity } => commands::cut_after(*quantity),
            Op::OptionsReset => commands::options_reset(),
            Op::AutoSense => commands::auto_sense(),

            // ===== Drawing =====
            Op::Barcode {
                x,
                y,
                height_dot,
                human_readable,
                text,
            } => barcode::code128(*x, *y, *height_dot, *human_readable, text),
            Op::QrFirmware {
                x,
                y,
                scale,
                level,
                data,
            } => barcode::qr(*x, *y, *scale, *level, data),
            Op::AztecFirmware {
                x,
                y,
                scale,
                correction,
                data,
            } => barcode::aztec(*x, *y, *scale, *correction, data),
            Op::GraphicWrite {
                x,
                y,
                bytes_per_row,
                rows,
                data,
            } => graphics::graphic_write(*x, *y, *bytes_per_row, *rows, data),
            Op::Text {
                x,
                y,
                font_size,
                style,
                text: data,
            } => text::text(*x, *y, *font_size, style, data),
            Op::Line {
                x,
                y,
                width_dot,
                height_dot,
            } => graphics::line_draw(*x, *y, *width_dot, *height_dot),
        }
    }
}
