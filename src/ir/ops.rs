//! # IR Opcodes
//!
//! The encoder does not append bytes directly: it records one [`Op`] per EPL2
//! instruction and compiles the whole buffer when it is sent.
//!
//! ```text
//! encode_* calls → Program (Vec<Op>, inspectable) → Codegen → Bytes
//! ```
//!
//! Every op maps to exactly one instruction line, so the op list is also
//! the instruction list a test can assert against.

use crate::printer::PrintDirection;
use crate::protocol::barcode::QrErrorLevel;
use crate::protocol::text::TextStyle;

/// IR opcodes, one per EPL2 instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    // ========== Image Buffer ==========
    /// Clear the image buffer (N).
    ClearBuffer,

    /// Print the buffer (P).
    PrintLabel { copies: u32 },

    // ========== Setup ==========
    /// Reference point (R).
    Reference { x: u32, y: u32 },

    /// 8-bit character set (I8).
    Codepage { id: u8, country: String },

    /// Form length and gap (Q).
    FormLength { length_dot: u32, gap_dot: u32 },

    /// Scroll width (q).
    LabelWidth { width_dot: u32 },

    /// Print speed (S).
    PrintSpeed(u8),

    /// Density (D).
    Darkness(u8),

    /// Print direction (Z).
    PrintDirection(PrintDirection),

    /// Enable the cutter every `quantity` labels (OC).
    CutAfter { quantity: u32 },

    /// Disable all options (O).
    OptionsReset,

    /// Gap sensor calibration (xa).
    AutoSense,

    // ========== Drawing ==========
    /// Code 128 bar code (B).
    Barcode {
        x: u32,
        y: u32,
        height_dot: u32,
        human_readable: bool,
        text: String,
    },

    /// Firmware QR code (b...Q).
    QrFirmware {
        x: u32,
        y: u32,
        scale: u8,
        level: QrErrorLevel,
        data: String,
    },

    /// Firmware Aztec code (b...A).
    AztecFirmware {
        x: u32,
        y: u32,
        scale: u8,
        correction: u8,
        data: String,
    },

    /// Packed 1-bit raster (GW). 0 bits print black.
    GraphicWrite {
        x: u32,
        y: u32,
        bytes_per_row: u32,
        rows: u32,
        data: Vec<u8>,
    },

    /// Resident font text (A).
    Text {
        x: u32,
        y: u32,
        font_size: u8,
        style: TextStyle,
        text: String,
    },

    /// Solid black rectangle (LO).
    Line {
        x: u32,
        y: u32,
        width_dot: u32,
        height_dot: u32,
    },
}

/// A buffered EPL2 instruction list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub ops: Vec<Op>,
}

impl Program {
    /// Create an empty program.
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Program holding only a buffer clear.
    pub fn with_clear() -> Self {
        Self {
            ops: vec![Op::ClearBuffer],
        }
    }

    pub fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    pub fn extend(&mut self, ops: impl IntoIterator<Item = Op>) {
        self.ops.extend(ops);
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Op> {
        self.ops.iter()
    }

    /// Number of labels the program commits (sum of all print copies).
    pub fn label_count(&self) -> u32 {
        self.ops
            .iter()
            .map(|op| match op {
                Op::PrintLabel { copies } => *copies,
                _ => 0,
            })
            .sum()
    }
}

impl FromIterator<Op> for Program {
    fn from_iter<T: IntoIterator<Item = Op>>(iter: T) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Program {
    type Item = Op;
    type IntoIter = std::vec::IntoIter<Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Op;
    type IntoIter = std::slice::Iter<'a, Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_new() {
        let program = Program::new();
        assert!(program.is_empty());
    }

    #[test]
    fn test_program_with_clear() {
        let program = Program::with_clear();
        assert_eq!(program.ops, vec![Op::ClearBuffer]);
    }

    #[test]
    fn test_label_count() {
        let program: Program = [
            Op::ClearBuffer,
            Op::PrintLabel { copies: 1 },
            Op::ClearBuffer,
            Op::PrintLabel { copies: 3 },
        ]
        .into_iter()
        .collect();
        assert_eq!(program.label_count(), 4);
    }

    #[test]
    fn test_op_debug() {
        let op = Op::Text {
            x: 0,
            y: 0,
            font_size: 3,
            style: TextStyle::default(),
            text: "serial".into(),
        };
        let debug = format!("{:?}", op);
        assert!(debug.contains("Text"));
        assert!(debug.contains("serial"));
    }
}
