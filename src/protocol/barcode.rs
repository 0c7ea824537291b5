//! # EPL2 Bar Codes
//!
//! ## 1D: Code 128 (B)
//!
//! ```text
//! B{x},{y},{rotation},{type},{narrow},{wide},{height},{B|N},"{data}"
//! ```
//!
//! Type `1` is Code 128 with automatic A/B/C subset switching. For Code 128
//! the wide bar parameter is ignored by the printer but must be present.
//! `B` prints the human readable interpretation below the bars, `N` omits
//! it.
//!
//! ## 2D: Firmware Symbols (b)
//!
//! Newer firmware can render QR and Aztec codes itself. Support varies by
//! model and these instructions are passed through untested; printing a
//! pre-rendered bitmap with `GW` works on every model.

use super::commands::line;
use super::text::quote;
use crate::components::MODULE_DOT;

/// Code 128 with automatic subset selection
pub const CODE128: u8 = 1;

/// Wide bar width, in dots
pub const WIDE_BAR_DOT: u32 = 3;

/// # Code 128 Bar Code (B)
///
/// ```
/// use eplabel::protocol::barcode;
///
/// let cmd = barcode::code128(20, 0, 40, false, "S/N:0001");
/// assert_eq!(cmd, b"B20,0,0,1,1,3,40,N,\"S/N:0001\"\n");
/// ```
pub fn code128(x: u32, y: u32, height_dot: u32, human_readable: bool, data: &str) -> Vec<u8> {
    line(&format!(
        "B{},{},0,{},{},{},{},{},{}",
        x,
        y,
        CODE128,
        MODULE_DOT,
        WIDE_BAR_DOT,
        height_dot,
        if human_readable { 'B' } else { 'N' },
        quote(data)
    ))
}

/// QR error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QrErrorLevel {
    /// ~7% recovery
    L,
    /// ~15% recovery
    #[default]
    M,
    /// ~25% recovery
    Q,
    /// ~30% recovery
    H,
}

impl QrErrorLevel {
    fn letter(self) -> char {
        match self {
            Self::L => 'L',
            Self::M => 'M',
            Self::Q => 'Q',
            Self::H => 'H',
        }
    }
}

/// # Firmware QR Code (b...Q)
///
/// ```text
/// b{x},{y},Q,m2,s{scale},e{level},iA,"{data}"
/// ```
///
/// Model 2, automatic data input mode. `scale` is 1-99, printer default 3.
pub fn qr(x: u32, y: u32, scale: u8, level: QrErrorLevel, data: &str) -> Vec<u8> {
    line(&format!(
        "b{},{},Q,m2,s{},e{},iA,{}",
        x,
        y,
        scale,
        level.letter(),
        quote(data)
    ))
}

/// # Firmware Aztec Code (b...A)
///
/// ```text
/// b{x},{y},A,d{scale},e{correction},"{data}"
/// ```
///
/// `correction` 0 lets the printer pick the symbol layers.
pub fn aztec(x: u32, y: u32, scale: u8, correction: u8, data: &str) -> Vec<u8> {
    line(&format!(
        "b{},{},A,d{},e{},{}",
        x,
        y,
        scale,
        correction,
        quote(data)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code128_human_readable() {
        assert_eq!(
            code128(0, 5, 10, true, "123"),
            b"B0,5,0,1,1,3,10,B,\"123\"\n"
        );
    }

    #[test]
    fn test_qr() {
        assert_eq!(
            qr(10, 20, 3, QrErrorLevel::M, "hi"),
            b"b10,20,Q,m2,s3,eM,iA,\"hi\"\n"
        );
    }

    #[test]
    fn test_aztec() {
        assert_eq!(aztec(1, 2, 3, 0, "x"), b"b1,2,A,d3,e0,\"x\"\n");
    }
}
