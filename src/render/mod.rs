//! # Rendering Module
//!
//! Turns 2D-code payloads into label bitmaps. EPL2 firmware support for
//! drawing QR codes is patchy, so symbols are rendered on the host and sent
//! as a plain graphic write.
//!
//! ## Modules
//!
//! - [`qr`]: QR codes via the `qrcode` crate
//!
//! ## Usage Example
//!
//! ```
//! use eplabel::render::{MatrixEncoder, QrRenderer};
//!
//! let symbol = QrRenderer::default().render("S/N:00000001", 3)?;
//!
//! // byte aligned and ready for EplEncoder::encode_qr_code
//! assert_eq!(symbol.width_dot() % 8, 0);
//! # Ok::<(), eplabel::LabelError>(())
//! ```

pub mod qr;

use crate::components::BinaryImage;
use crate::error::LabelError;

pub use qr::QrRenderer;

/// A 2D-code symbology that renders to a monochrome bitmap.
pub trait MatrixEncoder {
    /// Render `data` with every module drawn as `scale × scale` dots.
    fn render(&self, data: &str, scale: u32) -> Result<BinaryImage, LabelError>;
}
