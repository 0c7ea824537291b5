//! # QR Code Rendering
//!
//! ```text
//! ┌─────────────┐   QrCode    ┌───────────────┐   scale ×   ┌─────────────┐
//! │ data: &str  │ ──────────► │ module matrix │ ──────────► │ BinaryImage │
//! └─────────────┘  (EcLevel)  └───────────────┘  + quiet    └─────────────┘
//! ```
//!
//! Labels are small and often scuffed, so the default error correction is
//! the highest level (H). The quiet zone is one module wide: enough for
//! most scanners, and the label margin provides the rest.

use qrcode::{Color, EcLevel, QrCode};

use super::MatrixEncoder;
use crate::components::{BLACK, BinaryImage, WHITE};
use crate::error::LabelError;
use crate::protocol::barcode::QrErrorLevel;

/// Host-side QR code renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrRenderer {
    pub level: QrErrorLevel,
    /// Surround the symbol with one white module
    pub quiet_zone: bool,
}

impl Default for QrRenderer {
    fn default() -> Self {
        Self {
            level: QrErrorLevel::H,
            quiet_zone: true,
        }
    }
}

impl QrRenderer {
    pub fn with_level(level: QrErrorLevel) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Module matrix for `data`, `true` for dark modules, quiet zone
    /// included.
    pub fn modules(&self, data: &str) -> Result<Vec<Vec<bool>>, LabelError> {
        let ec_level = match self.level {
            QrErrorLevel::L => EcLevel::L,
            QrErrorLevel::M => EcLevel::M,
            QrErrorLevel::Q => EcLevel::Q,
            QrErrorLevel::H => EcLevel::H,
        };

        let code = QrCode::with_error_correction_level(data, ec_level)
            .map_err(|e| LabelError::Render(format!("QR code generation failed: {}", e)))?;

        let size = code.width();
        let border = usize::from(self.quiet_zone);
        let total = size + 2 * border;

        let mut rows = vec![vec![false; total]; total];
        for qy in 0..size {
            for qx in 0..size {
                rows[qy + border][qx + border] = code[(qx, qy)] == Color::Dark;
            }
        }
        Ok(rows)
    }
}

impl MatrixEncoder for QrRenderer {
    fn render(&self, data: &str, scale: u32) -> Result<BinaryImage, LabelError> {
        if scale == 0 {
            return Err(LabelError::InvalidDimension(
                "QR module scale must be at least 1".into(),
            ));
        }
        let modules = self.modules(data)?;
        let scale = scale as usize;
        let width = modules.len() * scale;

        let mut pixels = Vec::with_capacity(width * width);
        for row in &modules {
            let mut line = Vec::with_capacity(width);
            for &dark in row {
                let value = if dark { BLACK } else { WHITE };
                line.extend(std::iter::repeat(value).take(scale));
            }
            for _ in 0..scale {
                pixels.extend_from_slice(&line);
            }
        }

        BinaryImage::from_pixels(width as u32, pixels)
    }
}
