//! # eplabel - EPL2 Label Printer Library
//!
//! eplabel drives Zebra desktop label printers (GK420t and other EPL2
//! models). It provides:
//!
//! - **Object models**: Text, Code 128 bar codes, bitmaps, boxes and lines,
//!   measured in millimetres and converted to printer dots once
//! - **Protocol implementation**: EPL2 instruction builders
//! - **Encoder**: A buffered, chainable command builder with scroll column
//!   and offset placement
//! - **Layout**: Row pagination, centring, cropping and multi-column scrolls
//! - **Transport**: Device nodes, plus an in-memory sink for tests
//!
//! ## Quick Start
//!
//! ```no_run
//! use eplabel::{DeviceHandle, LabelConfig, LabelPrinter};
//!
//! let config = LabelConfig::load("label.json")?;
//! let mut printer = LabelPrinter::open(config, &DeviceHandle::new("/dev/usb/lp0"))?;
//!
//! printer.configure()?;
//! printer.print_title("RACK 12")?;
//! printer.print_text(&["S/N 00000001", "REV B"], 3, None)?;
//!
//! # Ok::<(), eplabel::LabelError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`components`] | Printable object models and alignment |
//! | [`encoder`] | Buffered EPL2 command builder |
//! | [`ir`] | Instruction list behind the encoder buffer |
//! | [`protocol`] | EPL2 instruction serializers |
//! | [`printer`] | Configuration and the high-level [`LabelPrinter`] |
//! | [`render`] | QR code bitmaps |
//! | [`transport`] | Communication backends |
//! | [`units`] | Millimetre and dot conversion |
//! | [`error`] | Error types |
//!
//! ## Supported Printers
//!
//! Tested with the Zebra GK420t (203 DPI, 8 dots/mm). Other EPL2 printers
//! should work with a matching `dots_per_mm`.

pub mod components;
pub mod encoder;
pub mod error;
pub mod ir;
pub mod printer;
pub mod protocol;
pub mod render;
pub mod transport;
pub mod units;

// Re-exports for convenience
pub use encoder::EplEncoder;
pub use error::{LabelError, LabelWarning};
pub use printer::{BarcodeOptions, LabelConfig, LabelPrinter, Placement, PrintReport};
pub use transport::{DeviceHandle, DeviceTransport, MemoryTransport, Transport};
pub use units::UnitConverter;
