//! # Printer Module
//!
//! Printer hardware description and the high-level label printing API.
//!
//! ## Modules
//!
//! - [`config`]: Printer model constants and the label scroll configuration
//! - [`layout`]: Text row planning and the layout cursor
//! - [`label_printer`]: [`LabelPrinter`], which places objects and prints jobs

pub mod config;
pub mod label_printer;
pub mod layout;

pub use config::{LabelConfig, PrintDirection, PrinterModel};
pub use label_printer::{BarcodeOptions, LabelPrinter, Placement, PrintReport};
pub use layout::{Cursor, RowPlan};
