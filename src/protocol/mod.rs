//! # EPL2 Protocol Implementation
//!
//! This module provides low-level instruction builders for EPL2, the line
//! oriented command language of Zebra desktop label printers (GK420t,
//! LP2824, TLP2844, ...).
//!
//! ## Module Structure
//!
//! - [`commands`]: Setup and control instructions (form size, speed, print)
//! - [`text`]: Resident font text (`A`)
//! - [`barcode`]: Code 128 and firmware 2D codes (`B`, `b`)
//! - [`graphics`]: Raster graphic write and line drawing (`GW`, `LO`)
//!
//! ## Instruction Format
//!
//! One instruction per line: a one or two letter mnemonic followed by comma
//! separated decimal parameters, terminated by `\n`. String payloads are
//! double quoted. The only binary data is the `GW` raster payload, which
//! follows its header line as raw bytes.
//!
//! ## Usage Example
//!
//! ```
//! use eplabel::protocol::{commands, text};
//!
//! let mut data = Vec::new();
//! data.extend(commands::clear_buffer());
//! data.extend(text::text(10, 20, 3, &text::TextStyle::default(), "HELLO"));
//! data.extend(commands::print_label(1));
//!
//! assert_eq!(data, b"N\nA10,20,0,3,1,1,N,\"HELLO\"\nP1\n");
//! ```
//!
//! ## Protocol Reference
//!
//! Based on the "EPL2 Programming Guide" by Zebra Technologies.

pub mod barcode;
pub mod commands;
pub mod graphics;
pub mod text;
