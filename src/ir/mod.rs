//! # Intermediate Representation (IR)
//!
//! The encoder's command buffer. Each encode call records an [`Op`]; the
//! buffer is compiled to EPL2 bytes only when it is sent.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────┐     ┌───────────┐
//! │  Encoder    │ ──► │     IR      │ ──► │ Codegen  │ ──► │ Transport │
//! │ (encode_*)  │     │  (Vec<Op>)  │     │ (bytes)  │     │           │
//! └─────────────┘     └─────────────┘     └──────────┘     └───────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use eplabel::ir::{Op, Program};
//!
//! let mut program = Program::with_clear();
//! program.push(Op::Line { x: 0, y: 0, width_dot: 400, height_dot: 2 });
//! program.push(Op::PrintLabel { copies: 1 });
//!
//! assert_eq!(program.label_count(), 1);
//! assert_eq!(program.to_bytes(), b"N\nLO0,0,400,2\nP1\n");
//! ```

mod codegen;
mod ops;

pub use ops::*;
