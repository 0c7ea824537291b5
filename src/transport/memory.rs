//! # In-Memory Transport
//!
//! Keeps every batch it is given. Used by the test suite and by the CLI's
//! `--dry-run` mode.

use super::Transport;
use crate::error::LabelError;

/// Records each write as a separate batch.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    batches: Vec<Vec<u8>>,
    fail: bool,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose writes always fail, like an unplugged printer.
    pub fn failing() -> Self {
        Self {
            batches: Vec::new(),
            fail: true,
        }
    }

    pub fn set_failing(&mut self, fail: bool) {
        self.fail = fail;
    }

    /// Every batch written so far, oldest first
    pub fn batches(&self) -> &[Vec<u8>] {
        &self.batches
    }

    /// Batches decoded as text (raster payloads are replaced lossily).
    pub fn batches_text(&self) -> Vec<String> {
        self.batches
            .iter()
            .map(|batch| String::from_utf8_lossy(batch).into_owned())
            .collect()
    }

    /// All batches concatenated
    pub fn bytes(&self) -> Vec<u8> {
        self.batches.concat()
    }

    pub fn clear(&mut self) {
        self.batches.clear();
    }
}

impl Transport for MemoryTransport {
    fn write_all(&mut self, data: &[u8]) -> Result<(), LabelError> {
        if self.fail {
            return Err(LabelError::Transport("Write failed: device offline".into()));
        }
        self.batches.push(data.to_vec());
        Ok(())
    }
}
