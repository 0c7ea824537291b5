//! # Printer Transport Layer
//!
//! The encoder writes finished command batches to a [`Transport`]. The core
//! never discovers or opens devices itself: callers resolve a
//! [`DeviceHandle`] and pass the opened transport in.
//!
//! ## Available Transports
//!
//! - [`device`]: A device node (`/dev/usb/lp0`, a serial tty, ...)
//! - [`memory`]: Records batches in memory, for tests and dry runs
//!
//! Writes are synchronous and never retried: after a failed write the
//! printer may already hold part of a label.

pub mod device;
pub mod memory;

use std::path::{Path, PathBuf};

use crate::error::LabelError;

pub use device::DeviceTransport;
pub use memory::MemoryTransport;

/// Byte sink for EPL2 command batches.
pub trait Transport {
    /// Write one complete batch, blocking until it is handed to the device.
    fn write_all(&mut self, data: &[u8]) -> Result<(), LabelError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write_all(&mut self, data: &[u8]) -> Result<(), LabelError> {
        (**self).write_all(data)
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn write_all(&mut self, data: &[u8]) -> Result<(), LabelError> {
        (**self).write_all(data)
    }
}

/// Default device node of a USB label printer on Linux
pub const DEFAULT_DEVICE: &str = "/dev/usb/lp0";

/// Location of one physical printer.
///
/// A plain value: there is no process-wide "current printer". Each
/// [`crate::LabelPrinter`] owns the transport opened from its handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceHandle {
    path: PathBuf,
}

impl DeviceHandle {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the device for writing.
    pub fn open(&self) -> Result<DeviceTransport, LabelError> {
        DeviceTransport::open(self)
    }
}

impl Default for DeviceHandle {
    fn default() -> Self {
        Self::new(DEFAULT_DEVICE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_device_path() {
        assert_eq!(DeviceHandle::default().path(), Path::new("/dev/usb/lp0"));
    }

    #[test]
    fn test_boxed_transport_forwards() {
        let mut memory = MemoryTransport::new();
        {
            let mut boxed: Box<dyn Transport + '_> = Box::new(&mut memory);
            boxed.write_all(b"N\n").unwrap();
        }
        assert_eq!(memory.batches(), &[b"N\n".to_vec()]);
    }
}
